pub mod notes;
pub mod users;

pub use notes::{authorize, parse_note_id, Access, NotePage, NoteService};
pub use users::{Registration, UserService};
