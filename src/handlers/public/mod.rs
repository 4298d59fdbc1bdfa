// handlers/public - endpoints that need no session cookie
//
// Credential checks, registration, username availability and service probes.
// Handlers here must validate every input themselves.

pub mod session;
pub mod system;
pub mod users;
