pub mod response;
pub mod route_guard;
pub mod session;

pub use response::{ApiResponse, ApiResult};
pub use route_guard::{guard_decision, route_guard, GuardDecision, LANDING_PATH, LOGIN_PATH, REGISTER_PATH};
pub use session::require_session;
