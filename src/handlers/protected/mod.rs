// handlers/protected - endpoints behind `require_session`
//
// Every handler here receives `Extension<SessionUser>`, already resolved
// against the store by the middleware.

pub mod account;
pub mod notes;
