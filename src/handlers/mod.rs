// handlers - two security tiers plus page shells
//
// public:    no session required (/api/login, /api/users, probes)
// protected: session cookie resolved to a user by `require_session`
// pages:     HTML shells behind the presence-only route guard

pub mod pages;
pub mod protected;
pub mod public;
