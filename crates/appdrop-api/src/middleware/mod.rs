//! Pipeline stages

pub mod auth;
pub mod tenant;

pub use auth::RequireSession;
pub use tenant::ResolveTenant;
