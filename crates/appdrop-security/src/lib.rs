//! # APPDROP Security
//! 
//! Session tokens, the session cookie carrier, and credential hashing.

pub mod clock;
pub mod cookie;
pub mod jwt;
pub mod password;

pub use clock::{Clock, FixedClock, SystemClock};
pub use cookie::{SameSite, SessionCarrier, SessionCookie};
pub use jwt::{SessionClaims, SessionTokenCodec, TokenError};
pub use password::PasswordService;
