//! Credential tokens and the login payloads used to obtain them.

pub mod login;
pub mod token;

pub use login::*;
pub use token::*;
