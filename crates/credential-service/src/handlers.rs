//! Request handlers.

pub mod health;
pub mod login;
pub mod register;
pub mod validate;

pub use health::*;
pub use login::*;
pub use register::*;
pub use validate::*;
