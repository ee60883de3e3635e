//! Request handlers.

pub mod health;
pub mod notify;

pub use health::*;
pub use notify::*;
