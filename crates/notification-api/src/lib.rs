//! Notification service ingress: accepts a notification request and
//! enqueues it. No durable row is written here — the worker is the sole
//! writer of the delivery outcome.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult};
pub use routes::create_router;
pub use state::AppState;
