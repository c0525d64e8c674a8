//! REST API module for gmail-rs
//!
//! JSON endpoints consumed by the web frontend

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::{router, ApiServer};
