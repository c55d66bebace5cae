//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin: extract, validate, delegate to a core service.

pub mod device_list;
pub mod monitor;
