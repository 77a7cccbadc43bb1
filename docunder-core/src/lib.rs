//! # docunder-core
//!
//! Shared error taxonomy and tracing initialization for the docunder services.
//! Transport-agnostic; used by extract-service and voice-service.

pub mod error;
pub mod logger;

pub use error::{Result, ServiceError};
pub use logger::init_tracing;
