//! Service Integration
//!
//! Communication with the folder structure visualizer service.

mod client;
mod messages;

pub use client::{ApiClient, ApiError, ServiceOrigin};
pub use messages::{ErrorBody, GenerateData, GenerateRequest, GenerateResponse};
