//! Order record and HTTP response models
//!
//! `Order` is the value persisted and cached by the service; the response
//! DTOs shape what the HTTP surface sends back.

pub mod order;
pub mod responses;

// Re-export commonly used types
pub use order::{Delivery, Item, Order, Payment};
pub use responses::{AcceptedResponse, HealthResponse, StatsResponse};
