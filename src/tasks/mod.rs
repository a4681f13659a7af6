//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: Removes expired cache entries at the store's sweep interval

mod sweeper;

pub use sweeper::{spawn_sweeper, SweepHandle};
