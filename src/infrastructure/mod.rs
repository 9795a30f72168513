//! Infrastructure layer - Store adapters, services and logging

pub mod cache;
pub mod logging;
pub mod services;
