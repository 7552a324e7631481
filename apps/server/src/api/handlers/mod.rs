//! HTTP request handlers.

pub mod discovery;
pub mod establishments;
pub mod publications;
