//! GoodToGo server library
//!
//! Surplus-food marketplace backend: establishments publish offers,
//! consumers discover them through filtered search and buy before expiry.
//! The HTTP layer in [`api`] is a thin boundary over the services in
//! [`services`]; persistence goes through the storage ports in [`db`].

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod services;
pub mod state;

pub use error::{Error, Result};
