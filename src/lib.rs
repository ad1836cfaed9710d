//! Decision engines behind the wildlife conservation bot: a filterable animal
//! and product catalog, a scored quiz with badges, and a shopping cart.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod quiz;
pub mod shop;
pub mod views;

pub use error::{ConfigError, EngineError, EngineResult};
