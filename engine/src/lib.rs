// Engine library root
// Indicator -> signal -> projection -> accuracy pipeline over injected price history.

pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod indicators;
pub mod models;
pub mod projection;
pub mod services;
pub mod signals;

pub use error::EngineError;
