// Data model shared by the engine and any presentation layer built on top of it.
pub mod models;
