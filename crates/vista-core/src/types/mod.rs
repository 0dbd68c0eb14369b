//! Type system for Vista
//!
//! Runtime values shared by descriptor configuration and visitor data.

pub mod value;

pub use value::Value;
