//! Vista Core - Core types and definitions for the Vista targeting engine
//!
//! This crate provides the fundamental types used across the Vista crates:
//! - Value types for descriptor configuration and visitor data
//! - Condition descriptors and their logical operators
//! - Targeting rule and segment definitions
//! - Error types

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{ConditionDescriptor, LogicalOperator, Segment, TargetingRule};
pub use error::CoreError;
pub use types::Value;
