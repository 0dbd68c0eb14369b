//! Definitions for stored targeting data
//!
//! This module contains:
//! - Condition descriptors (one serialized condition plus its operator and brackets)
//! - Targeting rules and segments

pub mod descriptor;
pub mod rule;

pub use descriptor::{ConditionDescriptor, LogicalOperator};
pub use rule::{Segment, TargetingRule};
