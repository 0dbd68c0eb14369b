//! Visitor context
//!
//! Request scoped state shared by every condition and data provider taking
//! part in one visit.

mod visitor;

pub use visitor::{VisitorContext, VISITOR_ID_COOKIE_NAME};
