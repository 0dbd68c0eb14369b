//! Data providers
//!
//! A data provider fetches or derives facts (geo location, device, ...) and
//! writes them into the visitor context. Conditions name the providers they
//! need by key; the locator resolves keys to provider instances.

mod registry;

pub use registry::{DataProviderLocator, DataProviderRegistry};

use crate::context::VisitorContext;
use crate::error::Result;
use async_trait::async_trait;

/// Populates visitor context data
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Load data into the context.
    ///
    /// May be called several times for the same context, so implementations
    /// should skip work when their data is already present.
    async fn load(&self, context: &mut VisitorContext) -> Result<()>;
}
