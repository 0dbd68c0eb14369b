//! Condition matcher
//!
//! Evaluates an ordered descriptor list against a visitor context in two
//! phases: every condition is evaluated first, in descriptor order, then the
//! boolean expression over the results is assembled and evaluated. Conditions
//! are never skipped because of `&&`/`||` short-circuiting, so every provider
//! a configured condition needs has run once `matches` returns.

use crate::condition::ConditionFactory;
use crate::context::VisitorContext;
use crate::error::Result;
use crate::expression::ExpressionAssembler;
use crate::provider::DataProviderLocator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};
use vista_core::ConditionDescriptor;

/// When a provider required by a condition is loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderLoadPolicy {
    /// Load for every condition that requires the provider
    #[default]
    EveryCondition,
    /// Load once per visitor context; later requests for the key are skipped
    OncePerContext,
}

/// Outcome of one evaluation with the expression that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct MatchTrace {
    /// Expression text, tokens joined with single spaces
    pub expression: String,
    /// Variable bindings in descriptor order
    pub bindings: Vec<(String, bool)>,
    pub result: bool,
}

/// Matches descriptor lists against visitor contexts
#[derive(Clone)]
pub struct ConditionMatcher {
    factory: Arc<dyn ConditionFactory>,
    providers: Arc<dyn DataProviderLocator>,
    load_policy: ProviderLoadPolicy,
}

impl ConditionMatcher {
    pub fn new(factory: Arc<dyn ConditionFactory>, providers: Arc<dyn DataProviderLocator>) -> Self {
        Self {
            factory,
            providers,
            load_policy: ProviderLoadPolicy::default(),
        }
    }

    pub fn with_load_policy(mut self, load_policy: ProviderLoadPolicy) -> Self {
        self.load_policy = load_policy;
        self
    }

    pub fn load_policy(&self) -> ProviderLoadPolicy {
        self.load_policy
    }

    /// Whether `conditions` match the visitor.
    ///
    /// Any error (unknown condition type or provider, provider failure,
    /// malformed operator/bracket combination) aborts the evaluation.
    pub async fn matches(
        &self,
        context: &mut VisitorContext,
        conditions: &[ConditionDescriptor],
    ) -> Result<bool> {
        Ok(self.evaluate(context, conditions).await?.result)
    }

    /// Like [`matches`](Self::matches), also returning the assembled
    /// expression and its bindings
    pub async fn evaluate(
        &self,
        context: &mut VisitorContext,
        conditions: &[ConditionDescriptor],
    ) -> Result<MatchTrace> {
        let mut assembler = ExpressionAssembler::new();

        for descriptor in conditions {
            let value = self.match_condition(context, descriptor).await?;
            let name = assembler.push_term(descriptor, value);
            trace!("{} = {}", name, value);
        }

        let expression = assembler.finish()?;
        let result = expression.evaluate()?;

        debug!(
            "Evaluated '{}' with {:?} => {}",
            expression.source(),
            expression.bindings(),
            result
        );

        Ok(MatchTrace {
            expression: expression.source().to_string(),
            bindings: expression.ordered_bindings(),
            result,
        })
    }

    async fn match_condition(
        &self,
        context: &mut VisitorContext,
        descriptor: &ConditionDescriptor,
    ) -> Result<bool> {
        let condition = self.factory.build(descriptor)?;

        // an unconfigured condition matches every visitor and needs no data
        if !condition.can_match() {
            debug!(
                "Condition '{}' is unconfigured, treating as match",
                descriptor.condition_type
            );
            return Ok(true);
        }

        let provider_keys = condition
            .as_provider_dependent()
            .map(|dependent| dependent.data_provider_keys())
            .unwrap_or_default();

        for key in &provider_keys {
            self.load_provider(context, key).await?;
        }

        Ok(condition.matches(context))
    }

    async fn load_provider(&self, context: &mut VisitorContext, key: &str) -> Result<()> {
        if self.load_policy == ProviderLoadPolicy::OncePerContext && context.is_provider_loaded(key) {
            trace!("Data provider '{}' already loaded, skipping", key);
            return Ok(());
        }

        let provider = self.providers.get(key)?;
        debug!("Loading data provider '{}'", key);
        provider.load(context).await?;
        context.mark_provider_loaded(key);

        Ok(())
    }
}

impl std::fmt::Debug for ConditionMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionMatcher")
            .field("load_policy", &self.load_policy)
            .finish_non_exhaustive()
    }
}
