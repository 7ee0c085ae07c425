use super::error::RegistryError;
use super::policy::RulePolicy;
use super::rules::{
    ClearinghouseRule, CredentialExpiryRule, HoursOfServiceRule, Rule, TruthInLeasingRule,
    TwicRule,
};
use std::sync::Arc;

/// Ordered set of rules run by the eligibility engine.
///
/// Registration order is the order violations appear in a result. Rule names
/// are unique so every violation can be traced to one rule.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clearinghouse, hours of service, Truth-in-Leasing, TWIC, and CDL/medical,
    /// in that order.
    pub fn standard(policy: &RulePolicy) -> Self {
        let policy = policy.sanitized();
        Self {
            rules: vec![
                Arc::new(ClearinghouseRule::new(&policy)),
                Arc::new(HoursOfServiceRule::new(&policy)),
                Arc::new(TruthInLeasingRule),
                Arc::new(TwicRule),
                Arc::new(CredentialExpiryRule),
            ],
        }
    }

    pub fn register<R>(&mut self, rule: R) -> Result<(), RegistryError>
    where
        R: Rule + 'static,
    {
        self.register_shared(Arc::new(rule))
    }

    pub fn register_shared(&mut self, rule: Arc<dyn Rule>) -> Result<(), RegistryError> {
        if self.contains(rule.name()) {
            return Err(RegistryError::DuplicateRule(rule.name().to_string()));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Chaining form of [`RuleRegistry::register`].
    pub fn with_rule<R>(mut self, rule: R) -> Result<Self, RegistryError>
    where
        R: Rule + 'static,
    {
        self.register(rule)?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.iter()
    }

    pub(crate) fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
