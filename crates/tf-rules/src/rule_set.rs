//! Ordered rule sets and their JSON configuration format.

use serde::{Deserialize, Serialize};
use tf_core::{Error, Result};

use crate::rule::TitleRule;

/// An ordered sequence of [`TitleRule`]s. Order is significant: each rule
/// sees the output of the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<TitleRule>,
}

impl RuleSet {
    /// Wrap an already-ordered list of rules.
    pub fn new(rules: Vec<TitleRule>) -> Self {
        Self { rules }
    }

    /// Parse a JSON rule configuration, failing open.
    ///
    /// Malformed input logs a warning and yields an empty set, which never
    /// matches anything.
    pub fn parse(raw: &str) -> Self {
        match Self::try_parse(raw) {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(error = %e, "title rules ignored");
                Self::default()
            }
        }
    }

    /// Parse a JSON rule configuration, surfacing [`Error::ConfigInvalid`].
    ///
    /// A blank string means no rules are configured and is not an error.
    pub fn try_parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str::<Vec<TitleRule>>(raw)
            .map(Self::new)
            .map_err(|e| Error::ConfigInvalid(e.to_string()))
    }

    /// The built-in title-stripping preset: any non-empty title matches and
    /// is replaced by the empty string.
    pub fn strip_all() -> Self {
        Self::new(vec![TitleRule::new("(?s).+", "")])
    }

    /// Serialize back to the JSON configuration format.
    pub fn to_json(&self) -> String {
        // A Vec of plain-string structs cannot fail to serialize.
        serde_json::to_string(&self.rules).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn rules(&self) -> &[TitleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<TitleRule>> for RuleSet {
    fn from(rules: Vec<TitleRule>) -> Self {
        Self::new(rules)
    }
}
