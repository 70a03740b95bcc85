//! The [`TitleRule`] struct: one step of the title cascade.

use serde::{Deserialize, Deserializer, Serialize};

/// A title-rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRule {
    /// Regular expression matched against the current title. Use inline
    /// flags such as `(?i)` for case-insensitive matching.
    pub pattern: String,
    /// Replacement template; `$1`, `${name}` and Python-style `\1` all work.
    pub replace: String,
    /// Disposition token(s) added when this rule matches (e.g. `+comment`).
    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub disposition: Option<String>,
}

impl TitleRule {
    /// Create a rule without a disposition.
    pub fn new(pattern: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replace: replace.into(),
            disposition: None,
        }
    }

    /// Attach a disposition token to this rule.
    pub fn with_disposition(mut self, disposition: impl Into<String>) -> Self {
        self.disposition = Some(disposition.into()).filter(|d| !d.is_empty());
        self
    }
}

/// `null` and `""` both mean "no disposition".
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|d| !d.is_empty()))
}
