//! The [`RuleEngine`] applies an ordered rule set to stream titles.

use regex::Regex;
use serde::Serialize;
use tf_core::Error;

use crate::rule::TitleRule;
use crate::rule_set::RuleSet;
use crate::template::normalize_replacement;

/// Outcome of running the rule cascade over one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleRewrite {
    /// Whether any rule substituted at least once.
    pub matched: bool,
    /// The title after every rule has been applied.
    pub title: String,
    /// Space-joined disposition tokens of the matching rules, in rule order.
    pub disposition: String,
}

/// A rule paired with its compiled pattern.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: TitleRule,
    regex: Result<Regex, String>,
    replacement: String,
}

/// Rule engine holding a compiled, ordered rule set.
///
/// Patterns are compiled once at construction. A pattern that does not
/// compile is kept in place and skipped on every application, so one bad
/// rule never prevents the rest of the cascade from running.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
}

impl RuleEngine {
    /// Compile every rule of `set`, preserving order.
    pub fn new(set: RuleSet) -> Self {
        let rules = set
            .rules()
            .iter()
            .cloned()
            .map(|rule| {
                let regex = Regex::new(&rule.pattern).map_err(|e| e.to_string());
                if let Err(ref message) = regex {
                    let err = Error::rule_application(&rule.pattern, message);
                    tracing::warn!(error = %err, "title rule will be skipped");
                }
                let replacement = normalize_replacement(&rule.replace);
                CompiledRule {
                    rule,
                    regex,
                    replacement,
                }
            })
            .collect();

        Self { rules }
    }

    /// Run the cascade over `title`.
    ///
    /// Each rule replaces every match in the output of the previous rule.
    pub fn apply(&self, title: &str) -> TitleRewrite {
        let mut current = title.to_string();
        let mut matched = false;
        let mut dispositions: Vec<&str> = Vec::new();

        for compiled in &self.rules {
            let Ok(regex) = &compiled.regex else {
                tracing::trace!(pattern = %compiled.rule.pattern, "skipping invalid rule");
                continue;
            };

            let (rewritten, count) = replace_all_counted(regex, &current, &compiled.replacement);
            if count == 0 {
                continue;
            }

            tracing::trace!(
                pattern = %compiled.rule.pattern,
                from = %current,
                to = %rewritten,
                count,
                "title rule matched"
            );
            matched = true;
            current = rewritten;
            if let Some(disposition) = compiled.rule.disposition.as_deref() {
                dispositions.push(disposition);
            }
        }

        TitleRewrite {
            matched,
            title: current,
            disposition: dispositions.join(" ").trim().to_string(),
        }
    }

    /// `RuleApplication` errors for every rule whose pattern did not compile.
    pub fn invalid_rules(&self) -> Vec<Error> {
        self.rules
            .iter()
            .filter_map(|c| {
                c.regex
                    .as_ref()
                    .err()
                    .map(|message| Error::rule_application(&c.rule.pattern, message))
            })
            .collect()
    }

    /// Number of rules, including ones that failed to compile.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// `Regex::replace_all`, also returning the number of substitutions.
fn replace_all_counted(regex: &Regex, haystack: &str, replacement: &str) -> (String, usize) {
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    let mut count = 0;

    for caps in regex.captures_iter(haystack) {
        // Group 0 always participates in a match.
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&haystack[last..m.start()]);
        caps.expand(replacement, &mut out);
        last = m.end();
        count += 1;
    }
    out.push_str(&haystack[last..]);

    (out, count)
}
