//! # tf-rules
//!
//! Title-rewrite rules and the cascade engine that applies them.
//!
//! ## Overview
//!
//! - [`TitleRule`] -- one `pattern` / `replace` / optional `disposition` rule.
//! - [`RuleSet`] -- an ordered list of rules parsed from a JSON string.
//! - [`RuleEngine`] -- compiles a rule set once and applies it, in order, to
//!   stream titles, producing a [`TitleRewrite`].
//!
//! ```
//! use tf_rules::{RuleEngine, RuleSet};
//!
//! let rules = RuleSet::parse(
//!     r#"[{"pattern": "(?i)commentary", "replace": "Director Talk", "disposition": "+comment"}]"#,
//! );
//! let engine = RuleEngine::new(rules);
//!
//! let rewrite = engine.apply("Commentary");
//! assert!(rewrite.matched);
//! assert_eq!(rewrite.title, "Director Talk");
//! assert_eq!(rewrite.disposition, "+comment");
//! ```

pub mod engine;
pub mod rule;
pub mod rule_set;
pub mod template;

pub use engine::{RuleEngine, TitleRewrite};
pub use rule::TitleRule;
pub use rule_set::RuleSet;
