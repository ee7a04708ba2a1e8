//! Caller-supplied subtree suppression rules.
//!
//! Some pages repeat large, known-irrelevant structures (navigation tables,
//! duplicated summary blocks). A rule recognizes such an element by one of its
//! attribute values and tells the parser to drop the element's content, or
//! to stop treating it as a container.

use serde::Deserialize;
use sieve_dom::Attribute;

/// What the parser does with an element matched by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuppressionAction {
    /// Discard every token up to and including the next `</anchor>`, and
    /// return the matched element with no children.
    SkipTo {
        /// Name of the closing tag that ends the skip.
        anchor: String,
    },
    /// Let the first match through untouched; every later match becomes an
    /// empty placeholder element. Only the start tag's `>` is consumed, so
    /// the content that follows is parsed as siblings.
    Collapse,
}

/// A `(predicate, action, max_applications)` triple.
///
/// The predicate holds when the element has an attribute whose value set is
/// exactly the single token `value`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuppressionRule {
    /// The one token the attribute value must consist of.
    pub value: String,
    /// What to do on a match.
    pub action: SuppressionAction,
    /// How many times the action may fire over one parse. `None` is
    /// unbounded.
    #[serde(default)]
    pub max_applications: Option<usize>,
}

impl SuppressionRule {
    /// Bounded structural skip: the first `max_applications` elements carrying
    /// `value` are skipped up to `</anchor>`.
    #[must_use]
    pub fn skip_to(
        value: impl Into<String>,
        anchor: impl Into<String>,
        max_applications: usize,
    ) -> Self {
        Self {
            value: value.into(),
            action: SuppressionAction::SkipTo {
                anchor: anchor.into(),
            },
            max_applications: Some(max_applications),
        }
    }

    /// Collapse every element carrying `value` after the first one.
    #[must_use]
    pub fn collapse(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            action: SuppressionAction::Collapse,
            max_applications: None,
        }
    }

    /// Limit how many times the rule may fire.
    #[must_use]
    pub const fn with_max_applications(mut self, max_applications: usize) -> Self {
        self.max_applications = Some(max_applications);
        self
    }

    /// Whether some attribute's value set is exactly `[self.value]`.
    #[must_use]
    pub fn matches(&self, attributes: &[Attribute]) -> bool {
        attributes.iter().any(|attr| attr.is_exactly(&self.value))
    }
}

/// Parser configuration supplied at construction time.
///
/// The default configuration has no rules, so the parser follows the plain
/// grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Rules evaluated in order; the first one that fires wins.
    #[serde(default)]
    pub rules: Vec<SuppressionRule>,
}

impl ParserConfig {
    /// Configuration with no rules.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: SuppressionRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The two rules used against the course-list layout this parser was first
    /// written for: skip the first two `my-infolist-body` blocks up to their
    /// enclosing table's end, and collapse the repeated right-aligned summary
    /// block.
    #[must_use]
    pub fn reference() -> Self {
        Self::new()
            .with_rule(SuppressionRule::skip_to("my-infolist-body", "table", 2))
            .with_rule(SuppressionRule::collapse("text-align:right;margin-top:5px;"))
    }
}

/// Per-parse bookkeeping for one rule.
#[derive(Debug)]
pub(crate) struct RuleState {
    pub(crate) rule: SuppressionRule,
    matches: usize,
    applications: usize,
}

impl RuleState {
    pub(crate) const fn new(rule: SuppressionRule) -> Self {
        Self {
            rule,
            matches: 0,
            applications: 0,
        }
    }

    /// Record a match and report whether the action fires for it.
    pub(crate) fn fires(&mut self) -> bool {
        self.matches += 1;
        let eligible = match self.rule.action {
            SuppressionAction::SkipTo { .. } => true,
            SuppressionAction::Collapse => self.matches > 1,
        };
        let within_limit = self
            .rule
            .max_applications
            .is_none_or(|max| self.applications < max);
        if eligible && within_limit {
            self.applications += 1;
            true
        } else {
            false
        }
    }
}
