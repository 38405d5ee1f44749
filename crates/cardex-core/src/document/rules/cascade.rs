//! Ordered rule lists with first-success evaluation.

use tracing::trace;

use crate::document::lines::LineSequence;
use crate::models::config::ExtractionConfig;

/// Read-only input shared by every rule of every field in one run.
#[derive(Debug, Clone)]
pub struct FieldContext<'a> {
    /// Normalized lines for the selected template.
    pub lines: &'a LineSequence,
    /// Lines joined with newlines.
    pub text: String,
    /// Extraction settings.
    pub config: &'a ExtractionConfig,
    /// Organization name extracted earlier in the run, used as an exclusion.
    pub org_name: Option<String>,
}

impl<'a> FieldContext<'a> {
    pub fn new(lines: &'a LineSequence, config: &'a ExtractionConfig) -> Self {
        Self {
            lines,
            text: lines.text(),
            config,
            org_name: None,
        }
    }

    pub fn with_org_name(mut self, org_name: Option<String>) -> Self {
        self.org_name = org_name;
        self
    }
}

/// A single extraction rule. Returns `None` to fall through.
pub type RuleFn = for<'c, 'a> fn(&'c FieldContext<'a>) -> Option<String>;

/// A rule with a name for tracing.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: RuleFn,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Ordered rules for one field; the first rule yielding a value wins.
#[derive(Debug, Clone)]
pub struct Cascade {
    field: &'static str,
    rules: Vec<Rule>,
}

impl Cascade {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            rules: Vec::new(),
        }
    }

    /// Append a rule at the lowest priority.
    pub fn rule(mut self, name: &'static str, apply: RuleFn) -> Self {
        self.rules.push(Rule { name, apply });
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    /// Evaluate rules left to right, stopping at the first non-empty value.
    pub fn evaluate(&self, ctx: &FieldContext<'_>) -> Option<String> {
        for rule in &self.rules {
            if let Some(value) = (rule.apply)(ctx).filter(|v| !v.trim().is_empty()) {
                trace!(field = self.field, rule = rule.name, "rule matched");
                return Some(value);
            }
        }
        trace!(field = self.field, "no rule matched");
        None
    }
}
