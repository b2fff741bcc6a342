//! Deterministic fallback matchers.
//!
//! Each battery is an ordered list of independent rules, one regex per rule,
//! tagged with the canonical field it targets. Rules run in list order and
//! the first rule that yields a usable value for a field wins; later rules
//! for the same field are skipped. Priority is data, not control flow.

pub mod invoice;
pub mod patterns;
pub mod statement;

pub use invoice::INVOICE_RULES;
pub use statement::STATEMENT_RULES;

use regex::Regex;
use serde_json::Value;

use crate::dates::normalize_date_string;
use crate::models::statement::PaymentMode;
use findoc_extract::FieldMap;

/// How a rule's captured text becomes a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Trimmed text.
    Text,
    /// Thousands-separator-stripped decimal.
    Amount,
    /// Normalized ISO date string.
    Date,
    /// Digits only.
    Account,
    /// A member of the payment mode enumeration.
    Mode,
}

/// A single fallback matcher: a regex bound to the field it populates.
pub struct MatcherRule {
    /// Canonical field this rule targets.
    pub field: &'static str,
    /// Value coercion applied to the capture.
    pub kind: ValueKind,
    /// Pattern; capture group 1 is the value (group 0 when absent).
    pub pattern: Regex,
}

impl MatcherRule {
    pub fn new(field: &'static str, kind: ValueKind, pattern: &str) -> Self {
        Self {
            field,
            kind,
            pattern: Regex::new(pattern).expect("invalid fallback pattern"),
        }
    }
}

/// Run a rule battery over raw text, first usable match per field wins.
pub fn evaluate(text: &str, rules: &[MatcherRule]) -> FieldMap {
    let mut fields = FieldMap::new();

    for rule in rules {
        if fields.contains_key(rule.field) {
            continue;
        }
        let Some(caps) = rule.pattern.captures(text) else {
            continue;
        };
        let raw = caps
            .get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str())
            .unwrap_or_default();

        // A match that fails coercion does not claim the field; the next
        // rule in the battery still gets its chance.
        if let Some(value) = coerce(raw, rule.kind) {
            fields.insert(rule.field.to_string(), value);
        }
    }

    fields
}

fn coerce(raw: &str, kind: ValueKind) -> Option<Value> {
    match kind {
        ValueKind::Text => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| Value::String(trimmed.to_string()))
        }
        ValueKind::Amount => {
            let cleaned = raw.replace(',', "");
            let amount: f64 = cleaned.trim().parse().ok()?;
            serde_json::Number::from_f64(amount).map(Value::Number)
        }
        ValueKind::Date => normalize_date_string(raw).map(Value::String),
        ValueKind::Account => {
            let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
            (!digits.is_empty()).then(|| Value::String(digits))
        }
        ValueKind::Mode => raw
            .parse::<PaymentMode>()
            .ok()
            .map(|m| Value::String(m.to_string())),
    }
}
