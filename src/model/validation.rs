//! Declarative field validation
//!
//! A form declares an ordered list of rules per field; the engine evaluates
//! them in order, short-circuiting on the first failure, and aggregates the
//! results into a field → message error map.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Regex used by the `email` rule factory
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Regex used by the `year` rule factory
static YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());

/// Map of field name to its current validation error message.
///
/// A field absent from the map is valid.
pub type ErrorMap = BTreeMap<String, String>;

/// Custom rule predicate: returns an error message for invalid values.
///
/// Predicates must be total. The engine does not catch panics, so a
/// predicate that cannot decide (e.g. unparseable input) should return
/// `None` rather than fail.
pub type Predicate = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// What a single rule checks
#[derive(Clone)]
pub enum RuleKind {
    /// Value must be non-empty after trimming
    Required,
    /// String length must be at least this many characters
    MinLength(usize),
    /// String length must be at most this many characters
    MaxLength(usize),
    /// Value must match the regex
    Pattern(Regex),
    /// Caller-supplied predicate
    Custom(Predicate),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Required => write!(f, "Required"),
            RuleKind::MinLength(n) => write!(f, "MinLength({})", n),
            RuleKind::MaxLength(n) => write!(f, "MaxLength({})", n),
            RuleKind::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            RuleKind::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// One declarative check applied to a single field's value
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: RuleKind,
    /// Overrides the default (or predicate-produced) message when set
    pub message: Option<String>,
}

impl Rule {
    fn new(kind: RuleKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    /// Message for a failed rule: the override if present, else `fallback`
    fn failure(&self, fallback: String) -> String {
        self.message.clone().unwrap_or(fallback)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in rule factories
// ─────────────────────────────────────────────────────────────────────────────

pub fn required(message: Option<&str>) -> Rule {
    Rule::new(RuleKind::Required, message.map(String::from))
}

pub fn min_length(n: usize, message: Option<&str>) -> Rule {
    Rule::new(RuleKind::MinLength(n), message.map(String::from))
}

pub fn max_length(n: usize, message: Option<&str>) -> Rule {
    Rule::new(RuleKind::MaxLength(n), message.map(String::from))
}

pub fn pattern(re: Regex, message: Option<&str>) -> Rule {
    Rule::new(RuleKind::Pattern(re), message.map(String::from))
}

pub fn custom<F>(f: F, message: Option<&str>) -> Rule
where
    F: Fn(&str) -> Option<String> + Send + Sync + 'static,
{
    Rule::new(RuleKind::Custom(Arc::new(f)), message.map(String::from))
}

/// Value must look like an email address
pub fn email(message: Option<&str>) -> Rule {
    Rule::new(
        RuleKind::Pattern(EMAIL_REGEX.clone()),
        Some(
            message
                .unwrap_or("Please enter a valid email address")
                .to_string(),
        ),
    )
}

/// Value must be a 4-digit year
pub fn year(message: Option<&str>) -> Rule {
    Rule::new(
        RuleKind::Pattern(YEAR_REGEX.clone()),
        Some(
            message
                .unwrap_or("Please enter a valid 4-digit year")
                .to_string(),
        ),
    )
}

/// Numeric value must be strictly greater than zero
pub fn positive_number(message: Option<&str>) -> Rule {
    custom(
        |value| match value.trim().parse::<f64>() {
            Ok(v) if v > 0.0 => None,
            Ok(_) => Some("Must be a number greater than 0".to_string()),
            // Unparseable input: the rule does not apply
            Err(_) => None,
        },
        message,
    )
}

/// Numeric value must satisfy `0 < v <= 100`
pub fn percentage(message: Option<&str>) -> Rule {
    custom(
        |value| match value.trim().parse::<f64>() {
            Ok(v) if v > 0.0 && v <= 100.0 => None,
            Ok(_) => Some("Must be between 1 and 100".to_string()),
            Err(_) => None,
        },
        message,
    )
}

/// Numeric value must satisfy `0 <= v <= max`
pub fn hours(max: f64, message: Option<&str>) -> Rule {
    custom(
        move |value| match value.trim().parse::<f64>() {
            Ok(v) if (0.0..=max).contains(&v) => None,
            Ok(_) => Some(format!("Must be between 0 and {}", max)),
            Err(_) => None,
        },
        message,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Rule sets
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered mapping from field name to that field's rule list
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    entries: Vec<(String, Vec<Rule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field and its ordered rules (builder style)
    pub fn field(mut self, name: &str, rules: Vec<Rule>) -> Self {
        self.entries.push((name.to_string(), rules));
        self
    }

    pub fn rules_for(&self, name: &str) -> Option<&[Rule]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Evaluation
// ─────────────────────────────────────────────────────────────────────────────

/// Validate one value against an ordered rule list.
///
/// Returns the first failure's message, or `None` when the field is valid.
/// Empty values (after trimming) fail only `Required`; every other rule
/// skips them, so optional fields left blank always pass.
pub fn validate_field(value: &str, rules: &[Rule]) -> Option<String> {
    let is_empty = value.trim().is_empty();

    for rule in rules {
        match &rule.kind {
            RuleKind::Required => {
                if is_empty {
                    return Some(rule.failure("This field is required".to_string()));
                }
            }
            _ if is_empty => continue,
            RuleKind::MinLength(n) => {
                if value.chars().count() < *n {
                    return Some(rule.failure(format!("Must be at least {} characters", n)));
                }
            }
            RuleKind::MaxLength(n) => {
                if value.chars().count() > *n {
                    return Some(rule.failure(format!("Must be at most {} characters", n)));
                }
            }
            RuleKind::Pattern(re) => {
                if !re.is_match(value) {
                    return Some(rule.failure("Invalid format".to_string()));
                }
            }
            RuleKind::Custom(f) => {
                if let Some(msg) = f(value) {
                    return Some(rule.failure(msg));
                }
            }
        }
    }

    None
}

/// Error state for one form: the per-field error map plus the single
/// form-level notice shown on a failed submit.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    map: ErrorMap,
    notice: Option<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a full validation pass, replacing the error map wholesale.
    ///
    /// Only fields present in `rule_set` are validated; a missing value is
    /// treated as empty. Returns `true` iff every field passed. On failure
    /// the generic form-level notice is set.
    pub fn validate_form(
        &mut self,
        values: &BTreeMap<String, String>,
        rule_set: &RuleSet,
    ) -> bool {
        let mut map = ErrorMap::new();

        for (field, rules) in rule_set.iter() {
            let value = values.get(field).map(String::as_str).unwrap_or("");
            if let Some(message) = validate_field(value, rules) {
                map.insert(field.to_string(), message);
            }
        }

        let valid = map.is_empty();
        self.map = map;
        self.notice = if valid {
            None
        } else {
            Some("Please fix the highlighted fields".to_string())
        };
        valid
    }

    /// Clear one field's error the instant its value changes.
    ///
    /// The field is not re-validated until the next full pass.
    pub fn clear_field(&mut self, field: &str) {
        self.map.remove(field);
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.map.get(field).map(String::as_str)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn map(&self) -> &ErrorMap {
        &self.map
    }
}
