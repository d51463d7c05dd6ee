use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

/// A caller-supplied check that runs after every built-in check has passed
/// the type gate. Returns an error message when the value is rejected.
pub type CustomCheck = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// The type vocabulary a rule can demand of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Email,
    Phone,
    Date,
    DateTime,
    Uuid,
    Time,
}

/// Per-field validation declaration. Pure data; rules never carry state
/// between evaluations and can be shared freely across requests.
#[derive(Clone, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub field_type: Option<FieldType>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<Regex>,
    pub one_of: Option<Vec<Value>>,
    pub custom: Option<CustomCheck>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn of_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    pub fn min(mut self, bound: f64) -> Self {
        self.min = Some(bound);
        self
    }

    pub fn max(mut self, bound: f64) -> Self {
        self.max = Some(bound);
        self
    }

    /// Panics on an invalid pattern; rule sets are built once at startup.
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(Regex::new(pattern).expect("field pattern must be a valid regex"));
        self
    }

    pub fn one_of<I>(mut self, allowed: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.one_of = Some(allowed.into_iter().map(Into::into).collect());
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("required", &self.required)
            .field("field_type", &self.field_type)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("one_of", &self.one_of)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Ordered field-name → rule mapping for one entity kind. Declaration order
/// drives evaluation order, so repeated validation of the same payload yields
/// identical error lists.
#[derive(Debug, Clone, Default)]
pub struct FieldConfig {
    fields: Vec<(String, ValidationRule)>,
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rule: ValidationRule) -> Self {
        self.fields.push((name.into(), rule));
        self
    }

    pub fn rule(&self, name: &str) -> Option<&ValidationRule> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rule)| rule)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rule(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }
}
