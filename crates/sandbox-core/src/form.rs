//! Named input forms.
//!
//! A [`Form`] is the set of text fields a calculator page collects. Fields
//! keep the order they were declared in, hold raw user text, and are read back
//! through the engineering-notation parser.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::units::FieldValue;

/// A single text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    /// Human-readable label, e.g. "Resistance R (Ω)".
    pub label: String,
    /// Raw text as entered.
    pub raw: String,
    /// Blank is an acceptable answer.
    pub optional: bool,
}

/// An ordered collection of named fields.
#[derive(Debug, Clone, Default)]
pub struct Form {
    title: String,
    fields: IndexMap<String, Field>,
}

impl Form {
    /// Create an empty form with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: IndexMap::new(),
        }
    }

    /// Declare a field (builder style).
    pub fn with_field(self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.declare(name.into(), label.into(), false)
    }

    /// Declare a field that may be left blank.
    pub fn with_optional(self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.declare(name.into(), label.into(), true)
    }

    fn declare(mut self, name: String, label: String, optional: bool) -> Self {
        self.fields.insert(
            name,
            Field {
                label,
                raw: String::new(),
                optional,
            },
        );
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Iterate over `(name, field)` in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Store raw text for a field.
    pub fn set(&mut self, name: &str, raw: impl Into<String>) -> Result<()> {
        let field = self
            .fields
            .get_mut(name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        field.raw = raw.into();
        Ok(())
    }

    /// Field names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    /// Label of a field, or its name when the label is empty.
    pub fn label(&self, name: &str) -> Result<String> {
        self.field(name)?;
        Ok(self.label_or_name(name))
    }

    /// Whether a field was declared with [`Form::with_optional`].
    pub fn is_optional(&self, name: &str) -> Result<bool> {
        self.field(name).map(|f| f.optional)
    }

    /// Raw text of a field.
    pub fn raw(&self, name: &str) -> Result<&str> {
        self.field(name).map(|f| f.raw.as_str())
    }

    /// Classify a field as blank, malformed or numeric.
    pub fn value(&self, name: &str) -> Result<FieldValue> {
        self.field(name).map(|f| FieldValue::parse(&f.raw))
    }

    /// A field that must hold a number.
    pub fn require(&self, name: &str) -> Result<f64> {
        match self.value(name)? {
            FieldValue::Blank => Err(Error::MissingValue {
                field: self.label_or_name(name),
            }),
            other => other.into_required(),
        }
    }

    /// A field that may be left blank.
    pub fn optional(&self, name: &str) -> Result<Option<f64>> {
        self.value(name)?.into_option()
    }

    /// A field that falls back to `default` when blank.
    pub fn or_default(&self, name: &str, default: f64) -> Result<f64> {
        Ok(self.optional(name)?.unwrap_or(default))
    }

    /// Reset every field to blank.
    pub fn clear(&mut self) {
        for field in self.fields.values_mut() {
            field.raw.clear();
        }
    }

    fn field(&self, name: &str) -> Result<&Field> {
        self.fields
            .get(name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))
    }

    fn label_or_name(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(field) if !field.label.is_empty() => field.label.clone(),
            _ => name.to_string(),
        }
    }
}
