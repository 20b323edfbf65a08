//! Declarative input forms.
//!
//! Each form is a static [`FormSpec`] listing its [`FieldSpec`]s. The single
//! [`validate`] function checks raw string input against a [`FormSpec`] and returns
//! either the validated values or a per-field error map. Invalid input is a
//! normal outcome here, never an `Err` from the program's point of view.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

pub mod definitions;

pub use definitions::{DELETE_FORM, FEEDBACK_FORM, LOGIN_FORM, REGISTER_FORM};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address.";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern compiles")
});

/// Raw submitted fields, keyed by field name.
pub type RawInput = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub email: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            min_len: None,
            max_len: None,
            email: false,
        }
    }

    pub const fn max(self, max: usize) -> Self {
        Self {
            max_len: Some(max),
            ..self
        }
    }

    pub const fn between(self, min: usize, max: usize) -> Self {
        Self {
            min_len: Some(min),
            max_len: Some(max),
            ..self
        }
    }

    pub const fn email(self) -> Self {
        Self {
            email: true,
            ..self
        }
    }

    fn check(&self, value: &str) -> Vec<String> {
        let mut errors = Vec::new();
        let len = value.chars().count();
        let too_short = self.min_len.is_some_and(|min| len < min);
        let too_long = self.max_len.is_some_and(|max| len > max);
        if too_short || too_long {
            errors.push(length_message(self.min_len, self.max_len));
        }
        if self.email && !EMAIL_RE.is_match(value) {
            errors.push(INVALID_EMAIL_MESSAGE.to_string());
        }
        errors
    }
}

fn length_message(min: Option<usize>, max: Option<usize>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => {
            format!("Field must be between {min} and {max} characters long.")
        }
        (Some(min), None) => format!("Field must be at least {min} characters long."),
        (None, Some(max)) => format!("Field cannot be longer than {max} characters."),
        (None, None) => String::new(),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormSpec {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Values that passed validation, one entry per declared field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedForm {
    values: BTreeMap<&'static str, String>,
}

impl ValidatedForm {
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or_default()
    }

    pub fn take(&mut self, name: &str) -> String {
        self.values.remove(name).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Field name to human-readable messages. Ordered for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Replaces whatever was reported for `field` with one message.
    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), vec![message.into()]);
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

pub fn validate(spec: &FormSpec, raw: &RawInput) -> Result<ValidatedForm, FieldErrors> {
    let mut values = BTreeMap::new();
    let mut errors = FieldErrors::default();

    for field in spec.fields {
        let value = raw.get(field.name).map(String::as_str).unwrap_or_default();
        if value.is_empty() {
            if field.required {
                errors.add(field.name, REQUIRED_MESSAGE);
            } else {
                values.insert(field.name, String::new());
            }
            continue;
        }
        let problems = field.check(value);
        if problems.is_empty() {
            values.insert(field.name, value.to_string());
        } else {
            for message in problems {
                errors.add(field.name, message);
            }
        }
    }

    if errors.is_empty() {
        Ok(ValidatedForm { values })
    } else {
        tracing::debug!(form = spec.name, fields = ?errors.0.keys().collect::<Vec<_>>(), "form_rejected");
        Err(errors)
    }
}
