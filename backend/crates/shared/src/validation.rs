//! Cross-cutting validation rules
//!
//! Request DTOs are checked field by field before any service call. Every
//! failing field is collected into [`FieldErrors`] so the client sees all
//! problems in one response instead of the first one only.

use std::collections::BTreeMap;

use serde::Serialize;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Field name → message, at most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure; the first message for a field wins
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.0.clone()
    }

    /// `Ok(())` when nothing failed
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Fluent collector over optional request fields
///
/// ```rust
/// use kernel::validation::Validator;
///
/// let title: Option<String> = Some("  ".into());
/// let mut v = Validator::new();
/// v.required("title", title.as_deref());
/// v.max_chars("title", title.as_deref(), 255);
/// assert!(v.finish().is_err());
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present and not blank
    pub fn required(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) if !v.trim().is_empty() => {}
            _ => self.errors.add(field, format!("{} is required", field)),
        }
        self
    }

    /// Present values must not be blank (absent is fine)
    pub fn not_blank(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            if v.trim().is_empty() {
                self.errors.add(field, format!("{} must not be blank", field));
            }
        }
        self
    }

    /// Length in Unicode scalar values
    pub fn max_chars(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(v) = value {
            if v.chars().count() > max {
                self.errors.add(
                    field,
                    format!("{} must not exceed {} characters", field, max),
                );
            }
        }
        self
    }

    pub fn chars_between(
        &mut self,
        field: &str,
        value: Option<&str>,
        min: usize,
        max: usize,
    ) -> &mut Self {
        if let Some(v) = value {
            let count = v.chars().count();
            if count < min || count > max {
                self.errors.add(
                    field,
                    format!("{} must be between {} and {} characters", field, min, max),
                );
            }
        }
        self
    }

    pub fn email(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            if !is_well_formed_email(v) {
                self.errors
                    .add(field, format!("{} must be a well-formed email address", field));
            }
        }
        self
    }

    pub fn non_negative(&mut self, field: &str, value: Option<i32>) -> &mut Self {
        if let Some(v) = value {
            if v < 0 {
                self.errors.add(
                    field,
                    format!("{} must be greater than or equal to 0", field),
                );
            }
        }
        self
    }

    /// Value must parse with `parse`; the message names the accepted values
    pub fn one_of<T, E>(
        &mut self,
        field: &str,
        value: Option<&str>,
        parse: impl Fn(&str) -> Result<T, E>,
        accepted: &[&str],
    ) -> Option<T> {
        let v = value?;
        match parse(v) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.errors.add(
                    field,
                    format!("{} must be one of: {}", field, accepted.join(", ")),
                );
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        self.errors.into_result()
    }
}

/// Basic structural email check (one `@`, dotted domain, no stray characters)
pub fn is_well_formed_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.len() > EMAIL_MAX_LENGTH {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 || local.chars().any(char::is_whitespace) {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }
    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    if domain.starts_with('-') || domain.ends_with('-') {
        return false;
    }

    true
}
