//! Form validity reducer
//!
//! A form keeps a keyed record of field values, a parallel record of
//! per-field validity flags and the derived overall flag. The field set is
//! fixed at construction; `is_valid` is true iff every registered field is
//! valid.

use std::collections::{HashMap, HashSet};
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#
    )
    .expect("email pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(&'static str);

impl FieldId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Declarative constraints for one input
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub error_text: &'static str,
    pub required: bool,
    pub email: bool,
    pub numeric: bool,
    pub min: Option<f64>,
    pub min_length: Option<usize>,
    /// Rendered masked (passwords)
    pub secure: bool,
    pub multiline: bool,
}

impl FieldSpec {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id: FieldId::new(id),
            label,
            error_text: "",
            required: false,
            email: false,
            numeric: false,
            min: None,
            min_length: None,
            secure: false,
            multiline: false,
        }
    }

    pub fn error_text(mut self, text: &'static str) -> Self {
        self.error_text = text;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.numeric = true;
        self.min = Some(min);
        self
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Validity of `text` under this field's constraints
    pub fn validate(&self, text: &str) -> bool {
        if self.required && text.trim().is_empty() {
            return false;
        }
        if self.email && !EMAIL_PATTERN.is_match(&text.to_lowercase()) {
            return false;
        }
        if self.numeric {
            let trimmed = text.trim();
            // An empty optional number is left to `required`.
            if !trimmed.is_empty() || self.required {
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => {
                        if self.min.is_some_and(|min| n < min) {
                            return false;
                        }
                    }
                    _ => return false,
                }
            }
        }
        if self
            .min_length
            .is_some_and(|len| text.chars().count() < len)
        {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    fields: Vec<FieldSpec>,
    values: HashMap<FieldId, String>,
    validities: HashMap<FieldId, bool>,
    touched: HashSet<FieldId>,
    is_valid: bool,
    focus: usize,
}

impl FormState {
    /// Empty form for a new record: every field is invalid unless it has no
    /// `required` constraint.
    pub fn blank(fields: Vec<FieldSpec>) -> Self {
        Self::seeded(fields, std::iter::empty())
    }

    /// Form pre-filled from an existing record. Seeded fields are marked
    /// valid; fields absent from the seed start empty as in [`Self::blank`].
    pub fn seeded(
        fields: Vec<FieldSpec>,
        seed: impl IntoIterator<Item = (FieldId, String)>,
    ) -> Self {
        let mut seed: HashMap<FieldId, String> = seed.into_iter().collect();
        let mut values = HashMap::with_capacity(fields.len());
        let mut validities = HashMap::with_capacity(fields.len());

        for field in &fields {
            match seed.remove(&field.id) {
                Some(value) => {
                    values.insert(field.id, value);
                    validities.insert(field.id, true);
                }
                None => {
                    values.insert(field.id, String::new());
                    validities.insert(field.id, !field.required);
                }
            }
        }

        let mut form = Self {
            fields,
            values,
            validities,
            touched: HashSet::new(),
            is_valid: false,
            focus: 0,
        };
        form.is_valid = form.compute_validity();
        form
    }

    /// Records `value` with the caller-supplied `validity` and recomputes
    /// the overall flag. Unregistered fields are ignored.
    pub fn update(&mut self, field: FieldId, value: impl Into<String>, validity: bool) {
        if !self.validities.contains_key(&field) {
            log::debug!("Ignoring update for unregistered field '{field}'");
            return;
        }
        self.values.insert(field, value.into());
        self.validities.insert(field, validity);
        self.is_valid = self.compute_validity();
    }

    fn compute_validity(&self) -> bool {
        self.validities.values().all(|valid| *valid)
    }

    /// Replaces the focused field's text, validating it with its spec
    pub fn input(&mut self, text: String) {
        let Some(spec) = self.fields.get(self.focus) else {
            return;
        };
        let id = spec.id;
        let validity = spec.validate(&text);
        self.touched.insert(id);
        self.update(id, text, validity);
    }

    pub fn insert_char(&mut self, c: char) {
        let mut text = self.focused_value().to_owned();
        text.push(c);
        self.input(text);
    }

    pub fn delete_char(&mut self) {
        let mut text = self.focused_value().to_owned();
        if text.pop().is_some() {
            self.input(text);
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Marks every field touched so that all pending errors become visible
    pub fn touch_all(&mut self) {
        self.touched.extend(self.fields.iter().map(|f| f.id));
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&FieldSpec> {
        self.fields.get(self.focus)
    }

    fn focused_value(&self) -> &str {
        self.focused_field()
            .map(|spec| self.value(spec.id))
            .unwrap_or_default()
    }

    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn validity(&self, field: FieldId) -> Option<bool> {
        self.validities.get(&field).copied()
    }

    pub fn is_touched(&self, field: FieldId) -> bool {
        self.touched.contains(&field)
    }

    /// Error text to display for `field`: only once touched and invalid
    pub fn error_for(&self, field: FieldId) -> Option<&'static str> {
        let spec = self.fields.iter().find(|f| f.id == field)?;
        match self.validity(field) {
            Some(false) if self.is_touched(field) => Some(spec.error_text),
            _ => None,
        }
    }
}
