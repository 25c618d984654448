use std::collections::BTreeMap;

use super::FormField;

/// Raw text of the submission form, keyed by field.
///
/// Absent fields read as the empty string, so a fresh `FormData` is the
/// blank form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<FormField, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        field: FormField,
    ) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) {
        self.values.insert(field, value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(
        mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Self {
        self.set(field, value);
        self
    }

    /// All fields in form order, with their current text.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        FormField::ALL.into_iter().map(|field| (field, self.get(field)))
    }
}

impl<S: Into<String>> FromIterator<(FormField, S)> for FormData {
    fn from_iter<I: IntoIterator<Item = (FormField, S)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (field, value) in iter {
            form.set(field, value);
        }
        form
    }
}
