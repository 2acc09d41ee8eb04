use std::str::FromStr;

use gdl_types::{Element, TypeError};

use crate::error::{DecodeError, DecodeResult};

/// Read a required attribute of the `index`-th record element.
pub(crate) fn required_attr<'a>(
    el: &'a Element,
    record: &'static str,
    index: usize,
    attribute: &'static str,
) -> DecodeResult<&'a str> {
    el.attr(attribute).ok_or(DecodeError::MissingAttribute {
        record,
        index,
        attribute,
    })
}

/// Field accessor for one named record, so every error carries the record
/// kind and name.
pub(crate) struct Fields<'a> {
    pub record: &'static str,
    pub name: &'a str,
    pub el: &'a Element,
}

impl<'a> Fields<'a> {
    pub fn new(record: &'static str, name: &'a str, el: &'a Element) -> Self {
        Self { record, name, el }
    }

    pub fn code<T>(&self, raw: &str) -> DecodeResult<T>
    where
        T: FromStr<Err = TypeError>,
    {
        raw.parse().map_err(|source| DecodeError::InvalidCode {
            record: self.record,
            name: self.name.to_string(),
            source,
        })
    }

    pub fn text(&self, field: &'static str) -> Option<&'a str> {
        self.el.child_text(field)
    }

    pub fn required_text(&self, field: &'static str) -> DecodeResult<&'a str> {
        self.text(field).ok_or_else(|| DecodeError::MissingField {
            record: self.record,
            name: self.name.to_string(),
            field,
        })
    }

    pub fn optional<T: FromStr>(&self, field: &'static str) -> DecodeResult<Option<T>> {
        match self.text(field) {
            None => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| self.invalid(field, raw)),
        }
    }

    pub fn required<T: FromStr>(&self, field: &'static str) -> DecodeResult<T> {
        let raw = self.required_text(field)?;
        raw.parse().map_err(|_| self.invalid(field, raw))
    }

    /// Flag elements: `<Enemy/>` means true, `<AdminOnly>false</AdminOnly>`
    /// spells the value out, absence means false.
    pub fn flag(&self, field: &'static str) -> DecodeResult<bool> {
        match self.text(field) {
            None => Ok(false),
            Some("") | Some("true") | Some("1") => Ok(true),
            Some("false") | Some("0") => Ok(false),
            Some(other) => Err(self.invalid(field, other)),
        }
    }

    fn invalid(&self, field: &'static str, value: &str) -> DecodeError {
        DecodeError::InvalidValue {
            record: self.record,
            name: self.name.to_string(),
            field,
            value: value.to_string(),
        }
    }
}
