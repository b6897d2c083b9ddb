//! Declarative request schemas.
//!
//! Every entity accepted over HTTP is described by a [`Schema`]: an ordered
//! list of [`Field`]s with a kind and a required flag. [`Schema::load`] checks a
//! raw JSON body against it and collects every problem into
//! [`ValidationErrors`] instead of stopping at the first one, so clients get
//! the full picture in a single 400 response.

pub mod entities;

pub use entities::{
    CustomerAccountInput, CustomerInput, OrderInput, ProductInput, CUSTOMER, CUSTOMER_ACCOUNT,
    ORDER, PRODUCT,
};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Key used for errors that concern the body as a whole
pub const SCHEMA_KEY: &str = "_schema";

pub const MSG_INVALID_INPUT: &str = "Invalid input type.";
pub const MSG_MISSING: &str = "Missing data for required field.";
pub const MSG_NULL: &str = "Field may not be null.";
pub const MSG_UNKNOWN: &str = "Unknown field.";
pub const MSG_INVALID_INTEGER: &str = "Not a valid integer.";
pub const MSG_OUT_OF_RANGE: &str = "Number out of range.";
pub const MSG_INVALID_STRING: &str = "Not a valid string.";
pub const MSG_INVALID_DATE: &str = "Not a valid date.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 32-bit signed integer
    Integer,
    /// Text, optionally bounded by the width of its column
    String { max_len: Option<usize> },
    /// Calendar date in ISO `YYYY-MM-DD` form
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    pub const fn integer(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Integer, required: true }
    }

    pub const fn string(name: &'static str) -> Self {
        Self { name, kind: FieldKind::String { max_len: None }, required: true }
    }

    pub const fn date(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Date, required: true }
    }

    pub const fn max_len(self, max_len: usize) -> Self {
        match self.kind {
            FieldKind::String { .. } => Self { kind: FieldKind::String { max_len: Some(max_len) }, ..self },
            _ => self,
        }
    }

    pub const fn optional(self) -> Self {
        Self { required: false, ..self }
    }

    /// Check one present value, returning it in normalised form.
    fn check(&self, value: &Value) -> Result<Value, String> {
        if value.is_null() {
            return Err(MSG_NULL.to_string());
        }

        match self.kind {
            FieldKind::Integer => {
                let parsed = match value {
                    Value::Number(n) => n.as_i64().ok_or(MSG_INVALID_INTEGER)?,
                    Value::String(s) => s.trim().parse::<i64>().map_err(|_| MSG_INVALID_INTEGER)?,
                    _ => return Err(MSG_INVALID_INTEGER.to_string()),
                };
                let parsed = i32::try_from(parsed).map_err(|_| MSG_OUT_OF_RANGE)?;
                Ok(Value::Number(Number::from(parsed)))
            }
            FieldKind::String { max_len } => {
                let s = value.as_str().ok_or(MSG_INVALID_STRING)?;
                if let Some(max) = max_len {
                    if s.chars().count() > max {
                        return Err(format!("Longer than maximum length {}.", max));
                    }
                }
                Ok(value.clone())
            }
            FieldKind::Date => {
                let s = value.as_str().ok_or(MSG_INVALID_DATE)?;
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| MSG_INVALID_DATE)?;
                Ok(Value::String(date.format("%Y-%m-%d").to_string()))
            }
        }
    }
}

/// Field-level validation messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Human readable entity label used in messages
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Validate a request body and return the accepted, normalised fields.
    pub fn load(&self, payload: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let Some(object) = payload.as_object() else {
            errors.add(SCHEMA_KEY, MSG_INVALID_INPUT);
            return Err(errors);
        };

        let mut loaded = Map::new();
        for field in self.fields {
            match object.get(field.name) {
                None if field.required => errors.add(field.name, MSG_MISSING),
                None => {}
                Some(value) => match field.check(value) {
                    Ok(normalised) => {
                        loaded.insert(field.name.to_string(), normalised);
                    }
                    Err(message) => errors.add(field.name, message),
                },
            }
        }

        for key in object.keys() {
            if self.field(key).is_none() {
                errors.add(key.as_str(), MSG_UNKNOWN);
            }
        }

        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(errors)
        }
    }

    /// Validate a request body and deserialize it into its typed input.
    pub fn deserialize<T: DeserializeOwned>(&self, payload: &Value) -> Result<T, ValidationErrors> {
        let loaded = self.load(payload)?;
        serde_json::from_value(Value::Object(loaded)).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add(SCHEMA_KEY, e.to_string());
            errors
        })
    }
}
