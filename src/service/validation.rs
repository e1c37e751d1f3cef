//! Request validation: per-route rule lists evaluated by a single gate.
//!
//! A rule set is an ordered list of `(location, field, check, message)`.
//! [`gate`] evaluates every rule, without stopping at the first failure, and
//! collects one [`FieldError`] per failed rule.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use utoipa::ToSchema;

/// Where the validated value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Signed integer literal that fits in an `i32`.
    Int,
    /// String with at least one character.
    NonEmptyString,
    /// JSON number or numeric string.
    Numeric,
    /// Present, not null, not `""`.
    Present,
    /// Numeric and strictly greater than zero.
    Positive,
    /// JSON boolean.
    Boolean,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub location: Location,
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn param(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            location: Location::Params,
            field,
            check,
            message,
        }
    }

    pub const fn body(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            location: Location::Body,
            field,
            check,
            message,
        }
    }
}

pub const MSG_INVALID_ID: &str = "ID no válido";
pub const MSG_NAME_EMPTY: &str = "El campo Nombre no puede estar vacío";
pub const MSG_PRICE_NOT_NUMERIC: &str = "El campo Precio debe ser numérico";
pub const MSG_PRICE_EMPTY: &str = "El campo Precio no puede estar vacío";
pub const MSG_PRICE_NOT_POSITIVE: &str = "El campo Precio debe ser un valor positivo";
pub const MSG_AVAILABILITY_INVALID: &str = "Valor para disponibilidad no válido";

/// GET, PATCH and DELETE on `/:id`.
pub const PRODUCT_ID_RULES: &[Rule] = &[Rule::param("id", Check::Int, MSG_INVALID_ID)];

/// POST `/`.
pub const CREATE_PRODUCT_RULES: &[Rule] = &[
    Rule::body("name", Check::NonEmptyString, MSG_NAME_EMPTY),
    Rule::body("price", Check::Numeric, MSG_PRICE_NOT_NUMERIC),
    Rule::body("price", Check::Present, MSG_PRICE_EMPTY),
    Rule::body("price", Check::Positive, MSG_PRICE_NOT_POSITIVE),
];

/// PUT `/:id`.
pub const UPDATE_PRODUCT_RULES: &[Rule] = &[
    Rule::param("id", Check::Int, MSG_INVALID_ID),
    Rule::body("name", Check::NonEmptyString, MSG_NAME_EMPTY),
    Rule::body("price", Check::Numeric, MSG_PRICE_NOT_NUMERIC),
    Rule::body("price", Check::Present, MSG_PRICE_EMPTY),
    Rule::body("price", Check::Positive, MSG_PRICE_NOT_POSITIVE),
    Rule::body("availability", Check::Boolean, MSG_AVAILABILITY_INVALID),
];

/// One failed rule, serialized as `{ type, value, msg, path, location }`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(location: Location, path: &str, value: Option<Value>, msg: &str) -> Self {
        Self {
            kind: "field",
            value,
            msg: msg.to_string(),
            path: path.to_string(),
            location,
        }
    }

    pub fn params(path: &str, value: Option<Value>, msg: &str) -> Self {
        Self::new(Location::Params, path, value, msg)
    }

    pub fn body(path: &str, value: Option<Value>, msg: &str) -> Self {
        Self::new(Location::Body, path, value, msg)
    }
}

/// The 400 response body: `{ "errors": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

/// Evaluate `rules` in order against path params and JSON body.
pub fn gate(
    rules: &[Rule],
    params: &HashMap<String, String>,
    body: &Value,
) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    for rule in rules {
        let value = match rule.location {
            Location::Params => params.get(rule.field).map(|s| Value::String(s.clone())),
            Location::Body => body.get(rule.field).cloned(),
        };
        if !passes(rule.check, value.as_ref()) {
            errors.push(FieldError::new(rule.location, rule.field, value, rule.message));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}

fn passes(check: Check, value: Option<&Value>) -> bool {
    match check {
        Check::Int => matches!(value, Some(Value::String(s)) if parse_int(s).is_some()),
        Check::NonEmptyString => matches!(value, Some(Value::String(s)) if !s.is_empty()),
        Check::Numeric => match value {
            Some(Value::Number(_)) => true,
            Some(Value::String(s)) => numeric_re().is_match(s),
            _ => false,
        },
        Check::Present => match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        },
        Check::Positive => value.and_then(as_number).is_some_and(|n| n > 0.0),
        Check::Boolean => matches!(value, Some(Value::Bool(_))),
    }
}

fn int_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-+]?(?:0|[1-9][0-9]*)$").expect("valid int pattern"))
}

fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("valid numeric pattern"))
}

/// Parse an integer path segment. No leading zeros, must fit in `i32`.
pub fn parse_int(s: &str) -> Option<i32> {
    if !int_re().is_match(s) {
        return None;
    }
    s.parse().ok()
}

/// Read a JSON number or numeric string as a finite `f64`.
pub fn as_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if numeric_re().is_match(s) => s.parse().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}
