//! `Validated<T>`: runs a route's rule set before the handler sees the request.
//!
//! A failed gate rejects with 400 `{ errors: [...] }` and the handler never runs.

use crate::error::AppError;
use crate::model::{NewProduct, ProductChanges, ProductId};
use crate::service::validation::{
    as_number, gate, parse_int, Location, Rule, CREATE_PRODUCT_RULES, PRODUCT_ID_RULES,
    UPDATE_PRODUCT_RULES,
};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::StatusCode,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Input assembled from path params and JSON body once its rules pass.
pub trait ValidatedInput: Sized {
    const RULES: &'static [Rule];

    /// Called only after every rule in [`Self::RULES`] has passed.
    fn build(params: &HashMap<String, String>, body: &Value) -> Option<Self>;
}

#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

/// `:id` path segment of the product routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPath {
    pub id: ProductId,
}

/// `PUT /:id`: target id plus the replacement fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub id: ProductId,
    pub changes: ProductChanges,
}

impl ValidatedInput for ProductPath {
    const RULES: &'static [Rule] = PRODUCT_ID_RULES;

    fn build(params: &HashMap<String, String>, _body: &Value) -> Option<Self> {
        Some(Self {
            id: parse_int(params.get("id")?)?,
        })
    }
}

impl ValidatedInput for NewProduct {
    const RULES: &'static [Rule] = CREATE_PRODUCT_RULES;

    fn build(_params: &HashMap<String, String>, body: &Value) -> Option<Self> {
        Some(Self {
            name: body.get("name")?.as_str()?.to_string(),
            price: as_number(body.get("price")?)?,
        })
    }
}

impl ValidatedInput for ProductUpdate {
    const RULES: &'static [Rule] = UPDATE_PRODUCT_RULES;

    fn build(params: &HashMap<String, String>, body: &Value) -> Option<Self> {
        Some(Self {
            id: parse_int(params.get("id")?)?,
            changes: ProductChanges {
                name: body.get("name")?.as_str()?.to_string(),
                price: as_number(body.get("price")?)?,
                availability: body.get("availability")?.as_bool()?,
            },
        })
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatedInput,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        // Routes without params reject the Path extractor; treat as none.
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(p)| p)
            .unwrap_or_default();

        let body = if T::RULES.iter().any(|r| r.location == Location::Body) {
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(|e| match e.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(e.body_text()),
                    _ => AppError::BadRequest(e.body_text()),
                })?;
            parse_body(&bytes)?
        } else {
            Value::Null
        };

        gate(T::RULES, &params, &body).map_err(AppError::Validation)?;
        T::build(&params, &body)
            .map(Validated)
            .ok_or_else(|| AppError::BadRequest("request does not match the validated shape".into()))
    }
}

/// Empty body reads as `{}`; anything else must be a JSON object.
fn parse_body(bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(v @ Value::Object(_)) => Ok(v),
        Ok(_) => Err(AppError::BadRequest("body must be a JSON object".into())),
        Err(e) => Err(AppError::BadRequest(format!("invalid JSON body: {e}"))),
    }
}
