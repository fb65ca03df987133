use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::error::{ApiError, ValidationError};

/// JSON request body with this service's rejection messages.
///
/// An empty body or a falsy JSON value (`null`, `{}`, `[]`, `""`, `0`,
/// `false`) counts as no data. Anything that does not parse, is not an
/// object, or does not fit the target type is invalid. Per-field checks are
/// left to the payload types. The content type is not checked.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ValidationError::InvalidJson)?;

        Ok(Self(parse_body(&bytes)?))
    }
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ValidationError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ValidationError::NoJsonData);
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|_| ValidationError::InvalidJson)?;
    if is_falsy(&value) {
        return Err(ValidationError::NoJsonData);
    }
    if !value.is_object() {
        return Err(ValidationError::InvalidJson);
    }

    serde_json::from_value(value).map_err(|_| ValidationError::InvalidJson)
}

pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
