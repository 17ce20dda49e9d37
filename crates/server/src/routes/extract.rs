//! Request extractors that reject with the JSON error body.
//!
//! axum's own `Json`, `Query` and `Path` reject with plain text; these wrappers turn
//! the rejection into `AppError::BadRequest` so clients always get
//! `{"success": false, "message": ...}`.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// JSON body extractor.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Path parameter extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Text(String),
}

/// Deserialize an optional integer ID sent either as a JSON number or as a
/// numeric string (browsers keep IDs in `localStorage` as strings).
/// `null`, a missing field and `""` all mean "none".
///
/// Use with `#[serde(default, deserialize_with = "lenient_id")]`.
pub fn lenient_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i32>,
{
    use serde::de::Error;

    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    let id = match raw {
        None => return Ok(None),
        Some(NumberOrText::Int(n)) => i32::try_from(n).map_err(D::Error::custom)?,
        Some(NumberOrText::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i32>()
                .map_err(|_| D::Error::custom(format!("invalid id: {s}")))?
        }
    };
    Ok(Some(T::from(id)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use serde_json::json;
    use smart_shipping_core::UserId;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "lenient_id")]
        user_id: Option<UserId>,
    }

    fn parse(value: serde_json::Value) -> Result<Option<UserId>, serde_json::Error> {
        serde_json::from_value::<Body>(value).map(|b| b.user_id)
    }

    #[test]
    fn test_accepts_number_and_numeric_string() {
        assert_eq!(parse(json!({"user_id": 5})).unwrap(), Some(UserId::new(5)));
        assert_eq!(parse(json!({"user_id": " 12 "})).unwrap(), Some(UserId::new(12)));
    }

    #[test]
    fn test_absent_values_are_none() {
        assert_eq!(parse(json!({})).unwrap(), None);
        assert_eq!(parse(json!({"user_id": null})).unwrap(), None);
        assert_eq!(parse(json!({"user_id": ""})).unwrap(), None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse(json!({"user_id": "abc"})).is_err());
        assert!(parse(json!({"user_id": 1.5})).is_err());
        assert!(parse(json!({"user_id": 9_999_999_999_i64})).is_err());
    }
}
