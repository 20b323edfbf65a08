use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use crate::application::forms::{self, FieldErrors, FormSpec, RawInput, ValidatedForm};
use crate::presentation::http::errors::ApiError;

pub const NOT_TEXT_MESSAGE: &str = "Field must be a string.";
pub const BAD_BODY_MESSAGE: &str = "Request body must be a JSON object.";

/// JSON object body of a form submission. Field values are checked against a
/// [`FormSpec`] by [`validate_body`], so wrong JSON types surface as field errors.
#[derive(Debug, Default)]
pub struct FormBody(pub Map<String, Value>);

#[axum::async_trait]
impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(map))) => Ok(FormBody(map)),
            Ok(Json(_)) => Err(ApiError::invalid(FieldErrors::single("body", BAD_BODY_MESSAGE))),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "form_body_rejected");
                Err(ApiError::Form(
                    rejection.status(),
                    FieldErrors::single("body", BAD_BODY_MESSAGE),
                ))
            }
        }
    }
}

/// Runs `spec` over a JSON body. `null` counts as missing; other non-string
/// values for declared fields are reported as [`NOT_TEXT_MESSAGE`].
pub fn validate_body(spec: &FormSpec, body: &FormBody) -> Result<ValidatedForm, FieldErrors> {
    let mut raw = RawInput::new();
    let mut mistyped = Vec::new();
    for field in spec.fields {
        match body.0.get(field.name) {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => {
                raw.insert(field.name.to_string(), s.clone());
            }
            Some(_) => mistyped.push(field.name),
        }
    }

    let result = forms::validate(spec, &raw);
    if mistyped.is_empty() {
        return result;
    }
    let mut errors = result.err().unwrap_or_default();
    for name in mistyped {
        errors.set(name, NOT_TEXT_MESSAGE);
    }
    Err(errors)
}
