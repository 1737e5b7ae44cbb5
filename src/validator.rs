use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use squadgate_core::AppError;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn rejection_message(rejection: &JsonRejection) -> String {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return "Missing 'Content-Type: application/json' header".to_string();
    }

    let text = rejection.body_text();
    if let Some(field) = text
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return format!("{} is required", field);
    }
    if text.contains("invalid type") {
        return "Invalid field type in request".to_string();
    }
    "Invalid request body".to_string()
}

/// JSON body extractor that also runs `validator` rules.
///
/// Malformed JSON is a 400; well-formed JSON failing validation is a 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection_message(&rejection)))?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request as HttpRequest, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(email(message = "email must be a valid email address"))]
        email: String,
    }

    async fn handler(ValidatedJson(payload): ValidatedJson<Payload>) -> String {
        payload.email
    }

    async fn status_for(content_type: Option<&str>, body: &'static str) -> StatusCode {
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        Router::new()
            .route("/", post(handler))
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_statuses() {
        let json = Some("application/json");
        assert_eq!(status_for(json, r#"{"email":"a@b.com"}"#).await, StatusCode::OK);
        assert_eq!(status_for(json, r#"{"email":"nope"}"#).await, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(json, r#"{}"#).await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for(json, r#"{"email":"#).await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for(None, r#"{"email":"a@b.com"}"#).await, StatusCode::BAD_REQUEST);
    }
}
