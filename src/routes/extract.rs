//! Request binding for product routes.

use axum::{
    Form,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Multipart, Path, Request},
    http::{StatusCode, header::CONTENT_TYPE, request::Parts},
};
use serde_json::Value;

use crate::{
    error::AppError,
    state::AppState,
    storage::{ImageRejection, UploadedImage},
    validation::{FieldErrors, ProductFields},
};

/// Multipart field that carries the image file.
pub const IMAGE_FIELD: &str = "product_image";

/// Numeric `{id}` path segment. Anything else is treated as an unknown route.
#[derive(Debug, Clone, Copy)]
pub struct ProductId(pub i32);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Not Found".into()))?;
        raw.parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(ProductId)
            .ok_or_else(|| AppError::NotFound("Not Found".into()))
    }
}

/// Text fields plus an optional image, from a JSON, urlencoded or multipart body.
#[derive(Debug, Default)]
pub struct ProductSubmission {
    pub fields: ProductFields,
    pub image: Option<UploadedImage>,
}

impl FromRequest<AppState> for ProductSubmission {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let max_kb = state.config.max_image_kb;
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|err| multipart_failure(err.status(), err.body_text(), max_kb))?;
            return Self::from_multipart(multipart, max_kb).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<ProductFields>::from_request(req, state)
                .await
                .map_err(|err| AppError::BadRequest(err.body_text()))?;
            return Ok(Self {
                fields,
                image: None,
            });
        }

        // JSON, or no content type at all
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(&body)
            .map_err(|err| AppError::BadRequest(format!("Invalid JSON body: {err}")))?;
        Self::from_json(value)
    }
}

impl ProductSubmission {
    async fn from_multipart(mut multipart: Multipart, max_kb: u64) -> Result<Self, AppError> {
        let mut submission = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| multipart_failure(err.status(), err.body_text(), max_kb))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == IMAGE_FIELD {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| multipart_failure(err.status(), err.body_text(), max_kb))?;
                // forms send an empty, unnamed part when no file was chosen
                let chosen = file_name.as_deref().is_some_and(|n| !n.is_empty());
                if chosen || !bytes.is_empty() {
                    submission.image = Some(UploadedImage {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                continue;
            }

            let slot = match name.as_str() {
                "title" => &mut submission.fields.title,
                "cost" => &mut submission.fields.cost,
                "description" => &mut submission.fields.description,
                _ => continue,
            };
            let text = field
                .text()
                .await
                .map_err(|err| multipart_failure(err.status(), err.body_text(), max_kb))?;
            *slot = Some(text);
        }

        Ok(submission)
    }

    fn from_json(value: Value) -> Result<Self, AppError> {
        let Value::Object(map) = value else {
            return Err(AppError::BadRequest(
                "JSON body must be an object".to_string(),
            ));
        };

        let field = |key: &str| -> Result<Option<String>, AppError> {
            match map.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(Value::Number(n)) => Ok(Some(n.to_string())),
                Some(_) => Err(AppError::BadRequest(format!(
                    "`{key}` must be a string or a number"
                ))),
            }
        };

        Ok(Self {
            fields: ProductFields {
                title: field("title")?,
                cost: field("cost")?,
                description: field("description")?,
            },
            image: None,
        })
    }
}

/// A multipart body over the request limit can only be an oversized image.
fn multipart_failure(status: StatusCode, text: String, max_kb: u64) -> AppError {
    if status != StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::BadRequest(text);
    }
    let mut errors = FieldErrors::new();
    errors.insert(
        IMAGE_FIELD.to_string(),
        vec![ImageRejection::TooLarge { max_kb }.to_string()],
    );
    AppError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_numbers_become_text() {
        let submission =
            ProductSubmission::from_json(json!({ "cost": 2.5, "title": null })).unwrap();
        assert_eq!(submission.fields.cost.as_deref(), Some("2.5"));
        assert_eq!(submission.fields.title, None);
        assert_eq!(submission.fields.description, None);
    }

    #[test]
    fn oversized_multipart_is_an_image_error() {
        let err = multipart_failure(
            StatusCode::PAYLOAD_TOO_LARGE,
            "length limit exceeded".into(),
            2048,
        );
        let AppError::Validation(errors) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(
            errors[IMAGE_FIELD],
            vec!["The product_image file must not be larger than 2048 KB."]
        );

        let err = multipart_failure(StatusCode::BAD_REQUEST, "bad boundary".into(), 2048);
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn json_rejects_nested_values() {
        assert!(ProductSubmission::from_json(json!({ "title": ["x"] })).is_err());
        assert!(ProductSubmission::from_json(json!([1, 2])).is_err());
    }
}
