//! Request body decoding for the admin forms.
//!
//! The editor posts multipart forms (with an optional `image` file part), but
//! JSON and urlencoded bodies are accepted too. Everything is flattened into a
//! JSON object so field extraction is the same for all three.

use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::models::Patch;
use crate::uploads::ImageUpload;

pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default)]
pub struct FormData {
    pub fields: Map<String, Value>,
    pub image: Option<ImageUpload>,
}

pub async fn parse(headers: &HeaderMap, body: Bytes) -> Result<FormData, AppError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json");

    if content_type.starts_with("multipart/form-data") {
        parse_multipart(content_type, body).await
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        Ok(FormData {
            fields: parse_form_urlencoded(&body),
            image: None,
        })
    } else {
        Ok(FormData {
            fields: parse_json_object(&body)?,
            image: None,
        })
    }
}

pub fn parse_json_object(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
        Err(e) => Err(AppError::BadRequest(format!("Invalid JSON: {e}"))),
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Map<String, Value> {
    form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}

async fn parse_multipart(content_type: &str, body: Bytes) -> Result<FormData, AppError> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| AppError::BadRequest("Missing multipart boundary".to_string()))?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form = FormData::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field.content_type().map(|m| m.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {e}")))?;

            // Browsers send an empty part for an untouched file input.
            if name == IMAGE_FIELD && !(file_name.is_empty() && data.is_empty()) {
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Field read error: {e}")))?;
        form.fields.insert(name, Value::String(value));
    }

    Ok(form)
}

/// A text column. Numbers and booleans are accepted and stringified.
pub fn text(fields: &Map<String, Value>, key: &str) -> Result<Patch<String>, AppError> {
    match fields.get(key) {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Ok(Patch::Null),
        Some(Value::String(s)) => Ok(Patch::Value(s.clone())),
        Some(Value::Number(n)) => Ok(Patch::Value(n.to_string())),
        Some(Value::Bool(b)) => Ok(Patch::Value(b.to_string())),
        Some(_) => Err(AppError::BadRequest(format!("{key} must be a string"))),
    }
}

/// An integer column. Form bodies send numbers as strings; a blank string
/// counts as not sent.
pub fn integer(fields: &Map<String, Value>, key: &str) -> Result<Patch<i64>, AppError> {
    let invalid = || AppError::BadRequest(format!("{key} must be an integer"));
    match fields.get(key) {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Ok(Patch::Null),
        Some(Value::Number(n)) => n.as_i64().map(Patch::Value).ok_or_else(invalid),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Patch::Absent),
        Some(Value::String(s)) => s.trim().parse().map(Patch::Value).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

/// The id array of a reorder request. Numeric strings are accepted.
pub fn id_list(fields: &Map<String, Value>, key: &str) -> Result<Vec<i64>, AppError> {
    let invalid = || AppError::BadRequest(format!("{key} must be an array"));
    let Some(Value::Array(items)) = fields.get(key) else {
        return Err(invalid());
    };

    items
        .iter()
        .map(|item| match item {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .collect::<Option<Vec<i64>>>()
        .ok_or_else(|| AppError::BadRequest(format!("{key} must contain only integer ids")))
}
