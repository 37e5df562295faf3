//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod illustration;
pub mod project;

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// A file part read out of a multipart form.
pub(crate) struct FilePart {
    /// The form field the file arrived under.
    pub field: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Drain a multipart form into text fields and file parts.
///
/// File parts with an empty filename (a file input submitted with no
/// selection) are skipped, matching browser form behavior.
pub(crate) async fn read_form(
    mut multipart: Multipart,
) -> AppResult<(HashMap<String, String>, Vec<FilePart>)> {
    let mut texts = HashMap::new();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        match filename {
            Some(filename) if !filename.is_empty() => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
                files.push(FilePart {
                    field: name,
                    filename,
                    bytes,
                });
            }
            Some(_) => {}
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                texts.insert(name, value);
            }
        }
    }

    Ok((texts, files))
}
