//! Multipart parsing for the upload form

use axum::extract::Multipart;
use vidup_core::constants::form_fields;
use vidup_core::AppError;
use vidup_hosting::UploadFile;

/// Fields of one upload request. Unknown fields are ignored.
#[derive(Debug, Default)]
pub struct UploadForm {
    /// None when no `file` part was sent or the part was empty
    pub file: Option<UploadFile>,
    pub title: String,
    pub description: Option<String>,
    /// Client-declared size, "0" when absent
    pub original_size: String,
}

impl UploadForm {
    /// The form marks the title required; the server stores whatever was sent.
    pub fn title_is_blank(&self) -> bool {
        self.title.trim().is_empty()
    }
}

pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    let mut original_size: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            form_fields::FILE => {
                if form.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed".to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                if !data.is_empty() {
                    form.file = Some(UploadFile {
                        data,
                        filename,
                        content_type,
                    });
                }
            }
            form_fields::TITLE => form.title = read_text(field).await?,
            form_fields::DESCRIPTION => {
                let text = read_text(field).await?;
                form.description = Some(text).filter(|d| !d.is_empty());
            }
            form_fields::ORIGINAL_SIZE => {
                original_size = Some(read_text(field).await?.trim().to_string());
            }
            _ => {}
        }
    }

    form.original_size = original_size
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "0".to_string());

    if form.title_is_blank() {
        tracing::warn!("Upload form has no title; storing an empty title");
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read form field: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_title_counts_as_blank() {
        let mut form = UploadForm::default();
        assert!(form.title_is_blank());

        form.title = "   ".to_string();
        assert!(form.title_is_blank());

        form.title = "Clip A".to_string();
        assert!(!form.title_is_blank());
    }
}
