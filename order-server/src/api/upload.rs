//! Multipart image intake
//!
//! Shared by the gallery upload endpoint and feedback-with-image. All
//! validation (size cap, MIME allowlist, an actual decode) happens on the
//! in-memory bytes before anything touches disk, so a rejected upload
//! never leaves a file behind.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use axum::extract::Multipart;
use chrono::Utc;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
pub const MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

const ALLOWED_MIME: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// A validated in-memory image from a multipart field.
pub struct ImageUpload {
    pub data: Vec<u8>,
    /// Extension including the dot, e.g. `".png"`
    pub extension: String,
}

/// Everything a multipart form carried: at most one image plus the plain
/// text fields.
#[derive(Default)]
pub struct MultipartForm {
    pub image: Option<ImageUpload>,
    pub fields: HashMap<String, String>,
}

/// Drain a multipart request, validating the image field (named
/// `file_field`) along the way.
pub async fn read_form(mut multipart: Multipart, file_field: &str) -> AppResult<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        if name == file_field {
            let content_type = field.content_type().map(str::to_string);
            let filename = field.file_name().map(str::to_string);
            let data = field.bytes().await?.to_vec();
            if data.is_empty() {
                continue;
            }
            validate_image(&data, content_type.as_deref())?;
            let extension = extension_for(filename.as_deref(), content_type.as_deref());
            form.image = Some(ImageUpload { data, extension });
        } else {
            let value = field.text().await?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// Size cap, MIME allowlist, decode check — in that order.
pub fn validate_image(data: &[u8], content_type: Option<&str>) -> AppResult<()> {
    if data.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::validation("File too large (max 5MB)"));
    }

    match content_type {
        Some(ct) if ALLOWED_MIME.contains(&ct) => {}
        _ => {
            return Err(AppError::validation(
                "Only image files (JPEG, PNG, GIF, WebP) are allowed.",
            ));
        }
    }

    image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image file: {e}")))?;

    Ok(())
}

/// Lowercased extension from the original filename, else one derived from
/// the content type, else `.jpg`.
fn extension_for(filename: Option<&str>, content_type: Option<&str>) -> String {
    if let Some(name) = filename
        && let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str())
    {
        return format!(".{}", ext.to_lowercase());
    }
    if let Some(ct) = content_type
        && let Some(exts) = mime_guess::get_mime_extensions_str(ct)
        && let Some(ext) = exts.first()
    {
        return format!(".{ext}");
    }
    ".jpg".to_string()
}

/// Write a validated image under `<uploads>/<subdir>/` and return its
/// public URL. Filenames are `<subdir>-<epoch millis><ext>`; orphans are
/// never cleaned up.
pub fn store_image(state: &ServerState, subdir: &str, image: &ImageUpload) -> AppResult<String> {
    let dir = state.config.uploads_dir().join(subdir);
    fs::create_dir_all(&dir)
        .map_err(|e| AppError::internal(format!("Failed to create upload directory: {e}")))?;

    let filename = format!(
        "{subdir}-{}{}",
        Utc::now().timestamp_millis(),
        image.extension
    );
    let path = dir.join(&filename);
    fs::write(&path, &image.data)
        .map_err(|e| AppError::internal(format!("Failed to save file: {e}")))?;

    tracing::info!(path = %path.display(), size = image.data.len(), "Image uploaded");

    Ok(format!(
        "{}/uploads/{subdir}/{filename}",
        state.config.public_base_url
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest valid 1x1 PNG
    const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0B, 0x49, 0x44, 0x41, 0x54, 0x78,
        0xDA, 0x63, 0x60, 0x00, 0x02, 0x00, 0x00, 0x05, 0x00, 0x01, 0xE9, 0xFA, 0xDC, 0xD8,
        0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn accepts_valid_png() {
        assert!(validate_image(TINY_PNG, Some("image/png")).is_ok());
    }

    #[test]
    fn rejects_wrong_mime() {
        assert!(validate_image(TINY_PNG, Some("application/pdf")).is_err());
        assert!(validate_image(TINY_PNG, None).is_err());
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(validate_image(b"definitely not an image", Some("image/png")).is_err());
    }

    #[test]
    fn rejects_oversized() {
        let huge = vec![0u8; MAX_UPLOAD_SIZE + 1];
        assert!(validate_image(&huge, Some("image/png")).is_err());
    }

    #[test]
    fn extension_prefers_filename() {
        assert_eq!(extension_for(Some("photo.PNG"), Some("image/jpeg")), ".png");
        assert_eq!(extension_for(None, None), ".jpg");
    }
}
