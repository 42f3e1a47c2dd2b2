//! Poster upload storage shared by movies, genres, categories and age ratings.
//!
//! Files land in `ServerConfig::poster_dir` under a fresh UUID name and are
//! served back from `/images/{file}`.

use std::path::Path;

use axum::extract::Multipart;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Multipart field carrying the image.
pub const POSTER_FIELD: &str = "poster";

/// URL prefix the poster directory is mounted at.
pub const POSTER_URL_PREFIX: &str = "/images";

const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Lower-cased extension of `filename`, if it is a supported image type.
pub fn image_extension(filename: &str) -> AppResult<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported image format '.{ext}'. Supported: .jpg, .jpeg, .png, .webp"
        )));
    }
    Ok(ext)
}

/// Read the `poster` field from `multipart`, write it to `dir`, and return
/// its public URL.
pub async fn store_poster(dir: &Path, mut multipart: Multipart) -> AppResult<String> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(POSTER_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((filename, data.to_vec()));
    }

    let (filename, data) = upload
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{POSTER_FIELD}' field")))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Poster file is empty".into()));
    }
    let ext = image_extension(&filename)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let stored_name = format!("{}.{ext}", Uuid::new_v4());
    tokio::fs::write(dir.join(&stored_name), &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::debug!(file = %stored_name, bytes = data.len(), "Poster stored");
    Ok(format!("{POSTER_URL_PREFIX}/{stored_name}"))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_supported_extensions_case_insensitively() {
        assert_eq!(image_extension("cover.JPG").unwrap(), "jpg");
        assert_eq!(image_extension("a.b.webp").unwrap(), "webp");
    }

    #[test]
    fn rejects_other_files() {
        assert_matches!(image_extension("movie.mp4"), Err(AppError::BadRequest(_)));
        assert_matches!(image_extension("no_extension"), Err(AppError::BadRequest(_)));
    }
}
