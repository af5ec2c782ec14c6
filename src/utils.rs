// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// File extensions accepted for resume uploads.
pub const ACCEPTED_RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

/// Read a resume file as raw text, whatever its declared type.
///
/// No format-specific decoding is performed: bytes are decoded lossily as
/// UTF-8, which only yields sensible input for genuinely text-encoded
/// content. The extension gate keeps out files we never accept at all.
pub async fn read_resume_text(path: &Path, file_name: &str) -> Result<String> {
    validate_file_extension(file_name, ACCEPTED_RESUME_EXTENSIONS)?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
