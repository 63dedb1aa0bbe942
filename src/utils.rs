// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Content type sent with the résumé part. Unknown types go through as raw bytes;
/// the server is the one that decides what it accepts.
pub fn content_type_for(filename: &str) -> &'static str {
    match get_file_extension(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => DOCX_CONTENT_TYPE,
        Some("doc") => "application/msword",
        _ => "application/octet-stream",
    }
}

/// Strip the extension and anything unsafe for a file name
pub fn normalize_report_stem(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resume");

    let normalized: String = stem
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if normalized.is_empty() {
        "resume".to_string()
    } else {
        normalized
    }
}

/// Build report file path inside `dir`
pub fn report_file_path(dir: &Path, resume_name: &str) -> PathBuf {
    dir.join(format!(
        "{}_analysis_{}.html",
        normalize_report_stem(resume_name),
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write file content with proper error context
pub async fn write_file_content(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent).await?;
        }
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
