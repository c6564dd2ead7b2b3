//! Writing saved drawings to disk.

use crate::config::ExportConfig;
use crate::image::EncodedImage;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while exporting a drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write drawing: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filename template '{0}' produced an empty name")]
    EmptyFilename(String),

    #[error("Filename template '{0}' must not contain path separators")]
    InvalidTemplate(String),
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `extension` - File extension (e.g., "png")
pub fn generate_filename(template: &str, extension: &str) -> Result<String, ExportError> {
    let mut stem = String::new();
    {
        use std::fmt::Write as _;
        // chrono reports unknown specifiers as a fmt error
        write!(stem, "{}", Local::now().format(template))
            .map_err(|_| ExportError::InvalidTemplate(template.to_string()))?;
    }
    let stem = stem.trim();
    if stem.is_empty() {
        return Err(ExportError::EmptyFilename(template.to_string()));
    }
    if stem.contains('/') || stem.contains(std::path::MAIN_SEPARATOR) {
        return Err(ExportError::InvalidTemplate(template.to_string()));
    }
    Ok(format!("{stem}.{extension}"))
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes an encoded drawing into the configured export directory.
///
/// Returns the path of the new file.
pub fn save_png(image: &EncodedImage, config: &ExportConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&expand_tilde(&config.directory))?;
    let filename = generate_filename(&config.filename_template, "png")?;
    let file_path = directory.join(&filename);

    log::info!(
        "Saving drawing to: {} ({} bytes)",
        file_path.display(),
        image.len()
    );

    fs::write(&file_path, image.as_bytes())?;

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    // User read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
