use crate::error::FileError;
use std::path::Path;
use tokio::fs;

/// Read a newline-delimited plate list
///
/// Blank lines and lines starting with `#` are skipped; everything else is
/// returned trimmed and otherwise untouched so validation sees the raw input.
pub async fn load_plates_from_file(path: &Path) -> Result<Vec<String>, FileError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| FileError::read_failed(path.display().to_string(), e))?;

    let plates = parse_plate_list(&content);
    tracing::info!(
        "Loaded {} plate numbers from {}",
        plates.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(plates)
}

pub fn parse_plate_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
