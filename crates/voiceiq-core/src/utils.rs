//! Utility functions for the `VoiceIQ` web tier

use crate::{Error, Result, config::UploadConfig};
use std::path::Path;

/// Validate file extension against an allow-list
#[must_use]
pub fn validate_file_extension(filename: &str, allowed: &[String]) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            allowed
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

/// Validate an upload before any network activity
///
/// # Errors
///
/// Returns [`Error::UnsupportedMediaFormat`] when the extension is outside
/// the allow-list and [`Error::FileSizeExceeded`] when the file is larger
/// than the configured maximum.
pub fn validate_upload(filename: &str, size: u64, config: &UploadConfig) -> Result<()> {
    if !validate_file_extension(filename, &config.allowed_extensions) {
        let format = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();
        return Err(Error::UnsupportedMediaFormat { format });
    }

    if size > config.max_file_size {
        return Err(Error::FileSizeExceeded {
            size,
            max_size: config.max_file_size,
        });
    }

    Ok(())
}

/// Format a byte count for display (B, KB, MB)
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Initials shown in the avatar fallback
///
/// Two initials from a multi-word name, one from a single-word name, the
/// first letter of the email otherwise.
#[must_use]
pub fn initials(name: Option<&str>, email: &str) -> String {
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        let mut words = name.split_whitespace();
        let first = words.next().and_then(|w| w.chars().next());
        let last = words.last().and_then(|w| w.chars().next());

        return match (first, last) {
            (Some(f), Some(l)) => format!("{f}{l}").to_uppercase(),
            (Some(f), None) => f.to_uppercase().to_string(),
            _ => "U".to_string(),
        };
    }

    email
        .chars()
        .next()
        .map_or_else(|| "U".to_string(), |c| c.to_uppercase().to_string())
}
