// SPDX-License-Identifier: GPL-3.0-only

//! Storage locations and photo file naming

use crate::constants::APP_NAME;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Default photo directory (~/Pictures/camloc)
pub fn default_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(APP_NAME)
}

/// Directory for the terminal UI's log file
pub fn log_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
}

/// File name for a photo taken at `timestamp`
pub fn photo_file_name(timestamp: DateTime<Local>) -> String {
    format!("IMG_{}.jpg", timestamp.format("%Y%m%d_%H%M%S_%3f"))
}

/// `file://` URI for an absolute path
pub fn file_uri(path: &Path) -> String {
    let path = path.to_string_lossy();
    let mut uri = String::with_capacity(path.len() + 7);
    uri.push_str("file://");
    for ch in path.chars() {
        match ch {
            ' ' => uri.push_str("%20"),
            '#' => uri.push_str("%23"),
            '%' => uri.push_str("%25"),
            '?' => uri.push_str("%3F"),
            _ => uri.push(ch),
        }
    }
    uri
}

/// Inverse of [`file_uri`]; `None` for anything that is not a file URI
pub fn path_from_uri(uri: &str) -> Option<PathBuf> {
    let encoded = uri.strip_prefix("file://")?;
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut rest = encoded;
    while let Some(idx) = rest.find('%') {
        bytes.extend_from_slice(rest[..idx].as_bytes());
        let code = rest.get(idx + 1..idx + 3)?;
        bytes.push(u8::from_str_radix(code, 16).ok()?);
        rest = &rest[idx + 3..];
    }
    bytes.extend_from_slice(rest.as_bytes());
    // Escapes are UTF-8 sequences, not single characters
    String::from_utf8(bytes).ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_photo_file_name_has_millisecond_timestamp() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(photo_file_name(ts), "IMG_20240309_140507_000.jpg");
    }

    #[test]
    fn test_file_uri_escapes_reserved_characters() {
        let uri = file_uri(Path::new("/home/me/My Pictures/#1.jpg"));
        assert_eq!(uri, "file:///home/me/My%20Pictures/%231.jpg");
        assert_eq!(
            path_from_uri(&uri),
            Some(PathBuf::from("/home/me/My Pictures/#1.jpg"))
        );
    }

    #[test]
    fn test_path_from_uri_decodes_multibyte_escapes() {
        assert_eq!(
            path_from_uri("file:///tmp/caf%C3%A9.jpg"),
            Some(PathBuf::from("/tmp/café.jpg"))
        );
        // A lone continuation byte is not valid UTF-8
        assert_eq!(path_from_uri("file:///tmp/%A9.jpg"), None);
    }

    #[test]
    fn test_path_from_uri_rejects_other_schemes() {
        assert_eq!(path_from_uri("content://media/42"), None);
    }
}
