//! Object key rules shared by every provider.

use cinedesk_core::AppError;
use cinedesk_core::result::AppResult;

/// Reject keys that could escape the storage root or address nothing.
///
/// A valid key is a relative, slash-separated path of non-empty segments,
/// none of which is `.` or `..`.
pub fn validate_key(key: &str) -> AppResult<()> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if invalid {
        return Err(AppError::invalid_field(
            "fileName",
            format!("Invalid object key: '{key}'"),
        ));
    }
    Ok(())
}

/// Join a public base URL and a key.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}

/// Strip a public base URL from `url`, returning the key.
pub(crate) fn strip_base(base: &str, url: &str) -> Option<String> {
    let prefix = format!("{}/", base.trim_end_matches('/'));
    url.strip_prefix(&prefix)
        .filter(|key| validate_key(key).is_ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("images/posters/a.jpg").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("images/../../etc/passwd").is_err());
        assert!(validate_key("images//a.jpg").is_err());
        assert!(validate_key("images\\a.jpg").is_err());
    }

    #[test]
    fn test_url_round_trip() {
        let url = join_url("/media/", "videos/films/x.mp4");
        assert_eq!(url, "/media/videos/films/x.mp4");
        assert_eq!(strip_base("/media", &url).as_deref(), Some("videos/films/x.mp4"));
        assert_eq!(strip_base("/media", "https://cdn.example.com/x.mp4"), None);
        assert_eq!(strip_base("/media", "/media/../secret"), None);
    }
}
