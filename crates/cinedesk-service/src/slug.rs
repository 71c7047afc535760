//! URL slug normalization for films, genres, categories and news.

use cinedesk_core::{AppError, AppResult};

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 120;

/// Lowercase `input`, fold common Latin diacritics (including Vietnamese)
/// to ASCII and join alphanumeric runs with single hyphens.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        let c = fold(c);
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Use the caller's slug when given, otherwise derive one from `source`.
/// Fails when neither produces a non-empty slug.
pub fn resolve(explicit: Option<&str>, source: &str) -> AppResult<String> {
    let slug = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => slugify(raw),
        None => slugify(source),
    };
    if slug.is_empty() {
        return Err(AppError::invalid_field(
            "slug",
            "slug must contain at least one letter or digit",
        ));
    }
    Ok(slug)
}

fn fold(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ạ' | 'ả' | 'ấ' | 'ầ' | 'ẩ' | 'ẫ' | 'ậ' | 'ă'
        | 'ắ' | 'ằ' | 'ẳ' | 'ẵ' | 'ặ' => 'a',
        'è' | 'é' | 'ê' | 'ë' | 'ẹ' | 'ẻ' | 'ẽ' | 'ế' | 'ề' | 'ể' | 'ễ' | 'ệ' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ị' | 'ỉ' | 'ĩ' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ọ' | 'ỏ' | 'ố' | 'ồ' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ớ'
        | 'ờ' | 'ở' | 'ỡ' | 'ợ' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'ụ' | 'ủ' | 'ũ' | 'ư' | 'ứ' | 'ừ' | 'ử' | 'ữ' | 'ự' => 'u',
        'ỳ' | 'ý' | 'ÿ' | 'ỵ' | 'ỷ' | 'ỹ' => 'y',
        'đ' => 'd',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("The Matrix Reloaded"), "the-matrix-reloaded");
        assert_eq!(slugify("  Spider-Man: No Way Home!  "), "spider-man-no-way-home");
        assert_eq!(slugify("Hành Động"), "hanh-dong");
        assert_eq!(slugify("Đất Rừng Phương Nam"), "dat-rung-phuong-nam");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_resolve_prefers_explicit() {
        assert_eq!(resolve(Some("Custom Slug"), "Title").unwrap(), "custom-slug");
        assert_eq!(resolve(Some("  "), "Fallback Title").unwrap(), "fallback-title");
        assert!(resolve(None, "???").is_err());
    }

    #[test]
    fn test_slug_is_bounded() {
        let long = "a ".repeat(400);
        assert!(slugify(&long).len() <= MAX_SLUG_LEN);
    }
}
