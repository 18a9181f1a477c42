//! Form-field validation. Lengths count characters, not bytes, so
//! multi-byte titles like "Amélie" measure the way users expect.

use super::PageError;

const MAX_TITLE_CHARS: usize = 60;
const YEAR_CHARS: usize = 4;
const MAX_NAME_CHARS: usize = 20;

pub fn title_is_valid(title: &str) -> bool {
    let len = title.chars().count();
    len > 0 && len <= MAX_TITLE_CHARS
}

pub fn year_is_valid(year: &str) -> bool {
    year.chars().count() == YEAR_CHARS
}

pub fn name_is_valid(name: &str) -> bool {
    let len = name.chars().count();
    len > 0 && len <= MAX_NAME_CHARS
}

/// Route ids come in as raw path segments; anything non-numeric is a
/// miss, not a malformed request.
pub fn parse_movie_id(raw: &str) -> Result<i32, PageError> {
    raw.parse().map_err(|_| PageError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_valid() {
        assert!(title_is_valid("Leon"));
        assert!(title_is_valid("Amélie"));
        assert!(title_is_valid(&"x".repeat(60)));
        assert!(!title_is_valid(""));
        assert!(!title_is_valid(&"x".repeat(61)));
    }

    #[test]
    fn test_year_is_valid() {
        assert!(year_is_valid("2001"));
        assert!(year_is_valid("abcd"));
        assert!(!year_is_valid(""));
        assert!(!year_is_valid("199"));
        assert!(!year_is_valid("19999"));
    }

    #[test]
    fn test_name_is_valid() {
        assert!(name_is_valid("Jason Cao"));
        assert!(name_is_valid(&"x".repeat(20)));
        assert!(!name_is_valid(""));
        assert!(!name_is_valid(&"x".repeat(21)));
    }

    #[test]
    fn test_parse_movie_id() {
        assert!(matches!(parse_movie_id("7"), Ok(7)));
        assert!(parse_movie_id("abc").is_err());
        assert!(parse_movie_id("").is_err());
    }
}
