use crate::error::SearchError;

/// Number of entities returned per page.
pub const PAGE_SIZE: u32 = 5;

/// Appended to the lower bound to form the exclusive upper bound of a prefix
/// range. U+F8FF sorts after most realistic input, but text containing code
/// points above it can miss matches.
pub const HIGH_SENTINEL: char = '\u{f8ff}';

/// A half-open prefix range over a normalized field, optionally resumed after
/// a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixQuery {
    pub field: String,
    pub lower_bound: String,
    pub upper_bound: String,
    pub limit: u32,
    pub after: Option<String>,
}

/// Lower-cases search text the same way stored `*Lower` fields are derived.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

impl PrefixQuery {
    /// Builds `[lower(text), lower(text) + HIGH_SENTINEL)` on `field`.
    pub fn build(field: &str, text: &str, limit: u32) -> Result<Self, SearchError> {
        if text.trim().is_empty() {
            return Err(SearchError::EmptySearchText);
        }

        let lower_bound = normalize(text);
        let mut upper_bound = lower_bound.clone();
        upper_bound.push(HIGH_SENTINEL);

        Ok(Self {
            field: field.to_string(),
            lower_bound,
            upper_bound,
            limit,
            after: None,
        })
    }

    /// Resumes the query strictly after `cursor`. A missing or empty cursor
    /// starts from the beginning of the range.
    pub fn resume_after(mut self, cursor: Option<&str>) -> Self {
        self.after = cursor.filter(|c| !c.is_empty()).map(str::to_string);
        self
    }

    /// Whether a normalized field value falls inside this query's window.
    pub fn matches(&self, value: &str) -> bool {
        let in_range = value >= self.lower_bound.as_str() && value < self.upper_bound.as_str();
        let past_cursor = self.after.as_deref().is_none_or(|after| value > after);
        in_range && past_cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_lowercases_and_appends_sentinel() {
        let query = PrefixQuery::build("usernameLower", "AlI", PAGE_SIZE).unwrap();
        assert_eq!(query.field, "usernameLower");
        assert_eq!(query.lower_bound, "ali");
        assert_eq!(query.upper_bound, "ali\u{f8ff}");
        assert_eq!(query.limit, 5);
        assert!(query.after.is_none());
    }

    #[test]
    fn test_build_rejects_empty_text() {
        for text in ["", "   ", "\t\n"] {
            let err = PrefixQuery::build("titleLower", text, PAGE_SIZE).unwrap_err();
            assert!(matches!(err, SearchError::EmptySearchText), "{text:?}");
        }
    }

    #[test]
    fn test_resume_after_ignores_empty_cursor() {
        let query = PrefixQuery::build("usernameLower", "a", PAGE_SIZE).unwrap();
        assert!(query.clone().resume_after(Some("")).after.is_none());
        assert!(query.clone().resume_after(None).after.is_none());
        assert_eq!(
            query.resume_after(Some("alice")).after.as_deref(),
            Some("alice")
        );
    }

    #[test]
    fn test_matches_prefix_window() {
        let query = PrefixQuery::build("usernameLower", "car", PAGE_SIZE).unwrap();
        assert!(query.matches("car"));
        assert!(query.matches("carol"));
        assert!(query.matches("caroline"));
        assert!(!query.matches("ca"));
        assert!(!query.matches("cas"));
        assert!(!query.matches("bob"));
    }

    #[test]
    fn test_matches_respects_cursor() {
        let query = PrefixQuery::build("usernameLower", "car", PAGE_SIZE)
            .unwrap()
            .resume_after(Some("carol"));
        assert!(!query.matches("car"));
        assert!(!query.matches("carol"));
        assert!(query.matches("caroline"));
    }
}
