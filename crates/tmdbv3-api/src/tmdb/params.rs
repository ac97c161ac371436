//! Query parameters forwarded to TMDB endpoints.

/// Ordered set of query parameters.
///
/// Names are unique: setting a name again replaces its value in place,
/// keeping the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Sets `name` to `value`, replacing any earlier value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.pairs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.pairs.push((name, value));
        }
    }

    /// Builder form of [`QueryParams::set`].
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Result page (TMDB accepts 1..=1000).
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.param("page", page.to_string())
    }

    /// Response language (ISO 639-1, optionally with region, e.g. `en-US`).
    #[must_use]
    pub fn language(self, language: &str) -> Self {
        self.param("language", language)
    }

    /// Whether adult titles are included in searches.
    #[must_use]
    pub fn include_adult(self, include: bool) -> Self {
        self.param("include_adult", include.to_string())
    }

    /// Filters search results by any release year.
    #[must_use]
    pub fn year(self, year: u32) -> Self {
        self.param("year", year.to_string())
    }

    /// Filters search results by primary release year.
    #[must_use]
    pub fn primary_release_year(self, year: u32) -> Self {
        self.param("primary_release_year", year.to_string())
    }

    /// Requests sub-resources in the same call (e.g. `["credits", "images"]`).
    #[must_use]
    pub fn append_to_response(self, resources: &[&str]) -> Self {
        self.param("append_to_response", resources.join(","))
    }

    /// Returns the value for `name`, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of parameters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` when no parameter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.set(name, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_insertion_order() {
        // Arrange & Act
        let params = QueryParams::new()
            .language("en-US")
            .page(2)
            .include_adult(false);

        // Assert
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("language", "en-US"),
                ("page", "2"),
                ("include_adult", "false")
            ]
        );
    }

    #[test]
    fn test_set_replaces_in_place() {
        // Arrange
        let mut params = QueryParams::new().page(1).language("ja-JP");

        // Act
        params.set("page", "3");

        // Assert
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("page"), Some("3"));
        assert_eq!(params.iter().next(), Some(("page", "3")));
    }

    #[test]
    fn test_year_filters() {
        // Arrange & Act
        let params = QueryParams::new().year(1999).primary_release_year(2003);

        // Assert
        assert_eq!(params.get("year"), Some("1999"));
        assert_eq!(params.get("primary_release_year"), Some("2003"));
        assert_eq!(params.get("page"), None);
    }

    #[test]
    fn test_append_to_response_joins_with_comma() {
        // Arrange & Act
        let params = QueryParams::new().append_to_response(&["credits", "images"]);

        // Assert
        assert_eq!(params.get("append_to_response"), Some("credits,images"));
    }

    #[test]
    fn test_from_iterator_deduplicates() {
        // Arrange & Act
        let params: QueryParams = [("page", "1"), ("language", "fr"), ("page", "4")]
            .into_iter()
            .collect();

        // Assert
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("page"), Some("4"));
    }

    #[test]
    fn test_default_is_empty() {
        // Arrange & Act
        let params = QueryParams::default();

        // Assert
        assert!(params.is_empty());
        assert_eq!(params, QueryParams::new());
    }
}
