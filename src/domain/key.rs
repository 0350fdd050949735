use std::fmt;

/// The (category, searchQuery, country) tuple identifying one logical
/// feed request. Structural equality over all three fields makes it
/// the cache key; caching on anything less serves stale results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub category: String,
    pub query: String,
    pub country: String,
}

impl FetchKey {
    pub fn new(category: &str, query: &str, country: &str) -> Self {
        Self {
            category: category.to_string(),
            query: query.to_string(),
            country: country.to_string(),
        }
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "category={:?} query={:?} country={:?}",
            self.category, self.query, self.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_structural_equality() {
        let a = FetchKey::new("technology", "", "us");
        let b = FetchKey::new("technology", "", "us");
        assert_eq!(a, b);
        assert_ne!(a, FetchKey::new("technology", "", "de"));
        assert_ne!(a, FetchKey::new("technology", "rust", "us"));
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut map = HashMap::new();
        map.insert(FetchKey::new("general", "", "us"), 1);
        assert_eq!(map.get(&FetchKey::new("general", "", "us")), Some(&1));
    }
}
