// Search scope for substring queries over tasks

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which columns a search query is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// id (as text), name, or description
    #[default]
    All,
    /// name only
    Name,
}

impl SearchScope {
    /// SQL predicate matching `?1` as a case-sensitive substring.
    ///
    /// `instr()` is used instead of LIKE so that `%` and `_` in the query
    /// are matched literally and ASCII case is significant.
    pub(crate) fn to_sql(self) -> &'static str {
        match self {
            SearchScope::All => {
                "instr(CAST(id AS TEXT), ?1) > 0 \
                 OR instr(name, ?1) > 0 \
                 OR instr(COALESCE(description, ''), ?1) > 0"
            }
            SearchScope::Name => "instr(name, ?1) > 0",
        }
    }
}

impl std::fmt::Display for SearchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchScope::All => write!(f, "all"),
            SearchScope::Name => write!(f, "name"),
        }
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(SearchScope::All),
            "name" => Ok(SearchScope::Name),
            other => Err(format!("Invalid search scope: {} (expected 'all' or 'name')", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scope_is_all() {
        assert_eq!(SearchScope::default(), SearchScope::All);
    }

    #[test]
    fn test_scope_to_sql() {
        assert_eq!(SearchScope::Name.to_sql(), "instr(name, ?1) > 0");
        let all = SearchScope::All.to_sql();
        assert!(all.contains("CAST(id AS TEXT)"));
        assert!(all.contains("description"));
        assert!(!all.contains("LIKE"));
    }

    #[test]
    fn test_scope_display_and_parse() {
        assert_eq!(SearchScope::All.to_string(), "all");
        assert_eq!(SearchScope::Name.to_string(), "name");
        assert_eq!("name".parse::<SearchScope>().unwrap(), SearchScope::Name);
        assert_eq!("ALL".parse::<SearchScope>().unwrap(), SearchScope::All);
        assert!("desc".parse::<SearchScope>().is_err());
    }

    #[test]
    fn test_scope_serde() {
        let json = serde_json::to_string(&SearchScope::Name).unwrap();
        assert_eq!(json, "\"name\"");
        let scope: SearchScope = serde_yaml::from_str("all").unwrap();
        assert_eq!(scope, SearchScope::All);
    }
}
