//! Free-text filter predicate
//!
//! A [`Predicate`] is built once per request and handed unchanged to both
//! the page fetch and the count, so the two can never disagree about which
//! records match. Stores either evaluate it in-process with
//! [`Predicate::matches`] or render it to their own query language.

use crate::core::record::Advocate;

/// Record fields the free-text query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    FirstName,
    LastName,
    City,
    Degree,
    /// Matches when any single tag contains the query
    Specialties,
}

impl SearchField {
    /// Fields searched when specialties are not enabled
    pub const DEFAULT: [SearchField; 4] = [
        SearchField::FirstName,
        SearchField::LastName,
        SearchField::City,
        SearchField::Degree,
    ];

    fn contains(&self, advocate: &Advocate, needle: &str) -> bool {
        let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
        match self {
            SearchField::FirstName => contains(advocate.first_name.as_str()),
            SearchField::LastName => contains(advocate.last_name.as_str()),
            SearchField::City => contains(advocate.city.as_str()),
            SearchField::Degree => contains(advocate.degree.as_str()),
            SearchField::Specialties => advocate.specialties.iter().any(|tag| contains(tag.as_str())),
        }
    }
}

/// Filter condition derived from the free-text query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// No query: every record matches
    MatchAll,
    /// Case-insensitive substring match on any of `fields`
    Contains {
        needle: String,
        fields: Vec<SearchField>,
    },
}

impl Predicate {
    /// Build the predicate for a query string
    ///
    /// Surrounding whitespace is ignored; a blank query matches everything.
    pub fn from_query(query: &str, search_specialties: bool) -> Self {
        let needle = query.trim();
        if needle.is_empty() {
            return Predicate::MatchAll;
        }

        let mut fields = SearchField::DEFAULT.to_vec();
        if search_specialties {
            fields.push(SearchField::Specialties);
        }

        Predicate::Contains {
            needle: needle.to_string(),
            fields,
        }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, Predicate::MatchAll)
    }

    /// Evaluate against a single record
    pub fn matches(&self, advocate: &Advocate) -> bool {
        match self {
            Predicate::MatchAll => true,
            Predicate::Contains { needle, fields } => {
                let needle = needle.to_lowercase();
                fields.iter().any(|field| field.contains(advocate, &needle))
            }
        }
    }

    /// `LIKE` pattern for the needle, with `\`, `%` and `_` escaped
    ///
    /// Use with `ESCAPE '\'`. Returns `None` for [`Predicate::MatchAll`].
    pub fn like_pattern(&self) -> Option<String> {
        match self {
            Predicate::MatchAll => None,
            Predicate::Contains { needle, .. } => {
                let mut pattern = String::with_capacity(needle.len() + 2);
                pattern.push('%');
                for c in needle.chars() {
                    if matches!(c, '\\' | '%' | '_') {
                        pattern.push('\\');
                    }
                    pattern.push(c);
                }
                pattern.push('%');
                Some(pattern)
            }
        }
    }
}
