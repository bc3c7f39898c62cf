//! Auto-reply tag search and selection.

use super::validation::{ValidationError, validate_tag_keyword};

/// Tags chosen for the module, in selection order and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: Vec<String>,
}

impl TagSelection {
    /// Adds a tag. Returns `false` if it was already selected.
    pub fn add(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes a tag. Returns `false` if it was not selected.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Joins the selection into the single parameter value the backend splits.
    pub fn joined(&self, splitter: &str) -> String {
        self.tags.join(splitter)
    }
}

/// State of the tag keyword search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSearch {
    results: Vec<String>,
    in_flight: Option<String>,
    error: Option<ValidationError>,
}

impl TagSearch {
    /// Starts a search for `keyword`.
    ///
    /// Returns `Ok(true)` when a request should be sent and `Ok(false)` while
    /// an earlier search is still running. Clears the previous results when
    /// a new search starts.
    pub fn begin(&mut self, keyword: &str, splitter: &str) -> Result<bool, ValidationError> {
        if let Err(e) = validate_tag_keyword(keyword, splitter) {
            self.error = Some(e.clone());
            return Err(e);
        }
        if self.in_flight.is_some() {
            return Ok(false);
        }
        self.error = None;
        self.results.clear();
        self.in_flight = Some(keyword.to_string());
        Ok(true)
    }

    /// Whether `begin` accepted a keyword whose results have not arrived.
    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Keyword of the running search, if any.
    pub fn in_flight(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }

    /// Applies search results for `keyword`.
    ///
    /// The keyword itself is always offered first unless the server already
    /// returned it. A failed lookup offers only the keyword.
    pub fn finish(&mut self, keyword: &str, found: Result<Vec<String>, String>) {
        if self.in_flight.as_deref() != Some(keyword) {
            return;
        }
        self.in_flight = None;
        self.results = match found {
            Ok(names) if !names.is_empty() => {
                let mut results = Vec::with_capacity(names.len() + 1);
                if !names.iter().any(|n| n == keyword) {
                    results.push(keyword.to_string());
                }
                results.extend(names.into_iter().filter(|n| !n.is_empty()));
                results
            }
            _ => vec![keyword.to_string()],
        };
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// The last rejected keyword error, shown as a hint.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }
}

/// Popular tags loaded once when the form opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PopularTags {
    #[default]
    Loading,
    Loaded(Vec<String>),
    /// Nothing to show: either none exist or the lookup failed.
    Unavailable,
}

impl PopularTags {
    pub fn from_result(found: Result<Vec<String>, String>) -> Self {
        match found {
            Ok(names) if !names.is_empty() => PopularTags::Loaded(names),
            _ => PopularTags::Unavailable,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            PopularTags::Loaded(names) => names,
            _ => &[],
        }
    }
}
