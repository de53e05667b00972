//! Filter for placeholder station names.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Names made of one or two uppercase letters followed by digits.
pub const DEFAULT_CODED_NAME_PATTERN: &str = r"^[A-Z]{1,2}\d+$";

static DEFAULT_CODED: LazyLock<Regex> = LazyLock::new(|| {
    // Constant pattern, covered by tests
    Regex::new(DEFAULT_CODED_NAME_PATTERN).unwrap()
});

/// Decides which station names are real place names.
///
/// Names matching the coded pattern are placeholders left over from data
/// imports and are excluded from exported graphs. Genuine names that
/// happen to match can be allowed explicitly.
///
/// # Examples
///
/// ```
/// use transit_router::export::StationNameFilter;
///
/// let filter = StationNameFilter::default();
/// assert!(filter.is_real_name("Siam"));
/// assert!(!filter.is_real_name("N1"));
/// assert!(!filter.is_real_name("EN12"));
///
/// let filter = StationNameFilter::default().allow(["A1"]);
/// assert!(filter.is_real_name("A1"));
/// ```
#[derive(Debug, Clone)]
pub struct StationNameFilter {
    coded: Regex,
    allowed: HashSet<String>,
}

impl StationNameFilter {
    /// Create a filter with a custom coded-name pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            coded: Regex::new(pattern)?,
            allowed: HashSet::new(),
        })
    }

    /// Treat these names as real even if they match the pattern.
    pub fn allow<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed.extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns true if `name` should appear in exported graphs.
    pub fn is_real_name(&self, name: &str) -> bool {
        self.allowed.contains(name) || !self.coded.is_match(name)
    }

    /// The coded-name pattern in use.
    pub fn pattern(&self) -> &str {
        self.coded.as_str()
    }
}

impl Default for StationNameFilter {
    fn default() -> Self {
        Self {
            coded: DEFAULT_CODED.clone(),
            allowed: HashSet::new(),
        }
    }
}
