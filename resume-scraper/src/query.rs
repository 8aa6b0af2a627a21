use serde::{Deserialize, Serialize};

/// Pagination safety cap per walk. The source sites terminate walks with an
/// empty listing or a missing next-page control; the cap bounds a misbehaving
/// response that keeps claiming another page.
pub const DEFAULT_MAX_PAGES: u32 = 25;

/// Caller-resolved search parameters for one walk.
///
/// `keywords` feed the relevance ranker only and never reach a site query.
/// `experience` and `salary` are caller-facing codes resolved against each
/// site's own bands at URL-building time.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchQuery {
    pub position: String,
    pub location: Option<String>,
    pub keywords: Vec<String>,
    pub experience: Option<String>,
    pub salary: Option<String>,
    pub limit: Option<usize>,
    pub max_pages: u32,
}

impl SearchQuery {
    pub fn new(position: impl Into<String>) -> Self {
        SearchQuery {
            position: position.into(),
            location: None,
            keywords: Vec::new(),
            experience: None,
            salary: None,
            limit: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Static translation from a caller-facing filter code to the literal value
/// a site's search URL expects. Plain data handed to the URL builders, one
/// map per site and filter, since the sites band experience and salary
/// differently.
pub struct CodeMap(&'static [(&'static str, &'static str)]);

impl CodeMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        CodeMap(entries)
    }

    pub fn get(&self, code: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(from, _)| *from == code)
            .map(|(_, to)| *to)
    }
}
