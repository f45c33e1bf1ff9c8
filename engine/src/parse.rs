/// Tokenize text for indexing: lowercase, split on anything that is not
/// alphanumeric, drop empty pieces
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Parse a query into distinct tokens, keeping first-seen order
pub fn parse_query(query: &str) -> Vec<String> {
    let mut tokens = tokenize(query);
    let mut seen = std::collections::HashSet::new();
    tokens.retain(|t| seen.insert(t.clone()));
    tokens
}

/// How a query token matched an indexed term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermMatch {
    Exact,
    Prefix,
    Substring,
}

impl TermMatch {
    /// Classify how `token` matches `term`, if at all
    pub fn classify(token: &str, term: &str) -> Option<Self> {
        if term == token {
            Some(TermMatch::Exact)
        } else if term.starts_with(token) {
            Some(TermMatch::Prefix)
        } else if term.contains(token) {
            Some(TermMatch::Substring)
        } else {
            None
        }
    }

    /// Score multiplier for this kind of match
    pub fn weight(self) -> f32 {
        match self {
            TermMatch::Exact => 1.0,
            TermMatch::Prefix => 0.5,
            TermMatch::Substring => 0.25,
        }
    }
}
