use crate::dom::{Dom, SearchEvent};
use crate::index::{SearchIndex, TextIndexer};
use crate::render::ResultRenderer;

/// Outcome of a key-up, mostly of interest to tests and logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Not a key-up on the search input, or a navigation key
    Ignored,
    /// Input was emptied; results were cleared without querying
    Cleared,
    /// A query ran and this many results were rendered
    Searched(usize),
    /// The query failed; results were cleared
    Failed,
}

/// Runs a search for whatever the user has typed so far
#[derive(Debug, Clone)]
pub struct SearchRunner {
    search_input_id: String,
}

impl SearchRunner {
    pub fn new(search_input_id: impl Into<String>) -> Self {
        SearchRunner {
            search_input_id: search_input_id.into(),
        }
    }

    /// Rewrite the raw input into a query term. Tokens are split on single
    /// spaces and joined back unchanged; per-token rewrites (such as
    /// wildcards) hook in here.
    pub fn query_term(input: &str) -> String {
        input
            .split(' ')
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Search on key-up. Only the search input triggers a search, and never
    /// on the navigation keys.
    pub fn on_key_up<D: Dom, I: TextIndexer>(
        &self,
        dom: &mut D,
        index: &SearchIndex<I>,
        renderer: &ResultRenderer,
        event: &SearchEvent,
    ) -> SearchOutcome {
        if event.target.id != self.search_input_id {
            return SearchOutcome::Ignored;
        }
        if event.key.is_some_and(|key| key.is_navigation()) {
            return SearchOutcome::Ignored;
        }
        self.run(dom, index, renderer, &event.target.value)
    }

    /// Search for `input` and render the results
    pub fn run<D: Dom, I: TextIndexer>(
        &self,
        dom: &mut D,
        index: &SearchIndex<I>,
        renderer: &ResultRenderer,
        input: &str,
    ) -> SearchOutcome {
        // Without this every document would count as a match
        if input.is_empty() {
            renderer.render(dom, &[]);
            return SearchOutcome::Cleared;
        }

        let term = Self::query_term(input);
        match index.query(&term) {
            Ok(results) => {
                tracing::debug!(query = %term, results = results.len(), "search");
                renderer.render(dom, &results);
                SearchOutcome::Searched(results.len())
            }
            Err(e) => {
                tracing::warn!(query = %term, error = %e, "search failed");
                renderer.render(dom, &[]);
                SearchOutcome::Failed
            }
        }
    }
}
