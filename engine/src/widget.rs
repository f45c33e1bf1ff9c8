use crate::config::WidgetConfig;
use crate::dom::{Disposition, Dom, SearchEvent};
use crate::dropdown::DropdownController;
use crate::error::IndexError;
use crate::index::{DocumentStore, SearchIndex, TextIndexer};
use crate::navigate::KeyboardNavigator;
use crate::render::ResultRenderer;
use crate::runner::{SearchOutcome, SearchRunner};
use crate::types::ResultRecord;

pub struct SearchWidget<D: Dom, I: TextIndexer> {
    dom: D,
    index: SearchIndex<I>,
    dropdown: DropdownController,
    navigator: KeyboardNavigator,
    runner: SearchRunner,
    renderer: ResultRenderer,
}

impl<D: Dom, I: TextIndexer> SearchWidget<D, I> {
    pub fn new(dom: D, store: DocumentStore, indexer: I, config: &WidgetConfig) -> Self {
        SearchWidget {
            dom,
            index: SearchIndex::new(store, indexer),
            dropdown: DropdownController::new(config.search_input_id.as_str()),
            navigator: KeyboardNavigator::new(
                config.search_input_id.as_str(),
                config.result_id_prefix.as_str(),
            ),
            runner: SearchRunner::new(config.search_input_id.as_str()),
            renderer: ResultRenderer::new(config.result_id_prefix.as_str()),
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn doc_count(&self) -> usize {
        self.index.store().len()
    }

    pub fn is_index_built(&self) -> bool {
        self.index.is_built()
    }

    /// Click on the search input: open the dropdown, building the index first
    pub fn on_search_click(&mut self, event: &SearchEvent) -> Disposition {
        self.dropdown
            .toggle_open(&mut self.dom, &mut self.index, event)
    }

    /// Document-level click while the dropdown is open
    pub fn on_document_click(&mut self, event: &SearchEvent) -> Disposition {
        self.dropdown.close(&mut self.dom, event);
        Disposition::PassThrough
    }

    /// Document-level key-down: arrow navigation and Escape
    pub fn on_key_down(&mut self, event: &SearchEvent) -> Disposition {
        let (disposition, close) = self.navigator.on_key_down(&mut self.dom, event);
        if close {
            self.dropdown.close_now(&mut self.dom);
        }
        disposition
    }

    /// Document-level key-up: search as the user types
    pub fn on_key_up(&mut self, event: &SearchEvent) -> SearchOutcome {
        self.runner
            .on_key_up(&mut self.dom, &self.index, &self.renderer, event)
    }

    /// Query the index directly, building it if needed. Nothing is rendered.
    pub fn search(&mut self, query: &str) -> Result<Vec<ResultRecord>, IndexError> {
        self.index.ensure_built()?;
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.index.query(&SearchRunner::query_term(query))
    }
}
