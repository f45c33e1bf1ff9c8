use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub mod build;
pub mod config;
pub mod dom;
pub mod dropdown;
pub mod error;
pub mod index;
pub mod logging;
pub mod navigate;
pub mod parse;
pub mod rank;
pub mod render;
pub mod runner;
pub mod types;
pub mod web;
pub mod widget;

use crate::build::Bm25Indexer;
use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::index::DocumentStore;
use crate::web::WebDom;
use crate::widget::SearchWidget;

type WebWidget = SearchWidget<WebDom, Bm25Indexer>;

// Use thread_local with RefCell for lazy initialization from JS
thread_local! {
    static WIDGET: RefCell<Option<WebWidget>> = const { RefCell::new(None) };
}

/// Run `f` against the installed widget from inside an event handler.
/// Returns None if no widget is installed or it is already busy.
pub(crate) fn dispatch<R>(f: impl FnOnce(&mut WebWidget) -> R) -> Option<R> {
    WIDGET.with(|widget| match widget.try_borrow_mut() {
        Ok(mut widget) => widget.as_mut().map(f),
        Err(_) => {
            tracing::warn!("search widget busy, event dropped");
            None
        }
    })
}

fn with_widget<R>(f: impl FnOnce(&mut WebWidget) -> R) -> Result<R, WidgetError> {
    WIDGET.with(|widget| {
        let mut slot = widget.try_borrow_mut().map_err(|_| WidgetError::Busy)?;
        slot.as_mut().map(f).ok_or(WidgetError::NotInitialized)
    })
}

/// Swap the installed widget, returning the previous one
fn install(new: Option<WebWidget>) -> Result<Option<WebWidget>, WidgetError> {
    WIDGET.with(|widget| {
        let mut slot = widget.try_borrow_mut().map_err(|_| WidgetError::Busy)?;
        Ok(std::mem::replace(&mut *slot, new))
    })
}

/// Parse the page list and widget config handed over from JavaScript
fn parse_inputs(
    docs_json: &str,
    config_json: &str,
) -> Result<(DocumentStore, WidgetConfig), WidgetError> {
    let config = WidgetConfig::from_json(config_json)?;
    let store = DocumentStore::from_json(docs_json)?;
    Ok((store, config))
}

fn js_error(e: WidgetError) -> JsError {
    JsError::new(&e.to_string())
}

/// Install the search widget on the page
/// docs_json: JSON array of {title, url, content} objects, titles unique
/// config_json: JSON WidgetConfig, or an empty string for the defaults
///
/// The index itself is built on the first click into the search input.
/// Calling this again replaces the installed widget.
#[wasm_bindgen]
pub fn init_widget(docs_json: &str, config_json: &str) -> Result<(), JsError> {
    let (store, config) = parse_inputs(docs_json, config_json).map_err(js_error)?;
    logging::init(config.level());

    // Detach the old widget before the new one attaches its own handlers
    drop(install(None).map_err(js_error)?);

    let dom = WebDom::attach(&config).map_err(js_error)?;
    let indexer = Bm25Indexer::new(config.weights.clone(), config.max_results);
    tracing::info!(docs = store.len(), "search widget installed");

    install(Some(SearchWidget::new(dom, store, indexer, &config))).map_err(js_error)?;
    Ok(())
}

/// Check if the search index has been built
#[wasm_bindgen]
pub fn is_index_built() -> bool {
    with_widget(|w| w.is_index_built()).unwrap_or(false)
}

/// Search all documents and return JSON results: [{name, url}] in rank order
#[wasm_bindgen]
pub fn search_docs(query: &str) -> Result<String, JsError> {
    let results = with_widget(|w| w.search(query))
        .and_then(|r| r.map_err(WidgetError::from))
        .map_err(js_error)?;
    Ok(serde_json::to_string(&results).unwrap_or_else(|_| "[]".to_string()))
}

/// Get total number of documents
#[wasm_bindgen]
pub fn get_doc_count() -> Result<usize, JsError> {
    with_widget(|w| w.doc_count()).map_err(js_error)
}
