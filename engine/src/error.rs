use thiserror::Error;

/// Failures while loading documents, building or querying the index.
#[derive(Debug, Error, PartialEq)]
pub enum IndexError {
    /// Two documents share a title, so the title -> url map would be ambiguous.
    #[error("duplicate document title '{0}'")]
    DuplicateTitle(String),

    #[error("invalid document list: {0}")]
    InvalidDocuments(String),

    #[error("search index has not been built")]
    NotBuilt,
}

/// Failures surfaced by the widget and its wasm exports.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("invalid widget config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("search widget not initialized; call init_widget(docs_json, config_json) first")]
    NotInitialized,

    #[error("search widget is busy handling another event")]
    Busy,

    #[error("DOM error: {0}")]
    Dom(String),

    #[error(transparent)]
    Index(#[from] IndexError),
}
