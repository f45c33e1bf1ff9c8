use crate::error::IndexError;
use crate::types::{DocMap, Document, Hit, IndexRecord, ResultRecord};
use std::collections::HashSet;

/// Constructs a full-text index from records with a unique reference field.
pub trait TextIndexer {
    type Index: TextIndex;

    fn build(&self, records: &[IndexRecord<'_>]) -> Result<Self::Index, IndexError>;
}

/// A built full-text index. Hits are returned in relevance order.
pub trait TextIndex {
    fn search(&self, term: &str) -> Result<Vec<Hit>, IndexError>;
}

/// Immutable list of documents, loaded once
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    docs: Vec<Document>,
}

impl DocumentStore {
    /// Create a store, rejecting duplicate titles
    pub fn new(docs: Vec<Document>) -> Result<Self, IndexError> {
        let mut titles = HashSet::new();
        for doc in &docs {
            if !titles.insert(doc.title.as_str()) {
                return Err(IndexError::DuplicateTitle(doc.title.clone()));
            }
        }
        Ok(DocumentStore { docs })
    }

    /// Parse a JSON array of `{title, url, content}` objects
    pub fn from_json(docs_json: &str) -> Result<Self, IndexError> {
        let docs: Vec<Document> = serde_json::from_str(docs_json)
            .map_err(|e| IndexError::InvalidDocuments(e.to_string()))?;
        Self::new(docs)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }
}

/// A successfully built index together with its document map
struct Built<T> {
    index: T,
    doc_map: DocMap,
}

/// Lazily built search index over a [`DocumentStore`]
pub struct SearchIndex<I: TextIndexer> {
    store: DocumentStore,
    indexer: I,
    built: Option<Built<I::Index>>,
}

impl<I: TextIndexer> SearchIndex<I> {
    pub fn new(store: DocumentStore, indexer: I) -> Self {
        SearchIndex {
            store,
            indexer,
            built: None,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    /// Build the index and document map unless that already happened.
    /// A failed build leaves the index unbuilt so the next call retries.
    pub fn ensure_built(&mut self) -> Result<(), IndexError> {
        if self.built.is_some() {
            return Ok(());
        }

        tracing::info!(docs = self.store.len(), "building search index");
        let records: Vec<IndexRecord<'_>> =
            self.store.iter().map(IndexRecord::from_document).collect();
        let index = self.indexer.build(&records)?;
        let doc_map: DocMap = self
            .store
            .iter()
            .map(|doc| (doc.title.clone(), doc.url.clone()))
            .collect();

        self.built = Some(Built { index, doc_map });
        tracing::info!("search index built");
        Ok(())
    }

    /// Run a query and resolve each ranked hit to a `{name, url}` record,
    /// keeping the index's order
    pub fn query(&self, term: &str) -> Result<Vec<ResultRecord>, IndexError> {
        let built = self.built.as_ref().ok_or(IndexError::NotBuilt)?;
        let hits = built.index.search(term)?;

        Ok(hits
            .into_iter()
            .filter_map(|hit| match built.doc_map.get(&hit.reference) {
                Some(url) => Some(ResultRecord {
                    name: hit.reference,
                    url: url.clone(),
                }),
                None => {
                    tracing::warn!(reference = %hit.reference, "hit has no document url, skipping");
                    None
                }
            })
            .collect())
    }
}
