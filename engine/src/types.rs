use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single documentation page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Document map: title -> url
pub type DocMap = HashMap<String, String>;

/// Field weights: field_name -> weight
pub type FieldWeights = HashMap<String, f32>;

/// A ranked match as returned by a full-text index
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Reference field of the matched document (its title)
    pub reference: String,
    pub score: f32,
}

/// A search result ready to be shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub name: String,
    pub url: String,
}

/// One rendered entry of the results list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    /// Element id of the list item, `result-<index>` with the default prefix
    pub id: String,
    pub title: String,
    pub href: String,
}

/// Document record handed to a full-text indexer: a unique reference plus
/// the searchable fields
#[derive(Debug, Clone)]
pub struct IndexRecord<'a> {
    pub reference: &'a str,
    pub fields: Vec<(&'a str, &'a str)>,
}

impl<'a> IndexRecord<'a> {
    pub fn from_document(doc: &'a Document) -> Self {
        IndexRecord {
            reference: &doc.title,
            fields: vec![("title", &doc.title), ("content", &doc.content)],
        }
    }
}
