use crate::error::IndexError;
use crate::index::{TextIndex, TextIndexer};
use crate::parse::{parse_query, tokenize, TermMatch};
use crate::rank;
use crate::types::{FieldWeights, Hit, IndexRecord};
use std::collections::{BTreeMap, HashMap, HashSet};

/// One entry of a posting list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Posting {
    doc: usize,
    field: usize,
    term_freq: u32,
}

/// Per-field statistics used for length normalization
#[derive(Debug, Clone)]
struct FieldStats {
    name: String,
    weight: f32,
    /// Field length per document, indexed by document position
    lengths: Vec<u32>,
    avg_len: f32,
}

/// Inverted index over the weighted fields of a set of records, ranked with BM-25
#[derive(Debug, Clone)]
pub struct FullTextIndex {
    refs: Vec<String>,
    fields: Vec<FieldStats>,
    /// Term -> postings, in document order
    terms: BTreeMap<String, Vec<Posting>>,
    limit: Option<usize>,
}

/// Builds a [`FullTextIndex`]. Only fields with a positive weight are indexed.
#[derive(Debug, Clone)]
pub struct Bm25Indexer {
    pub weights: FieldWeights,
    pub limit: Option<usize>,
}

impl Bm25Indexer {
    pub fn new(weights: FieldWeights, limit: Option<usize>) -> Self {
        Bm25Indexer { weights, limit }
    }
}

impl Default for Bm25Indexer {
    fn default() -> Self {
        Bm25Indexer::new(FieldWeights::from([("content".to_string(), 1.0)]), None)
    }
}

impl TextIndexer for Bm25Indexer {
    type Index = FullTextIndex;

    fn build(&self, records: &[IndexRecord<'_>]) -> Result<FullTextIndex, IndexError> {
        let mut refs = Vec::with_capacity(records.len());
        let mut seen = HashSet::new();
        let mut fields: Vec<FieldStats> = Vec::new();
        let mut terms: BTreeMap<String, Vec<Posting>> = BTreeMap::new();

        for (doc, record) in records.iter().enumerate() {
            if !seen.insert(record.reference) {
                return Err(IndexError::DuplicateTitle(record.reference.to_string()));
            }
            refs.push(record.reference.to_string());

            for (field_name, text) in &record.fields {
                let weight = self.weights.get(*field_name).copied().unwrap_or(0.0);
                if weight <= 0.0 {
                    continue;
                }
                let field = match fields.iter().position(|f| f.name == *field_name) {
                    Some(slot) => slot,
                    None => {
                        fields.push(FieldStats {
                            name: field_name.to_string(),
                            weight,
                            lengths: Vec::new(),
                            avg_len: 0.0,
                        });
                        fields.len() - 1
                    }
                };

                let tokens = tokenize(text);
                let stats = &mut fields[field];
                stats.lengths.resize(records.len(), 0);
                stats.lengths[doc] += tokens.len() as u32;

                // Count term frequencies, then add to the inverted index
                let mut term_freqs: HashMap<String, u32> = HashMap::new();
                for token in tokens {
                    *term_freqs.entry(token).or_insert(0) += 1;
                }
                for (term, term_freq) in term_freqs {
                    terms.entry(term).or_default().push(Posting {
                        doc,
                        field,
                        term_freq,
                    });
                }
            }
        }

        for stats in &mut fields {
            stats.lengths.resize(records.len(), 0);
            stats.avg_len = if records.is_empty() {
                0.0
            } else {
                stats.lengths.iter().sum::<u32>() as f32 / records.len() as f32
            };
        }

        tracing::info!(
            docs = refs.len(),
            terms = terms.len(),
            fields = fields.len(),
            "built full-text index"
        );

        Ok(FullTextIndex {
            refs,
            fields,
            terms,
            limit: self.limit,
        })
    }
}

impl FullTextIndex {
    pub fn num_docs(&self) -> usize {
        self.refs.len()
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }
}

impl TextIndex for FullTextIndex {
    fn search(&self, term: &str) -> Result<Vec<Hit>, IndexError> {
        let tokens = parse_query(term);
        let num_docs = self.refs.len() as u32;
        let mut scores: HashMap<usize, f32> = HashMap::new();

        for token in &tokens {
            for (indexed, postings) in &self.terms {
                let Some(kind) = TermMatch::classify(token, indexed) else {
                    continue;
                };

                // Document frequency per field
                let mut doc_freq = vec![0u32; self.fields.len()];
                for posting in postings {
                    doc_freq[posting.field] += 1;
                }

                for posting in postings {
                    let stats = &self.fields[posting.field];
                    let score = rank::bm25_term(
                        posting.term_freq,
                        stats.lengths[posting.doc],
                        doc_freq[posting.field],
                        num_docs,
                        stats.avg_len,
                    ) * stats.weight
                        * kind.weight();

                    *scores.entry(posting.doc).or_insert(0.0) += score;
                }
            }
        }

        let ranked = rank::top_n(scores.into_iter().collect(), self.limit);

        tracing::debug!(
            query = term,
            tokens = tokens.len(),
            hits = ranked.len(),
            "full-text query"
        );

        Ok(ranked
            .into_iter()
            .map(|(doc, score)| Hit {
                reference: self.refs[doc].clone(),
                score,
            })
            .collect())
    }
}
