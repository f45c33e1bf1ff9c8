use std::cmp::Ordering;

/// BM-25 parameters
const K1: f32 = 1.2;
const B: f32 = 0.75;

/// Calculate BM-25 score for a single term
///
/// Arguments:
/// - term_freq: frequency of term in the field
/// - field_len: number of terms in the field
/// - doc_freq: number of documents containing this term
/// - num_docs: total number of documents
/// - avg_len: average field length
pub fn bm25_term(term_freq: u32, field_len: u32, doc_freq: u32, num_docs: u32, avg_len: f32) -> f32 {
    let dl = field_len as f32;
    let tf = term_freq as f32;
    let df = doc_freq as f32;
    let n = num_docs as f32;

    // IDF component: log((N - df + 0.5) / (df + 0.5) + 1)
    let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();

    // Guard against an all-empty field
    let avg_len = if avg_len > 0.0 { avg_len } else { 1.0 };

    // TF component with length normalization
    let tf_norm = (tf * (K1 + 1.0)) / (tf + K1 * (1.0 - B + B * dl / avg_len));

    idf * tf_norm
}

/// Order (document, score) pairs by descending score, ties by document
/// position, and keep at most `limit`
pub fn top_n(mut scores: Vec<(usize, f32)>, limit: Option<usize>) -> Vec<(usize, f32)> {
    scores.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    if let Some(n) = limit {
        scores.truncate(n);
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bm25_term() {
        // Basic sanity check - higher term freq should give higher score
        let score1 = bm25_term(1, 100, 10, 1000, 100.0);
        let score2 = bm25_term(5, 100, 10, 1000, 100.0);
        assert!(score2 > score1);
    }

    #[test]
    fn test_bm25_rarer_term_scores_higher() {
        let common = bm25_term(1, 50, 900, 1000, 50.0);
        let rare = bm25_term(1, 50, 3, 1000, 50.0);
        assert!(rare > common);
    }

    #[test]
    fn test_bm25_empty_average() {
        assert!(bm25_term(1, 0, 1, 1, 0.0).is_finite());
    }

    #[test]
    fn test_top_n() {
        let scores = vec![(0, 1.0), (1, 3.0), (2, 2.0)];
        let top = top_n(scores, Some(2));
        assert_eq!(top, vec![(1, 3.0), (2, 2.0)]);
    }

    #[test]
    fn test_top_n_ties_keep_document_order() {
        let scores = vec![(4, 1.0), (2, 1.0), (3, 5.0)];
        let top = top_n(scores, None);
        assert_eq!(top, vec![(3, 5.0), (2, 1.0), (4, 1.0)]);
    }
}
