//! Batch analysis with optional parallelism.
//!
//! Documents are independent, so they are spread across threads with rayon
//! when the `parallel` feature is enabled. Output order always matches
//! input order.

use crate::pipeline::{Analysis, Engine};
use serde::{Deserialize, Serialize};

/// One input text with a caller-chosen identifier (usually a file name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier echoed back in the result
    pub id: String,
    /// Text to analyze
    pub text: String,
}

impl Document {
    /// Creates a document.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Analysis of one [`Document`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentResult {
    /// The document identifier
    pub id: String,
    /// Pipeline output
    pub analysis: Analysis,
}

/// Totals over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Number of documents
    pub documents: usize,
    /// Valid tokens across all documents
    pub valid: usize,
    /// Invalid candidates across all documents
    pub invalid: usize,
    /// Documents without a single valid token
    pub empty: usize,
}

/// Analyzes every document with the same engine.
///
/// With a configured seed, each document's shuffle is seeded from the seed
/// and the document index, so parallel and sequential runs agree.
///
/// # Example
/// ```
/// use aerocoord_geo::{analyze_batch, Document, Engine};
///
/// let docs = vec![
///     Document::new("a", "574706N0614453E"),
///     Document::new("b", "no coordinates"),
/// ];
/// let results = analyze_batch(&Engine::default(), &docs);
/// assert_eq!(results[0].id, "a");
/// assert_eq!(results[0].analysis.ordered.len(), 1);
/// assert!(results[1].analysis.ordered.is_empty());
/// ```
pub fn analyze_batch(engine: &Engine, documents: &[Document]) -> Vec<DocumentResult> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        documents
            .par_iter()
            .enumerate()
            .map(|(index, doc)| analyze_document(engine, index, doc))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        documents
            .iter()
            .enumerate()
            .map(|(index, doc)| analyze_document(engine, index, doc))
            .collect()
    }
}

/// Adds up token counts across results.
pub fn summarize(results: &[DocumentResult]) -> BatchSummary {
    results.iter().fold(BatchSummary::default(), |mut summary, result| {
        let extraction = &result.analysis.extraction;
        summary.documents += 1;
        summary.valid += extraction.valid.len();
        summary.invalid += extraction.invalid.len();
        if extraction.valid.is_empty() {
            summary.empty += 1;
        }
        summary
    })
}

#[inline]
fn analyze_document(engine: &Engine, index: usize, doc: &Document) -> DocumentResult {
    DocumentResult {
        id: doc.id.clone(),
        analysis: engine.analyze_salted(&doc.text, index as u64),
    }
}
