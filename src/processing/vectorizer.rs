//! TF-IDF vectorization of résumé and job description text

use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Sparse term -> weight map scoped to one fitted vocabulary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TfIdfVector {
    weights: BTreeMap<String, f64>,
}

impl TfIdfVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: impl Into<String>, weight: f64) {
        self.weights.insert(term.into(), weight);
    }

    /// Weight of a term, 0 when the term is absent
    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn terms(&self) -> impl Iterator<Item = &String> {
        self.weights.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.weights.iter()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }
}

impl FromIterator<(String, f64)> for TfIdfVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

pub struct TfIdfVectorizer {
    processor: TextProcessor,
    max_vocabulary: usize,
    smooth_idf: bool,
    vocabulary: Vec<String>,
    document_frequency: HashMap<String, usize>,
    total_documents: usize,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(5000, true)
    }
}

impl TfIdfVectorizer {
    pub fn new(max_vocabulary: usize, smooth_idf: bool) -> Self {
        Self {
            processor: TextProcessor::new(),
            max_vocabulary,
            smooth_idf,
            vocabulary: Vec::new(),
            document_frequency: HashMap::new(),
            total_documents: 0,
        }
    }

    /// Count document frequencies and keep the most frequent terms as the vocabulary
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        self.total_documents = documents.len();
        self.document_frequency.clear();

        for document in documents {
            let unique: HashSet<String> = self.processor.preprocess_text(document.as_ref()).into_iter().collect();
            for term in unique {
                *self.document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&String, &usize)> = self.document_frequency.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        self.vocabulary = ranked
            .into_iter()
            .take(self.max_vocabulary)
            .map(|(term, _)| term.clone())
            .collect();

        log::debug!(
            "Fitted TF-IDF vocabulary: {} of {} terms over {} documents",
            self.vocabulary.len(),
            self.document_frequency.len(),
            self.total_documents
        );
    }

    /// Weight every vocabulary term as (1 + ln tf) x idf; terms missing from the document get 0
    pub fn transform(&self, document: &str) -> TfIdfVector {
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        for term in self.processor.preprocess_text(document) {
            *term_freq.entry(term).or_insert(0) += 1;
        }

        self.vocabulary
            .iter()
            .map(|term| {
                let tf = term_freq.get(term).copied().unwrap_or(0);
                let normalized_tf = if tf > 0 { 1.0 + (tf as f64).ln() } else { 0.0 };
                (term.clone(), normalized_tf * self.idf(term))
            })
            .collect()
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<TfIdfVector> {
        self.fit(documents);
        documents.iter().map(|doc| self.transform(doc.as_ref())).collect()
    }

    pub fn idf(&self, term: &str) -> f64 {
        if self.total_documents == 0 {
            return 0.0;
        }
        let df = self.document_frequency.get(term).copied().unwrap_or(1).max(1);
        let idf = (self.total_documents as f64 / df as f64).ln();
        if self.smooth_idf {
            idf + 1.0
        } else {
            idf
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::similarity::cosine_similarity;

    #[test]
    fn test_shared_term_keeps_weight() {
        let mut vectorizer = TfIdfVectorizer::default();
        let vectors = vectorizer.fit_transform(&["python developer", "python data scientist"]);

        let (first, second) = (&vectors[0], &vectors[1]);
        assert!(first.get("python") > 0.0);
        assert_eq!(first.get("python"), second.get("python"));

        // Terms only the other document contains stay at zero
        assert_eq!(first.get("scientist"), 0.0);
        assert_eq!(second.get("developer"), 0.0);
        assert!(first.get("developer") > 0.0);

        assert!(cosine_similarity(first, second) > 0.0);
    }

    #[test]
    fn test_raw_idf_zeroes_shared_terms() {
        let mut vectorizer = TfIdfVectorizer::new(5000, false);
        let vectors = vectorizer.fit_transform(&["python developer", "python data scientist"]);

        assert_eq!(vectors[0].get("python"), 0.0);
        assert!(vectors[0].get("developer") > 0.0);
    }

    #[test]
    fn test_log_normalized_tf() {
        let mut vectorizer = TfIdfVectorizer::default();
        vectorizer.fit(&["rust rust rust", "go"]);
        let vector = vectorizer.transform("rust rust rust");

        let expected = (1.0 + 3f64.ln()) * (2f64.ln() + 1.0);
        assert!((vector.get("rust") - expected).abs() < 1e-9);
    }

    #[test]
    fn test_vocabulary_pruning_ties_alphabetical() {
        let mut vectorizer = TfIdfVectorizer::new(2, true);
        vectorizer.fit(&["zeta alpha", "alpha beta"]);

        assert_eq!(vectorizer.vocabulary(), &["alpha".to_string(), "alpha beta".to_string()]);
    }

    #[test]
    fn test_transform_before_fit_is_empty() {
        let vectorizer = TfIdfVectorizer::default();
        assert!(vectorizer.transform("python").is_empty());
    }
}
