//! Vector and set similarity

use crate::processing::vectorizer::TfIdfVector;
use std::collections::{BTreeSet, HashSet};

/// Cosine over the union of both vectors' terms, 0 when either vector is all zeros
pub fn cosine_similarity(v1: &TfIdfVector, v2: &TfIdfVector) -> f64 {
    let terms: HashSet<&String> = v1.terms().chain(v2.terms()).collect();

    let mut dot = 0.0;
    let mut norm1 = 0.0;
    let mut norm2 = 0.0;

    for term in terms {
        let a = v1.get(term);
        let b = v2.get(term);
        dot += a * b;
        norm1 += a * a;
        norm2 += b * b;
    }

    if norm1 == 0.0 || norm2 == 0.0 {
        return 0.0;
    }

    (dot / (norm1.sqrt() * norm2.sqrt())).clamp(0.0, 1.0)
}

/// |A ∩ B| / |A ∪ B|, 0 when both sets are empty
pub fn jaccard_similarity<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
