//! Word-vector table, query embedding by averaging, and cosine similarity

use crate::error::{JobMatcherError, Result};
use std::collections::HashMap;

/// Pretrained token -> vector table, read-only for the process lifetime.
/// Absence of a token is a normal condition, not an error.
pub struct WordVectorTable {
    vectors: HashMap<String, Vec<f32>>,
    dim: usize,
}

impl WordVectorTable {
    /// Wrap a loaded table. Every vector must already have dimensionality
    /// `dim`; the loader validates this before construction.
    pub fn new(vectors: HashMap<String, Vec<f32>>, dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(JobMatcherError::Embedding(
                "Word vector dimensionality must be greater than zero".to_string(),
            ));
        }
        if let Some((token, vector)) = vectors.iter().find(|(_, v)| v.len() != dim) {
            return Err(JobMatcherError::Embedding(format!(
                "Word vector for '{}' has dimensionality {} (expected {})",
                token,
                vector.len(),
                dim
            )));
        }
        Ok(Self { vectors, dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<&[f32]> {
        self.vectors.get(token).map(|v| v.as_slice())
    }

    /// Embed a token sequence as the element-wise mean of the in-vocabulary
    /// token vectors. With no recognized vocabulary the result is the zero
    /// vector, which the confidence gate downstream rejects naturally.
    pub fn average(&self, tokens: &[String]) -> Vec<f32> {
        let valid: Vec<&Vec<f32>> = tokens
            .iter()
            .filter_map(|token| self.vectors.get(token))
            .collect();

        if valid.is_empty() {
            return vec![0.0; self.dim];
        }

        let mut mean = vec![0.0f32; self.dim];
        for vector in &valid {
            for (acc, value) in mean.iter_mut().zip(vector.iter()) {
                *acc += value;
            }
        }
        let count = valid.len() as f32;
        for acc in &mut mean {
            *acc /= count;
        }
        mean
    }
}

/// Standard cosine similarity: dot product over the product of L2 norms.
/// A zero-norm operand yields 0.0 rather than a division fault.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
