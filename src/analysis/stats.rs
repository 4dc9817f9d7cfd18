//! Term count statistics across a document.
//!
//! Raw term counts vary a lot between report layouts, so pages are scored
//! against the document's own distribution instead of a fixed cutoff.

use serde::Serialize;

/// Mean, standard deviation and per-page z-scores of unique term counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentStatistics {
    /// Population mean of the counts
    pub mean: f64,

    /// Sample standard deviation (0 for fewer than two pages)
    pub std_dev: f64,

    /// Z-score of each page, in page order
    pub z_scores: Vec<f64>,
}

impl DocumentStatistics {
    /// Compute statistics over unique term counts.
    ///
    /// # Example
    ///
    /// ```
    /// use resultpage::analysis::DocumentStatistics;
    ///
    /// let stats = DocumentStatistics::from_counts(&[4, 4, 4]);
    /// assert_eq!(stats.std_dev, 0.0);
    /// assert_eq!(stats.z_scores, vec![0.0, 0.0, 0.0]);
    /// ```
    pub fn from_counts(counts: &[usize]) -> Self {
        if counts.is_empty() {
            return Self::default();
        }

        let n = counts.len() as f64;
        let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / n;

        let std_dev = if counts.len() > 1 {
            let sum_sq: f64 = counts
                .iter()
                .map(|&c| {
                    let d = c as f64 - mean;
                    d * d
                })
                .sum();
            (sum_sq / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        let z_scores = counts
            .iter()
            .map(|&c| {
                if std_dev > 0.0 {
                    (c as f64 - mean) / std_dev
                } else {
                    0.0
                }
            })
            .collect();

        Self {
            mean,
            std_dev,
            z_scores,
        }
    }

    /// Number of pages covered.
    pub fn len(&self) -> usize {
        self.z_scores.len()
    }

    /// Check if no pages were scored.
    pub fn is_empty(&self) -> bool {
        self.z_scores.is_empty()
    }
}
