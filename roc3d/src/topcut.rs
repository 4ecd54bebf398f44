//! Adaptive top-cut preprocessing (Li et al. 2023).
//!
//! Scores above the median score observed on target pixels are clipped down
//! to that median, so a handful of saturated detections cannot stretch the
//! threshold axis and dominate the area statistics.

use roc3d_core::{Roc3dError, Result};

/// Scores after adaptive clipping.
#[derive(Debug, Clone)]
pub struct TopCut {
    /// Clipped copy of the input scores.
    pub scores: Vec<f64>,
    /// Median target score used as the upper bound.
    pub limit: f64,
    /// Number of scores that were lowered to `limit`.
    pub n_clipped: usize,
}

/// Clip `predicted` at the median of its values on `target > 0` locations.
///
/// The input is left untouched; the clipped scores are returned as a copy.
///
/// # Errors
///
/// Returns an error if the slices differ in length or no ground-truth entry
/// is strictly positive.
pub fn adaptive_topcut(target: &[f64], predicted: &[f64]) -> Result<TopCut> {
    if target.len() != predicted.len() {
        return Err(Roc3dError::InvalidInput(format!(
            "target length {} != predicted length {}",
            target.len(),
            predicted.len()
        )));
    }

    let on_target: Vec<f64> = target
        .iter()
        .zip(predicted)
        .filter(|(&t, _)| t > 0.0)
        .map(|(_, &p)| p)
        .collect();
    if on_target.is_empty() {
        return Err(Roc3dError::InvalidInput(
            "adaptive top-cut needs at least one positive ground-truth entry".into(),
        ));
    }
    let limit = median(&on_target)?;

    let mut n_clipped = 0usize;
    let scores: Vec<f64> = predicted
        .iter()
        .map(|&p| {
            if p > limit {
                n_clipped += 1;
                limit
            } else {
                p
            }
        })
        .collect();

    log::trace!("adaptive top-cut: limit={limit}, clipped {n_clipped} scores");

    Ok(TopCut {
        scores,
        limit,
        n_clipped,
    })
}

/// Median with linear interpolation between the two middle values.
///
/// # Errors
///
/// Returns an error if `data` is empty.
pub fn median(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Roc3dError::InvalidInput(
            "median: data must not be empty".into(),
        ));
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let mid = n / 2;
    Ok(if n % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    })
}
