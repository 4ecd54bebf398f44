//! Input validation and the degeneracy guard.

use roc3d_core::{Roc3dError, Result};

/// Check the shape and values shared by every evaluation.
///
/// # Errors
///
/// Returns an error if the inputs are empty, differ in length, or contain a
/// NaN or infinite value.
pub fn validate_inputs(target: &[f64], predicted: &[f64]) -> Result<()> {
    if target.is_empty() {
        return Err(Roc3dError::InvalidInput("empty ground truth".into()));
    }
    if target.len() != predicted.len() {
        return Err(Roc3dError::InvalidInput(format!(
            "target length {} != predicted length {}",
            target.len(),
            predicted.len()
        )));
    }
    if let Some(i) = target.iter().position(|v| !v.is_finite()) {
        return Err(Roc3dError::InvalidInput(format!(
            "target[{}] is not finite",
            i
        )));
    }
    if let Some(i) = predicted.iter().position(|v| !v.is_finite()) {
        return Err(Roc3dError::InvalidInput(format!(
            "predicted[{}] is not finite",
            i
        )));
    }
    Ok(())
}

/// Whether a score map carries no discriminative information.
///
/// A map is degenerate when its absolute deviation from the mean is zero,
/// i.e. every score is identical. Checked by direct comparison with the first
/// score, since the mean of identical values can round away from them.
pub fn is_degenerate(scores: &[f64]) -> bool {
    let Some(&first) = scores.first() else {
        return true;
    };
    scores.iter().all(|&v| v == first)
}
