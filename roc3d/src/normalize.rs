//! Min-max scaling of ground truth and score maps.

use roc3d_core::{Roc3dError, Result};

/// Scale values in-place to `[0, 1]` using min-max normalization.
///
/// After scaling the minimum maps to exactly 0.0 and the maximum to exactly
/// 1.0. A range that overflows `f64` is scaled through halved values.
///
/// # Errors
///
/// Returns an error if `data` is empty or constant (max == min).
pub fn min_max(data: &mut [f64]) -> Result<()> {
    if data.is_empty() {
        return Err(Roc3dError::InvalidInput("empty data".into()));
    }
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range == 0.0 {
        return Err(Roc3dError::InvalidInput(format!(
            "cannot min-max scale constant data (all values {})",
            min
        )));
    }
    if range.is_finite() {
        data.iter_mut().for_each(|v| *v = (*v - min) / range);
    } else {
        let half_min = min / 2.0;
        let half_range = max / 2.0 - half_min;
        data.iter_mut()
            .for_each(|v| *v = ((*v / 2.0 - half_min) / half_range).clamp(0.0, 1.0));
    }
    Ok(())
}

/// Min-max scaled copy of `data`.
///
/// See [`min_max`] for the error conditions.
pub fn min_max_scaled(data: &[f64]) -> Result<Vec<f64>> {
    let mut out = data.to_vec();
    min_max(&mut out)?;
    Ok(out)
}
