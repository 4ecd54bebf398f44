//! PD/PF sweep over every distinct score threshold.
//!
//! Ground truth acts as a continuous weight: a normalized label `t` adds `t`
//! to the target mass and `1 - t` to the background mass. At threshold `tau`
//!
//! - `PD(tau)` = flagged target mass / total target mass
//! - `PF(tau)` = flagged background mass / total background mass
//!
//! where "flagged" follows [`SegMode`].

use std::cmp::Ordering;

use roc3d_core::{Roc3dError, Result};

use crate::config::SegMode;

/// A single point on the 3D-ROC curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// Score threshold at which this point is computed.
    pub threshold: f64,
    /// False-alarm rate.
    pub pf: f64,
    /// Detection rate.
    pub pd: f64,
}

/// PD and PF sampled at every distinct threshold, ascending by threshold.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocCurve3d {
    taus: Vec<f64>,
    pd: Vec<f64>,
    pf: Vec<f64>,
}

impl RocCurve3d {
    /// Thresholds, strictly ascending.
    pub fn taus(&self) -> &[f64] {
        &self.taus
    }

    /// Detection rate at each threshold (non-increasing).
    pub fn pd(&self) -> &[f64] {
        &self.pd
    }

    /// False-alarm rate at each threshold (non-increasing).
    pub fn pf(&self) -> &[f64] {
        &self.pf
    }

    /// Number of thresholds.
    pub fn len(&self) -> usize {
        self.taus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taus.is_empty()
    }

    /// Iterate over the curve as `(threshold, PF, PD)` points.
    pub fn points(&self) -> impl Iterator<Item = CurvePoint> + '_ {
        self.taus
            .iter()
            .zip(&self.pf)
            .zip(&self.pd)
            .map(|((&threshold, &pf), &pd)| CurvePoint { threshold, pf, pd })
    }

    /// Split into `(taus, PD, PF)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.taus, self.pd, self.pf)
    }
}

/// Build the curve from a normalized ground truth and normalized scores.
///
/// Sorts by descending score once, then walks each group of tied scores,
/// accumulating target and background mass. With [`SegMode::Inclusive`] the
/// group at `tau` counts as flagged; with [`SegMode::Exclusive`] it does not.
/// Totals are the accumulated mass after the last group, so the inclusive
/// curve starts at exactly `(PF, PD) = (1, 1)`.
///
/// # Errors
///
/// Returns an error if the slices are empty, differ in length, contain a
/// non-finite value, or the ground truth carries no target mass or no
/// background mass.
pub fn build_curve(target: &[f64], predicted: &[f64], seg_mode: SegMode) -> Result<RocCurve3d> {
    if predicted.is_empty() {
        return Err(Roc3dError::InvalidInput("empty input".into()));
    }
    if target.len() != predicted.len() {
        return Err(Roc3dError::InvalidInput(format!(
            "target length {} != predicted length {}",
            target.len(),
            predicted.len()
        )));
    }
    if let Some(i) = predicted.iter().position(|v| !v.is_finite()) {
        return Err(Roc3dError::InvalidInput(format!(
            "predicted[{}] is not finite",
            i
        )));
    }
    if let Some(i) = target.iter().position(|v| !v.is_finite()) {
        return Err(Roc3dError::InvalidInput(format!(
            "target[{}] is not finite",
            i
        )));
    }

    let mut indices: Vec<usize> = (0..predicted.len()).collect();
    let by_score_desc = |&a: &usize, &b: &usize| -> Ordering { predicted[b].total_cmp(&predicted[a]) };
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        indices.par_sort_unstable_by(by_score_desc);
    }
    #[cfg(not(feature = "parallel"))]
    indices.sort_unstable_by(by_score_desc);

    // (threshold, flagged target mass, flagged background mass), descending
    let mut walk: Vec<(f64, f64, f64)> = Vec::new();
    let mut target_mass = 0.0;
    let mut background_mass = 0.0;

    let mut i = 0;
    while i < indices.len() {
        let tau = predicted[indices[i]];
        let before = (target_mass, background_mass);
        // the group's first element is always consumed
        loop {
            let t = target[indices[i]];
            target_mass += t;
            background_mass += 1.0 - t;
            i += 1;
            if i == indices.len() || predicted[indices[i]] != tau {
                break;
            }
        }
        let (pd_mass, pf_mass) = match seg_mode {
            SegMode::Inclusive => (target_mass, background_mass),
            SegMode::Exclusive => before,
        };
        walk.push((tau, pd_mass, pf_mass));
    }

    if target_mass <= 0.0 {
        return Err(Roc3dError::InvalidInput(
            "ground truth has no target mass".into(),
        ));
    }
    if background_mass <= 0.0 {
        return Err(Roc3dError::InvalidInput(
            "ground truth has no background mass".into(),
        ));
    }

    let m = walk.len();
    let mut taus = Vec::with_capacity(m);
    let mut pd = Vec::with_capacity(m);
    let mut pf = Vec::with_capacity(m);
    for &(tau, pd_mass, pf_mass) in walk.iter().rev() {
        taus.push(tau);
        pd.push(pd_mass / target_mass);
        pf.push(pf_mass / background_mass);
    }

    Ok(RocCurve3d { taus, pd, pf })
}

/// Distinct values of `scores`, sorted ascending.
pub fn unique_thresholds(scores: &[f64]) -> Vec<f64> {
    let mut taus = scores.to_vec();
    taus.sort_by(|a, b| a.total_cmp(b));
    taus.dedup();
    taus
}

/// `(PF, PD)` at a single threshold, evaluated directly over every element.
///
/// Returns NaN rates when the ground truth lacks one of the classes.
pub fn rates_at_threshold(
    target: &[f64],
    predicted: &[f64],
    tau: f64,
    seg_mode: SegMode,
) -> (f64, f64) {
    let mut flagged_target = 0.0;
    let mut flagged_background = 0.0;
    let mut total_target = 0.0;
    let mut total_background = 0.0;
    for (&t, &p) in target.iter().zip(predicted) {
        total_target += t;
        total_background += 1.0 - t;
        if seg_mode.flags(p, tau) {
            flagged_target += t;
            flagged_background += 1.0 - t;
        }
    }
    (
        flagged_background / total_background,
        flagged_target / total_target,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < TOL, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn perfect_separation_inclusive() {
        let curve = build_curve(&[0.0, 0.0, 1.0, 1.0], &[0.0, 0.0, 1.0, 1.0], SegMode::Inclusive)
            .unwrap();
        assert_close(curve.taus(), &[0.0, 1.0]);
        assert_close(curve.pf(), &[1.0, 0.0]);
        assert_close(curve.pd(), &[1.0, 1.0]);
    }

    #[test]
    fn ramp_inclusive_and_exclusive() {
        let target = [0.0, 0.0, 1.0, 1.0];
        let predicted = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];

        let inc = build_curve(&target, &predicted, SegMode::Inclusive).unwrap();
        assert_close(inc.pd(), &[1.0, 1.0, 1.0, 0.5]);
        assert_close(inc.pf(), &[1.0, 0.5, 0.0, 0.0]);

        let exc = build_curve(&target, &predicted, SegMode::Exclusive).unwrap();
        assert_close(exc.pd(), &[1.0, 1.0, 0.5, 0.0]);
        assert_close(exc.pf(), &[0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn seg_modes_differ_by_tied_weight() {
        // two background pixels tie at 0.5
        let target = [0.0, 0.0, 0.0, 1.0];
        let predicted = [0.0, 0.5, 0.5, 1.0];
        let inc = build_curve(&target, &predicted, SegMode::Inclusive).unwrap();
        let exc = build_curve(&target, &predicted, SegMode::Exclusive).unwrap();
        let at = inc.taus().iter().position(|&t| t == 0.5).unwrap();
        assert!((inc.pf()[at] - exc.pf()[at] - 2.0 / 3.0).abs() < TOL);
        assert!((inc.pd()[at] - exc.pd()[at]).abs() < TOL);
    }

    #[test]
    fn soft_ground_truth_weights() {
        let target = [0.0, 0.5, 1.0];
        let predicted = [0.0, 1.0, 0.5];
        let curve = build_curve(&target, &predicted, SegMode::Inclusive).unwrap();
        // target mass 1.5, background mass 1.5
        assert_close(curve.pd(), &[1.0, 1.0, 1.0 / 3.0]);
        assert_close(curve.pf(), &[1.0, 1.0 / 3.0, 1.0 / 3.0]);
    }

    #[test]
    fn points_align_with_vectors() {
        let curve = build_curve(&[0.0, 1.0, 1.0], &[0.2, 0.9, 0.4], SegMode::Inclusive).unwrap();
        let points: Vec<CurvePoint> = curve.points().collect();
        assert_eq!(points.len(), curve.len());
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.threshold, curve.taus()[i]);
            assert_eq!(p.pd, curve.pd()[i]);
            assert_eq!(p.pf, curve.pf()[i]);
        }
    }

    #[test]
    fn matches_direct_definition() {
        let target = [0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let predicted = [0.1, 0.9, 0.1, 0.3, 0.7, 0.0, 1.0];
        for mode in [SegMode::Inclusive, SegMode::Exclusive] {
            let curve = build_curve(&target, &predicted, mode).unwrap();
            assert_close(curve.taus(), &unique_thresholds(&predicted));
            for p in curve.points() {
                let (pf, pd) = rates_at_threshold(&target, &predicted, p.threshold, mode);
                assert!((p.pf - pf).abs() < TOL);
                assert!((p.pd - pd).abs() < TOL);
            }
        }
    }

    #[test]
    fn unique_thresholds_collapse_duplicates() {
        assert_eq!(unique_thresholds(&[0.5, 0.0, 0.5, 1.0, 0.0]), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn single_class_error() {
        assert!(build_curve(&[1.0, 1.0], &[0.0, 1.0], SegMode::Inclusive).is_err());
        assert!(build_curve(&[0.0, 0.0], &[0.0, 1.0], SegMode::Inclusive).is_err());
    }

    #[test]
    fn direct_rates_nan_without_class() {
        let (pf, pd) = rates_at_threshold(&[0.0, 0.0], &[0.0, 1.0], 0.5, SegMode::Inclusive);
        assert!((pf - 0.5).abs() < TOL);
        assert!(pd.is_nan());
    }

    #[test]
    fn non_finite_scores_error() {
        let target = [0.0, 0.0, 1.0];
        assert!(build_curve(&target, &[0.0, f64::NAN, 1.0], SegMode::Inclusive).is_err());
        assert!(build_curve(&target, &[f64::INFINITY, 0.5, 1.0], SegMode::Exclusive).is_err());
        assert!(build_curve(&[0.0, f64::NAN, 1.0], &[0.0, 0.5, 1.0], SegMode::Inclusive).is_err());
    }

    #[test]
    fn signed_zero_scores_share_a_threshold() {
        let curve = build_curve(&[0.0, 1.0, 1.0], &[-0.0, 0.0, 1.0], SegMode::Inclusive).unwrap();
        assert_eq!(curve.len(), 2);
        assert_close(curve.pd(), &[1.0, 0.5]);
        assert_close(curve.pf(), &[1.0, 0.0]);
    }

    #[test]
    fn empty_and_mismatch_error() {
        assert!(build_curve(&[], &[], SegMode::Inclusive).is_err());
        assert!(build_curve(&[0.0, 1.0], &[0.0], SegMode::Inclusive).is_err());
    }
}
