//! 3D receiver operating characteristic (3D-ROC) evaluation for detection
//! maps, e.g. hyperspectral target and anomaly detectors.
//!
//! [`evaluate`] scores a continuous detection map against a ground-truth
//! mask, sweeping every distinct score as a threshold:
//!
//! - **Degeneracy guard** — constant score maps short-circuit to
//!   [`Roc3dSummary::NON_INFORMATIVE`]
//! - **Adaptive top-cut** — optional clipping at the median target score
//!   (Li et al. 2023)
//! - **Curve builder** — PD and PF at each threshold (Chang 2021, Eq. 7/9)
//! - **Metric integrator** — PD-PF, PF-tau and PD-tau areas plus SNPR, with
//!   optional endpoint normalization
//!
//! ```
//! use roc3d::{evaluate, Roc3dConfig};
//!
//! let target = [0.0, 0.0, 1.0, 1.0];
//! let predicted = [0.1, 0.2, 0.8, 0.9];
//! let result = evaluate(&target, &predicted, &Roc3dConfig::default()).unwrap();
//! assert!((result.summary.pd_pf_auc - 1.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod curve;
pub mod guard;
pub mod integrate;
pub mod normalize;
pub mod topcut;

pub use config::{Roc3dConfig, SegMode};
pub use curve::{CurvePoint, RocCurve3d};
pub use integrate::{CompositeScores, Roc3dSummary};

use roc3d_core::{Roc3dError, Result, Summarizable};

/// Output of one 3D-ROC evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roc3dResult {
    /// PD/PF curve, ascending by threshold. Empty for degenerate input.
    pub curve: RocCurve3d,
    /// Scalar statistics.
    pub summary: Roc3dSummary,
    /// Whether the score map was constant (before or after top-cut).
    pub degenerate: bool,
    /// Clipping bound applied by adaptive top-cut, if enabled.
    pub topcut_limit: Option<f64>,
}

impl Roc3dResult {
    fn non_informative(topcut_limit: Option<f64>) -> Self {
        Self {
            curve: RocCurve3d::default(),
            summary: Roc3dSummary::NON_INFORMATIVE,
            degenerate: true,
            topcut_limit,
        }
    }

    /// Thresholds in ascending order.
    pub fn taus(&self) -> &[f64] {
        self.curve.taus()
    }

    pub fn pd(&self) -> &[f64] {
        self.curve.pd()
    }

    pub fn pf(&self) -> &[f64] {
        self.curve.pf()
    }

    /// Split into `(taus, PD, PF, PD_PF_auc, PF_tau_auc, PD_tau_auc, SNPR)`.
    #[allow(clippy::type_complexity)]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>, f64, f64, f64, f64) {
        let s = self.summary;
        let (taus, pd, pf) = self.curve.into_parts();
        (taus, pd, pf, s.pd_pf_auc, s.pf_tau_auc, s.pd_tau_auc, s.snpr)
    }
}

impl Summarizable for Roc3dResult {
    fn summary(&self) -> String {
        if self.degenerate {
            format!("{} (constant scores)", self.summary.summary())
        } else {
            format!("{} over {} thresholds", self.summary.summary(), self.curve.len())
        }
    }
}

/// Evaluate a detection map against a ground-truth mask.
///
/// `target` is min-max scaled and used as a continuous target weight
/// (`1 - target` is the background weight). `predicted` is never modified;
/// clipping and scaling happen on a copy.
///
/// # Errors
///
/// Returns an error if the inputs are empty, differ in length, contain
/// non-finite values, if adaptive top-cut is requested without a strictly
/// positive ground-truth entry, or if the ground truth is constant (only one
/// class present). A constant score map is not an error: it yields the
/// non-informative result.
pub fn evaluate(target: &[f64], predicted: &[f64], config: &Roc3dConfig) -> Result<Roc3dResult> {
    guard::validate_inputs(target, predicted)?;

    if guard::is_degenerate(predicted) {
        log::debug!("3D-ROC: constant scores over {} samples", predicted.len());
        return Ok(Roc3dResult::non_informative(None));
    }

    let (mut scores, topcut_limit) = if config.adaptive_topcut {
        let cut = topcut::adaptive_topcut(target, predicted)?;
        if guard::is_degenerate(&cut.scores) {
            log::debug!("3D-ROC: scores constant after top-cut at {}", cut.limit);
            return Ok(Roc3dResult::non_informative(Some(cut.limit)));
        }
        (cut.scores, Some(cut.limit))
    } else {
        (predicted.to_vec(), None)
    };

    let weights = normalize::min_max_scaled(target).map_err(|_| {
        Roc3dError::InvalidInput(
            "ground truth must contain both classes (target is constant)".into(),
        )
    })?;
    normalize::min_max(&mut scores)?;

    let curve = curve::build_curve(&weights, &scores, config.seg_mode)?;
    let summary = Roc3dSummary::from_curve(&curve, config.normalize);
    log::debug!(
        "3D-ROC: {} samples, {} thresholds, PD_PF_auc={:.4}, SNPR={:.4}",
        target.len(),
        curve.len(),
        summary.pd_pf_auc,
        summary.snpr
    );

    Ok(Roc3dResult {
        curve,
        summary,
        degenerate: false,
        topcut_limit,
    })
}

/// Evaluate several detection maps against the same ground truth.
///
/// Results are returned in the order of `detectors`.
///
/// # Errors
///
/// Returns the first error produced by [`evaluate`].
pub fn evaluate_detectors(
    target: &[f64],
    detectors: &[&[f64]],
    config: &Roc3dConfig,
) -> Result<Vec<Roc3dResult>> {
    #[cfg(feature = "parallel")]
    let results = {
        use rayon::prelude::*;
        detectors
            .par_iter()
            .map(|predicted| evaluate(target, predicted, config))
            .collect::<Result<Vec<_>>>()
    };
    #[cfg(not(feature = "parallel"))]
    let results = detectors
        .iter()
        .map(|predicted| evaluate(target, predicted, config))
        .collect::<Result<Vec<_>>>();
    results
}
