//! Area-under-curve statistics derived from a 3D-ROC curve.
//!
//! Numeric edge cases are not masked: a zero false-alarm area gives an
//! infinite SNPR, and a curve that is flat on either axis turns the
//! endpoint-normalized statistics into NaN or infinity.

use roc3d_core::Summarizable;

use crate::curve::RocCurve3d;

/// The four scalar 3D-ROC statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roc3dSummary {
    /// Area under PD vs PF. Higher is better.
    pub pd_pf_auc: f64,
    /// Area under PF vs threshold. Lower is better.
    pub pf_tau_auc: f64,
    /// Area under PD vs threshold. Higher is better.
    pub pd_tau_auc: f64,
    /// `10 * log10(pd_tau_auc / pf_tau_auc)` in decibels. Higher is better.
    pub snpr: f64,
}

impl Roc3dSummary {
    /// Result reported for a detector whose scores are all identical.
    pub const NON_INFORMATIVE: Self = Self {
        pd_pf_auc: 0.5,
        pf_tau_auc: 0.0,
        pd_tau_auc: 1.0,
        snpr: 0.0,
    };

    /// Integrate a curve.
    ///
    /// With `normalize`, the areas are rescaled against the curve endpoints
    /// (see [`normalize_to_endpoints`]). An empty curve yields
    /// [`Roc3dSummary::NON_INFORMATIVE`].
    pub fn from_curve(curve: &RocCurve3d, normalize: bool) -> Self {
        if curve.is_empty() {
            return Self::NON_INFORMATIVE;
        }
        let pd_pf_auc = pd_pf_auc(curve.pf(), curve.pd());
        let pf_tau_auc = trapezoid(curve.pf(), curve.taus());
        let pd_tau_auc = trapezoid(curve.pd(), curve.taus());
        let summary = Self {
            pd_pf_auc,
            pf_tau_auc,
            pd_tau_auc,
            snpr: snpr_db(pd_tau_auc, pf_tau_auc),
        };
        if normalize {
            normalize_to_endpoints(&summary, curve)
        } else {
            summary
        }
    }

    /// Composite detectability scores built from the three areas.
    pub fn composite(&self) -> CompositeScores {
        CompositeScores {
            td: self.pd_pf_auc + self.pd_tau_auc,
            bs: self.pd_pf_auc - self.pf_tau_auc,
            odp: self.pd_tau_auc + 1.0 - self.pf_tau_auc,
            tdbs: self.pd_tau_auc - self.pf_tau_auc,
            snpr: self.snpr,
        }
    }
}

impl Summarizable for Roc3dSummary {
    fn summary(&self) -> String {
        format!(
            "AUC_pdpf: {:.3} AUC_pf_t: {:.3} AUC_pd_t: {:.3} SNPR: {:.3}",
            self.pd_pf_auc, self.pf_tau_auc, self.pd_tau_auc, self.snpr,
        )
    }
}

/// Composite 3D-ROC scores (Chang 2021).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeScores {
    /// Target detectability: `PD_PF + PD_tau`.
    pub td: f64,
    /// Background suppressibility: `PD_PF - PF_tau`.
    pub bs: f64,
    /// Overall detection probability: `PD_tau + 1 - PF_tau`.
    pub odp: f64,
    /// Target detection vs background suppression: `PD_tau - PF_tau`.
    pub tdbs: f64,
    /// Signal-to-noise probability ratio in dB.
    pub snpr: f64,
}

/// Trapezoidal integral of `y` over `x`, signed by the direction of `x`.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    let mut area = 0.0;
    for i in 1..n {
        area += (x[i] - x[i - 1]) * (y[i] + y[i - 1]) / 2.0;
    }
    area
}

/// Area under PD vs PF for a curve ordered by ascending threshold.
///
/// PF is non-increasing along that order, so every term is non-negative.
pub fn pd_pf_auc(pf: &[f64], pd: &[f64]) -> f64 {
    let n = pf.len().min(pd.len());
    let mut auc = 0.0;
    for i in 1..n {
        auc += (pf[i - 1] - pf[i]) * (pd[i] + pd[i - 1]) / 2.0;
    }
    auc
}

/// Signal-to-noise probability ratio in decibels.
///
/// `+inf` when `pf_tau_auc == 0` and `pd_tau_auc > 0`, NaN when both are zero.
pub fn snpr_db(pd_tau_auc: f64, pf_tau_auc: f64) -> f64 {
    10.0 * (pd_tau_auc / pf_tau_auc).log10()
}

/// Rescale areas against the curve's endpoint values.
///
/// With `a0, a1` the first and last PD and `b0, b1` the first and last PF:
///
/// - `PD_PF' = (PD_PF - a1) / ((a0 - a1) * (b0 - b1))`
/// - `PD_tau' = (PD_tau - a1) / (a0 - a1)`
/// - `PF_tau' = (PF_tau - b1) / (b0 - b1)`
///
/// and SNPR is recomputed from the rescaled areas. An empty curve leaves the
/// summary unchanged.
pub fn normalize_to_endpoints(summary: &Roc3dSummary, curve: &RocCurve3d) -> Roc3dSummary {
    let (pd, pf) = (curve.pd(), curve.pf());
    let (Some(&a0), Some(&a1), Some(&b0), Some(&b1)) = (pd.first(), pd.last(), pf.first(), pf.last())
    else {
        return *summary;
    };
    let pd_pf_auc = (summary.pd_pf_auc - a1) / ((a0 - a1) * (b0 - b1));
    let pd_tau_auc = (summary.pd_tau_auc - a1) / (a0 - a1);
    let pf_tau_auc = (summary.pf_tau_auc - b1) / (b0 - b1);
    Roc3dSummary {
        pd_pf_auc,
        pf_tau_auc,
        pd_tau_auc,
        snpr: snpr_db(pd_tau_auc, pf_tau_auc),
    }
}
