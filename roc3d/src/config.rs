//! Evaluation options.

/// How a threshold turns continuous scores into binary decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegMode {
    /// `score >= tau` is flagged (Chang 2021, Eq. 7).
    #[default]
    Inclusive,
    /// `score > tau` is flagged (Chang 2021, Eq. 9).
    Exclusive,
}

impl SegMode {
    /// Map the legacy integer code: `1` is inclusive, anything else exclusive.
    pub fn from_code(code: i32) -> Self {
        if code == 1 {
            SegMode::Inclusive
        } else {
            SegMode::Exclusive
        }
    }

    /// Whether `score` is flagged as a detection at threshold `tau`.
    #[inline]
    pub fn flags(self, score: f64, tau: f64) -> bool {
        match self {
            SegMode::Inclusive => score >= tau,
            SegMode::Exclusive => score > tau,
        }
    }
}

/// Configuration for a single 3D-ROC evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roc3dConfig {
    /// Clip scores above the median score on target pixels (Li et al. 2023).
    pub adaptive_topcut: bool,
    /// Threshold comparison used during the sweep.
    pub seg_mode: SegMode,
    /// Rescale the summary statistics relative to the curve endpoints.
    pub normalize: bool,
}

impl Default for Roc3dConfig {
    fn default() -> Self {
        Self {
            adaptive_topcut: false,
            seg_mode: SegMode::Inclusive,
            normalize: false,
        }
    }
}

impl Roc3dConfig {
    pub fn with_adaptive_topcut(mut self, enabled: bool) -> Self {
        self.adaptive_topcut = enabled;
        self
    }

    pub fn with_seg_mode(mut self, seg_mode: SegMode) -> Self {
        self.seg_mode = seg_mode;
        self
    }

    pub fn with_normalize(mut self, enabled: bool) -> Self {
        self.normalize = enabled;
        self
    }
}
