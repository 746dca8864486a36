//! Numeric hints computed from a preview table.
//!
//! These are display aids only. Quiz answers always come from the authored
//! catalog properties.

use crate::model::PreviewRow;

/// Number of trailing defined terms inspected by [`TailTrend::analyze`].
pub const TAIL_WINDOW: usize = 10;

const SETTLED_STD_DEV: f64 = 0.001;
const RUNAWAY_MAGNITUDE: f64 = 1e5;

/// Rough reading of how the last previewed terms behave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TailTrend {
    /// Tail values barely move; `approx` is their mean.
    LikelyConvergent { approx: f64 },
    /// Tail values are very large in magnitude.
    LikelyDivergent,
    /// Neither settled nor blowing up: oscillating or irregular.
    Irregular,
    /// No defined values to look at.
    Insufficient,
}

impl TailTrend {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn analyze(rows: &[PreviewRow]) -> Self {
        let defined: Vec<f64> = rows.iter().filter_map(|row| row.value.as_f64()).collect();
        let tail = &defined[defined.len().saturating_sub(TAIL_WINDOW)..];
        if tail.is_empty() {
            return Self::Insufficient;
        }

        let len = tail.len() as f64;
        let mean = tail.iter().sum::<f64>() / len;
        let variance = tail.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len;
        let mean_abs = tail.iter().map(|v| v.abs()).sum::<f64>() / len;

        if variance.sqrt() < SETTLED_STD_DEV {
            Self::LikelyConvergent { approx: mean }
        } else if mean_abs > RUNAWAY_MAGNITUDE {
            Self::LikelyDivergent
        } else {
            Self::Irregular
        }
    }
}
