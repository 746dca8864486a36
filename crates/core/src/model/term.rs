use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── TERM VALUE ────────────────────────────────────────────────────────────────
//

/// Value of a sequence term at a given index.
///
/// `Undefined` is the sentinel for indices where the rule has no real value.
/// Previews render it as a gap instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TermValue {
    Defined(f64),
    Undefined,
}

impl TermValue {
    /// Wraps a raw float, mapping NaN and infinities to `Undefined`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Defined(value)
        } else {
            Self::Undefined
        }
    }

    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => write!(f, "{v:.6}"),
            Self::Undefined => f.write_str("-"),
        }
    }
}

//
// ─── TERM RULE ─────────────────────────────────────────────────────────────────
//

/// Declarative general term `a_n` of a sequence.
///
/// Rules are plain data so catalogs can be authored in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TermRule {
    /// `1/n`
    Reciprocal,
    /// `(-1)^n`
    AlternatingSign,
    /// `n`
    Identity,
    /// `(-1)^n / n`
    AlternatingReciprocal,
    /// `ln n`
    NaturalLog,
    /// `sin n`
    Sine,
    /// `c`
    Constant(f64),
    /// `n^p`
    Power(f64),
    /// `r^n`
    Geometric(f64),
}

impl TermRule {
    /// Evaluates the rule at index `n`.
    ///
    /// Indices start at 1; `n = 0` and any non-finite result yield `Undefined`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn evaluate(self, n: u64) -> TermValue {
        if n == 0 {
            return TermValue::Undefined;
        }
        let x = n as f64;
        let sign = if n % 2 == 0 { 1.0 } else { -1.0 };

        let raw = match self {
            Self::Reciprocal => 1.0 / x,
            Self::AlternatingSign => sign,
            Self::Identity => x,
            Self::AlternatingReciprocal => sign / x,
            Self::NaturalLog => x.ln(),
            Self::Sine => x.sin(),
            Self::Constant(c) => c,
            Self::Power(p) => x.powf(p),
            Self::Geometric(r) => i32::try_from(n).map_or_else(|_| r.powf(x), |k| r.powi(k)),
        };
        TermValue::from_f64(raw)
    }
}
