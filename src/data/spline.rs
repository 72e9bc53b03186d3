//! Piecewise cubic Hermite (PCHIP) models and their evaluation.
//!
//! Models arrive precomputed: knot positions, values and tangents. Nothing in
//! this crate fits them; we only evaluate.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One monotone piecewise cubic Hermite interpolant.
///
/// `x` holds the knots in ascending order, `y` the value and `m` the tangent
/// at each knot. A single knot describes a constant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SplineModel {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub m: Vec<f64>,
}

impl SplineModel {
    pub fn new(x: Vec<f64>, y: Vec<f64>, m: Vec<f64>) -> Self {
        Self { x, y, m }
    }

    /// A model that evaluates to `value` everywhere.
    pub fn constant(at: f64, value: f64) -> Self {
        Self {
            x: vec![at],
            y: vec![value],
            m: vec![0.0],
        }
    }

    /// True when the three arrays are non-empty and of equal length.
    pub fn is_usable(&self) -> bool {
        let n = self.x.len();
        n > 0 && self.y.len() == n && self.m.len() == n
    }

    /// Validity domain `(min, max)` of the knots, `None` for an unusable model.
    pub fn domain(&self) -> Option<(f64, f64)> {
        if !self.is_usable() {
            return None;
        }
        let first = self.x[0];
        let last = self.x[self.x.len() - 1];
        Some((first.min(last), first.max(last)))
    }

    /// True when `v` lies inside the knot range (inclusive).
    pub fn covers(&self, v: f64) -> bool {
        match self.domain() {
            Some((lo, hi)) => v >= lo && v <= hi,
            None => false,
        }
    }

    /// Check the model shape: equal non-zero lengths, ascending knots,
    /// finite numbers everywhere.
    pub fn validate(&self, what: &str) -> Result<()> {
        let n = self.x.len();
        if n == 0 {
            return Err(Error::invalid_model(what, "no knots"));
        }
        if self.y.len() != n || self.m.len() != n {
            return Err(Error::invalid_model(
                what,
                format!(
                    "length mismatch: x={}, y={}, m={}",
                    n,
                    self.y.len(),
                    self.m.len()
                ),
            ));
        }
        let mut all = self.x.iter().chain(self.y.iter()).chain(self.m.iter());
        if all.any(|v| !v.is_finite()) {
            return Err(Error::invalid_model(what, "non-finite value"));
        }
        if self.x.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::invalid_model(what, "knots are not ascending"));
        }
        Ok(())
    }

    /// Evaluate at `xq`. Queries outside the knot range return the boundary
    /// value; an unusable model or a `NaN` query yields `NaN`.
    pub fn eval(&self, xq: f64) -> f64 {
        if !self.is_usable() {
            return f64::NAN;
        }
        let n = self.x.len();
        if n == 1 {
            return self.y[0];
        }
        if xq.is_nan() {
            return f64::NAN;
        }

        let xs = &self.x;
        let (lo, hi) = (xs[0].min(xs[n - 1]), xs[0].max(xs[n - 1]));
        let xv = xq.max(lo).min(hi);

        // First knot strictly greater than xv, stepped back to the segment start.
        let i = xs.partition_point(|&k| k <= xv).saturating_sub(1).min(n - 2);

        let mut h = xs[i + 1] - xs[i];
        if h == 0.0 {
            h = 1.0;
        }
        let t = (xv - xs[i]) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * self.y[i] + h10 * (self.m[i] * h) + h01 * self.y[i + 1] + h11 * (self.m[i + 1] * h)
    }
}

/// Evaluate an optional model; an absent model means "no data here" (`NaN`).
#[inline]
pub fn evaluate(model: Option<&SplineModel>, x: f64) -> f64 {
    match model {
        Some(m) => m.eval(x),
        None => f64::NAN,
    }
}
