//! Linear and band scales mapping data values to pixel positions.

use crate::api::AxisDomain;

/// Continuous mapping from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map `value` into the range. A degenerate domain maps to the range midpoint.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0 + (r1 - r0) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    pub fn axis_domain(&self) -> AxisDomain {
        AxisDomain {
            min: self.domain.0,
            max: self.domain.1,
        }
    }
}

/// Discrete mapping of ordered keys onto evenly spaced bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<K> {
    keys: Vec<K>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<K: PartialEq> BandScale<K> {
    /// Bands across `[0, width]` with equal inner and outer padding, centered.
    pub fn new(keys: Vec<K>, width: f64, padding: f64) -> Self {
        let n = keys.len() as f64;
        let step = width / (n - padding + 2.0 * padding).max(1.0);
        let start = (width - step * (n - padding)) / 2.0;
        Self {
            keys,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left edge of the band for `key`, if it is part of the domain.
    pub fn position(&self, key: &K) -> Option<f64> {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}
