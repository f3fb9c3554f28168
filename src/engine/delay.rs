use crate::rules::model::Slowdown;

/// Normalised position of character `index` among `total` characters.
///
/// A single character sits at position 0.
pub fn position(index: usize, total: usize) -> f64 {
    let denom = total.saturating_sub(1).max(1);
    index as f64 / denom as f64
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Geometry of the two slowdown bumps, in curve positions.
///
/// The emitted runtime receives this exact value, so both evaluate the same bands.
pub struct BumpShape {
    /// Where the middle bump starts rising.
    pub middle_start: f64,
    /// Width of the rising half.
    pub middle_rise: f64,
    /// Peak of the middle bump.
    pub middle_peak: f64,
    /// Width of the falling half.
    pub middle_fall: f64,
    /// Where the middle bump is back to zero.
    pub middle_end: f64,
    /// Multiplier at the peak.
    pub middle_gain: f64,
    /// Where the end bump starts.
    pub end_start: f64,
    /// Width of the end ramp.
    pub end_width: f64,
    /// Multiplier at the last character.
    pub end_gain: f64,
}

/// The bump geometry used everywhere.
pub const BUMPS: BumpShape = BumpShape {
    middle_start: 0.33,
    middle_rise: 0.17,
    middle_peak: 0.5,
    middle_fall: 0.2,
    middle_end: 0.7,
    middle_gain: 5.0,
    end_start: 0.6,
    end_width: 0.4,
    end_gain: 3.0,
};

/// Extra delay multiplier at `position` from the enabled slowdown bumps.
pub fn slowdown_factor(position: f64, slowdown: Slowdown) -> f64 {
    let b = BUMPS;
    let mut factor = 0.0;

    if slowdown.middle {
        factor += if position < b.middle_start {
            0.0
        } else if position < b.middle_peak {
            ((position - b.middle_start) / b.middle_rise).powi(2) * b.middle_gain
        } else if position < b.middle_end {
            (1.0 - (position - b.middle_peak) / b.middle_fall).powi(2) * b.middle_gain
        } else {
            0.0
        };
    }

    if slowdown.end && position >= b.end_start {
        factor += ((position - b.end_start) / b.end_width).powi(2) * b.end_gain;
    }

    factor
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Per-character stagger of one rule.
pub struct DelayCurve {
    /// Base delay in seconds between consecutive characters.
    pub base: f64,
    /// Enabled slowdown bumps.
    pub slowdown: Slowdown,
}

impl DelayCurve {
    /// Curve with the given base delay and bumps.
    pub fn new(base: f64, slowdown: Slowdown) -> Self {
        Self { base, slowdown }
    }

    /// Delay added by character `index`.
    pub fn increment(&self, index: usize, total: usize) -> f64 {
        self.base * (1.0 + slowdown_factor(position(index, total), self.slowdown))
    }

    /// Running delay after character `index` has added its increment.
    pub fn cumulative_at(&self, index: usize, total: usize) -> f64 {
        (0..=index).map(|i| self.increment(i, total)).sum()
    }

    /// Animation start offset of every character: the running delay before its own increment.
    ///
    /// The first character starts at 0.
    pub fn start_offsets(&self, total: usize) -> Vec<f64> {
        let mut offsets = Vec::with_capacity(total);
        let mut delay = 0.0;
        for i in 0..total {
            offsets.push(delay);
            delay += self.increment(i, total);
        }
        offsets
    }

    /// Offset after the last character, i.e. when the last animation has started.
    pub fn total_span(&self, total: usize) -> f64 {
        (0..total).map(|i| self.increment(i, total)).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/delay.rs"]
mod tests;
