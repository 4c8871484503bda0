//! Adaptive low-pass filter for fingertip position smoothing.
//!
//! A "one euro" style filter: the cutoff frequency widens with the measured
//! signal velocity, so the output is heavily smoothed while the hand is still
//! and follows closely while it moves.
//!
//! # Algorithm
//!
//! 1. **Bootstrap:** the first sample seeds the state and passes through.
//! 2. **Frequency:** the sample rate is re-measured from each timestamp delta.
//! 3. **Derivative:** raw velocity is low-passed at `derivative_cutoff`.
//! 4. **Cutoff:** `min_cutoff + beta * |velocity|`.
//! 5. **Position:** raw input is low-passed at that cutoff.
//!
//! State lives in [`FilterState`] and is advanced by [`filter_step`], so a
//! caller can hold as many independent filters as it needs.

use std::f64::consts::PI;

use pinchmouse_common::config::FilterConfig;
use pinchmouse_common::error::PinchmouseResult;
use pinchmouse_model::landmark::Point2D;

/// Per-axis filter state.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Last filtered value. `None` until the bootstrap sample.
    prev_value: Option<f64>,
    /// Last smoothed derivative (units per second).
    prev_derivative: f64,
    /// Timestamp of the last sample (seconds).
    prev_timestamp: Option<f64>,
    /// Current sample rate estimate (Hz).
    frequency_hz: f64,
}

impl FilterState {
    /// Unbootstrapped state at the configured frequency.
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            prev_value: None,
            prev_derivative: 0.0,
            prev_timestamp: None,
            frequency_hz: config.frequency_hz,
        }
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.prev_value.is_some()
    }

    /// Last filtered value, if any sample has been seen.
    pub fn value(&self) -> Option<f64> {
        self.prev_value
    }

    pub fn derivative(&self) -> f64 {
        self.prev_derivative
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }
}

/// Exponential smoothing factor for `cutoff` at `frequency_hz`.
///
/// `alpha = 1 / (1 + tau / te)` with `tau = 1 / (2π·cutoff)` and
/// `te = 1 / frequency`. Always in `(0, 1]` for positive inputs.
pub fn smoothing_alpha(cutoff: f64, frequency_hz: f64) -> f64 {
    let tau = 1.0 / (2.0 * PI * cutoff);
    let te = 1.0 / frequency_hz;
    1.0 / (1.0 + tau / te)
}

/// Advance `state` by one raw sample and return the filtered value.
pub fn filter_step(
    config: &FilterConfig,
    state: &mut FilterState,
    raw: f64,
    timestamp_secs: f64,
) -> f64 {
    let prev = match state.prev_value {
        None => {
            state.prev_value = Some(raw);
            state.prev_timestamp = Some(timestamp_secs);
            return raw;
        }
        Some(prev) => prev,
    };

    if let Some(prev_t) = state.prev_timestamp {
        let te = timestamp_secs - prev_t;
        let measured = 1.0 / te;
        if te > 0.0 && measured.is_finite() {
            state.frequency_hz = measured;
        } else {
            tracing::trace!(
                dt = te,
                frequency_hz = state.frequency_hz,
                "Non-positive sample interval, keeping last frequency"
            );
        }
    }
    state.prev_timestamp = Some(timestamp_secs);

    let velocity = (raw - prev) * state.frequency_hz;
    let a_d = smoothing_alpha(config.derivative_cutoff, state.frequency_hz);
    let derivative = a_d * velocity + (1.0 - a_d) * state.prev_derivative;

    let cutoff = config.min_cutoff + config.beta * derivative.abs();
    let a = smoothing_alpha(cutoff, state.frequency_hz);
    let filtered = a * raw + (1.0 - a) * prev;

    state.prev_value = Some(filtered);
    state.prev_derivative = derivative;
    filtered
}

/// A single-axis adaptive filter owning its configuration and state.
#[derive(Debug, Clone)]
pub struct AdaptiveFilter {
    config: FilterConfig,
    state: FilterState,
}

impl AdaptiveFilter {
    /// Create a filter, rejecting invalid configuration.
    pub fn new(config: FilterConfig) -> PinchmouseResult<Self> {
        config.validate()?;
        Ok(Self {
            state: FilterState::new(&config),
            config,
        })
    }

    /// Filter a single value.
    pub fn filter(&mut self, raw: f64, timestamp_secs: f64) -> f64 {
        filter_step(&self.config, &mut self.state, raw, timestamp_secs)
    }

    /// Return to the unbootstrapped condition.
    pub fn reset(&mut self) {
        self.state = FilterState::new(&self.config);
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}

/// Two structurally independent axis filters for a 2D position.
#[derive(Debug, Clone)]
pub struct AdaptiveFilter2D {
    pub x: AdaptiveFilter,
    pub y: AdaptiveFilter,
}

impl AdaptiveFilter2D {
    pub fn new(config: FilterConfig) -> PinchmouseResult<Self> {
        Ok(Self {
            x: AdaptiveFilter::new(config)?,
            y: AdaptiveFilter::new(config)?,
        })
    }

    pub fn filter(&mut self, raw: Point2D, timestamp_secs: f64) -> Point2D {
        Point2D::new(
            self.x.filter(raw.x, timestamp_secs),
            self.y.filter(raw.y, timestamp_secs),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}
