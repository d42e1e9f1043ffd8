//! # Time-series kernels for the processing pipeline
//!
//! Small, allocation-light operations applied per trace by the
//! [`SignalProcessor`](crate::process::SignalProcessor): detrending, edge tapering, cutting to
//! a time window, and velocity → displacement integration. The causal Butterworth filters live
//! in [`butterworth`].

pub mod butterworth;

use hifitime::{Duration, Epoch};

use crate::dataset::Trace;
use crate::gridmt_errors::GridmtError;

/// Remove the mean from the samples.
pub fn detrend_mean(data: &mut [f64]) {
    if data.is_empty() {
        return;
    }
    let mean = data.iter().sum::<f64>() / data.len() as f64;
    for x in data.iter_mut() {
        *x -= mean;
    }
}

/// Remove the least-squares straight line from the samples.
pub fn detrend_linear(data: &mut [f64]) {
    let n = data.len();
    if n < 2 {
        return;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = data.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in data.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    let slope = numerator / denominator;
    let intercept = y_mean - slope * x_mean;
    for (i, y) in data.iter_mut().enumerate() {
        *y -= intercept + slope * i as f64;
    }
}

/// Apply a Hann cosine ramp over `fraction` of the trace length at each edge.
///
/// `fraction` is clamped so the two ramps never overlap.
pub fn hann_taper(data: &mut [f64], fraction: f64) {
    let n = data.len();
    if n < 2 || fraction <= 0.0 {
        return;
    }

    let ramp = ((fraction * n as f64).round() as usize).min(n / 2);
    for i in 0..ramp {
        let w = 0.5 * (1.0 - (std::f64::consts::PI * i as f64 / ramp as f64).cos());
        data[i] *= w;
        data[n - 1 - i] *= w;
    }
}

/// Cumulative-sum integration in place (velocity → displacement).
pub fn integrate(trace: &mut Trace) {
    let dt = trace.dt;
    let mut running = 0.0;
    for x in &mut trace.data {
        running += *x;
        *x = running * dt;
    }
}

/// Cut a trace to the `[start, end]` window, keeping the samples whose times round into it.
///
/// The start time is advanced to the first retained sample. Windows reaching outside the
/// recorded span (beyond half a sample of slack at either edge) are an error; traces are
/// never zero-padded to fill a window.
pub fn cut(trace: &mut Trace, start: Epoch, end: Epoch) -> Result<(), GridmtError> {
    let dt = trace.dt;
    let offset_start = (start - trace.start_time).to_seconds();
    let offset_end = (end - trace.start_time).to_seconds();

    let i1 = (offset_start / dt).round() as i64;
    let i2 = (offset_end / dt).round() as i64;

    if i1 < 0 || i2 >= trace.data.len() as i64 || i2 < i1 {
        return Err(GridmtError::CutOutsideTrace {
            start: offset_start,
            end: offset_end,
        });
    }

    trace.data = trace.data[i1 as usize..=i2 as usize].to_vec();
    trace.start_time = trace.start_time + Duration::from_seconds(i1 as f64 * dt);
    Ok(())
}
