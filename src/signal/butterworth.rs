//! # Causal Butterworth filters
//!
//! Butterworth lowpass/highpass/bandpass filters implemented as cascaded biquad sections
//! (Direct Form II Transposed) for numerical stability. The analog prototype poles are mapped
//! to the digital plane with a bilinear transform after frequency pre-warping.
//!
//! Filtering is single-pass, so the filters are **causal** (non-zero-phase). The processing
//! pipeline applies the same filter to observed data and synthetics.

use nalgebra::Complex;
use std::f64::consts::PI;

use crate::constants::Hertz;
use crate::gridmt_errors::GridmtError;

/// A single second-order section.
///
/// Transfer function `H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)`.
#[derive(Debug, Clone)]
pub struct Biquad {
    /// Numerator coefficients `[b0, b1, b2]`
    b: [f64; 3],
    /// Denominator coefficients `[a1, a2]` (`a0` normalized to 1)
    a: [f64; 2],
    /// Direct Form II Transposed state
    state: [f64; 2],
}

impl Biquad {
    pub fn new(b: [f64; 3], a: [f64; 2]) -> Self {
        Biquad {
            b,
            a,
            state: [0.0; 2],
        }
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b[0] * input + self.state[0];
        self.state[0] = self.b[1] * input - self.a[0] * output + self.state[1];
        self.state[1] = self.b[2] * input - self.a[1] * output;
        output
    }

    pub fn reset(&mut self) {
        self.state = [0.0; 2];
    }

    /// Poles inside the unit circle?
    pub fn is_stable(&self) -> bool {
        self.a[1].abs() < 1.0 && self.a[0].abs() < 1.0 + self.a[1]
    }
}

/// Lowpass or highpass response of a section cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Response {
    Lowpass,
    Highpass,
}

/// Butterworth filter as a cascade of biquad sections.
#[derive(Debug, Clone)]
pub struct ButterworthFilter {
    sections: Vec<Biquad>,
}

impl ButterworthFilter {
    /// Design a lowpass filter with the -3 dB point at `cutoff_hz`.
    pub fn lowpass(order: usize, cutoff_hz: Hertz, sample_rate: Hertz) -> Result<Self, GridmtError> {
        check_corner(cutoff_hz, sample_rate)?;
        Ok(ButterworthFilter {
            sections: design(order, cutoff_hz, sample_rate, Response::Lowpass),
        })
    }

    /// Design a highpass filter with the -3 dB point at `cutoff_hz`.
    ///
    /// A zero cutoff yields an identity filter (the whole band passes).
    pub fn highpass(order: usize, cutoff_hz: Hertz, sample_rate: Hertz) -> Result<Self, GridmtError> {
        if cutoff_hz == 0.0 {
            return Ok(ButterworthFilter { sections: Vec::new() });
        }
        check_corner(cutoff_hz, sample_rate)?;
        Ok(ButterworthFilter {
            sections: design(order, cutoff_hz, sample_rate, Response::Highpass),
        })
    }

    /// Design a bandpass filter as a lowpass(`high_hz`) + highpass(`low_hz`) cascade.
    pub fn bandpass(
        order: usize,
        low_hz: Hertz,
        high_hz: Hertz,
        sample_rate: Hertz,
    ) -> Result<Self, GridmtError> {
        check_corner(low_hz, sample_rate)?;
        check_corner(high_hz, sample_rate)?;
        let mut sections = design(order, high_hz, sample_rate, Response::Lowpass);
        sections.extend(design(order, low_hz, sample_rate, Response::Highpass));
        Ok(ButterworthFilter { sections })
    }

    /// Filter the samples in place, single causal pass.
    pub fn apply(&mut self, data: &mut [f64]) {
        for section in &mut self.sections {
            section.reset();
        }
        for x in data.iter_mut() {
            let mut y = *x;
            for section in &mut self.sections {
                y = section.process(y);
            }
            *x = y;
        }
    }

    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn is_stable(&self) -> bool {
        self.sections.iter().all(|s| s.is_stable())
    }
}

fn check_corner(freq: Hertz, sample_rate: Hertz) -> Result<(), GridmtError> {
    let nyquist = sample_rate / 2.0;
    if freq <= 0.0 || freq >= nyquist {
        return Err(GridmtError::InvalidFilterConfig(format!(
            "corner frequency {freq} Hz outside (0, {nyquist}) Hz for sampling rate {sample_rate} Hz"
        )));
    }
    Ok(())
}

fn design(order: usize, cutoff_hz: Hertz, sample_rate: Hertz, response: Response) -> Vec<Biquad> {
    let wc = prewarp(cutoff_hz, sample_rate);
    let poles = prototype_poles(order);
    poles_to_biquads(&poles, wc, sample_rate, response)
}

/// Pre-warp a corner frequency for the bilinear transform.
fn prewarp(freq_hz: Hertz, sample_rate: Hertz) -> f64 {
    2.0 * sample_rate * (PI * freq_hz / sample_rate).tan()
}

/// Analog Butterworth prototype poles on the left-half s-plane unit circle.
fn prototype_poles(order: usize) -> Vec<Complex<f64>> {
    (0..order)
        .map(|k| {
            let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
            Complex::new(theta.cos(), theta.sin())
        })
        .collect()
}

/// Map prototype poles (scaled by `wc`) to digital biquads via the bilinear transform.
///
/// Complex poles come in conjugate pairs, each pair producing one second-order section; odd
/// orders leave one real pole producing a first-order section. The prototype emits poles in
/// increasing-angle order, so a pair's members are not adjacent in the list: sections are
/// built from the upper-half-plane poles only, the conjugate being implied by the section's
/// real coefficients.
fn poles_to_biquads(
    poles: &[Complex<f64>],
    wc: f64,
    sample_rate: Hertz,
    response: Response,
) -> Vec<Biquad> {
    let k = 2.0 * sample_rate;
    let mut sections = Vec::new();

    for pole in poles {
        if pole.im.abs() < 1e-10 {
            let p = pole.re * wc;
            let (b, a) = bilinear_1pole(p, k, response);
            sections.push(Biquad::new(b, a));
        } else if pole.im > 0.0 {
            let p = *pole * wc;
            let (b, a) = bilinear_2pole(p, k, response);
            sections.push(Biquad::new(b, a));
        }
    }

    sections
}

/// Bilinear transform of a single real pole.
fn bilinear_1pole(p: f64, k: f64, response: Response) -> ([f64; 3], [f64; 2]) {
    let alpha = k - p;
    let beta = k + p;

    match response {
        Response::Lowpass => {
            // H(s) = -p / (s - p), unity DC gain
            let b0 = -p / alpha;
            let a1 = -beta / alpha;
            ([b0, b0, 0.0], [a1, 0.0])
        }
        Response::Highpass => {
            let b0 = k / alpha;
            let a1 = -beta / alpha;
            ([b0, -b0, 0.0], [a1, 0.0])
        }
    }
}

/// Bilinear transform of a complex conjugate pole pair.
fn bilinear_2pole(p: Complex<f64>, k: f64, response: Response) -> ([f64; 3], [f64; 2]) {
    let p_mag_sq = p.re * p.re + p.im * p.im;
    let k2 = k * k;
    let d = k2 - 2.0 * k * p.re + p_mag_sq;

    let a1 = 2.0 * (p_mag_sq - k2) / d;
    let a2 = (k2 + 2.0 * k * p.re + p_mag_sq) / d;

    match response {
        Response::Lowpass => {
            // H(s) = |p|^2 / (s^2 - 2 Re(p) s + |p|^2), unity DC gain
            let b0 = p_mag_sq / d;
            ([b0, 2.0 * b0, b0], [a1, a2])
        }
        Response::Highpass => {
            // unity gain at Nyquist
            let b0 = k2 / d;
            ([b0, -2.0 * b0, b0], [a1, a2])
        }
    }
}
