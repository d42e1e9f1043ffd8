//! # The waveform processing pipeline
//!
//! [`SignalProcessor`] applies a deterministic sequence of stages to a waveform bundle:
//! unit normalization → filtering → phase picking → windowing → cut & taper → weighting.
//! The same configured instance must process both the observed data and the Green's-function
//! synthetics: phase picks and analysis windows are computed once per station identifier and
//! memoized, so synthetics are cut with the windows derived from the data.
//!
//! ## Usage
//!
//! Processing is a two-step procedure: configure once, invoke per bundle.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gridmt::process::{FilterSpec, PickSpec, SignalProcessor, WindowScheme, WindowSpec};
//! # fn demo(model: Arc<dyn gridmt::process::picks::TravelTimeModel>,
//! #         data: &gridmt::Dataset,
//! #         greens: &gridmt::GreensLibrary,
//! # ) -> Result<(), gridmt::GridmtError> {
//! let mut process_bw = SignalProcessor::builder()
//!     .filter(FilterSpec::BandpassFreq { freq_min: 0.1, freq_max: 0.333 })
//!     .pick(PickSpec::EarthModel(model))
//!     .window(WindowSpec::new(WindowScheme::CapBodyWave, 15.0).with_padding(2.0))
//!     .build()?;
//!
//! let processed_data = data.map(&mut process_bw)?;
//! let processed_greens = greens.map(&mut process_bw)?; // reuses the data windows
//! # Ok(()) }
//! ```
//!
//! Configuration is validated eagerly by [`SignalProcessorBuilder::build`]: referenced files
//! must exist, frequency corners must be ordered and finite, window lengths positive.
//! Construction either fully succeeds or fails with a configuration error and no side effects.

pub mod picks;
pub mod weights;

use std::path::PathBuf;
use std::sync::Arc;

use hifitime::Duration;

use crate::constants::{
    GridmtHashMap, Hertz, Meter, Seconds, StationId, BODY_WAVE_OFFSET, BUTTERWORTH_ORDER,
    CM_TO_M, DEFAULT_SCALING_DISTANCE, DEFAULT_TAPER_FRACTION, SURFACE_WAVE_OFFSET,
};
use crate::dataset::{Bundle, Tag};
use crate::event::Origin;
use crate::gridmt_errors::GridmtError;
use crate::signal::butterworth::ButterworthFilter;
use crate::signal::{cut, detrend_linear, detrend_mean, hann_taper, integrate};
use crate::station::{distance_azimuth, m_to_deg, Station};

use picks::{first_arrival, read_pick_file, PhasePicks, SacHeaderReader, TimeWindow, TravelTimeModel};
use weights::{parse_weight_file, WeightTable};

// -------------------------------------------------------------------------------------------------
// Configuration axes (user-facing specs, validated into internal configs)
// -------------------------------------------------------------------------------------------------

/// Filter stage configuration.
///
/// Corners may be given as frequencies or as periods; the two forms are separate variants so
/// they cannot be mixed. Period forms are converted to frequencies at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterSpec {
    BandpassFreq { freq_min: Hertz, freq_max: Hertz },
    BandpassPeriod { period_min: Seconds, period_max: Seconds },
    LowpassFreq { freq: Hertz },
    LowpassPeriod { period: Seconds },
    HighpassFreq { freq: Hertz },
    HighpassPeriod { period: Seconds },
}

/// Validated filter parameters, frequencies only.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FilterConfig {
    Bandpass { freq_min: Hertz, freq_max: Hertz },
    Lowpass { freq: Hertz },
    Highpass { freq: Hertz },
}

/// Phase-pick acquisition strategy.
pub enum PickSpec {
    /// Travel-time lookup in a 1D earth model
    EarthModel(Arc<dyn TravelTimeModel>),
    /// SAC headers `t1`/`t2` of the matching FK database file
    FkMetadata {
        database: PathBuf,
        reader: Arc<dyn SacHeaderReader>,
    },
    /// SAC headers `t5`/`t6` attached to the bundle's first trace
    SacMetadata,
    /// Recognized but not implemented; fails at build time
    CapWeightFile,
    /// Plain-text `station_id P S` file
    PickFile { path: PathBuf },
}

enum PickConfig {
    EarthModel(Arc<dyn TravelTimeModel>),
    FkMetadata {
        database: PathBuf,
        model: String,
        reader: Arc<dyn SacHeaderReader>,
    },
    SacMetadata,
    PickFile {
        path: PathBuf,
    },
}

/// Which CAP window the pipeline isolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowScheme {
    /// Body-wave window, opening 0.4 × length before the P pick
    CapBodyWave,
    /// Surface-wave window, opening 0.3 × length before the S pick
    CapSurfaceWave,
}

/// Windowing stage configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    pub scheme: WindowScheme,
    /// Window duration in seconds, strictly positive
    pub window_length: Seconds,
    /// Extra seconds cut on both ends of Green's-function bundles only
    pub padding_length: Seconds,
}

impl WindowSpec {
    pub fn new(scheme: WindowScheme, window_length: Seconds) -> Self {
        WindowSpec {
            scheme,
            window_length,
            padding_length: 0.0,
        }
    }

    pub fn with_padding(mut self, padding_length: Seconds) -> Self {
        self.padding_length = padding_length;
        self
    }
}

/// Which CAP weight columns the weighting stage consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightScheme {
    /// Body-wave weighting: Z and R components only
    CapBodyWave,
    /// Surface-wave weighting: Z, R and T components
    CapSurfaceWave,
}

/// Weighting stage configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSpec {
    pub scheme: WeightScheme,
    /// CAP weight table file, parsed eagerly at build time
    pub path: PathBuf,
    /// Exponent of the distance scaling; defaults to 1.0 (body) / 0.5 (surface)
    pub scaling_power: Option<f64>,
    /// Reference distance of the scaling, meters; defaults to 1e5
    pub scaling_distance: Option<Meter>,
    /// Extra amplitude multiplier applied with the distance scaling; defaults to 1.0
    pub adhoc_factor: Option<f64>,
}

impl WeightSpec {
    pub fn new(scheme: WeightScheme, path: impl Into<PathBuf>) -> Self {
        WeightSpec {
            scheme,
            path: path.into(),
            scaling_power: None,
            scaling_distance: None,
            adhoc_factor: None,
        }
    }
}

struct WeightConfig {
    scheme: WeightScheme,
    table: WeightTable,
    scaling_power: f64,
    scaling_distance: Meter,
    adhoc_factor: f64,
}

// -------------------------------------------------------------------------------------------------
// Builder
// -------------------------------------------------------------------------------------------------

/// Builder for [`SignalProcessor`]; all four axes are optional (absent = no-op stage).
#[derive(Default)]
pub struct SignalProcessorBuilder {
    filter: Option<FilterSpec>,
    pick: Option<PickSpec>,
    window: Option<WindowSpec>,
    weight: Option<WeightSpec>,
}

impl SignalProcessorBuilder {
    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filter = Some(spec);
        self
    }

    pub fn pick(mut self, spec: PickSpec) -> Self {
        self.pick = Some(spec);
        self
    }

    pub fn window(mut self, spec: WindowSpec) -> Self {
        self.window = Some(spec);
        self
    }

    pub fn weight(mut self, spec: WeightSpec) -> Self {
        self.weight = Some(spec);
        self
    }

    /// Validate the configuration and build the processor.
    ///
    /// Fails with a configuration error if any corner frequency is out of range, a referenced
    /// file is missing, a window length is not positive, or an unimplemented strategy is
    /// selected. No side effects on failure.
    pub fn build(self) -> Result<SignalProcessor, GridmtError> {
        let filter = self.filter.map(validate_filter).transpose()?;
        let pick = self.pick.map(validate_pick).transpose()?;
        let window = self.window.map(validate_window).transpose()?;
        let weight = self.weight.map(validate_weight).transpose()?;

        Ok(SignalProcessor {
            filter,
            pick,
            window,
            weight,
            picks: GridmtHashMap::default(),
            windows: GridmtHashMap::default(),
        })
    }
}

fn validate_filter(spec: FilterSpec) -> Result<FilterConfig, GridmtError> {
    let config = match spec {
        FilterSpec::BandpassFreq { freq_min, freq_max } => FilterConfig::Bandpass { freq_min, freq_max },
        FilterSpec::BandpassPeriod {
            period_min,
            period_max,
        } => {
            if period_min <= 0.0 || period_max <= 0.0 {
                return Err(GridmtError::InvalidFilterConfig(format!(
                    "bandpass periods must be positive, got [{period_min}, {period_max}]"
                )));
            }
            FilterConfig::Bandpass {
                freq_min: period_max.recip(),
                freq_max: period_min.recip(),
            }
        }
        FilterSpec::LowpassFreq { freq } => FilterConfig::Lowpass { freq },
        FilterSpec::LowpassPeriod { period } => {
            if period <= 0.0 {
                return Err(GridmtError::InvalidFilterConfig(format!(
                    "lowpass period must be positive, got {period}"
                )));
            }
            FilterConfig::Lowpass { freq: period.recip() }
        }
        FilterSpec::HighpassFreq { freq } => FilterConfig::Highpass { freq },
        FilterSpec::HighpassPeriod { period } => {
            if period <= 0.0 {
                return Err(GridmtError::InvalidFilterConfig(format!(
                    "highpass period must be positive, got {period}"
                )));
            }
            FilterConfig::Highpass { freq: period.recip() }
        }
    };

    match config {
        FilterConfig::Bandpass { freq_min, freq_max } => {
            if !(0.0 < freq_min && freq_min < freq_max && freq_max.is_finite()) {
                return Err(GridmtError::InvalidFilterConfig(format!(
                    "bandpass corners must satisfy 0 < freq_min < freq_max < inf, got [{freq_min}, {freq_max}]"
                )));
            }
        }
        FilterConfig::Lowpass { freq } => {
            if !(0.0 < freq && freq.is_finite()) {
                return Err(GridmtError::InvalidFilterConfig(format!(
                    "lowpass corner must satisfy 0 < freq < inf, got {freq}"
                )));
            }
        }
        FilterConfig::Highpass { freq } => {
            // zero admitted: a 0 Hz highpass passes the whole band
            if !(0.0 <= freq && freq.is_finite()) {
                return Err(GridmtError::InvalidFilterConfig(format!(
                    "highpass corner must satisfy 0 <= freq < inf, got {freq}"
                )));
            }
        }
    }

    Ok(config)
}

fn validate_pick(spec: PickSpec) -> Result<PickConfig, GridmtError> {
    match spec {
        PickSpec::EarthModel(model) => Ok(PickConfig::EarthModel(model)),
        PickSpec::FkMetadata { database, reader } => {
            if !database.is_dir() {
                return Err(GridmtError::FkDatabaseNotFound(
                    database.display().to_string(),
                ));
            }
            let model = database
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    GridmtError::InvalidPickConfig(format!(
                        "FK database path has no basename: {}",
                        database.display()
                    ))
                })?;
            Ok(PickConfig::FkMetadata {
                database,
                model,
                reader,
            })
        }
        PickSpec::SacMetadata => Ok(PickConfig::SacMetadata),
        PickSpec::CapWeightFile => Err(GridmtError::UnimplementedPickStrategy(
            "picks from CAP weight files".to_string(),
        )),
        PickSpec::PickFile { path } => {
            if !path.is_file() {
                return Err(GridmtError::PickFileNotFound(path.display().to_string()));
            }
            Ok(PickConfig::PickFile { path })
        }
    }
}

fn validate_window(spec: WindowSpec) -> Result<WindowSpec, GridmtError> {
    if !(spec.window_length > 0.0 && spec.window_length.is_finite()) {
        return Err(GridmtError::InvalidWindowConfig(format!(
            "window length must be positive, got {}",
            spec.window_length
        )));
    }
    if !(spec.padding_length >= 0.0 && spec.padding_length.is_finite()) {
        return Err(GridmtError::InvalidWindowConfig(format!(
            "padding length must be non-negative, got {}",
            spec.padding_length
        )));
    }
    Ok(spec)
}

fn validate_weight(spec: WeightSpec) -> Result<WeightConfig, GridmtError> {
    if !spec.path.is_file() {
        return Err(GridmtError::WeightFileNotFound(
            spec.path.display().to_string(),
        ));
    }
    let table = parse_weight_file(&spec.path)?;

    let scaling_power = spec.scaling_power.unwrap_or(match spec.scheme {
        WeightScheme::CapBodyWave => 1.0,
        WeightScheme::CapSurfaceWave => 0.5,
    });
    let scaling_distance = spec.scaling_distance.unwrap_or(DEFAULT_SCALING_DISTANCE);
    if scaling_distance <= 0.0 {
        return Err(GridmtError::InvalidWeightConfig(format!(
            "scaling distance must be positive, got {scaling_distance}"
        )));
    }

    Ok(WeightConfig {
        scheme: spec.scheme,
        table,
        scaling_power,
        scaling_distance,
        adhoc_factor: spec.adhoc_factor.unwrap_or(1.0),
    })
}

// -------------------------------------------------------------------------------------------------
// The processor
// -------------------------------------------------------------------------------------------------

/// Configured processing pipeline with per-station pick/window memoization.
///
/// One instance owns its caches for its whole lifetime; bundles sharing a station identifier
/// share cached picks and windows. Instances are meant for single-threaded use.
pub struct SignalProcessor {
    filter: Option<FilterConfig>,
    pick: Option<PickConfig>,
    window: Option<WindowSpec>,
    weight: Option<WeightConfig>,
    picks: GridmtHashMap<StationId, PhasePicks>,
    windows: GridmtHashMap<StationId, TimeWindow>,
}

impl SignalProcessor {
    pub fn builder() -> SignalProcessorBuilder {
        SignalProcessorBuilder::default()
    }

    /// Process a deep copy of the bundle, leaving the input untouched.
    ///
    /// Explicit `station`/`origin` arguments take precedence over the metadata attached to the
    /// bundle; processing fails if neither is available.
    pub fn process(
        &mut self,
        bundle: &Bundle,
        station: Option<&Station>,
        origin: Option<&Origin>,
    ) -> Result<Bundle, GridmtError> {
        let mut out = bundle.clone();
        self.process_into(&mut out, station, origin)?;
        Ok(out)
    }

    /// Process the bundle in place (the `overwrite` mode of [`SignalProcessor::process`]).
    pub fn process_into(
        &mut self,
        bundle: &mut Bundle,
        station: Option<&Station>,
        origin: Option<&Origin>,
    ) -> Result<(), GridmtError> {
        // stage 1: resolve identity and metadata
        if bundle.id.is_empty() {
            return Err(GridmtError::MissingStationId);
        }
        if bundle.tags.is_empty() {
            return Err(GridmtError::MissingTags(bundle.id.clone()));
        }
        let station: Arc<Station> = match station {
            Some(s) => Arc::new(s.clone()),
            None => bundle
                .station
                .clone()
                .ok_or_else(|| GridmtError::MissingStationMetadata(bundle.id.clone()))?,
        };
        let origin: Arc<Origin> = match origin {
            Some(o) => Arc::new(o.clone()),
            None => bundle
                .origin
                .clone()
                .ok_or_else(|| GridmtError::MissingOriginMetadata(bundle.id.clone()))?,
        };
        let (distance_m, _azimuth) = distance_azimuth(&origin, &station);

        // stage 2: unit normalization
        if bundle.has_tag(Tag::UnitsCm) {
            for trace in bundle.iter_mut() {
                for x in &mut trace.data {
                    *x *= CM_TO_M;
                }
            }
            bundle.replace_tag(Tag::UnitsCm, Tag::UnitsM);
        }

        // stage 3: filtering, then velocity -> displacement
        if let Some(filter) = self.filter {
            for trace in bundle.iter_mut() {
                detrend_mean(&mut trace.data);
                detrend_linear(&mut trace.data);
                hann_taper(&mut trace.data, DEFAULT_TAPER_FRACTION);

                let sample_rate = trace.dt.recip();
                let mut butterworth = match filter {
                    FilterConfig::Bandpass { freq_min, freq_max } => {
                        ButterworthFilter::bandpass(BUTTERWORTH_ORDER, freq_min, freq_max, sample_rate)?
                    }
                    FilterConfig::Lowpass { freq } => {
                        ButterworthFilter::lowpass(BUTTERWORTH_ORDER, freq, sample_rate)?
                    }
                    FilterConfig::Highpass { freq } => {
                        ButterworthFilter::highpass(BUTTERWORTH_ORDER, freq, sample_rate)?
                    }
                };
                butterworth.apply(&mut trace.data);
            }
        }
        if bundle.has_tag(Tag::TypeVelocity) {
            for trace in bundle.iter_mut() {
                integrate(trace);
            }
            bundle.replace_tag(Tag::TypeVelocity, Tag::TypeDisplacement);
        }

        // stage 4: phase picks, computed once per station identifier
        if let Some(pick) = &self.pick {
            if !self.picks.contains_key(&bundle.id) {
                match pick {
                    PickConfig::EarthModel(model) => {
                        let arrivals = model.travel_times(
                            origin.depth_km(),
                            m_to_deg(distance_m),
                            &["p", "s", "P", "S"],
                        );
                        let p = first_arrival(&arrivals, &["p", "P"])?;
                        let s = first_arrival(&arrivals, &["s", "S"])?;
                        self.picks.insert(bundle.id.clone(), PhasePicks { p, s });
                    }
                    PickConfig::FkMetadata {
                        database,
                        model,
                        reader,
                    } => {
                        let depth_km = origin.depth_km().ceil() as i64;
                        let distance_km = (distance_m / 1000.0).ceil() as i64;
                        let path = database
                            .join(format!("{model}_{depth_km}"))
                            .join(format!("{distance_km}.grn.0"));
                        let headers = reader.read_headers(&path)?;
                        let p = *headers
                            .get("t1")
                            .ok_or_else(|| GridmtError::SacHeaderNotFound("t1".to_string()))?;
                        let s = *headers
                            .get("t2")
                            .ok_or_else(|| GridmtError::SacHeaderNotFound("t2".to_string()))?;
                        self.picks.insert(bundle.id.clone(), PhasePicks { p, s });
                    }
                    PickConfig::SacMetadata => {
                        let trace = bundle
                            .traces
                            .first()
                            .ok_or_else(|| GridmtError::PickNotFound(bundle.id.clone()))?;
                        let p = trace
                            .sac_header("t5")
                            .ok_or_else(|| GridmtError::SacHeaderNotFound("t5".to_string()))?;
                        let s = trace
                            .sac_header("t6")
                            .ok_or_else(|| GridmtError::SacHeaderNotFound("t6".to_string()))?;
                        self.picks.insert(bundle.id.clone(), PhasePicks { p, s });
                    }
                    PickConfig::PickFile { path } => {
                        // one file read populates the cache for every station it lists;
                        // already-cached identifiers keep their earlier picks
                        for (id, pick) in read_pick_file(path)? {
                            self.picks.entry(id).or_insert(pick);
                        }
                    }
                }
            }
        }

        // stage 5: analysis window, computed once per station identifier
        if let Some(window) = self.window {
            if !self.windows.contains_key(&bundle.id) {
                let picks = self
                    .picks
                    .get(&bundle.id)
                    .ok_or_else(|| GridmtError::PickNotFound(bundle.id.clone()))?;
                let length = window.window_length;
                let offset = match window.scheme {
                    WindowScheme::CapBodyWave => picks.p - BODY_WAVE_OFFSET * length,
                    WindowScheme::CapSurfaceWave => picks.s - SURFACE_WAVE_OFFSET * length,
                };
                let start = origin.time + Duration::from_seconds(offset);
                let end = start + Duration::from_seconds(length);
                self.windows
                    .insert(bundle.id.clone(), TimeWindow::new(start, end));
            }

            // stage 6a: cut, with padded windows for Green's functions
            let cached = self.windows[&bundle.id];
            let cut_window = if bundle.has_tag(Tag::TypeGreens) {
                cached.padded(window.padding_length)
            } else {
                cached
            };
            for trace in bundle.iter_mut() {
                cut(trace, cut_window.start, cut_window.end)?;
            }
        }

        // stage 6b: edge taper, window configured or not
        for trace in bundle.iter_mut() {
            hann_taper(&mut trace.data, DEFAULT_TAPER_FRACTION);
        }

        // stage 7: weighting
        match &self.weight {
            None => {
                for trace in bundle.iter_mut() {
                    trace.weight = Some(1.0);
                }
            }
            Some(config) => {
                if !bundle.has_tag(Tag::TypeGreens) {
                    let weights = config.table.get(&bundle.id).copied();
                    bundle.traces.retain_mut(|trace| {
                        let weight = match (weights, trace.component()) {
                            (Some(w), Some(component)) => {
                                resolve_weight(config.scheme, &w, component)
                            }
                            _ => 0.0,
                        };
                        if weight > 0.0 {
                            trace.weight = Some(weight);
                            true
                        } else {
                            false
                        }
                    });
                }

                let scale = (distance_m / config.scaling_distance).powf(config.scaling_power)
                    * config.adhoc_factor;
                for trace in bundle.iter_mut() {
                    for x in &mut trace.data {
                        *x *= scale;
                    }
                }
            }
        }

        Ok(())
    }

    /// The cached phase picks for a station identifier, if already computed.
    pub fn cached_picks(&self, id: &str) -> Option<&PhasePicks> {
        self.picks.get(id)
    }

    /// The cached analysis window for a station identifier, if already computed.
    pub fn cached_window(&self, id: &str) -> Option<&TimeWindow> {
        self.windows.get(id)
    }
}

fn resolve_weight(scheme: WeightScheme, weights: &weights::CapWeights, component: char) -> f64 {
    match (scheme, component) {
        (WeightScheme::CapBodyWave, 'Z') => weights.body_z,
        (WeightScheme::CapBodyWave, 'R') => weights.body_r,
        (WeightScheme::CapSurfaceWave, 'Z') => weights.surface_z,
        (WeightScheme::CapSurfaceWave, 'R') => weights.surface_r,
        (WeightScheme::CapSurfaceWave, 'T') => weights.surface_t,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bandpass_period_form_converts() {
        let config = validate_filter(FilterSpec::BandpassPeriod {
            period_min: 3.0,
            period_max: 10.0,
        })
        .unwrap();
        assert_eq!(
            config,
            FilterConfig::Bandpass {
                freq_min: 0.1,
                freq_max: 1.0 / 3.0,
            }
        );
    }

    #[test]
    fn test_bandpass_corner_order_enforced() {
        assert!(matches!(
            validate_filter(FilterSpec::BandpassFreq {
                freq_min: 0.5,
                freq_max: 0.1,
            }),
            Err(GridmtError::InvalidFilterConfig(_))
        ));
        assert!(validate_filter(FilterSpec::BandpassFreq {
            freq_min: 0.1,
            freq_max: f64::INFINITY,
        })
        .is_err());
    }

    #[test]
    fn test_highpass_zero_corner_allowed() {
        assert!(validate_filter(FilterSpec::HighpassFreq { freq: 0.0 }).is_ok());
        assert!(validate_filter(FilterSpec::LowpassFreq { freq: 0.0 }).is_err());
    }

    #[test]
    fn test_cap_weight_file_picks_unimplemented() {
        let result = SignalProcessor::builder().pick(PickSpec::CapWeightFile).build();
        assert!(matches!(
            result,
            Err(GridmtError::UnimplementedPickStrategy(_))
        ));
    }

    #[test]
    fn test_missing_pick_file_fails_at_build() {
        let result = SignalProcessor::builder()
            .pick(PickSpec::PickFile {
                path: PathBuf::from("/nonexistent/picks.dat"),
            })
            .build();
        assert!(matches!(result, Err(GridmtError::PickFileNotFound(_))));
    }

    #[test]
    fn test_missing_weight_file_fails_at_build() {
        let result = SignalProcessor::builder()
            .weight(WeightSpec::new(
                WeightScheme::CapBodyWave,
                "/nonexistent/weights.dat",
            ))
            .build();
        assert!(matches!(result, Err(GridmtError::WeightFileNotFound(_))));
    }

    #[test]
    fn test_window_length_must_be_positive() {
        let result = SignalProcessor::builder()
            .window(WindowSpec::new(WindowScheme::CapBodyWave, 0.0))
            .build();
        assert!(matches!(result, Err(GridmtError::InvalidWindowConfig(_))));
    }

    #[test]
    fn test_resolve_weight_component_routing() {
        let w = weights::CapWeights {
            distance: 100.0,
            body_z: 1.0,
            body_r: 2.0,
            surface_z: 3.0,
            surface_r: 4.0,
            surface_t: 5.0,
        };
        assert_eq!(resolve_weight(WeightScheme::CapBodyWave, &w, 'Z'), 1.0);
        assert_eq!(resolve_weight(WeightScheme::CapBodyWave, &w, 'T'), 0.0);
        assert_eq!(resolve_weight(WeightScheme::CapSurfaceWave, &w, 'T'), 5.0);
        assert_eq!(resolve_weight(WeightScheme::CapSurfaceWave, &w, 'E'), 0.0);
    }
}
