//! # Waveform containers
//!
//! The smallest unit is a [`Trace`]: one channel of evenly sampled amplitudes with its start
//! time and sampling interval. Traces recorded at one station for one event form a [`Bundle`],
//! which carries the station identifier, the tag set describing units and physical quantity,
//! and back-references to station/origin metadata. A [`Dataset`] groups bundles per station and
//! applies a configured [`SignalProcessor`](crate::process::SignalProcessor) to each of them.
//!
//! ## Tags
//!
//! Tags track unit and quantity conversions performed by the processing pipeline. Each axis
//! (units, quantity) holds exactly one tag at a time and is rewritten in place as conversions
//! occur; `type:greens` is a standalone flag marking Green's-function bundles.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use hifitime::{Duration, Epoch};
use itertools::Itertools;

use crate::constants::{GridmtHashMap, Seconds, StationId};
use crate::event::Origin;
use crate::gridmt_errors::GridmtError;
use crate::process::SignalProcessor;
use crate::station::Station;

/// String markers describing the state of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Amplitudes in centimeters
    UnitsCm,
    /// Amplitudes in meters
    UnitsM,
    /// Velocity time series
    TypeVelocity,
    /// Displacement time series
    TypeDisplacement,
    /// Green's-function bundle (gets padded windows, skips weighting)
    TypeGreens,
}

/// The mutually-exclusive axis a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagAxis {
    Units,
    Quantity,
    Greens,
}

impl Tag {
    fn axis(self) -> TagAxis {
        match self {
            Tag::UnitsCm | Tag::UnitsM => TagAxis::Units,
            Tag::TypeVelocity | Tag::TypeDisplacement => TagAxis::Quantity,
            Tag::TypeGreens => TagAxis::Greens,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tag::UnitsCm => "units:cm",
            Tag::UnitsM => "units:m",
            Tag::TypeVelocity => "type:velocity",
            Tag::TypeDisplacement => "type:displacement",
            Tag::TypeGreens => "type:greens",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Tag {
    type Err = GridmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "units:cm" => Ok(Tag::UnitsCm),
            "units:m" => Ok(Tag::UnitsM),
            "type:velocity" => Ok(Tag::TypeVelocity),
            "type:displacement" => Ok(Tag::TypeDisplacement),
            "type:greens" => Ok(Tag::TypeGreens),
            other => Err(GridmtError::UnknownTag(other.to_string())),
        }
    }
}

/// A single-channel waveform: evenly sampled amplitudes plus timing metadata.
#[derive(Debug, Clone)]
pub struct Trace {
    /// Channel code; the last character is the component (Z, R, T, ...)
    pub channel: String,
    /// Absolute time of the first sample
    pub start_time: Epoch,
    /// Sampling interval in seconds
    pub dt: Seconds,
    /// Sampled amplitudes
    pub data: Vec<f64>,
    /// Per-trace weight, set by the weighting stage
    pub weight: Option<f64>,
    /// Optional SAC-style scalar header fields (t5/t6 picks, ...)
    pub sac_headers: Option<GridmtHashMap<String, f64>>,
}

impl Trace {
    pub fn new(channel: &str, start_time: Epoch, dt: Seconds, data: Vec<f64>) -> Self {
        Trace {
            channel: channel.to_string(),
            start_time,
            dt,
            data,
            weight: None,
            sac_headers: None,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Absolute time of the last sample.
    pub fn end_time(&self) -> Epoch {
        let span = self.dt * self.len().saturating_sub(1) as f64;
        self.start_time + Duration::from_seconds(span)
    }

    /// Time spanned by the recorded samples, in seconds.
    pub fn span(&self) -> Seconds {
        self.dt * self.len().saturating_sub(1) as f64
    }

    /// Look up a SAC header field by name.
    pub fn sac_header(&self, name: &str) -> Option<f64> {
        self.sac_headers.as_ref().and_then(|h| h.get(name).copied())
    }

    /// The component letter: last character of the channel code, uppercased.
    pub fn component(&self) -> Option<char> {
        self.channel.chars().last().map(|c| c.to_ascii_uppercase())
    }
}

/// All traces recorded at one station for one event, plus identifying metadata.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Station identifier (`NET.STA.LOC`), the memoization key of the pipeline caches
    pub id: StationId,
    /// Unit/quantity tags, one per axis
    pub tags: Vec<Tag>,
    /// Member traces, one per channel
    pub traces: Vec<Trace>,
    /// Station metadata back-reference
    pub station: Option<Arc<Station>>,
    /// Origin metadata back-reference
    pub origin: Option<Arc<Origin>>,
}

impl Bundle {
    pub fn new(id: &str, traces: Vec<Trace>) -> Self {
        Bundle {
            id: id.to_string(),
            tags: Vec::new(),
            traces,
            station: None,
            origin: None,
        }
    }

    pub fn with_station(mut self, station: Arc<Station>) -> Self {
        self.station = Some(station);
        self
    }

    pub fn with_origin(mut self, origin: Arc<Origin>) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Add a tag, displacing any existing tag on the same axis.
    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.retain(|t| t.axis() != tag.axis());
        self.tags.push(tag);
    }

    /// Rewrite `old` into `new` in place. Returns whether `old` was present.
    pub fn replace_tag(&mut self, old: Tag, new: Tag) -> bool {
        match self.tags.iter().position(|t| *t == old) {
            Some(index) => {
                self.tags[index] = new;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trace> {
        self.traces.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Trace> {
        self.traces.iter_mut()
    }
}

/// Observed-data bundles for one event, grouped per station.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    bundles: Vec<Bundle>,
}

impl Dataset {
    pub fn new(bundles: Vec<Bundle>) -> Self {
        Dataset { bundles }
    }

    pub fn push(&mut self, bundle: Bundle) {
        self.bundles.push(bundle);
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bundle> {
        self.bundles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Bundle> {
        self.bundles.iter_mut()
    }

    /// The bundle recorded at the given station, if any.
    pub fn get(&self, id: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|b| b.id == id)
    }

    /// Distinct station identifiers, in first-appearance order.
    pub fn station_ids(&self) -> Vec<&StationId> {
        self.bundles.iter().map(|b| &b.id).unique().collect()
    }

    /// Add a tag to every bundle (displacing same-axis tags).
    pub fn add_tag(&mut self, tag: Tag) {
        for bundle in &mut self.bundles {
            bundle.add_tag(tag);
        }
    }

    /// Apply a configured processor to every bundle, returning the processed dataset.
    ///
    /// Bundles are deep-copied; the input dataset is left untouched. Pick and window caches
    /// inside the processor persist across bundles, so a later
    /// [`GreensLibrary::map`](crate::greens::GreensLibrary::map) with the same processor reuses
    /// the windows derived here.
    pub fn map(&self, processor: &mut SignalProcessor) -> Result<Dataset, GridmtError> {
        let bundles = self
            .bundles
            .iter()
            .map(|bundle| processor.process(bundle, None, None))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Dataset::new(bundles))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Bundle;
    type IntoIter = std::slice::Iter<'a, Bundle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
