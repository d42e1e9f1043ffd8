//! # Phase picks, analysis windows, and pick acquisition strategies
//!
//! Phase arrival times ([`PhasePicks`]) and analysis windows ([`TimeWindow`]) are memoized per
//! station identifier inside the [`SignalProcessor`](crate::process::SignalProcessor): once
//! computed from the observed data they are reused verbatim for every later bundle sharing the
//! identifier, Green's functions included.
//!
//! The acquisition strategies delegate their external dependencies to traits:
//! [`TravelTimeModel`] for 1D earth-model lookups and [`SacHeaderReader`] for scalar header
//! fields of FK database files. Plain-text pick files are parsed here directly.

use std::fs;
use std::path::Path;

use hifitime::{Duration, Epoch};
use nom::{
    bytes::complete::take_while1,
    character::complete::multispace1,
    number::complete::double,
    sequence::preceded,
    IResult, Parser,
};

use crate::constants::{Degree, GridmtHashMap, Seconds, StationId};
use crate::gridmt_errors::GridmtError;

/// P and S arrival times in seconds after the event origin time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasePicks {
    pub p: Seconds,
    pub s: Seconds,
}

/// Absolute-time analysis window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: Epoch,
    pub end: Epoch,
}

impl TimeWindow {
    pub fn new(start: Epoch, end: Epoch) -> Self {
        TimeWindow { start, end }
    }

    /// Window duration in seconds.
    pub fn length(&self) -> Seconds {
        (self.end - self.start).to_seconds()
    }

    /// The window extended symmetrically by `padding` seconds on both ends.
    pub fn padded(&self, padding: Seconds) -> TimeWindow {
        TimeWindow {
            start: self.start - Duration::from_seconds(padding),
            end: self.end + Duration::from_seconds(padding),
        }
    }
}

/// One arrival returned by a travel-time model.
#[derive(Debug, Clone)]
pub struct Arrival {
    /// Phase name as reported by the model (`p`, `P`, `s`, `S`, ...)
    pub phase: String,
    /// Travel time in seconds after the origin time
    pub time: Seconds,
}

/// 1D earth-model travel-time lookup (e.g. ak135), consumed as an external collaborator.
pub trait TravelTimeModel: Send + Sync {
    /// Arrivals of the requested phases for a source at `depth_km` observed at
    /// `distance_deg` epicentral degrees.
    fn travel_times(&self, depth_km: f64, distance_deg: Degree, phases: &[&str]) -> Vec<Arrival>;
}

/// Reader for scalar SAC header fields of FK Green's-function files, consumed as an external
/// collaborator (the SAC format itself is out of scope here).
pub trait SacHeaderReader: Send + Sync {
    fn read_headers(&self, path: &Path) -> Result<GridmtHashMap<String, f64>, GridmtError>;
}

/// First arrival matching the candidate phase names, tried in the given order.
///
/// Models disagree on phase-name casing, so callers pass an explicit fallback list such as
/// `["p", "P"]` rather than a single name.
pub fn first_arrival(arrivals: &[Arrival], candidates: &[&str]) -> Result<Seconds, GridmtError> {
    for name in candidates {
        if let Some(arrival) = arrivals.iter().find(|a| a.phase == *name) {
            return Ok(arrival.time);
        }
    }
    Err(GridmtError::ArrivalNotFound(candidates.join(", ")))
}

fn parse_station_id(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace()).parse(input)
}

fn parse_pick_line(input: &str) -> IResult<&str, (&str, PhasePicks)> {
    let (input, id) = parse_station_id(input)?;
    let (input, p) = preceded(multispace1, double).parse(input)?;
    let (input, s) = preceded(multispace1, double).parse(input)?;
    Ok((input, (id, PhasePicks { p, s })))
}

/// Read a plain-text pick file: whitespace-delimited `station_id P_time S_time` rows,
/// lines beginning with `#` and blank lines ignored.
pub fn read_pick_file(path: &Path) -> Result<GridmtHashMap<StationId, PhasePicks>, GridmtError> {
    let contents = fs::read_to_string(path)?;
    let mut picks = GridmtHashMap::default();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (_, (id, pick)) = parse_pick_line(line)
            .map_err(|_| GridmtError::PickFileParsing(line.to_string()))?;
        picks.insert(id.to_string(), pick);
    }

    Ok(picks)
}
