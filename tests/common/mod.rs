#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use hifitime::Epoch;

use gridmt::prelude::*;
use gridmt::process::picks::{Arrival, TravelTimeModel};

/// Travel-time model answering every query with the same two picks.
pub struct FixedPicksModel {
    pub p: f64,
    pub s: f64,
}

impl TravelTimeModel for FixedPicksModel {
    fn travel_times(&self, _depth_km: f64, _distance_deg: f64, phases: &[&str]) -> Vec<Arrival> {
        phases
            .iter()
            .filter_map(|phase| {
                let time = match *phase {
                    "p" | "P" => self.p,
                    "s" | "S" => self.s,
                    _ => return None,
                };
                Some(Arrival {
                    phase: phase.to_string(),
                    time,
                })
            })
            .collect()
    }
}

pub fn origin_time() -> Epoch {
    Epoch::from_gregorian_utc(2009, 4, 7, 20, 12, 55, 0)
}

pub fn origin() -> Origin {
    Origin::new(origin_time(), 61.454, -149.742, 33_033.6)
}

pub fn station() -> Station {
    Station::new("AK", "SAW", "", 61.807, -148.332, 0.0)
}

/// A three-component velocity bundle in centimeters, long enough to cover any test window.
pub fn raw_bundle(samples: usize) -> Bundle {
    let traces = ["BHZ", "BHR", "BHT"]
        .iter()
        .map(|channel| {
            let data: Vec<f64> = (0..samples)
                .map(|i| (0.25 * i as f64).sin() + 0.1)
                .collect();
            Trace::new(channel, origin_time(), 0.5, data)
        })
        .collect();
    let mut bundle = Bundle::new("AK.SAW.", traces)
        .with_station(Arc::new(station()))
        .with_origin(Arc::new(origin()));
    bundle.add_tag(Tag::UnitsCm);
    bundle.add_tag(Tag::TypeVelocity);
    bundle
}

/// Write `contents` to a unique file under the system temp directory.
pub fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gridmt_{}_{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}
