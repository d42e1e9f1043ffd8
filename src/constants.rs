//! # Constants and type definitions for gridmt
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `gridmt` library.
//!
//! ## Overview
//!
//! - Geophysical constants (earth radius, unit conversions)
//! - CAP processing conventions (window offsets, taper fraction)
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the signal processing pipeline,
//! the grid-search engine, and the station/event metadata types.

use std::collections::HashMap;

use ahash::RandomState;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Mean earth radius in meters (IUGG)
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// Centimeters → meters
pub const CM_TO_M: f64 = 1.0e-2;

/// Meters → kilometers
pub const M_TO_KM: f64 = 1.0e-3;

/// Default amplitude-scaling reference distance in meters (CAP convention)
pub const DEFAULT_SCALING_DISTANCE: f64 = 1.0e5;

/// Fraction of the trace length tapered at each edge (Hann ramp)
pub const DEFAULT_TAPER_FRACTION: f64 = 0.05;

/// Body-wave windows open this fraction of the window length before the P pick
pub const BODY_WAVE_OFFSET: f64 = 0.4;

/// Surface-wave windows open this fraction of the window length before the S pick
pub const SURFACE_WAVE_OFFSET: f64 = 0.3;

/// Order of the causal Butterworth filters applied in the processing pipeline
pub const BUTTERWORTH_ORDER: usize = 4;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Distance in meters
pub type Meter = f64;
/// Time offset in seconds
pub type Seconds = f64;
/// Frequency in Hertz
pub type Hertz = f64;

/// Station identifier in `NET.STA.LOC` form, the key of the pick/window caches
pub type StationId = String;

/// Misfit values for (sources × origins), assembled by the grid-search engine
pub type MisfitMatrix = nalgebra::DMatrix<f64>;

/// Hash map using the same fast hasher everywhere in the crate
pub type GridmtHashMap<K, V> = HashMap<K, V, RandomState>;
