//! # gridmt
//!
//! **Seismic moment tensor and force estimation by grid search.**
//!
//! `gridmt` determines earthquake source mechanisms by comparing observed waveforms against
//! Green's-function synthetics over a grid of candidate sources. The crate supplies the two
//! halves of that workflow:
//!
//! - a **processing pipeline** ([`process::SignalProcessor`]) that converts raw waveform
//!   bundles into analysis-ready windows: unit normalization, Butterworth filtering,
//!   velocity-to-displacement integration, phase picking, CAP-style windowing, tapering, and
//!   component weighting with epicentral distance scaling;
//! - a **search engine** ([`search::grid_search`]) that evaluates a user-supplied misfit
//!   function over every `(origin, source)` pair, optionally partitioned across a thread
//!   pool, and assembles the values into a `sources × origins` matrix.
//!
//! A defining constraint is that observed data and synthetics must be processed *identically*:
//! a single [`process::SignalProcessor`] instance memoizes phase picks and analysis windows
//! per station identifier, so mapping it first over the data and then over the
//! [`GreensLibrary`] cuts the synthetics with the very windows derived from the data.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use gridmt::prelude::*;
//! # fn demo(data: Dataset, greens: GreensLibrary,
//! #         origins: Vec<Origin>, weights: std::path::PathBuf,
//! #         picks: std::path::PathBuf,
//! #         misfit: impl Fn(&Dataset, &GreensSelection<'_>, &SourceGrid, &mut ProgressCallback)
//! #             -> Result<nalgebra::DVector<f64>, GridmtError> + Sync,
//! # ) -> Result<(), GridmtError> {
//! let mut process_sw = SignalProcessor::builder()
//!     .filter(FilterSpec::BandpassPeriod { period_min: 15.0, period_max: 40.0 })
//!     .pick(PickSpec::PickFile { path: picks })
//!     .window(WindowSpec::new(WindowScheme::CapSurfaceWave, 150.0).with_padding(10.0))
//!     .weight(WeightSpec::new(WeightScheme::CapSurfaceWave, &weights))
//!     .build()?;
//!
//! let data = data.map(&mut process_sw)?;
//! let greens = greens.map(&mut process_sw)?;
//!
//! let sources = SourceGrid::from_moment_tensors(
//!     (0..100).map(|j| MomentTensor::new([1e15 + 1e13 * j as f64, 0.0, 0.0, 0.0, 0.0, 0.0])),
//! );
//!
//! let runtime = ThreadPoolRuntime::new(8);
//! let results = grid_search(
//!     &runtime, &data, &greens, misfit, &origins, &sources, SearchSettings::default(),
//! )?;
//! # Ok(()) }
//! ```
//!
//! ## Features
//!
//! - `progress`: draw an [indicatif](https://docs.rs/indicatif) progress bar during searches,
//!   in addition to the stderr percentage messages.

pub mod constants;
pub mod dataset;
pub mod event;
pub mod greens;
pub mod grid;
pub mod gridmt_errors;
pub mod process;
pub mod search;
pub mod signal;
pub mod station;

pub use crate::dataset::{Bundle, Dataset, Tag, Trace};
pub use crate::event::{BasisConvention, Force, MomentTensor, Origin};
pub use crate::greens::{GreensLibrary, GreensSelection};
pub use crate::grid::{Source, SourceGrid};
pub use crate::gridmt_errors::GridmtError;
pub use crate::station::Station;

/// One-stop imports for the common workflow.
pub mod prelude {
    pub use crate::dataset::{Bundle, Dataset, Tag, Trace};
    pub use crate::event::{BasisConvention, Force, MomentTensor, Origin};
    pub use crate::greens::{GreensLibrary, GreensSelection};
    pub use crate::grid::{Source, SourceGrid};
    pub use crate::gridmt_errors::GridmtError;
    pub use crate::process::{
        FilterSpec, PickSpec, SignalProcessor, WeightScheme, WeightSpec, WindowScheme, WindowSpec,
    };
    pub use crate::search::{
        grid_search, grid_search_scattered, grid_search_serial, ParallelRuntime, ProgressCallback,
        SearchSettings, SerialRuntime, ThreadPoolRuntime,
    };
    pub use crate::station::Station;
}
