//! # Grid search over candidate sources
//!
//! Evaluates a user-supplied misfit function over every `(origin, source)` pair and collects
//! the values into a matrix with one row per source and one column per origin. The search
//! itself never interprets the misfit values; it only guarantees their placement.
//!
//! ## Partitioning
//!
//! [`grid_search`] splits the source grid into as many rank-ordered partitions as the
//! [`ParallelRuntime`] reports, evaluates each partition independently, and reassembles the
//! partial matrices in rank order, so every runtime produces the same matrix as
//! [`SerialRuntime`] with a single partition. Only the first partition reports progress.
//!
//! ```rust,no_run
//! use gridmt::search::{grid_search, SearchSettings, ThreadPoolRuntime};
//! # fn demo(data: &gridmt::Dataset,
//! #         greens: &gridmt::GreensLibrary,
//! #         origins: &[gridmt::Origin],
//! #         sources: &gridmt::SourceGrid,
//! #         misfit: impl Fn(&gridmt::Dataset, &gridmt::GreensSelection<'_>, &gridmt::SourceGrid,
//! #             &mut gridmt::search::ProgressCallback)
//! #             -> Result<nalgebra::DVector<f64>, gridmt::GridmtError> + Sync,
//! # ) -> Result<(), gridmt::GridmtError> {
//! let runtime = ThreadPoolRuntime::new(8);
//! let results = grid_search(
//!     &runtime, data, greens, misfit, origins, sources, SearchSettings::default(),
//! )?;
//! let best = results.iter().cloned().fold(f64::INFINITY, f64::min);
//! # Ok(()) }
//! ```

pub mod progress;
pub mod runtime;

pub use progress::ProgressCallback;
pub use runtime::{ParallelRuntime, SerialRuntime, ThreadPoolRuntime};

use nalgebra::DVector;

use crate::constants::MisfitMatrix;
use crate::dataset::Dataset;
use crate::greens::{GreensLibrary, GreensSelection};
use crate::grid::SourceGrid;
use crate::gridmt_errors::GridmtError;
use crate::event::Origin;

/// Knobs of the search loop itself (the misfit function is passed separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Percent interval between progress messages; 0 silences them
    pub msg_interval: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings { msg_interval: 25 }
    }
}

/// Evaluate the misfit over all origins and sources on the calling thread.
///
/// Returns a `sources.len() × origins.len()` matrix. The misfit function receives the full
/// source grid once per origin and must return one value per source, in grid order; a column
/// of the wrong length fails the whole search.
pub fn grid_search_serial<F>(
    data: &Dataset,
    greens: &GreensLibrary,
    misfit: F,
    origins: &[Origin],
    sources: &SourceGrid,
    msg_interval: usize,
) -> Result<MisfitMatrix, GridmtError>
where
    F: Fn(
        &Dataset,
        &GreensSelection<'_>,
        &SourceGrid,
        &mut ProgressCallback,
    ) -> Result<DVector<f64>, GridmtError>,
{
    let ni = origins.len();
    let nj = sources.len();
    let mut results = MisfitMatrix::zeros(nj, ni);

    #[cfg(feature = "progress")]
    let bar = (msg_interval > 0 && ni > 1).then(|| {
        let bar = indicatif::ProgressBar::new(ni as u64);
        bar.set_style(
            indicatif::ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} origins ({eta})")
                .expect("progress bar template"),
        );
        bar
    });

    for (i, origin) in origins.iter().enumerate() {
        let selection = greens.select(origin);
        let mut callback = ProgressCallback::new(i * nj, ni * nj, msg_interval);
        let column = misfit(data, &selection, sources, &mut callback)?;
        if column.len() != nj {
            return Err(GridmtError::MisfitShapeMismatch {
                expected: nj,
                actual: column.len(),
            });
        }
        results.set_column(i, &column);

        #[cfg(feature = "progress")]
        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }

    #[cfg(feature = "progress")]
    if let Some(bar) = &bar {
        bar.finish();
    }

    Ok(results)
}

/// Partitioned search returning the full gathered misfit matrix.
///
/// The source grid is split into `runtime.size()` rank-ordered partitions; the partial
/// matrices are stacked back in rank order along the source axis, so the result is identical
/// to [`grid_search_serial`] over the whole grid.
pub fn grid_search<R, F>(
    runtime: &R,
    data: &Dataset,
    greens: &GreensLibrary,
    misfit: F,
    origins: &[Origin],
    sources: &SourceGrid,
    settings: SearchSettings,
) -> Result<MisfitMatrix, GridmtError>
where
    R: ParallelRuntime,
    F: Fn(
            &Dataset,
            &GreensSelection<'_>,
            &SourceGrid,
            &mut ProgressCallback,
        ) -> Result<DVector<f64>, GridmtError>
        + Sync,
{
    let partials = grid_search_scattered(runtime, data, greens, misfit, origins, sources, settings)?;

    let ni = origins.len();
    let nj = sources.len();
    let mut results = MisfitMatrix::zeros(nj, ni);
    let mut offset = 0;
    for partial in &partials {
        results
            .view_mut((offset, 0), (partial.nrows(), ni))
            .copy_from(partial);
        offset += partial.nrows();
    }
    Ok(results)
}

/// Partitioned search returning one partial matrix per partition, in rank order.
///
/// The caller keeps the scattered layout, e.g. to post-process partitions independently.
/// Empty partitions (more partitions than sources) yield `0 × origins.len()` matrices.
pub fn grid_search_scattered<R, F>(
    runtime: &R,
    data: &Dataset,
    greens: &GreensLibrary,
    misfit: F,
    origins: &[Origin],
    sources: &SourceGrid,
    settings: SearchSettings,
) -> Result<Vec<MisfitMatrix>, GridmtError>
where
    R: ParallelRuntime,
    F: Fn(
            &Dataset,
            &GreensSelection<'_>,
            &SourceGrid,
            &mut ProgressCallback,
        ) -> Result<DVector<f64>, GridmtError>
        + Sync,
{
    if sources.is_empty() {
        return Err(GridmtError::EmptySourceGrid);
    }

    let partitions = sources.partition(runtime.size());
    let misfit = &misfit;
    let jobs: Vec<_> = partitions
        .into_iter()
        .enumerate()
        .map(|(rank, partition)| {
            // only the first partition reports progress
            let msg_interval = if rank == 0 { settings.msg_interval } else { 0 };
            move || grid_search_serial(data, greens, misfit, origins, &partition, msg_interval)
        })
        .collect();

    runtime.run(jobs).into_iter().collect()
}
