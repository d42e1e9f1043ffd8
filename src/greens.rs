//! # Green's-function storage and per-origin selection
//!
//! A [`GreensLibrary`] holds Green's-function bundles for one or more candidate origins. The
//! grid-search engine asks it for the subset matching each origin via [`GreensLibrary::select`];
//! processing a whole library with a configured pipeline goes through [`GreensLibrary::map`],
//! which reuses the windows the pipeline derived from the observed data.
//!
//! Reading Green's functions from a database file format is an external concern; this module
//! only stores bundles that were already materialized as [`Bundle`] values.

use crate::dataset::{Bundle, Tag};
use crate::event::Origin;
use crate::gridmt_errors::GridmtError;
use crate::process::SignalProcessor;

/// Green's-function bundles, each tagged `type:greens` and carrying its origin.
#[derive(Debug, Clone, Default)]
pub struct GreensLibrary {
    bundles: Vec<Bundle>,
}

impl GreensLibrary {
    /// Build a library, tagging every bundle `type:greens` if not already tagged.
    pub fn new(bundles: Vec<Bundle>) -> Self {
        let mut library = GreensLibrary { bundles };
        for bundle in &mut library.bundles {
            if !bundle.has_tag(Tag::TypeGreens) {
                bundle.add_tag(Tag::TypeGreens);
            }
        }
        library
    }

    pub fn push(&mut self, mut bundle: Bundle) {
        if !bundle.has_tag(Tag::TypeGreens) {
            bundle.add_tag(Tag::TypeGreens);
        }
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

    /// The subset of bundles whose origin equals the given origin (field-wise).
    pub fn select(&self, origin: &Origin) -> GreensSelection<'_> {
        GreensSelection {
            bundles: self
                .bundles
                .iter()
                .filter(|b| b.origin.as_deref() == Some(origin))
                .collect(),
        }
    }

    /// Apply a configured processor to every bundle, returning the processed library.
    ///
    /// Must be called with the same processor instance already used on the observed data, so
    /// the cut windows come from the data picks instead of being recomputed here.
    pub fn map(&self, processor: &mut SignalProcessor) -> Result<GreensLibrary, GridmtError> {
        let bundles = self
            .bundles
            .iter()
            .map(|bundle| processor.process(bundle, None, None))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GreensLibrary { bundles })
    }
}

/// Borrowed view over the bundles matching one origin.
#[derive(Debug, Clone)]
pub struct GreensSelection<'a> {
    bundles: Vec<&'a Bundle>,
}

impl<'a> GreensSelection<'a> {
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Bundle> {
        self.bundles.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Bundle> + '_ {
        self.bundles.iter().copied()
    }
}
