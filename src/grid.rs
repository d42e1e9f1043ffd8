//! # Source grids and rank-order partitioning
//!
//! A [`SourceGrid`] is an ordered collection of candidate source mechanisms. The grid-search
//! engine treats its contents as opaque parameter vectors; the only structural operations it
//! relies on are [`SourceGrid::len`] and [`SourceGrid::partition`], which splits the grid into
//! near-equal contiguous chunks whose concatenation in rank order reproduces the original
//! ordering exactly ([`SourceGrid::concat`] is the inverse).

use nalgebra::DVector;

use crate::event::{Force, MomentTensor};

/// A candidate point source: either a moment tensor or a force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    MomentTensor(MomentTensor),
    Force(Force),
}

impl Source {
    /// Parameter vector: length 6 for moment tensors, 3 for forces.
    pub fn as_vector(&self) -> DVector<f64> {
        match self {
            Source::MomentTensor(mt) => DVector::from_column_slice(mt.as_vector().as_slice()),
            Source::Force(f) => DVector::from_column_slice(f.as_vector().as_slice()),
        }
    }
}

/// Ordered collection of candidate sources evaluated by the grid search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceGrid {
    sources: Vec<Source>,
}

impl SourceGrid {
    pub fn new(sources: Vec<Source>) -> Self {
        SourceGrid { sources }
    }

    pub fn from_moment_tensors<I>(tensors: I) -> Self
    where
        I: IntoIterator<Item = MomentTensor>,
    {
        SourceGrid {
            sources: tensors.into_iter().map(Source::MomentTensor).collect(),
        }
    }

    pub fn from_forces<I>(forces: I) -> Self
    where
        I: IntoIterator<Item = Force>,
    {
        SourceGrid {
            sources: forces.into_iter().map(Source::Force).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Source> {
        self.sources.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Source> {
        self.sources.iter()
    }

    /// Split into `n` contiguous chunks in rank order.
    ///
    /// Chunk sizes differ by at most one (the first `len % n` chunks get the extra element),
    /// so concatenating the chunks in rank order reproduces the original grid element for
    /// element. With `n` larger than the grid, trailing chunks are empty.
    pub fn partition(&self, n: usize) -> Vec<SourceGrid> {
        let n = n.max(1);
        let base = self.sources.len() / n;
        let remainder = self.sources.len() % n;

        let mut chunks = Vec::with_capacity(n);
        let mut offset = 0;
        for rank in 0..n {
            let size = base + usize::from(rank < remainder);
            chunks.push(SourceGrid {
                sources: self.sources[offset..offset + size].to_vec(),
            });
            offset += size;
        }
        chunks
    }

    /// Concatenate partitions in rank order; the inverse of [`SourceGrid::partition`].
    pub fn concat(parts: &[SourceGrid]) -> SourceGrid {
        SourceGrid {
            sources: parts.iter().flat_map(|p| p.sources.iter().copied()).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SourceGrid {
    type Item = &'a Source;
    type IntoIter = std::slice::Iter<'a, Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
