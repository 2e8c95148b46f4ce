//! A position-indexed genome map.
//!
//! A [`GenomeMap`] is an ordered collection of chromosomes, each holding an
//! ordered list of markers.
//! The map assigns each chromosome a global start offset, so that a single
//! linear column index can address markers across all chromosomes.
//! Contiguous global ranges can be resolved back to per-chromosome marker
//! slices with [`GenomeMap::markers_in_global_range`].

use std::ops::Range;


//-----------------------------------------------------------------------------

/// A named genetic locus at a physical position on a chromosome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    name: String,
    position: usize,
}

impl Marker {
    /// Creates a new marker.
    pub fn new(name: &str, position: usize) -> Self {
        Marker { name: name.to_string(), position }
    }

    /// Returns the name of the marker.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the physical position of the marker.
    pub fn position(&self) -> usize {
        self.position
    }
}

//-----------------------------------------------------------------------------

/// A named chromosome with a declared length and an ordered list of markers.
///
/// Marker positions are usually non-decreasing, but the map does not require it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chromosome {
    name: String,
    length: usize,
    markers: Vec<Marker>,
}

impl Chromosome {
    /// Creates a new chromosome.
    pub fn new(name: &str, length: usize) -> Self {
        Chromosome { name: name.to_string(), length, markers: Vec::new() }
    }

    /// Returns the name of the chromosome.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared length of the chromosome.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Updates the declared length of the chromosome.
    pub fn set_length(&mut self, length: usize) {
        self.length = length;
    }

    /// Returns the number of markers on the chromosome.
    #[inline]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Returns the marker at the given index, or [`None`] if there is no such marker.
    #[inline]
    pub fn marker(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    /// Returns the markers on the chromosome.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Appends a marker to the chromosome.
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }
}

//-----------------------------------------------------------------------------

/// A slice of markers on one chromosome, resolved from a global column range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerRange {
    /// Index of the chromosome in the genome map.
    pub chromosome: usize,

    /// Range of marker indexes within the chromosome.
    pub markers: Range<usize>,
}

//-----------------------------------------------------------------------------

/// An ordered collection of chromosomes with a global marker index.
///
/// The global index assigns each chromosome a cumulative start offset: the sum
/// of the marker counts of all preceding chromosomes.
/// The offsets partition the global column axis into contiguous non-overlapping
/// intervals covering the concatenation of all marker lists.
/// A chromosome without markers occupies a zero-width interval.
///
/// # Examples
///
/// ```
/// use geno_grid::{Chromosome, GenomeMap, Marker};
///
/// let mut chromosomes = Vec::new();
/// for (name, count) in [("1H", 3), ("2H", 5), ("3H", 2)] {
///     let mut chromosome = Chromosome::new(name, 1000);
///     for i in 0..count {
///         chromosome.add_marker(Marker::new(&format!("{}_{}", name, i), i * 100));
///     }
///     chromosomes.push(chromosome);
/// }
/// let map = GenomeMap::new(chromosomes);
///
/// assert_eq!(map.total_markers(), 10);
/// assert_eq!(map.global_start(1), Some(3));
/// assert_eq!(map.global_start(2), Some(8));
///
/// // Columns 2..=4 span the end of 1H and the start of 2H.
/// let ranges = map.markers_in_global_range(2, 4);
/// assert_eq!(ranges.len(), 2);
/// assert_eq!((ranges[0].chromosome, ranges[0].markers.clone()), (0, 2..3));
/// assert_eq!((ranges[1].chromosome, ranges[1].markers.clone()), (1, 0..2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenomeMap {
    chromosomes: Vec<Chromosome>,

    // Global start offset of each chromosome.
    global_starts: Vec<usize>,

    total_markers: usize,
}

impl GenomeMap {
    /// Creates a new genome map and builds the global index.
    pub fn new(chromosomes: Vec<Chromosome>) -> Self {
        let mut global_starts = Vec::with_capacity(chromosomes.len());
        let mut total_markers = 0;
        for chromosome in chromosomes.iter() {
            global_starts.push(total_markers);
            total_markers += chromosome.marker_count();
        }
        GenomeMap { chromosomes, global_starts, total_markers }
    }

    /// Returns an empty genome map.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the number of chromosomes.
    #[inline]
    pub fn chromosome_count(&self) -> usize {
        self.chromosomes.len()
    }

    /// Returns the chromosome at the given index, or [`None`] if there is no such chromosome.
    #[inline]
    pub fn chromosome(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }

    /// Returns an iterator over the chromosomes.
    pub fn iter(&self) -> impl Iterator<Item = &Chromosome> {
        self.chromosomes.iter()
    }

    /// Returns the total number of markers over all chromosomes.
    #[inline]
    pub fn total_markers(&self) -> usize {
        self.total_markers
    }

    /// Returns the number of markers on the given chromosome, or [`None`] if
    /// there is no such chromosome.
    #[inline]
    pub fn marker_count(&self, chromosome: usize) -> Option<usize> {
        self.chromosomes.get(chromosome).map(|c| c.marker_count())
    }

    /// Returns the global start offset of the given chromosome, or [`None`] if
    /// there is no such chromosome.
    #[inline]
    pub fn global_start(&self, chromosome: usize) -> Option<usize> {
        self.global_starts.get(chromosome).copied()
    }

    /// Resolves a contiguous global column range to per-chromosome marker slices.
    ///
    /// The range is inclusive at both ends and silently clamped to the total
    /// number of markers.
    /// The result contains a [`MarkerRange`] for every chromosome whose global
    /// interval intersects the query, in chromosome order.
    /// Chromosomes without markers are never returned.
    pub fn markers_in_global_range(&self, start: usize, end: usize) -> Vec<MarkerRange> {
        let mut result = Vec::new();
        if self.total_markers == 0 || start > end || start >= self.total_markers {
            return result;
        }
        let end = end.min(self.total_markers - 1);

        // The first chromosome that can intersect the query is the last one
        // starting at or before `start`. Zero-width intervals share their
        // start offset with the successor, and the last of the tied offsets
        // always has markers when `start < total_markers`.
        let mut chromosome = self.global_starts.partition_point(|s| *s <= start) - 1;

        while chromosome < self.chromosomes.len() && self.global_starts[chromosome] <= end {
            let count = self.chromosomes[chromosome].marker_count();
            if count > 0 {
                let offset = self.global_starts[chromosome];
                let first = start.saturating_sub(offset);
                let last = (end - offset).min(count - 1);
                result.push(MarkerRange { chromosome, markers: first..last + 1 });
            }
            chromosome += 1;
        }

        result
    }

    /// Returns the chromosome and marker indexes for the marker with the given
    /// name, or [`None`] if there is no such marker.
    ///
    /// This is a linear scan intended for import-time lookups.
    pub fn marker_by_name(&self, name: &str) -> Option<(usize, usize)> {
        for (chromosome_index, chromosome) in self.chromosomes.iter().enumerate() {
            for (marker_index, marker) in chromosome.markers().iter().enumerate() {
                if marker.name() == name {
                    return Some((chromosome_index, marker_index));
                }
            }
        }
        None
    }
}

//-----------------------------------------------------------------------------
