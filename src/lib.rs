//! # geno-grid: the engine beneath a genotype matrix visualization.
//!
//! This crate implements the data model and the algorithms needed to render
//! large genotype matrices (thousands of germplasm lines × thousands of
//! markers across chromosomes) as a scrollable, zoomable grid, colored and
//! ordered by genetic similarity.
//! The actual pixel painting, event wiring, and widget construction live in
//! the host application; this crate provides the contracts those layers
//! consume.
//!
//! ### Basic concepts
//!
//! Raw allele strings parse into [`Genotype`] values, which a [`StateTable`]
//! interns into small integer codes; genotype matrices store the codes.
//! A [`GenomeMap`] orders the markers by chromosome and builds a global
//! column index over them.
//! A [`SimilarityMatrix`] precomputes the classification of every pair of
//! genotype codes, which drives both similarity coloring and the similarity
//! [`LineSort`] strategy.
//! A [`DataSet`] owns all of the above for one imported dataset, and a
//! [`GridView`] adds the presentation state: the line ordering, the selected
//! chromosome, and the virtualized [`Viewport`] with its [`Overview`]
//! companion.
//!
//! See [`formats`] for the tab-delimited import readers.

pub mod dataset;
pub mod formats;
pub mod genome;
pub mod genotype;
pub mod similarity;
pub mod sort;
pub mod utils;
pub mod view;
pub mod viewport;

pub use dataset::{DataSet, Germplasm};
pub use genome::{Chromosome, GenomeMap, Marker, MarkerRange};
pub use genotype::{Genotype, StateTable};
pub use similarity::{SimilarityClass, SimilarityMatrix};
pub use sort::{AlphabeticSort, ImportOrderSort, LineSort, LineView, SimilaritySort, TraitSort};
pub use view::GridView;
pub use viewport::{AxisScroll, Overview, Viewport, WindowRect};
