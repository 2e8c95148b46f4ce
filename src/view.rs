//! The grid view: one dataset under one scrollable, sortable viewport.
//!
//! A [`GridView`] owns a [`DataSet`] together with the mutable presentation
//! state around it: the current line ordering, the active sort strategy, the
//! selected chromosome, and the viewport.
//! It is the single object the control and rendering layers talk to.
//!
//! The view shows one chromosome at a time on the horizontal axis.
//! Sorting is applied synchronously: the reordered view is only observable
//! after [`GridView::set_line_sort`] or [`GridView::resort`] returns, so
//! renders never interleave with a partially sorted view.

use crate::dataset::DataSet;
use crate::sort::{ImportOrderSort, LineSort, LineView};
use crate::viewport::{Overview, Viewport, WindowRect};

use std::ops::Range;


//-----------------------------------------------------------------------------

/// A dataset with its presentation state.
///
/// # Examples
///
/// ```
/// use geno_grid::{Chromosome, DataSet, GenomeMap, GridView, Marker};
///
/// let mut chromosome = Chromosome::new("1H", 100);
/// for i in 0..4 {
///     chromosome.add_marker(Marker::new(&format!("m{}", i), i * 25));
/// }
/// let mut data = DataSet::new(GenomeMap::new(vec![chromosome]));
/// let a = data.intern_genotype("A", None).unwrap();
/// let t = data.intern_genotype("T", None).unwrap();
/// data.add_germplasm("line1", vec![vec![a, t, a, t]], None).unwrap();
/// data.rebuild_similarity();
///
/// let view = GridView::new(data, 16, (64, 64));
/// assert_eq!(view.visible_marker_range(), 0..4);
/// assert_eq!(view.genotype_code_at(0, 1), Some(t));
/// ```
pub struct GridView {
    data: DataSet,
    view: LineView,
    sort: Box<dyn LineSort>,
    viewport: Viewport,
    chromosome: usize,
}

impl GridView {
    /// Creates a view over the given dataset, showing chromosome 0.
    ///
    /// # Arguments
    ///
    /// * `data`: The dataset to present.
    /// * `cell_size`: Size of a grid cell in pixels.
    /// * `canvas`: Visible canvas size in pixels as `(width, height)`.
    pub fn new(data: DataSet, cell_size: usize, canvas: (usize, usize)) -> Self {
        let markers = data.genome().marker_count(0).unwrap_or(0);
        let germplasm = data.germplasm_count();
        GridView {
            view: LineView::new(germplasm),
            sort: Box::new(ImportOrderSort::new()),
            viewport: Viewport::new(cell_size, canvas, markers, germplasm),
            chromosome: 0,
            data,
        }
    }

    /// Returns the dataset.
    pub fn data(&self) -> &DataSet {
        &self.data
    }

    /// Returns the current line ordering.
    pub fn line_view(&self) -> &LineView {
        &self.view
    }

    /// Returns the viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns the index of the selected chromosome.
    pub fn chromosome(&self) -> usize {
        self.chromosome
    }

    /// Selects the chromosome shown on the horizontal axis.
    ///
    /// Returns an error if there is no such chromosome.
    pub fn set_chromosome(&mut self, chromosome: usize) -> Result<(), String> {
        let markers = self.data.genome().marker_count(chromosome).ok_or_else(|| {
            format!("Chromosome index {} is out of range", chromosome)
        })?;
        self.chromosome = chromosome;
        self.viewport.set_totals(markers, self.view.len());
        Ok(())
    }

    /// Installs and applies a line ordering strategy.
    ///
    /// The strategy is applied before this method returns, so a failed sort
    /// leaves both the previous strategy and the previous ordering in place.
    pub fn set_line_sort(&mut self, mut sort: Box<dyn LineSort>) -> Result<(), String> {
        let mut reordered = self.view.clone();
        sort.sort(&self.data, &mut reordered)?;
        self.view = reordered;
        self.sort = sort;
        Ok(())
    }

    /// Re-applies the current strategy, e.g. after its settings changed.
    pub fn resort(&mut self) -> Result<(), String> {
        let mut reordered = self.view.clone();
        self.sort.sort(&self.data, &mut reordered)?;
        self.view = reordered;
        Ok(())
    }

    /// Returns the sort score for the given line name, if the current
    /// strategy computes scores.
    pub fn sort_score(&self, name: &str) -> Option<f64> {
        self.sort.score(name)
    }

    /// Refreshes the presentation state after the dataset changed, resetting
    /// the ordering to import order.
    pub fn refresh(&mut self) {
        self.view.reset(self.data.germplasm_count());
        let markers = self.data.genome().marker_count(self.chromosome).unwrap_or(0);
        self.viewport.set_totals(markers, self.view.len());
    }

    /// Gives mutable access to the dataset and refreshes afterwards.
    pub fn update_data<F, T>(&mut self, update: F) -> T
    where
        F: FnOnce(&mut DataSet) -> T,
    {
        let result = update(&mut self.data);
        self.refresh();
        result
    }

    //-------------------------------------------------------------------------
    // Control interface
    //-------------------------------------------------------------------------

    /// Scrolls by the given pixel deltas.
    pub fn move_by(&mut self, dx: isize, dy: isize) {
        self.viewport.move_by(dx, dy);
    }

    /// Jumps to the given marker and germplasm row, clamped to the data.
    pub fn move_to_position(&mut self, marker: usize, germplasm: usize) {
        self.viewport.move_to_position(marker, germplasm);
    }

    /// Changes the cell size, preserving the data position.
    pub fn zoom(&mut self, cell_size: usize) {
        self.viewport.zoom(cell_size);
    }

    /// Changes the visible canvas size.
    pub fn resize(&mut self, width_px: usize, height_px: usize) {
        self.viewport.resize(width_px, height_px);
    }

    //-------------------------------------------------------------------------
    // Render interface
    //-------------------------------------------------------------------------

    /// Returns the visible marker range on the selected chromosome.
    pub fn visible_marker_range(&self) -> Range<usize> {
        self.viewport.visible_marker_range()
    }

    /// Returns the visible range of view rows.
    pub fn visible_germplasm_range(&self) -> Range<usize> {
        self.viewport.visible_germplasm_range()
    }

    /// Returns the genotype code at a view row and marker column, resolved
    /// through the current ordering, or [`None`] if the position is out of
    /// range.
    pub fn genotype_code_at(&self, row: usize, marker: usize) -> Option<u16> {
        let germplasm = self.view.get(row)?;
        self.data.genotype_code_at(germplasm, self.chromosome, marker)
    }

    /// Returns an overview surface matching the dataset extents.
    pub fn overview(&self, width_px: usize, height_px: usize) -> Overview {
        Overview::new(
            width_px,
            height_px,
            self.data.genome().marker_count(self.chromosome).unwrap_or(0),
            self.view.len(),
        )
    }

    /// Returns the overview window rectangle for the current viewport
    /// position.
    pub fn overview_window(&self, overview: &Overview) -> WindowRect {
        let markers = self.visible_marker_range();
        let germplasm = self.visible_germplasm_range();
        overview.window_rect(markers.start, germplasm.start, markers.len(), germplasm.len())
    }
}

//-----------------------------------------------------------------------------
