//! Viewport virtualization for the genotype grid.
//!
//! The logical data grid (markers × germplasm lines) is unbounded for
//! practical purposes, so the rendering layer only ever receives a bounded
//! visible window.
//! An [`AxisScroll`] virtualizes one axis: it clamps pixel offsets, converts
//! them to cell ranges, and maps between data space and scrollbar space.
//! A [`Viewport`] pairs two axes, and an [`Overview`] projects the whole
//! dataset onto a small fixed pixel surface for coarse navigation.


//-----------------------------------------------------------------------------

/// Maps a value linearly from one interval to another.
///
/// Returns the start of the target interval when the source interval is empty.
pub fn map_linear(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    if from.1 == from.0 {
        return to.0;
    }
    to.0 + (value - from.0) * (to.1 - to.0) / (from.1 - from.0)
}

//-----------------------------------------------------------------------------

/// Scroll state for one axis of the grid.
///
/// The axis covers `total_count` cells of `cell_size` pixels each, of which
/// `visible_px` pixels are on screen.
/// The pixel offset into the data, `translated`, is always clamped to
/// `[0, total_extent - visible_px]`, and forced to 0 when the data does not
/// overflow the visible area.
///
/// # Examples
///
/// ```
/// use geno_grid::AxisScroll;
///
/// // 100 cells of 16 px in a 160 px window.
/// let mut axis = AxisScroll::new(16, 160, 100);
/// assert!(axis.can_scroll());
/// assert_eq!(axis.visible_range(), 0..10);
///
/// // A jump past the end clamps to the maximum offset.
/// axis.move_to(1000);
/// assert_eq!(axis.translated(), 1440);
/// assert_eq!(axis.visible_range(), 90..100);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisScroll {
    cell_size: usize,
    visible_px: usize,
    total_count: usize,

    // Pixel offset into the logical data extent.
    translated: usize,
}

impl AxisScroll {
    /// Creates a new axis.
    ///
    /// The cell size is at least one pixel.
    pub fn new(cell_size: usize, visible_px: usize, total_count: usize) -> Self {
        AxisScroll {
            cell_size: cell_size.max(1),
            visible_px,
            total_count,
            translated: 0,
        }
    }

    /// Returns the size of a cell in pixels.
    #[inline]
    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// Returns the number of cells on the axis.
    #[inline]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the total data extent in pixels.
    #[inline]
    pub fn total_extent(&self) -> usize {
        self.total_count * self.cell_size
    }

    /// Returns the current pixel offset into the data.
    #[inline]
    pub fn translated(&self) -> usize {
        self.translated
    }

    /// Returns `true` if the data extent overflows the visible area.
    #[inline]
    pub fn can_scroll(&self) -> bool {
        self.total_extent() > self.visible_px
    }

    // Largest valid value for `translated`.
    fn max_translation(&self) -> usize {
        if self.can_scroll() {
            self.total_extent() - self.visible_px
        } else {
            0
        }
    }

    fn clamp(&mut self) {
        self.translated = self.translated.min(self.max_translation());
    }

    /// Scrolls by the given pixel delta.
    ///
    /// A positive delta moves towards the start of the data, matching drag
    /// semantics, and the result is clamped to the valid range.
    pub fn move_by(&mut self, delta: isize) {
        let target = self.translated as isize - delta;
        self.translated = target.max(0) as usize;
        self.clamp();
    }

    /// Scrolls so that the given cell index is at the leading edge, clamped
    /// to the valid range.
    pub fn move_to(&mut self, index: usize) {
        self.translated = index.saturating_mul(self.cell_size);
        self.clamp();
    }

    /// Returns the range of visible cell indexes.
    ///
    /// The range starts at the first cell covered by the current offset and
    /// spans as many cells as fit in the visible area, truncated at the end
    /// of the data.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        if self.total_count == 0 {
            return 0..0;
        }
        let first = self.translated / self.cell_size;
        let visible_cells = self.visible_px.div_ceil(self.cell_size);
        let end = (first + visible_cells).min(self.total_count);
        first..end
    }

    /// Returns the number of currently visible cells.
    #[inline]
    pub fn visible_count(&self) -> usize {
        self.visible_range().len()
    }

    /// Returns the scrollbar thumb position for the given track and thumb
    /// lengths, in pixels.
    pub fn scrollbar_position(&self, track_px: usize, thumb_px: usize) -> usize {
        if !self.can_scroll() || track_px <= thumb_px {
            return 0;
        }
        let position = map_linear(
            self.translated as f64,
            (0.0, self.max_translation() as f64),
            (0.0, (track_px - thumb_px) as f64),
        );
        position.round() as usize
    }

    /// Scrolls to the data offset corresponding to a scrollbar thumb
    /// position, the inverse of [`AxisScroll::scrollbar_position`].
    pub fn set_scrollbar_position(&mut self, position_px: usize, track_px: usize, thumb_px: usize) {
        if !self.can_scroll() || track_px <= thumb_px {
            return;
        }
        let translated = map_linear(
            position_px as f64,
            (0.0, (track_px - thumb_px) as f64),
            (0.0, self.max_translation() as f64),
        );
        self.translated = translated.round().max(0.0) as usize;
        self.clamp();
    }

    /// Changes the cell size, keeping the same data position at the leading
    /// edge.
    ///
    /// The offset is rescaled by the size ratio and re-clamped; if the data
    /// no longer overflows the visible area, the offset becomes 0.
    pub fn zoom(&mut self, new_cell_size: usize) {
        let new_cell_size = new_cell_size.max(1);
        let scaled = self.translated as f64 * new_cell_size as f64 / self.cell_size as f64;
        self.cell_size = new_cell_size;
        self.translated = scaled.round() as usize;
        if !self.can_scroll() {
            self.translated = 0;
        }
        self.clamp();
    }

    /// Changes the visible extent, re-clamping the offset.
    pub fn resize(&mut self, visible_px: usize) {
        self.visible_px = visible_px;
        if !self.can_scroll() {
            self.translated = 0;
        }
        self.clamp();
    }

    /// Changes the number of cells on the axis, re-clamping the offset.
    pub fn set_total_count(&mut self, total_count: usize) {
        self.total_count = total_count;
        if !self.can_scroll() {
            self.translated = 0;
        }
        self.clamp();
    }
}

//-----------------------------------------------------------------------------

/// The visible window of the marker × germplasm grid.
///
/// The horizontal axis covers markers and the vertical axis covers germplasm
/// lines.
/// Both axes share the cell size, which changes through [`Viewport::zoom`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    x: AxisScroll,
    y: AxisScroll,
}

impl Viewport {
    /// Creates a new viewport.
    ///
    /// # Arguments
    ///
    /// * `cell_size`: Size of a grid cell in pixels.
    /// * `canvas`: Visible canvas size in pixels as `(width, height)`.
    /// * `markers`: Number of markers on the horizontal axis.
    /// * `germplasm`: Number of germplasm lines on the vertical axis.
    pub fn new(cell_size: usize, canvas: (usize, usize), markers: usize, germplasm: usize) -> Self {
        Viewport {
            x: AxisScroll::new(cell_size, canvas.0, markers),
            y: AxisScroll::new(cell_size, canvas.1, germplasm),
        }
    }

    /// Returns the horizontal (marker) axis.
    pub fn x(&self) -> &AxisScroll {
        &self.x
    }

    /// Returns the vertical (germplasm) axis.
    pub fn y(&self) -> &AxisScroll {
        &self.y
    }

    /// Returns the size of a grid cell in pixels.
    pub fn cell_size(&self) -> usize {
        self.x.cell_size()
    }

    /// Scrolls by the given pixel deltas.
    pub fn move_by(&mut self, dx: isize, dy: isize) {
        self.x.move_by(dx);
        self.y.move_by(dy);
    }

    /// Jumps to the given data position, clamped to the valid range.
    pub fn move_to_position(&mut self, marker: usize, germplasm: usize) {
        self.x.move_to(marker);
        self.y.move_to(germplasm);
    }

    /// Changes the cell size on both axes, preserving the data position.
    pub fn zoom(&mut self, cell_size: usize) {
        self.x.zoom(cell_size);
        self.y.zoom(cell_size);
    }

    /// Changes the visible canvas size.
    pub fn resize(&mut self, width_px: usize, height_px: usize) {
        self.x.resize(width_px);
        self.y.resize(height_px);
    }

    /// Changes the data extents, re-clamping both axes.
    pub fn set_totals(&mut self, markers: usize, germplasm: usize) {
        self.x.set_total_count(markers);
        self.y.set_total_count(germplasm);
    }

    /// Returns the range of visible marker indexes.
    pub fn visible_marker_range(&self) -> std::ops::Range<usize> {
        self.x.visible_range()
    }

    /// Returns the range of visible germplasm rows.
    pub fn visible_germplasm_range(&self) -> std::ops::Range<usize> {
        self.y.visible_range()
    }
}

//-----------------------------------------------------------------------------

/// A window rectangle on the overview surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// A whole-dataset projection onto a small fixed pixel surface.
///
/// Instead of cell-accurate scrolling, the overview maps the entire data
/// extent into `width × height` pixels, so each pixel aggregates
/// `total_markers / width` markers and `total_germplasm / height` lines.
/// The current viewport is drawn as a window rectangle, and clicking the
/// surface navigates to a centered data position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overview {
    width: usize,
    height: usize,
    total_markers: usize,
    total_germplasm: usize,
}

impl Overview {
    /// Creates a new overview surface.
    pub fn new(width: usize, height: usize, total_markers: usize, total_germplasm: usize) -> Self {
        Overview {
            width: width.max(1),
            height: height.max(1),
            total_markers,
            total_germplasm,
        }
    }

    /// Returns the number of markers aggregated into one pixel column.
    pub fn markers_per_pixel(&self) -> f64 {
        self.total_markers as f64 / self.width as f64
    }

    /// Returns the number of germplasm lines aggregated into one pixel row.
    pub fn germplasm_per_pixel(&self) -> f64 {
        self.total_germplasm as f64 / self.height as f64
    }

    /// Returns the window rectangle for a viewport at the given data
    /// position.
    ///
    /// The window covers `window_markers × window_germplasm` cells starting
    /// at `(marker, germplasm)`, clamped so that it never extends past the
    /// data bounds.
    ///
    /// # Arguments
    ///
    /// * `marker`: First visible marker.
    /// * `germplasm`: First visible germplasm row.
    /// * `window_markers`: Number of visible markers.
    /// * `window_germplasm`: Number of visible germplasm rows.
    pub fn window_rect(
        &self,
        marker: usize,
        germplasm: usize,
        window_markers: usize,
        window_germplasm: usize,
    ) -> WindowRect {
        let (x, width) = Self::project(
            marker, window_markers, self.total_markers, self.width, self.markers_per_pixel(),
        );
        let (y, height) = Self::project(
            germplasm, window_germplasm, self.total_germplasm, self.height, self.germplasm_per_pixel(),
        );
        WindowRect { x, y, width, height }
    }

    /// Returns the data position centered on the given overview pixel,
    /// clamped to the data bounds.
    ///
    /// This is the inverse of the per-pixel scale: clicking the overview at
    /// `(x, y)` yields the top-left corner for a viewport of
    /// `window_markers × window_germplasm` cells centered on the click.
    pub fn position_at(
        &self,
        x: usize,
        y: usize,
        window_markers: usize,
        window_germplasm: usize,
    ) -> (usize, usize) {
        let marker = Self::center(x, window_markers, self.total_markers, self.markers_per_pixel());
        let germplasm = Self::center(y, window_germplasm, self.total_germplasm, self.germplasm_per_pixel());
        (marker, germplasm)
    }

    // Projects a data window on one axis to pixel coordinates, clamped to the
    // surface.
    fn project(
        start: usize,
        window: usize,
        total: usize,
        surface_px: usize,
        per_pixel: f64,
    ) -> (usize, usize) {
        if total == 0 || per_pixel <= 0.0 {
            return (0, surface_px);
        }
        let window = window.min(total);
        let start = start.min(total - window);
        let px = (start as f64 / per_pixel).floor() as usize;
        let width = (window as f64 / per_pixel).ceil().max(1.0) as usize;
        let px = px.min(surface_px.saturating_sub(1));
        let width = width.min(surface_px - px);
        (px, width)
    }

    // Converts a pixel coordinate to a centered, clamped window start on one
    // axis.
    fn center(px: usize, window: usize, total: usize, per_pixel: f64) -> usize {
        if total == 0 {
            return 0;
        }
        let window = window.min(total);
        let clicked = (px as f64 * per_pixel).floor() as usize;
        let start = clicked.saturating_sub(window / 2);
        start.min(total - window)
    }
}

//-----------------------------------------------------------------------------
