//! N-up print layout.
//!
//! This module turns one [`Document`] plus a surface size and a copy count
//! into a [`PrintLayout`]: a near-square grid of cells, one uniform scale
//! factor, and a flat list of [`PlacedRender`] entries that a printing
//! collaborator rasterizes in order. The engine never draws anything itself.
//!
//! # Algorithm
//!
//! 1. `columns = ceil(sqrt(copies))`, `rows = ceil(copies / columns)`.
//! 2. `cell = surface / (columns, rows) - margin` on each axis.
//! 3. Copy `i` sits in row `i / columns`, column `i % columns`, with its
//!    origin at `col * (cell_width + margin) + margin / 2` (and likewise for y).
//! 4. `scale = min(cell_width / canvas_width, cell_height / canvas_height)`,
//!    so the canvas keeps its aspect ratio and may be enlarged to fill a cell.
//! 5. Every element is placed at `origin + position * scale` with its size,
//!    font size and stroke thickness scaled by the same factor.
//!
//! Placements are ordered by copy index, then by paint order (ascending
//! z-index, insertion order on ties).
//!
//! # Examples
//!
//! ```
//! # use nexostamp::layout;
//! # use nexostamp_core::{document::Document, element::Element};
//! let mut doc = Document::new();
//! doc.add_element(Element::rectangle());
//!
//! let plan = layout::layout(&doc, 5, 400.0, 300.0).unwrap();
//! assert_eq!(plan.grid().columns(), 3);
//! assert_eq!(plan.grid().rows(), 2);
//! assert_eq!(plan.placements().len(), 5);
//! ```

use log::{info, trace};
use thiserror::Error;

use nexostamp_core::{
    document::Document,
    element::{Element, ElementKind},
    geometry::{Bounds, Point, Size},
};

/// Gutter between copies, in surface units.
pub const DEFAULT_MARGIN: f32 = 20.0;

/// Reasons a layout cannot be produced. All of them mean "infeasible": the
/// caller should retry with fewer copies, a larger surface or a smaller margin.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("layout infeasible: at least one copy is required")]
    NoCopies,

    #[error("layout infeasible: surface {width}x{height} is not a positive size")]
    InvalidSurface { width: f32, height: f32 },

    #[error("layout infeasible: cells would be {width}x{height} after margins")]
    CellTooSmall { width: f32, height: f32 },
}

// =============================================================================
// Grid and cells
// =============================================================================

/// Shape of the copy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
}

impl Grid {
    /// Returns the near-square grid for `copies`, or `None` for zero copies.
    ///
    /// When `copies` is not a perfect square the grid gets more columns than
    /// rows, and trailing cells of the last row stay empty.
    pub fn for_copies(copies: u32) -> Option<Self> {
        if copies == 0 {
            return None;
        }
        let columns = ceil_sqrt(copies);
        Some(Self {
            columns,
            rows: copies.div_ceil(columns),
        })
    }

    pub fn columns(self) -> u32 {
        self.columns
    }

    pub fn rows(self) -> u32 {
        self.rows
    }

    /// Number of cells in the grid, including empty ones
    pub fn capacity(self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }

    /// Row and column of a copy, row-major.
    pub fn row_col(self, copy_index: usize) -> (usize, usize) {
        let columns = self.columns as usize;
        (copy_index / columns, copy_index % columns)
    }
}

/// Smallest `c` with `c * c >= n`.
fn ceil_sqrt(n: u32) -> u32 {
    let target = u64::from(n);
    let mut root = (f64::from(n)).sqrt() as u64;
    while root * root < target {
        root += 1;
    }
    while root > 1 && (root - 1) * (root - 1) >= target {
        root -= 1;
    }
    // `root` is at most ceil(sqrt(u32::MAX)) = 65536.
    root as u32
}

/// The region reserved for one copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    copy_index: usize,
    origin: Point,
    size: Size,
}

impl Cell {
    pub fn copy_index(&self) -> usize {
        self.copy_index
    }

    /// Top-left corner on the surface
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.origin, self.size)
    }
}

// =============================================================================
// Placements
// =============================================================================

/// A rotation to apply when drawing a placed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    angle: f32,
    pivot: Point,
}

impl Rotation {
    /// Angle in degrees, unchanged from the document
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Center of the scaled element, in surface coordinates
    pub fn pivot(&self) -> Point {
        self.pivot
    }
}

/// One element of one copy, positioned and scaled on the surface.
#[derive(Debug, Clone)]
pub struct PlacedRender<'a> {
    element: &'a Element,
    copy_index: usize,
    cell_origin: Point,
    scale: f32,
    bounds: Bounds,
    rotation: Option<Rotation>,
}

impl<'a> PlacedRender<'a> {
    fn new(element: &'a Element, cell: &Cell, scale: f32) -> Self {
        let position = cell.origin().add_point(element.position().scale(scale));
        let bounds = Bounds::new_from_top_left(position, element.size().scale(scale));
        let rotation = (element.rotation() != 0.0).then(|| Rotation {
            angle: element.rotation(),
            pivot: bounds.center(),
        });

        Self {
            element,
            copy_index: cell.copy_index(),
            cell_origin: cell.origin(),
            scale,
            bounds,
            rotation,
        }
    }

    /// The document element this entry draws
    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn copy_index(&self) -> usize {
        self.copy_index
    }

    pub fn cell_origin(&self) -> Point {
        self.cell_origin
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Scaled, unrotated box on the surface
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Scaled top-left corner on the surface
    pub fn position(&self) -> Point {
        self.bounds.min_point()
    }

    /// Scaled size on the surface
    pub fn size(&self) -> Size {
        self.bounds.to_size()
    }

    /// Rotation to apply, or `None` when the element is not rotated.
    pub fn rotation(&self) -> Option<Rotation> {
        self.rotation
    }

    /// Scaled font size, for text elements
    pub fn font_size(&self) -> Option<f32> {
        match self.element.kind() {
            ElementKind::Text(text) => Some(text.font_size() * self.scale),
            ElementKind::Shape(_) => None,
        }
    }

    /// Scaled stroke thickness, for shape elements
    pub fn stroke_thickness(&self) -> Option<f32> {
        match self.element.kind() {
            ElementKind::Shape(shape) => Some(shape.stroke_thickness() * self.scale),
            ElementKind::Text(_) => None,
        }
    }
}

/// The complete render plan for one page.
#[derive(Debug, Clone)]
pub struct PrintLayout<'a> {
    surface: Size,
    margin: f32,
    grid: Grid,
    cell_size: Size,
    scale: f32,
    cells: Vec<Cell>,
    placements: Vec<PlacedRender<'a>>,
}

impl<'a> PrintLayout<'a> {
    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Size reserved for each copy, margins excluded
    pub fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// Uniform document-to-surface scale, shared by all copies
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// One cell per copy, in copy order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All placements, by copy index then paint order
    pub fn placements(&self) -> &[PlacedRender<'a>] {
        &self.placements
    }

    /// Placements of a single copy, in paint order
    pub fn placements_for_copy(&self, copy_index: usize) -> impl Iterator<Item = &PlacedRender<'a>> {
        self.placements
            .iter()
            .filter(move |placement| placement.copy_index() == copy_index)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Computes [`PrintLayout`]s with a configurable gutter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintLayoutEngine {
    margin: f32,
}

impl Default for PrintLayoutEngine {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
        }
    }
}

impl PrintLayoutEngine {
    /// Create an engine with the default 20-unit margin
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gutter subtracted from each cell
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Lays out `copies` copies of `document` on a surface of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when `copies` is zero, when the surface is not
    /// a positive size, or when the margins leave no positive space for a cell.
    pub fn layout<'a>(
        &self,
        document: &'a Document,
        copies: u32,
        surface: Size,
    ) -> Result<PrintLayout<'a>, LayoutError> {
        let grid = Grid::for_copies(copies).ok_or(LayoutError::NoCopies)?;

        if !surface.is_positive() {
            return Err(LayoutError::InvalidSurface {
                width: surface.width(),
                height: surface.height(),
            });
        }
        let canvas = document.canvas();

        let cell_size = Size::new(
            surface.width() / grid.columns() as f32 - self.margin,
            surface.height() / grid.rows() as f32 - self.margin,
        );
        if !cell_size.is_positive() {
            return Err(LayoutError::CellTooSmall {
                width: cell_size.width(),
                height: cell_size.height(),
            });
        }

        let scale = (cell_size.width() / canvas.width()).min(cell_size.height() / canvas.height());

        let cells: Vec<Cell> = (0..copies as usize)
            .map(|copy_index| {
                let (row, col) = grid.row_col(copy_index);
                let origin = Point::new(
                    col as f32 * (cell_size.width() + self.margin) + self.margin / 2.0,
                    row as f32 * (cell_size.height() + self.margin) + self.margin / 2.0,
                );
                Cell {
                    copy_index,
                    origin,
                    size: cell_size,
                }
            })
            .collect();

        let paint_order = document.paint_order();
        let mut placements = Vec::with_capacity(cells.len() * paint_order.len());
        for cell in &cells {
            for &element in &paint_order {
                let placement = PlacedRender::new(element, cell, scale);
                trace!(
                    copy = cell.copy_index(),
                    id:% = element.id(),
                    bounds:? = placement.bounds();
                    "Placed element"
                );
                placements.push(placement);
            }
        }

        info!(
            copies,
            columns = grid.columns(),
            rows = grid.rows(),
            scale,
            placements = placements.len();
            "Computed print layout"
        );

        Ok(PrintLayout {
            surface,
            margin: self.margin,
            grid,
            cell_size,
            scale,
            cells,
            placements,
        })
    }
}

/// Lays out `copies` copies of `document` on a `surface_width` × `surface_height`
/// surface with the default margin.
///
/// # Errors
///
/// See [`PrintLayoutEngine::layout`].
pub fn layout(
    document: &Document,
    copies: u32,
    surface_width: f32,
    surface_height: f32,
) -> Result<PrintLayout<'_>, LayoutError> {
    PrintLayoutEngine::new().layout(document, copies, Size::new(surface_width, surface_height))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use nexostamp_core::element::{ShapeContent, ShapeKind, TextContent};

    fn stamp() -> Document {
        let mut doc = Document::new();
        doc.add_element(Element::rectangle().with_position(Point::new(0.0, 0.0)));
        doc
    }

    #[test]
    fn test_grid_shapes() {
        let cases = [
            (1, 1, 1),
            (2, 2, 1),
            (3, 2, 2),
            (4, 2, 2),
            (5, 3, 2),
            (9, 3, 3),
            (10, 4, 3),
            (16, 4, 4),
            (17, 5, 4),
        ];
        for (copies, columns, rows) in cases {
            let grid = Grid::for_copies(copies).unwrap();
            assert_eq!((grid.columns(), grid.rows()), (columns, rows), "copies = {copies}");
        }
        assert!(Grid::for_copies(0).is_none());
    }

    #[test]
    fn test_ceil_sqrt_extremes() {
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(u32::MAX), 65536);
    }

    #[test]
    fn test_capacity_of_largest_grid() {
        let grid = Grid::for_copies(u32::MAX).unwrap();
        assert_eq!(grid.columns(), 65536);
        assert_eq!(grid.rows(), 65536);
        assert_eq!(grid.capacity(), 1_u64 << 32);
        assert!(grid.capacity() >= u64::from(u32::MAX));
    }

    #[test]
    fn test_layout_four_copies() {
        let doc = stamp();
        let plan = layout(&doc, 4, 400.0, 300.0).unwrap();

        assert_eq!(plan.grid(), Grid { columns: 2, rows: 2 });
        assert_eq!(plan.cell_size(), Size::new(180.0, 130.0));
        let origins: Vec<Point> = plan.cells().iter().map(|c| c.origin()).collect();
        assert_eq!(
            origins,
            vec![
                Point::new(10.0, 10.0),
                Point::new(210.0, 10.0),
                Point::new(10.0, 160.0),
                Point::new(210.0, 160.0),
            ]
        );
    }

    #[test]
    fn test_layout_five_copies_leaves_one_empty_cell() {
        let doc = stamp();
        let plan = layout(&doc, 5, 400.0, 300.0).unwrap();

        assert_eq!(plan.grid().columns(), 3);
        assert_eq!(plan.grid().rows(), 2);
        assert_eq!(plan.grid().capacity(), 6);
        assert_eq!(plan.cells().len(), 5);
        assert_eq!(plan.placements().len(), 5);
    }

    #[test]
    fn test_scale_preserves_aspect_ratio() {
        let mut doc = Document::new().with_canvas(Size::new(400.0, 300.0));
        doc.add_element(
            Element::rectangle()
                .with_position(Point::new(40.0, 20.0))
                .with_size(Size::new(100.0, 60.0)),
        );

        // One copy on a 170x170 surface leaves a 150x150 cell.
        let plan = layout(&doc, 1, 170.0, 170.0).unwrap();
        assert_eq!(plan.cell_size(), Size::new(150.0, 150.0));
        assert_approx_eq!(f32, plan.scale(), 0.375);

        let placed = &plan.placements()[0];
        assert_approx_eq!(f32, placed.size().width(), 37.5);
        assert_approx_eq!(f32, placed.size().height(), 22.5);
        assert_approx_eq!(f32, placed.position().x(), 10.0 + 15.0);
        assert_approx_eq!(f32, placed.position().y(), 10.0 + 7.5);
    }

    #[test]
    fn test_small_document_is_enlarged() {
        let mut doc = Document::new().with_canvas(Size::new(50.0, 50.0));
        doc.add_element(Element::line());

        let plan = layout(&doc, 1, 220.0, 220.0).unwrap();
        assert_approx_eq!(f32, plan.scale(), 4.0);
    }

    #[test]
    fn test_infeasible_layouts() {
        let doc = stamp();

        assert!(matches!(
            layout(&doc, 100, 50.0, 50.0),
            Err(LayoutError::CellTooSmall { .. })
        ));
        assert_eq!(layout(&doc, 0, 400.0, 300.0).unwrap_err(), LayoutError::NoCopies);
        assert!(matches!(
            layout(&doc, 1, 0.0, 300.0),
            Err(LayoutError::InvalidSurface { .. })
        ));
        assert!(matches!(
            layout(&doc, 1, 20.0, 300.0),
            Err(LayoutError::CellTooSmall { .. })
        ));
    }

    #[test]
    fn test_placements_follow_copy_then_paint_order() {
        let mut doc = Document::new();
        let top = doc.add_element(Element::text().with_z_index(5));
        let bottom = doc.add_element(Element::rectangle().with_z_index(1));
        let middle = doc.add_element(Element::circle().with_z_index(3));

        let plan = layout(&doc, 2, 800.0, 300.0).unwrap();
        let order: Vec<_> = plan
            .placements()
            .iter()
            .map(|p| (p.copy_index(), p.element().id()))
            .collect();

        assert_eq!(
            order,
            vec![
                (0, bottom),
                (0, middle),
                (0, top),
                (1, bottom),
                (1, middle),
                (1, top),
            ]
        );
        assert_eq!(plan.placements_for_copy(1).count(), 3);
    }

    #[test]
    fn test_text_and_stroke_scale_with_cell() {
        let mut doc = Document::new().with_canvas(Size::new(400.0, 300.0));
        doc.add_element(Element::new(ElementKind::Text(
            TextContent::new("A").with_font_size(24.0),
        )));
        doc.add_element(Element::new(ElementKind::Shape(
            ShapeContent::new(ShapeKind::Rectangle).with_stroke_thickness(4.0),
        )));

        // 2x1 grid on 440x170: cells are 200x150, scale = min(0.5, 0.5).
        let plan = layout(&doc, 2, 440.0, 170.0).unwrap();
        assert_approx_eq!(f32, plan.scale(), 0.5);

        let text = &plan.placements()[0];
        assert_approx_eq!(f32, text.font_size().unwrap(), 12.0);
        assert!(text.stroke_thickness().is_none());

        let shape = &plan.placements()[1];
        assert_approx_eq!(f32, shape.stroke_thickness().unwrap(), 2.0);
        assert!(shape.font_size().is_none());
    }

    #[test]
    fn test_rotation_pivots_at_scaled_center() {
        let mut doc = Document::new().with_canvas(Size::new(400.0, 300.0));
        doc.add_element(
            Element::rectangle()
                .with_position(Point::new(100.0, 100.0))
                .with_rotation(45.0),
        );
        doc.add_element(Element::circle());

        // One copy on 820x620: the cell is 800x600 and the scale is 2.
        let plan = layout(&doc, 1, 820.0, 620.0).unwrap();
        let rotated = plan.placements()[0].rotation().unwrap();
        assert_eq!(rotated.angle(), 45.0);
        assert_approx_eq!(f32, rotated.pivot().x(), 10.0 + 200.0 + 100.0);
        assert_approx_eq!(f32, rotated.pivot().y(), 10.0 + 200.0 + 100.0);

        assert!(plan.placements()[1].rotation().is_none());
    }

    #[test]
    fn test_custom_margin() {
        let doc = stamp();
        let plan = PrintLayoutEngine::new()
            .with_margin(0.0)
            .layout(&doc, 4, Size::new(400.0, 300.0))
            .unwrap();

        assert_eq!(plan.margin(), 0.0);
        assert_eq!(plan.cell_size(), Size::new(200.0, 150.0));
        assert_eq!(plan.cells()[3].origin(), Point::new(200.0, 150.0));
    }

    #[test]
    fn test_empty_document_has_cells_but_no_placements() {
        let doc = Document::new();
        let plan = layout(&doc, 3, 600.0, 400.0).unwrap();
        assert_eq!(plan.cells().len(), 3);
        assert!(plan.placements().is_empty());
    }
}
