//! SVG rendering of print layouts.

use std::path::Path;

use log::{debug, info};
use svg::node::{Text as SvgText, element as svg_element};

use nexostamp::{
    element::{ElementKind, ShapeKind, TextAlignment, TextContent},
    geometry::Bounds,
    layout::{Cell, PlacedRender, PrintLayout},
};

use crate::{RenderError, color::Color, style::StyleConfig};

/// Multiplier from font size to line advance for multi-line text.
const LINE_SPACING: f32 = 1.2;

/// Draws a [`PrintLayout`] as an SVG page, one stamp face per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgRenderer {
    page: Color,
    background: Color,
    foreground: Color,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            page: Color::white(),
            background: Color::black(),
            foreground: Color::white(),
        }
    }
}

impl SvgRenderer {
    /// Creates a renderer with the colors from `style`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidColor`] if any color fails to parse.
    pub fn new(style: &StyleConfig) -> Result<Self, RenderError> {
        Ok(Self {
            page: style.page_color()?,
            background: style.background_color()?,
            foreground: style.foreground_color()?,
        })
    }

    /// Renders the complete layout to an SVG document sized to the surface.
    pub fn render(&self, layout: &PrintLayout<'_>) -> svg::Document {
        let surface = layout.surface();

        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", surface.width(), surface.height()),
            )
            .set("width", surface.width())
            .set("height", surface.height())
            .add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", surface.width())
                    .set("height", surface.height())
                    .set("fill", self.page),
            );

        for cell in layout.cells() {
            let mut group = svg_element::Group::new()
                .set("class", "stamp")
                .add(self.render_cell_background(cell));
            for placement in layout.placements_for_copy(cell.copy_index()) {
                group = group.add(self.render_placement(placement));
            }
            doc = doc.add(group);
        }

        debug!(
            cells = layout.cells().len(),
            placements = layout.placements().len();
            "Rendered print preview"
        );
        doc
    }

    /// Renders the layout and serializes it.
    pub fn render_to_string(&self, layout: &PrintLayout<'_>) -> String {
        self.render(layout).to_string()
    }

    /// Renders the layout and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the file cannot be written.
    pub fn render_to_file(
        &self,
        layout: &PrintLayout<'_>,
        path: impl AsRef<Path>,
    ) -> Result<(), RenderError> {
        let path = path.as_ref();
        svg::save(path, &self.render(layout))?;
        info!(path:% = path.display(); "Wrote print preview");
        Ok(())
    }

    fn render_cell_background(&self, cell: &Cell) -> svg_element::Rectangle {
        let bounds = cell.bounds();
        svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", self.background)
    }

    fn render_placement(&self, placement: &PlacedRender<'_>) -> Box<dyn svg::Node> {
        let bounds = placement.bounds();
        let transform = placement.rotation().map(|rotation| {
            format!(
                "rotate({} {} {})",
                rotation.angle(),
                rotation.pivot().x(),
                rotation.pivot().y()
            )
        });

        match placement.element().kind() {
            ElementKind::Text(text) => {
                let font_size = placement.font_size().unwrap_or(text.font_size());
                with_transform(self.render_text(text, bounds, font_size), transform)
            }
            ElementKind::Shape(shape) => {
                let stroke_width = placement
                    .stroke_thickness()
                    .unwrap_or(shape.stroke_thickness());
                match shape.kind() {
                    ShapeKind::Rectangle => with_transform(
                        svg_element::Rectangle::new()
                            .set("x", bounds.min_x())
                            .set("y", bounds.min_y())
                            .set("width", bounds.width())
                            .set("height", bounds.height())
                            .set("fill", "none")
                            .set("stroke", self.foreground)
                            .set("stroke-width", stroke_width),
                        transform,
                    ),
                    ShapeKind::Circle => {
                        let center = bounds.center();
                        with_transform(
                            svg_element::Ellipse::new()
                                .set("cx", center.x())
                                .set("cy", center.y())
                                .set("rx", bounds.width() / 2.0)
                                .set("ry", bounds.height() / 2.0)
                                .set("fill", "none")
                                .set("stroke", self.foreground)
                                .set("stroke-width", stroke_width),
                            transform,
                        )
                    }
                    // Local (0, 0) to (width, height).
                    ShapeKind::Line => with_transform(
                        svg_element::Line::new()
                            .set("x1", bounds.min_x())
                            .set("y1", bounds.min_y())
                            .set("x2", bounds.max_x())
                            .set("y2", bounds.max_y())
                            .set("stroke", self.foreground)
                            .set("stroke-width", stroke_width),
                        transform,
                    ),
                }
            }
        }
    }

    fn render_text(&self, text: &TextContent, bounds: Bounds, font_size: f32) -> svg_element::Text {
        let (x, anchor) = match text.alignment() {
            TextAlignment::Start => (bounds.min_x(), "start"),
            TextAlignment::Center => (bounds.center().x(), "middle"),
            TextAlignment::End => (bounds.max_x(), "end"),
        };

        let mut rendered = svg_element::Text::new("")
            .set("x", x)
            .set("y", bounds.min_y())
            .set("text-anchor", anchor)
            .set("dominant-baseline", "hanging")
            .set("font-family", text.font_family())
            .set("font-size", font_size)
            .set("fill", self.foreground);
        if text.bold() {
            rendered = rendered.set("font-weight", "bold");
        }
        if text.italic() {
            rendered = rendered.set("font-style", "italic");
        }

        for (index, line) in text.text().lines().enumerate() {
            let dy = if index == 0 { 0.0 } else { font_size * LINE_SPACING };
            let tspan = svg_element::TSpan::new("")
                .set("x", x)
                .set("dy", dy)
                .add(SvgText::new(line));
            rendered = rendered.add(tspan);
        }
        rendered
    }
}

fn with_transform<N: svg::Node>(mut node: N, transform: Option<String>) -> Box<dyn svg::Node> {
    if let Some(transform) = transform {
        node.assign("transform", transform);
    }
    Box::new(node)
}
