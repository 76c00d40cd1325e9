//! SVG rendering of a board and its pieces.

use std::fmt::{self, Write};

use tangram_core::{Board, Category, Piece, R2};

/// SVG rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Padding around the containers, in pixels
    pub padding: f64,
    /// Stroke width for outlines
    pub stroke_width: f64,
    /// Fill opacity (0.0 - 1.0)
    pub fill_opacity: f64,
    /// Whether to show summary labels next to pieces
    pub show_labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            stroke_width: 2.0,
            fill_opacity: 0.8,
            show_labels: true,
        }
    }
}

fn color(category: Category) -> &'static str {
    match category {
        Category::TriangleLarge1 => "purple",
        Category::TriangleLarge2 => "blue",
        Category::TriangleMedium => "violet",
        Category::TriangleSmall1 => "orangered",
        Category::TriangleSmall2 => "cadetblue",
        Category::Square => "darkgreen",
        Category::Parallelogram => "orange",
        Category::Unknown => "gray",
    }
}

/// Outline of a piece inside its `size` box, before rotation.
pub fn outline(category: Category, size: R2<f64>) -> Vec<R2<f64>> {
    let R2 { x: w, y: h } = size;
    match category {
        Category::TriangleLarge1
        | Category::TriangleLarge2
        | Category::TriangleMedium
        | Category::TriangleSmall1
        | Category::TriangleSmall2 => vec![R2::new(0., h), R2::new(w, h), R2::new(w / 2., 0.)],
        Category::Parallelogram => vec![
            R2::new(w / 3., 0.),
            R2::new(w, 0.),
            R2::new(w * 2. / 3., h),
            R2::new(0., h),
        ],
        Category::Square | Category::Unknown => {
            vec![R2::new(0., 0.), R2::new(w, 0.), R2::new(w, h), R2::new(0., h)]
        }
    }
}

/// Render containers and pieces to an SVG string, in viewport coordinates.
pub fn render_svg(board: &Board, pieces: &[Piece], config: &RenderConfig) -> Result<String, fmt::Error> {
    let (min, max) = board.containers().fold(
        (R2::new(f64::INFINITY, f64::INFINITY), R2::new(f64::NEG_INFINITY, f64::NEG_INFINITY)),
        |(min, max), c| {
            (
                R2::new(min.x.min(c.rect.x), min.y.min(c.rect.y)),
                R2::new(max.x.max(c.rect.right()), max.y.max(c.rect.bottom())),
            )
        },
    );
    let pad = config.padding;
    let (x, y) = (min.x - pad, min.y - pad);
    let (width, height) = (max.x - min.x + 2. * pad, max.y - min.y + 2. * pad);

    let mut svg = String::new();
    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        width, height, x, y, width, height
    )?;
    writeln!(&mut svg, r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="white"/>"#, x, y, width, height)?;

    for container in board.containers() {
        let r = &container.rect;
        writeln!(
            &mut svg,
            r#"  <rect id="{}" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="black" stroke-dasharray="4" stroke-width="{}"/>"#,
            container.id, r.x, r.y, r.width, r.height, config.stroke_width
        )?;
    }

    for piece in pieces {
        let Ok(container) = board.get(&piece.container) else {
            continue;
        };
        let origin = piece.top_left(container.origin());
        let center = piece.center(container.origin());
        let mut points = String::new();
        for v in outline(piece.category, piece.size) {
            let p = origin + v;
            write!(&mut points, "{},{} ", p.x, p.y)?;
        }
        let stroke = if piece.selected { "black" } else { "none" };
        writeln!(
            &mut svg,
            r#"  <polygon id="{}" points="{}" transform="rotate({} {} {})" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
            piece.id,
            points.trim_end(),
            piece.rotation.degrees(),
            center.x,
            center.y,
            color(piece.category),
            config.fill_opacity,
            stroke,
            config.stroke_width
        )?;

        if config.show_labels {
            writeln!(
                &mut svg,
                r#"  <text x="{}" y="{}" font-size="10" text-anchor="middle" fill="black">{}</text>"#,
                center.x, center.y, piece.label()
            )?;
        }
    }

    writeln!(&mut svg, "</svg>")?;
    Ok(svg)
}
