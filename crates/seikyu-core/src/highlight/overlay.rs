//! Display scaling and overlay drawing for highlight boxes.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_polygon_mut, draw_polygon_mut, Blend};
use imageproc::point::Point;
use tracing::debug;

use super::HighlightBox;
use crate::error::{RenderError, Result};
use crate::models::config::HighlightConfig;
use crate::ocr::Vertex;

/// Scale boxes from the image's natural size to its displayed size.
///
/// A zero natural dimension yields no boxes.
pub fn scale_boxes(boxes: &[HighlightBox], natural: (u32, u32), display: (u32, u32)) -> Vec<HighlightBox> {
    if natural.0 == 0 || natural.1 == 0 {
        return Vec::new();
    }

    let scale_x = display.0 as f32 / natural.0 as f32;
    let scale_y = display.1 as f32 / natural.1 as f32;

    boxes
        .iter()
        .map(|b| HighlightBox::new(b.vertices.map(|v| Vertex::new(v.x * scale_x, v.y * scale_y))))
        .collect()
}

/// Fill and outline style for the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    pub color: [u8; 3],
    pub opacity: f32,
    pub line_width: u32,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: [0xf5, 0x9e, 0x42],
            opacity: 0.5,
            line_width: 3,
        }
    }
}

impl HighlightStyle {
    /// Build a style from configuration.
    pub fn from_config(config: &HighlightConfig) -> Result<Self> {
        Ok(Self {
            color: parse_hex_color(&config.color)?,
            opacity: config.opacity.clamp(0.0, 1.0),
            line_width: config.line_width,
        })
    }
}

fn parse_hex_color(s: &str) -> Result<[u8; 3]> {
    let invalid = || RenderError::InvalidColor(s.to_string());

    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid().into());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Draw each box as a translucent filled quadrilateral with an outline.
///
/// Fill and outline are both blended at the style's opacity. Boxes that
/// collapse to fewer than three distinct points are skipped.
pub fn draw_highlights(image: &mut RgbaImage, boxes: &[HighlightBox], style: &HighlightStyle) -> Result<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage.into());
    }

    let [r, g, b] = style.color;
    let color = Rgba([r, g, b, (style.opacity * 255.0).round() as u8]);

    let mut canvas = Blend(std::mem::replace(image, RgbaImage::new(0, 0)));

    for highlight in boxes {
        let vertices = highlight.vertices;

        let Some(fill) = polygon(vertices.map(|v| Point::new(v.x.round() as i32, v.y.round() as i32))) else {
            debug!("Skipping degenerate highlight box {:?}", vertices);
            continue;
        };
        draw_polygon_mut(&mut canvas, &fill, color);

        // Concentric outlines, centred on the box edge
        let cx = vertices.iter().map(|v| v.x).sum::<f32>() / 4.0;
        let cy = vertices.iter().map(|v| v.y).sum::<f32>() / 4.0;
        let half = (style.line_width as f32 - 1.0) / 2.0;

        for k in 0..style.line_width {
            let offset = k as f32 - half;
            let ring = vertices.map(|v| {
                Point::new(
                    v.x + offset * outward(v.x - cx),
                    v.y + offset * outward(v.y - cy),
                )
            });

            if let Some(ring) = polygon(ring) {
                draw_hollow_polygon_mut(&mut canvas, &ring, color);
            }
        }
    }

    *image = canvas.0;

    Ok(())
}

/// Drop repeated points; `None` when fewer than three remain.
fn polygon<T: PartialEq + Copy>(points: [Point<T>; 4]) -> Option<Vec<Point<T>>> {
    let mut poly: Vec<Point<T>> = Vec::with_capacity(4);
    for p in points {
        if poly.last() != Some(&p) {
            poly.push(p);
        }
    }
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }

    (poly.len() >= 3).then_some(poly)
}

fn outward(delta: f32) -> f32 {
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        0.0
    }
}
