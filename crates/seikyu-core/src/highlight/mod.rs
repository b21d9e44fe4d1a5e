//! Highlight location: map extracted values back onto recognized words.

mod overlay;

pub use overlay::{draw_highlights, scale_boxes, HighlightStyle};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ocr::{TextAnnotation, Vertex};

/// A recognized word's quadrilateral, marking part of an extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightBox {
    /// Four vertices in the provider's order, image pixel space.
    pub vertices: [Vertex; 4],
}

impl HighlightBox {
    pub fn new(vertices: [Vertex; 4]) -> Self {
        Self { vertices }
    }

    /// Axis-aligned bounds (min_x, min_y, max_x, max_y).
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = self.vertices.map(|v| v.x);
        let ys = self.vertices.map(|v| v.y);

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Find every word whose text is contained in one of `targets`.
///
/// Words are visited in document order and each hit contributes its own
/// box. Empty words never match. An absent tree yields no boxes.
pub fn locate<S: AsRef<str>>(targets: &[S], annotation: Option<&TextAnnotation>) -> Vec<HighlightBox> {
    let Some(annotation) = annotation else {
        return Vec::new();
    };
    if targets.is_empty() {
        return Vec::new();
    }

    let mut boxes = Vec::new();

    for word in annotation.words() {
        let text = word.text();
        if text.is_empty() || !targets.iter().any(|t| t.as_ref().contains(text.as_str())) {
            continue;
        }

        match word.quad() {
            Some(quad) => boxes.push(HighlightBox::new(quad)),
            None => debug!("Skipping matched word {:?} without a 4-vertex box", text),
        }
    }

    debug!("Located {} highlight boxes for {} targets", boxes.len(), targets.len());

    boxes
}

/// [`locate`] over a raw `fullTextAnnotation` JSON value.
///
/// A value that does not parse as a word tree yields no boxes.
pub fn locate_json<S: AsRef<str>>(targets: &[S], annotation: &serde_json::Value) -> Vec<HighlightBox> {
    match serde_json::from_value::<TextAnnotation>(annotation.clone()) {
        Ok(tree) => locate(targets, Some(&tree)),
        Err(e) => {
            warn!("Ignoring malformed word tree: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::{Block, BoundingPoly, Page, Paragraph, Word};
    use pretty_assertions::assert_eq;

    fn quad(x: f32, y: f32) -> [Vertex; 4] {
        [
            Vertex::new(x, y),
            Vertex::new(x + 10.0, y),
            Vertex::new(x + 10.0, y + 5.0),
            Vertex::new(x, y + 5.0),
        ]
    }

    fn tree(words: Vec<Word>) -> TextAnnotation {
        TextAnnotation {
            text: String::new(),
            pages: vec![Page {
                blocks: vec![Block {
                    paragraphs: vec![Paragraph {
                        words,
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_no_targets_no_boxes() {
        let annotation = tree(vec![Word::from_text("合計", quad(0.0, 0.0))]);
        let targets: [&str; 0] = [];

        assert!(locate(&targets, Some(&annotation)).is_empty());
    }

    #[test]
    fn test_absent_tree_no_boxes() {
        assert!(locate(&["2024/01/15"], None).is_empty());
    }

    #[test]
    fn test_single_hit_keeps_exact_quad() {
        let q = [
            Vertex::new(12.0, 30.0),
            Vertex::new(98.0, 28.0),
            Vertex::new(99.0, 51.0),
            Vertex::new(13.0, 53.0),
        ];
        let annotation = tree(vec![
            Word::from_text("請求書", quad(0.0, 0.0)),
            Word::from_text("1,000", q),
        ]);

        let boxes = locate(&["1,000円"], Some(&annotation));

        assert_eq!(boxes, vec![HighlightBox::new(q)]);
    }

    #[test]
    fn test_every_hit_accumulates() {
        let annotation = tree(vec![
            Word::from_text("2024", quad(0.0, 0.0)),
            Word::from_text("/", quad(10.0, 0.0)),
            Word::from_text("合計", quad(20.0, 0.0)),
            Word::from_text("50,000", quad(30.0, 0.0)),
        ]);

        let boxes = locate(&["2024/01/15", "50,000円"], Some(&annotation));

        assert_eq!(
            boxes,
            vec![
                HighlightBox::new(quad(0.0, 0.0)),
                HighlightBox::new(quad(10.0, 0.0)),
                HighlightBox::new(quad(30.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_word_must_be_inside_target_not_reverse() {
        let annotation = tree(vec![Word::from_text("株式会社サンプル商事", quad(0.0, 0.0))]);

        assert!(locate(&["株式会社サンプル"], Some(&annotation)).is_empty());
    }

    #[test]
    fn test_empty_word_never_matches() {
        let annotation = tree(vec![Word {
            bounding_box: Some(BoundingPoly {
                vertices: quad(0.0, 0.0).to_vec(),
            }),
            symbols: Vec::new(),
        }]);

        assert!(locate(&["anything"], Some(&annotation)).is_empty());
    }

    #[test]
    fn test_word_without_quad_is_skipped() {
        let annotation = tree(vec![
            Word {
                bounding_box: None,
                ..Word::from_text("円", quad(0.0, 0.0))
            },
            Word::from_text("円", quad(5.0, 5.0)),
        ]);

        assert_eq!(
            locate(&["1,000円"], Some(&annotation)),
            vec![HighlightBox::new(quad(5.0, 5.0))]
        );
    }

    #[test]
    fn test_locate_json_malformed_tree() {
        let value = serde_json::json!({ "pages": "not a list" });
        assert!(locate_json(&["x"], &value).is_empty());
    }

    #[test]
    fn test_locate_json() {
        let value = serde_json::json!({
            "pages": [{ "blocks": [{ "paragraphs": [{ "words": [{
                "boundingBox": { "vertices": [{}, {"x": 4}, {"x": 4, "y": 2}, {"y": 2}] },
                "symbols": [{ "text": "様" }]
            }]}]}]}]
        });

        let boxes = locate_json(&["山田様"], &value);

        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].vertices[0], Vertex::new(0.0, 0.0));
        assert_eq!(boxes[0].rect(), (0.0, 0.0, 4.0, 2.0));
    }
}
