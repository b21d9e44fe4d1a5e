//! WASM bindings for Japanese invoice field extraction.
//!
//! OCR runs elsewhere (the browser calls the provider directly); these
//! bindings take its text or annotation tree and return fields and boxes.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use seikyu_core::invoice::rules::{format_yen as format_yen_amount, parse_yen_amount};
use seikyu_core::{scale_boxes, FieldRecord, HighlightBox, InvoiceParser, OcrResult};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract the six display fields from recognized text.
#[wasm_bindgen]
pub fn extract_fields(text: &str) -> Result<JsValue, JsValue> {
    to_js(&seikyu_core::extract(text))
}

/// Raw matched substrings used to find highlight boxes.
#[wasm_bindgen]
pub fn extract_targets(text: &str) -> Result<JsValue, JsValue> {
    to_js(&InvoiceParser::new().parse(text).targets)
}

/// Find word boxes for `targets` in a `fullTextAnnotation` object.
///
/// A missing or malformed annotation yields an empty list.
#[wasm_bindgen]
pub fn locate_highlights(targets: JsValue, annotation: JsValue) -> Result<JsValue, JsValue> {
    let targets: Vec<String> =
        serde_wasm_bindgen::from_value(targets).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let annotation: serde_json::Value =
        serde_wasm_bindgen::from_value(annotation).unwrap_or(serde_json::Value::Null);

    to_js(&seikyu_core::locate_json(&targets, &annotation))
}

/// Scale boxes from natural image pixels to the displayed size.
#[wasm_bindgen]
pub fn scale_highlights(
    boxes: JsValue,
    natural_width: u32,
    natural_height: u32,
    display_width: u32,
    display_height: u32,
) -> Result<JsValue, JsValue> {
    let boxes: Vec<HighlightBox> =
        serde_wasm_bindgen::from_value(boxes).map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_js(&scale_boxes(
        &boxes,
        (natural_width, natural_height),
        (display_width, display_height),
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Analysis {
    fields: FieldRecord,
    targets: Vec<String>,
    boxes: Vec<HighlightBox>,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_size: Option<(u32, u32)>,
}

fn analyze(parser: &InvoiceParser, response_json: &str) -> Result<Analysis, JsValue> {
    let ocr = OcrResult::from_response_json(response_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let extraction = parser.parse(&ocr.text);
    let boxes = seikyu_core::locate(&extraction.targets, ocr.annotation.as_ref());

    Ok(Analysis {
        fields: extraction.record,
        targets: extraction.targets,
        boxes,
        image_size: ocr.annotation.as_ref().and_then(|a| a.page_size()),
        text: ocr.text,
    })
}

/// Fields, targets, and boxes from a raw images:annotate response body.
#[wasm_bindgen]
pub fn analyze_response(response_json: &str) -> Result<JsValue, JsValue> {
    to_js(&analyze(&InvoiceParser::new(), response_json)?)
}

/// Format an amount such as "12800" or "12,800" as "¥12,800".
#[wasm_bindgen]
pub fn format_yen(amount: &str) -> Option<String> {
    parse_yen_amount(amount.trim()).map(|a| format_yen_amount(&a))
}

/// Invoice extractor class for browser use.
#[wasm_bindgen]
pub struct InvoiceExtractor {
    parser: InvoiceParser,
}

#[wasm_bindgen]
impl InvoiceExtractor {
    /// Create a new invoice extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: InvoiceParser::new(),
        }
    }

    /// Extract fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text).record)
    }

    /// Extract fields together with their highlight targets.
    #[wasm_bindgen]
    pub fn extract_with_targets(&self, text: &str) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        struct ExtractResult {
            fields: FieldRecord,
            targets: Vec<String>,
        }

        let extraction = self.parser.parse(text);
        to_js(&ExtractResult {
            fields: extraction.record,
            targets: extraction.targets,
        })
    }

    /// Analyze a raw images:annotate response body.
    #[wasm_bindgen]
    pub fn analyze(&self, response_json: &str) -> Result<JsValue, JsValue> {
        to_js(&analyze(&self.parser, response_json)?)
    }
}

impl Default for InvoiceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const RESPONSE: &str = include_str!("../../seikyu-core/tests/fixtures/receipt_response.json");

    #[wasm_bindgen_test]
    fn test_format_yen() {
        assert_eq!(format_yen("1234567").as_deref(), Some("¥1,234,567"));
        assert_eq!(format_yen("12,800").as_deref(), Some("¥12,800"));
        assert_eq!(format_yen("abc"), None);
        assert_eq!(
            format_yen("98765432109876543210987654321").as_deref(),
            Some("¥98,765,432,109,876,543,210,987,654,321")
        );
    }

    #[wasm_bindgen_test]
    fn test_extract_fields() {
        let value = extract_fields("合計 3,300円").unwrap();
        let record: FieldRecord = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(record.amount, "¥3,300");
        assert_eq!(record.date, "-");
    }

    #[wasm_bindgen_test]
    fn test_analyze_without_panicking_on_clock() {
        let analysis = analyze(&InvoiceParser::new(), RESPONSE).unwrap();

        assert_eq!(analysis.boxes.len(), 10);
        assert_eq!(analysis.image_size, Some((640, 400)));
    }

    #[wasm_bindgen_test]
    fn test_locate_with_malformed_annotation() {
        let targets = serde_wasm_bindgen::to_value(&vec!["2024年3月1日"]).unwrap();
        let boxes = locate_highlights(targets, JsValue::from_str("not a tree")).unwrap();
        let boxes: Vec<HighlightBox> = serde_wasm_bindgen::from_value(boxes).unwrap();

        assert!(boxes.is_empty());
    }
}
