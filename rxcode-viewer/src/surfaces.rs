//! Linear barcode surfaces backed by the `barcoders` CODE128 encoder.

use std::collections::HashMap;

use barcoders::sym::code128::Code128;
use rxcode_core::{BarcodeId, LinearBarcodeRenderer, LinearBarcodeRequest, LinearFormat, RxError};

/// Code set B prefix understood by `barcoders` (printable ASCII).
const CODE_SET_B: char = '\u{0181}';

/// Encoded symbol ready to paint.
#[derive(Debug, Clone)]
pub struct EncodedBarcode {
    /// One entry per module: 1 = bar, 0 = space.
    pub modules: Vec<u8>,
    /// Human-readable text printed under the bars.
    pub text: String,
}

/// One drawing surface per linear barcode id.
#[derive(Debug, Default)]
pub struct BarcodeSurfaces {
    drawn: HashMap<BarcodeId, EncodedBarcode>,
}

impl BarcodeSurfaces {
    /// Symbol currently drawn on `id`'s surface.
    pub fn get(&self, id: BarcodeId) -> Option<&EncodedBarcode> {
        self.drawn.get(&id)
    }
}

impl LinearBarcodeRenderer for BarcodeSurfaces {
    fn clear(&mut self, target: BarcodeId) {
        self.drawn.remove(&target);
    }

    fn draw(&mut self, request: &LinearBarcodeRequest) -> rxcode_core::Result<()> {
        let render_err = |message: String| RxError::Render {
            target: request.target.to_string(),
            message,
        };

        let modules = match request.format {
            LinearFormat::Code128 => {
                let data = format!("{}{}", CODE_SET_B, request.text);
                Code128::new(data)
                    .map_err(|e| render_err(e.to_string()))?
                    .encode()
            }
        };

        self.drawn.insert(
            request.target,
            EncodedBarcode {
                modules,
                text: request.text.clone(),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxcode_core::{apply_render_plan, FieldSet, Generator, GeneratorConfig, MemoryStore};

    fn request(target: BarcodeId, text: &str) -> LinearBarcodeRequest {
        LinearBarcodeRequest {
            target,
            text: text.to_string(),
            format: LinearFormat::Code128,
        }
    }

    #[test]
    fn test_draw_code128_set_b() {
        let mut surfaces = BarcodeSurfaces::default();
        surfaces.draw(&request(BarcodeId::Rx, "RX1")).unwrap();

        let drawn = surfaces.get(BarcodeId::Rx).unwrap();
        assert_eq!(drawn.text, "RX1");
        // Start (11) + 3 symbols (33) + checksum (11) + stop (13)
        assert_eq!(drawn.modules.len(), 68);
        assert_eq!(drawn.modules.first(), Some(&1));
        assert!(drawn.modules.iter().all(|&m| m <= 1));
    }

    #[test]
    fn test_draw_rejects_non_ascii() {
        let mut surfaces = BarcodeSurfaces::default();
        let err = surfaces.draw(&request(BarcodeId::Ndc, "é")).unwrap_err();

        match err {
            RxError::Render { target, .. } => assert_eq!(target, "ndc"),
            other => panic!("Expected Render error, got {:?}", other),
        }
        assert!(surfaces.get(BarcodeId::Ndc).is_none());
    }

    #[test]
    fn test_clear_removes_drawn_symbol() {
        let mut surfaces = BarcodeSurfaces::default();
        surfaces.draw(&request(BarcodeId::Barcode1, "B1")).unwrap();
        surfaces.clear(BarcodeId::Barcode1);
        assert!(surfaces.get(BarcodeId::Barcode1).is_none());
    }

    #[test]
    fn test_render_plan_failure_leaves_surface_blank() {
        let mut generator = Generator::new(MemoryStore::new(), GeneratorConfig::default());
        let mut surfaces = BarcodeSurfaces::default();

        let fields = FieldSet::new("RX1", "0123456789");
        generator.generate(fields).unwrap();
        let plan = generator.render_plan().unwrap();
        assert_eq!(apply_render_plan(&plan, &mut surfaces), 2);
        assert!(surfaces.get(BarcodeId::Rx).is_some());

        let fields = FieldSet::new("RXé", "0123456789");
        generator.generate(fields).unwrap();
        let plan = generator.render_plan().unwrap();
        assert_eq!(apply_render_plan(&plan, &mut surfaces), 1);
        assert!(surfaces.get(BarcodeId::Rx).is_none());
        assert_eq!(surfaces.get(BarcodeId::Ndc).unwrap().text, "0123456789");
    }
}
