//! Render requests handed to the drawing collaborators.
//!
//! The core never draws. It describes what the linear barcode renderer and the
//! Data Matrix image loader should show, and [`apply_render_plan`] drives a
//! [`LinearBarcodeRenderer`] through a clear-then-redraw cycle.

use serde::Serialize;

use crate::config::LinearFormat;
use crate::error::Result;
use crate::model::BarcodeId;

/// One linear barcode to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinearBarcodeRequest {
    /// Surface to draw on.
    pub target: BarcodeId,
    /// Raw text to encode.
    pub text: String,
    pub format: LinearFormat,
}

/// Text or image output with a visibility flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shown<T> {
    pub value: T,
    pub visible: bool,
}

/// Everything the presentation layer needs after a generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    /// Visible linear barcodes, in display order.
    pub linear: Vec<LinearBarcodeRequest>,
    /// GS1 element string shown under the Data Matrix.
    pub gs1_text: Shown<String>,
    /// Data Matrix image URL.
    pub data_matrix: Shown<String>,
}

impl RenderPlan {
    /// Whether a linear barcode is requested for `id`.
    pub fn draws(&self, id: BarcodeId) -> bool {
        self.linear.iter().any(|r| r.target == id)
    }
}

/// Linear barcode drawing surface(s), one per [`BarcodeId::LINEAR`] id.
pub trait LinearBarcodeRenderer {
    /// Blank the surface for `target`.
    fn clear(&mut self, target: BarcodeId);

    /// Draw `request.text` on `request.target`.
    fn draw(&mut self, request: &LinearBarcodeRequest) -> Result<()>;
}

/// Clear every linear surface, then draw the requested ones.
///
/// Draw failures are logged and skipped. Returns the number of barcodes drawn.
pub fn apply_render_plan<R: LinearBarcodeRenderer + ?Sized>(
    plan: &RenderPlan,
    renderer: &mut R,
) -> usize {
    for id in BarcodeId::LINEAR {
        renderer.clear(id);
    }

    let mut drawn = 0;
    for request in &plan.linear {
        match renderer.draw(request) {
            Ok(()) => drawn += 1,
            Err(e) => tracing::warn!("Skipping {} barcode: {}", request.target, e),
        }
    }
    drawn
}
