//! rxcode-core - Core library for pharmacy barcode generation.
//!
//! This library converts National Drug Codes into GS1 GTIN-14 identifiers,
//! formats GS1 element strings for Data Matrix symbols, keeps a bounded
//! history of generated field sets and tracks which barcode panel is focused.
//! Drawing is left to the caller through [`render::LinearBarcodeRenderer`].
//!
//! # Example
//!
//! ```
//! use rxcode_core::{FieldSet, Generator, GeneratorConfig, MemoryStore};
//!
//! let mut generator = Generator::new(MemoryStore::new(), GeneratorConfig::default());
//! let fields = FieldSet::new("RX1", "0123-4567-89").with_expiration("2025-03-07");
//! let generation = generator.generate(fields).unwrap();
//! assert_eq!(generation.outputs.gtin14, "10301234567893");
//! assert_eq!(generation.outputs.gs1_element_string, "(01)10301234567893(17)250307");
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod generate;
pub mod history;
pub mod model;
pub mod render;
pub mod selection;
pub mod validation;

// Re-exports for convenience
pub use config::{GeneratorConfig, LinearFormat};
pub use encode::{format_element_string, to_gs1_date, to_gtin14};
pub use error::{ErrorCode, Result, RxError};
pub use generate::{derive_outputs, visible_ids, Generation, Generator};
pub use history::{FileStore, KeyValueStore, MemoryStore, RecordStore};
pub use model::{BarcodeId, DerivedOutputs, FieldSet, HistoryRecord};
pub use render::{apply_render_plan, LinearBarcodeRenderer, LinearBarcodeRequest, RenderPlan};
pub use selection::Selection;
pub use validation::{validate_fields, ValidationResult};

/// Generate barcodes for `fields` using a file-backed history in `data_dir`.
///
/// This is the one-shot pipeline used by the command-line tool:
/// 1. Open the history store
/// 2. Validate and log warnings
/// 3. Generate with the given panel focus, appending to history
pub fn generate_with_file_store(
    data_dir: &std::path::Path,
    fields: FieldSet,
    focus: Option<BarcodeId>,
) -> Result<Generation> {
    let store = FileStore::open(data_dir)?;
    let mut generator = Generator::new(store, GeneratorConfig::default());
    generator.set_selection(Selection::from(focus));

    let validation = validate_fields(&fields);
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }

    generator.generate(fields).cloned()
}
