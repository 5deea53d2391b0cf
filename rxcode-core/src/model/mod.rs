//! Data model types for barcode generation.

mod barcode;
mod fields;

pub use barcode::{BarcodeId, DerivedOutputs};
pub use fields::{FieldSet, HistoryRecord};
