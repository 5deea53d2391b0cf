//! Barcode identifiers and the outputs derived from a field set.

use serde::{Deserialize, Serialize};

/// One of the five barcode panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeId {
    Rx,
    Ndc,
    Gs1,
    Barcode1,
    Barcode2,
}

impl BarcodeId {
    /// All ids in display order.
    pub const ALL: [BarcodeId; 5] = [
        BarcodeId::Rx,
        BarcodeId::Ndc,
        BarcodeId::Gs1,
        BarcodeId::Barcode1,
        BarcodeId::Barcode2,
    ];

    /// Ids drawn as linear barcodes.
    pub const LINEAR: [BarcodeId; 4] = [
        BarcodeId::Rx,
        BarcodeId::Ndc,
        BarcodeId::Barcode1,
        BarcodeId::Barcode2,
    ];

    /// Parse an id from its lowercase name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rx" => Some(BarcodeId::Rx),
            "ndc" => Some(BarcodeId::Ndc),
            "gs1" => Some(BarcodeId::Gs1),
            "barcode1" => Some(BarcodeId::Barcode1),
            "barcode2" => Some(BarcodeId::Barcode2),
            _ => None,
        }
    }

    /// Lowercase name, also used as the render target id.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeId::Rx => "rx",
            BarcodeId::Ndc => "ndc",
            BarcodeId::Gs1 => "gs1",
            BarcodeId::Barcode1 => "barcode1",
            BarcodeId::Barcode2 => "barcode2",
        }
    }

    /// Panel heading.
    pub fn label(&self) -> &'static str {
        match self {
            BarcodeId::Rx => "Rx Code-128",
            BarcodeId::Ndc => "NDC Code-128",
            BarcodeId::Gs1 => "GS1 Data Matrix",
            BarcodeId::Barcode1 => "Barcode 1",
            BarcodeId::Barcode2 => "Barcode 2",
        }
    }

    /// Whether this id is drawn by the linear barcode renderer.
    pub fn is_linear(&self) -> bool {
        !matches!(self, BarcodeId::Gs1)
    }
}

impl std::fmt::Display for BarcodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BarcodeId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!("unknown barcode '{s}', expected one of: rx, ndc, gs1, barcode1, barcode2")
        })
    }
}

/// Strings computed from a field set. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedOutputs {
    /// 14-digit GTIN built from the NDC.
    pub gtin14: String,
    /// `YYMMDD` expiry, or empty.
    pub gs1_date: String,
    /// AI-tagged element string, e.g. `(01)...(17)...`.
    pub gs1_element_string: String,
    /// Data Matrix image request URL embedding the element string.
    pub data_matrix_request: String,
}
