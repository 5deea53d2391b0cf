//! Configuration constants and settings for the generator.

use serde::{Deserialize, Serialize};

/// Persistence key holding the history array.
pub const HISTORY_KEY: &str = "barcodeValues";

/// Maximum number of history records kept.
pub const HISTORY_CAPACITY: usize = 10;

/// Number of digits in a National Drug Code.
pub const NDC_LEN: usize = 10;

/// Prefix turning a 10-digit NDC into the first 13 digits of a GTIN-14.
pub const GTIN_PREFIX: &str = "103";

/// GTIN returned for a missing or malformed NDC.
pub const FALLBACK_GTIN: &str = "10300000000005";

/// External service that renders GS1 Data Matrix images.
pub const DATA_MATRIX_ENDPOINT: &str = "https://bwipjs-api.metafloor.com/";

/// Symbology identifier passed to the Data Matrix service.
pub const DATA_MATRIX_SYMBOLOGY: &str = "gs1datamatrix";

/// Linear barcode symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinearFormat {
    #[default]
    Code128,
}

impl std::fmt::Display for LinearFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinearFormat::Code128 => write!(f, "CODE128"),
        }
    }
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL of the Data Matrix image service.
    pub data_matrix_endpoint: String,
    /// Value of the `bcid` query parameter.
    pub data_matrix_symbology: String,
    /// Symbology used for every linear barcode.
    pub linear_format: LinearFormat,
    /// History capacity.
    pub history_capacity: usize,
    /// Persistence key for the history array.
    pub history_key: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            data_matrix_endpoint: DATA_MATRIX_ENDPOINT.to_string(),
            data_matrix_symbology: DATA_MATRIX_SYMBOLOGY.to_string(),
            linear_format: LinearFormat::Code128,
            history_capacity: HISTORY_CAPACITY,
            history_key: HISTORY_KEY.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration pointing at a different Data Matrix service.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            data_matrix_endpoint: endpoint.into(),
            ..Default::default()
        }
    }
}
