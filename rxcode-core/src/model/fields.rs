//! Operator input and the history records built from it.

use serde::{Deserialize, Serialize};

use super::BarcodeId;

/// One set of operator-entered values.
///
/// Serialized with the camelCase keys used by the persisted history array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSet {
    /// Prescription code.
    pub rx: String,
    /// National Drug Code, hyphens allowed.
    pub ndc: String,
    /// Batch/lot number.
    #[serde(default)]
    pub lot_number: String,
    /// Serial number.
    #[serde(default)]
    pub serial_number: String,
    /// Expiration date as entered (`YYYY-MM-DD`), may be empty.
    #[serde(default)]
    pub expiration_date: String,
    /// Free-text payload for the first extra barcode.
    #[serde(default)]
    pub barcode1: String,
    /// Free-text payload for the second extra barcode.
    #[serde(default)]
    pub barcode2: String,
}

impl FieldSet {
    /// Create a field set with only the required fields.
    pub fn new(rx: impl Into<String>, ndc: impl Into<String>) -> Self {
        Self {
            rx: rx.into(),
            ndc: ndc.into(),
            ..Default::default()
        }
    }

    /// Set the lot number.
    pub fn with_lot(mut self, lot: impl Into<String>) -> Self {
        self.lot_number = lot.into();
        self
    }

    /// Set the serial number.
    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = serial.into();
        self
    }

    /// Set the expiration date.
    pub fn with_expiration(mut self, date: impl Into<String>) -> Self {
        self.expiration_date = date.into();
        self
    }

    /// Set the two free-text barcode payloads.
    pub fn with_extra_barcodes(
        mut self,
        barcode1: impl Into<String>,
        barcode2: impl Into<String>,
    ) -> Self {
        self.barcode1 = barcode1.into();
        self.barcode2 = barcode2.into();
        self
    }

    /// Names of required fields that are empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.rx.is_empty() {
            missing.push("rx");
        }
        if self.ndc.is_empty() {
            missing.push("ndc");
        }
        missing
    }

    /// Raw text drawn as a linear barcode for `id`.
    ///
    /// Returns `None` for the GS1 Data Matrix, whose payload is derived.
    pub fn payload(&self, id: BarcodeId) -> Option<&str> {
        match id {
            BarcodeId::Rx => Some(&self.rx),
            BarcodeId::Ndc => Some(&self.ndc),
            BarcodeId::Gs1 => None,
            BarcodeId::Barcode1 => Some(&self.barcode1),
            BarcodeId::Barcode2 => Some(&self.barcode2),
        }
    }

    /// Whether `id` has something to show once generation has happened.
    ///
    /// Rx, NDC and GS1 always do; the extra barcodes only when non-empty.
    pub fn has_payload(&self, id: BarcodeId) -> bool {
        match id {
            BarcodeId::Barcode1 => !self.barcode1.is_empty(),
            BarcodeId::Barcode2 => !self.barcode2.is_empty(),
            BarcodeId::Rx | BarcodeId::Ndc | BarcodeId::Gs1 => true,
        }
    }

    /// One-line summary used by history listings.
    pub fn summary(&self) -> String {
        [
            self.rx.as_str(),
            self.ndc.as_str(),
            self.lot_number.as_str(),
            self.serial_number.as_str(),
            self.expiration_date.as_str(),
            self.barcode1.as_str(),
            self.barcode2.as_str(),
        ]
        .join(" | ")
    }
}

/// A stored field set with its creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(flatten)]
    pub fields: FieldSet,
    /// Creation instant in Unix milliseconds.
    pub timestamp: i64,
}

impl HistoryRecord {
    pub fn new(fields: FieldSet, timestamp: i64) -> Self {
        Self { fields, timestamp }
    }

    /// Creation instant as a UTC date-time, if representable.
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_required() {
        assert_eq!(FieldSet::default().missing_required(), vec!["rx", "ndc"]);
        assert_eq!(FieldSet::new("RX1", "").missing_required(), vec!["ndc"]);
        assert!(FieldSet::new("RX1", "0123456789")
            .missing_required()
            .is_empty());
    }

    #[test]
    fn test_whitespace_counts_as_filled() {
        assert!(FieldSet::new(" ", " ").missing_required().is_empty());
    }

    #[test]
    fn test_has_payload() {
        let fields = FieldSet::new("RX1", "0123456789").with_extra_barcodes("A", "");
        assert!(fields.has_payload(BarcodeId::Rx));
        assert!(fields.has_payload(BarcodeId::Gs1));
        assert!(fields.has_payload(BarcodeId::Barcode1));
        assert!(!fields.has_payload(BarcodeId::Barcode2));
    }

    #[test]
    fn test_payload() {
        let fields = FieldSet::new("RX1", "0123456789").with_extra_barcodes("A", "B");
        assert_eq!(fields.payload(BarcodeId::Rx), Some("RX1"));
        assert_eq!(fields.payload(BarcodeId::Ndc), Some("0123456789"));
        assert_eq!(fields.payload(BarcodeId::Gs1), None);
        assert_eq!(fields.payload(BarcodeId::Barcode2), Some("B"));
    }

    #[test]
    fn test_record_json_keys() {
        let record = HistoryRecord::new(
            FieldSet::new("RX1", "0123456789")
                .with_lot("L1")
                .with_expiration("2025-03-07"),
            1_700_000_000_000,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["rx"], "RX1");
        assert_eq!(json["lotNumber"], "L1");
        assert_eq!(json["expirationDate"], "2025-03-07");
        assert_eq!(json["barcode1"], "");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_record_without_extra_barcodes() {
        let json = r#"{"rx":"RX1","ndc":"0123456789","lotNumber":"","serialNumber":"","expirationDate":"","timestamp":5}"#;
        let record: HistoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.fields.barcode1, "");
        assert_eq!(record.fields.barcode2, "");
        assert_eq!(record.timestamp, 5);
    }

    #[test]
    fn test_summary() {
        let fields = FieldSet::new("RX1", "0123456789").with_lot("L1");
        assert_eq!(fields.summary(), "RX1 | 0123456789 | L1 |  |  |  | ");
    }
}
