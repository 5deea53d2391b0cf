//! NDC to GTIN-14 conversion.

use crate::config::{FALLBACK_GTIN, GTIN_PREFIX, NDC_LEN};

/// Clean an NDC and check that it is exactly ten digits.
///
/// Hyphens and whitespace are removed first. Returns `None` for empty or
/// malformed input.
pub fn parse_ndc(ndc: &str) -> Option<String> {
    if ndc.trim().is_empty() {
        return None;
    }

    let clean: String = ndc
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();

    if clean.len() != NDC_LEN || !clean.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(clean)
}

/// Compute the GTIN check digit for the digits preceding it.
///
/// Weights run 3,1,3,1... from the leftmost digit. Non-digit characters
/// contribute nothing.
pub fn gtin_check_digit(digits: &str) -> u8 {
    let sum: u32 = digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d * 3 } else { d })
        .sum();

    ((10 - sum % 10) % 10) as u8
}

/// Convert an NDC into a 14-digit GTIN.
///
/// Malformed input yields [`FALLBACK_GTIN`] instead of an error.
pub fn to_gtin14(ndc: &str) -> String {
    let Some(clean) = parse_ndc(ndc) else {
        tracing::debug!("NDC '{}' is not 10 digits, using fallback GTIN", ndc);
        return FALLBACK_GTIN.to_string();
    };

    let mut gtin = String::with_capacity(14);
    gtin.push_str(GTIN_PREFIX);
    gtin.push_str(&clean);
    let check = gtin_check_digit(&gtin);
    gtin.push(char::from(b'0' + check));
    gtin
}
