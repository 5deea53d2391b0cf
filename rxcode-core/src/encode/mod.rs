//! GTIN-14 and GS1 string encoders.

mod gs1;
mod gtin;

pub use gs1::{data_matrix_url, format_element_string, parse_calendar_date, to_gs1_date};
pub use gtin::{gtin_check_digit, parse_ndc, to_gtin14};
