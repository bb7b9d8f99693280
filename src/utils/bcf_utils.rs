//! bcf_utils.rs
//!
//! Utilities for reading typed values from VCF/BCF records.
//!
//! Absent tags are reported as `None` rather than as errors, since most
//! breakend annotations are optional and only apply to certain variant types.

use anyhow::Result;
use rust_htslib::bcf::{self, record::Numeric};

use crate::errors::Error;

/// htslib marker for padding at the end of a per-sample vector.
const VECTOR_END_INTEGER: i32 = i32::MIN + 1;

fn present(value: i32) -> Option<i32> {
    if value.is_missing() || value == VECTOR_END_INTEGER {
        None
    } else {
        Some(value)
    }
}

/// Get chromosome name from a VCF record
///
/// # Arguments
/// * `record` - VCF record
/// * `i` - 1-based index of the record in the file (for error messages)
///
/// # Errors
/// Returns error if the RID is missing or cannot be resolved via the header.
pub(crate) fn get_chrom(record: &bcf::Record, i: usize) -> Result<String> {
    let rid = record.rid().ok_or(Error::RecordMissingChrom { i })?;
    let chrom = record
        .header()
        .rid2name(rid)
        .map_err(|_| Error::RecordMissingChrom { i })?;

    Ok(String::from_utf8_lossy(chrom).into_owned())
}

/// First value of a FORMAT integer tag for each sample.
/// Empty if the tag is not defined in the header or absent from the record.
pub(crate) fn format_integers(record: &bcf::Record, tag: &[u8]) -> Vec<Option<i32>> {
    match record.format(tag).integer() {
        Ok(values) => values
            .iter()
            .map(|sample_values| sample_values.first().and_then(|v| present(*v)))
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Values of an INFO integer tag, `None` if undefined or absent.
pub(crate) fn info_integers(record: &bcf::Record, tag: &[u8]) -> Option<Vec<Option<i32>>> {
    match record.info(tag).integer() {
        Ok(Some(values)) => Some(values.iter().map(|v| present(*v)).collect()),
        _ => None,
    }
}

/// An INFO flag, false if undefined or absent.
pub(crate) fn info_flag(record: &bcf::Record, tag: &[u8]) -> bool {
    record.info(tag).flag().ok().unwrap_or(false)
}

/// PHRED scaled quality of the record, zero if missing.
pub(crate) fn qual(record: &bcf::Record) -> f64 {
    let qual = record.qual();
    if qual.is_missing() || qual.is_nan() {
        0.0
    } else {
        qual as f64
    }
}
