// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid BND record: ALT {spec} does not follow breakend notation")]
    InvalidBreakendNotation { spec: String },
    #[error("invalid filter parameter {name}={value}: must be a non-negative number")]
    InvalidFilterParameter { name: String, value: f64 },
    #[error("invalid classifier parameter: short variant distance must be positive")]
    InvalidShortVariantDistance,
    #[error("normal and tumor sample ordinals must differ (both are {ordinal})")]
    InvalidSampleOrdinals { ordinal: usize },
    #[error("sample ordinal {ordinal} exceeds the {count} samples in the BCF/VCF header")]
    SampleOrdinalOutOfRange { ordinal: usize, count: usize },
    #[error("record {i} in BCF/VCF does not define a chromosome")]
    RecordMissingChrom { i: usize },
    #[error("invalid BCF record at {chrom}:{pos}: {msg}")]
    InvalidBCFRecord {
        chrom: String,
        pos: i64,
        msg: String,
    },
}

pub(crate) fn invalid_bcf_record(chrom: &str, pos: i64, msg: &str) -> Error {
    Error::InvalidBCFRecord {
        chrom: chrom.to_owned(),
        pos,
        msg: msg.to_owned(),
    }
}

pub(crate) fn invalid_breakend_notation(spec: &[u8]) -> Error {
    Error::InvalidBreakendNotation {
        spec: String::from_utf8_lossy(spec).into_owned(),
    }
}
