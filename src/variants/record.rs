// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Result;
use rust_htslib::bcf;

use crate::utils::bcf_utils::{get_chrom, info_flag, info_integers, qual};
use crate::variants::support::{SampleOrdinals, TumorNormalSupport};

/// Record level annotations of a breakend call. Each field has a fixed default
/// that applies when the corresponding INFO tag is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Getters, CopyGetters)]
#[builder(default)]
pub struct RecordAttributes {
    /// IMPRECISE; false if absent.
    #[getset(get_copy = "pub")]
    imprecise: bool,
    /// HOMLEN; 0 if absent.
    #[getset(get_copy = "pub")]
    homology_length: u32,
    /// IHOMPOS, the inexact homology interval relative to the breakend.
    #[getset(get_copy = "pub")]
    #[builder(setter(strip_option))]
    inexact_homology: Option<(i64, i64)>,
    /// BASRP; only its presence on the record is evaluated.
    #[getset(get_copy = "pub")]
    #[builder(setter(strip_option))]
    breakend_assembly_read_pairs: Option<u32>,
}

impl RecordAttributes {
    /// Length of the IHOMPOS interval; 0 if absent.
    pub fn inexact_homology_length(&self) -> u64 {
        self.inexact_homology
            .map_or(0, |(start, end)| end.saturating_sub(start).max(0) as u64)
    }

    pub fn from_bcf(record: &bcf::Record) -> Self {
        let first = |tag: &[u8]| {
            info_integers(record, tag)
                .and_then(|values| values.first().copied().flatten())
        };

        let inexact_homology = info_integers(record, b"IHOMPOS").and_then(|values| {
            match (values.get(0).copied().flatten(), values.get(1).copied().flatten()) {
                (Some(start), Some(end)) => Some((start as i64, end as i64)),
                _ => None,
            }
        });

        RecordAttributes {
            imprecise: info_flag(record, b"IMPRECISE"),
            homology_length: first(b"HOMLEN").map_or(0, |len| len.max(0) as u32),
            inexact_homology,
            breakend_assembly_read_pairs: first(b"BASRP").map(|count| count.max(0) as u32),
        }
    }
}

/// A breakend call with all fields needed for classification and filtering.
#[derive(Debug, Clone, PartialEq, Builder, Getters, CopyGetters)]
pub struct VariantRecord {
    #[getset(get = "pub")]
    #[builder(setter(into))]
    chrom: String,
    /// 1-based position.
    #[getset(get_copy = "pub")]
    pos: u64,
    #[getset(get = "pub")]
    #[builder(default, setter(into))]
    id: Option<String>,
    #[getset(get = "pub")]
    #[builder(setter(into))]
    ref_allele: Vec<u8>,
    #[getset(get = "pub")]
    #[builder(setter(into))]
    alt_allele: Vec<u8>,
    /// PHRED scaled quality.
    #[getset(get_copy = "pub")]
    #[builder(default)]
    qual: f64,
    #[getset(get = "pub")]
    #[builder(default)]
    attributes: RecordAttributes,
    #[getset(get = "pub")]
    #[builder(default)]
    support: TumorNormalSupport,
}

impl VariantRecord {
    /// Read a breakend call from a BCF record. Only the first ALT allele is considered.
    ///
    /// # Arguments
    ///
    /// * `record` - the BCF record
    /// * `i` - 1-based index of the record in the file (for error messages)
    /// * `ordinals` - positions of normal and tumor sample in the header
    pub fn from_bcf(record: &bcf::Record, i: usize, ordinals: &SampleOrdinals) -> Result<Self> {
        let chrom = get_chrom(record, i)?;
        let alleles = record.alleles();
        let ref_allele = alleles.get(0).map_or_else(Vec::new, |a| a.to_vec());
        let alt_allele = alleles.get(1).map_or_else(Vec::new, |a| a.to_vec());
        let id = record.id();
        let id = if id == b"." {
            None
        } else {
            Some(String::from_utf8_lossy(&id).into_owned())
        };

        Ok(VariantRecord {
            support: TumorNormalSupport::from_bcf(record, &chrom, ordinals)?,
            chrom,
            pos: record.pos() as u64 + 1,
            id,
            ref_allele,
            alt_allele,
            qual: qual(record),
            attributes: RecordAttributes::from_bcf(record),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inexact_homology_length() {
        let attributes = RecordAttributesBuilder::default()
            .inexact_homology((1, 51))
            .build()
            .unwrap();
        assert_eq!(attributes.inexact_homology_length(), 50);
        assert_eq!(RecordAttributes::default().inexact_homology_length(), 0);

        let attributes = RecordAttributesBuilder::default()
            .inexact_homology((-20, 15))
            .build()
            .unwrap();
        assert_eq!(attributes.inexact_homology_length(), 35);
    }

    #[test]
    fn test_builder_defaults() {
        let record = VariantRecordBuilder::default()
            .chrom("1")
            .pos(100)
            .ref_allele(b"A".to_vec())
            .alt_allele(b"A.".to_vec())
            .build()
            .unwrap();
        assert_eq!(record.qual(), 0.0);
        assert!(!record.attributes().imprecise());
        assert_eq!(record.attributes().breakend_assembly_read_pairs(), None);
        assert_eq!(record.id(), &None);
    }
}
