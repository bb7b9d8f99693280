// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::convert::TryFrom;

use anyhow::{bail, Result};
use rust_htslib::bcf;
use strum::IntoEnumIterator;

use crate::errors::{invalid_bcf_record, Error};
use crate::utils::bcf_utils::format_integers;

/// Per-sample FORMAT fields carrying read support of a breakend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum SupportField {
    #[strum(serialize = "VF")]
    FragmentVariant,
    #[strum(serialize = "BVF")]
    FragmentVariantBreakend,
    #[strum(serialize = "REF")]
    ReferenceReads,
    #[strum(serialize = "REFPAIR")]
    ReferenceReadPairs,
    #[strum(serialize = "SR")]
    SplitReads,
    #[strum(serialize = "RP")]
    ReadPairs,
    #[strum(serialize = "ASRP")]
    AssembledReadPairs,
    #[strum(serialize = "BASRP")]
    BreakendAssemblyReadPairs,
}

impl SupportField {
    pub fn tag(self) -> &'static [u8] {
        let tag: &'static str = self.into();
        tag.as_bytes()
    }
}

/// Support counts of one sample. Fields absent from the genotype are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, CopyGetters)]
#[builder(default)]
#[getset(get_copy = "pub")]
pub struct SampleSupport {
    fragment_variant: u32,
    fragment_variant_breakend: u32,
    reference_reads: u32,
    reference_read_pairs: u32,
    split_reads: u32,
    read_pairs: u32,
    assembled_read_pairs: u32,
    breakend_assembly_read_pairs: u32,
}

impl SampleSupport {
    pub fn get(&self, field: SupportField) -> u32 {
        match field {
            SupportField::FragmentVariant => self.fragment_variant,
            SupportField::FragmentVariantBreakend => self.fragment_variant_breakend,
            SupportField::ReferenceReads => self.reference_reads,
            SupportField::ReferenceReadPairs => self.reference_read_pairs,
            SupportField::SplitReads => self.split_reads,
            SupportField::ReadPairs => self.read_pairs,
            SupportField::AssembledReadPairs => self.assembled_read_pairs,
            SupportField::BreakendAssemblyReadPairs => self.breakend_assembly_read_pairs,
        }
    }

    fn set(&mut self, field: SupportField, value: u32) {
        let entry = match field {
            SupportField::FragmentVariant => &mut self.fragment_variant,
            SupportField::FragmentVariantBreakend => &mut self.fragment_variant_breakend,
            SupportField::ReferenceReads => &mut self.reference_reads,
            SupportField::ReferenceReadPairs => &mut self.reference_read_pairs,
            SupportField::SplitReads => &mut self.split_reads,
            SupportField::ReadPairs => &mut self.read_pairs,
            SupportField::AssembledReadPairs => &mut self.assembled_read_pairs,
            SupportField::BreakendAssemblyReadPairs => &mut self.breakend_assembly_read_pairs,
        };
        *entry = value;
    }

    /// Fragments supporting the variant, counting both pair and breakend support.
    pub fn fragment_support(&self) -> u64 {
        self.fragment_variant as u64 + self.fragment_variant_breakend as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Sample {
    #[strum(serialize = "normal")]
    Normal,
    #[strum(serialize = "tumor")]
    Tumor,
}

/// Positions of the normal and the tumor sample in the BCF/VCF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, CopyGetters)]
#[serde(rename_all = "kebab-case", default)]
#[getset(get_copy = "pub")]
pub struct SampleOrdinals {
    normal: usize,
    tumor: usize,
}

impl Default for SampleOrdinals {
    fn default() -> Self {
        SampleOrdinals {
            normal: 0,
            tumor: 1,
        }
    }
}

impl SampleOrdinals {
    pub fn new(normal: usize, tumor: usize) -> Result<Self> {
        if normal == tumor {
            bail!(Error::InvalidSampleOrdinals { ordinal: normal });
        }
        Ok(SampleOrdinals { normal, tumor })
    }

    /// Check that both ordinals refer to samples of a header with `count` samples.
    pub fn check(&self, count: usize) -> Result<()> {
        for &ordinal in &[self.normal, self.tumor] {
            if ordinal >= count {
                bail!(Error::SampleOrdinalOutOfRange { ordinal, count });
            }
        }
        Ok(())
    }

    fn ordinal(&self, sample: Sample) -> usize {
        match sample {
            Sample::Normal => self.normal,
            Sample::Tumor => self.tumor,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, new, Getters)]
#[getset(get = "pub")]
pub struct TumorNormalSupport {
    normal: SampleSupport,
    tumor: SampleSupport,
}

impl TumorNormalSupport {
    pub fn sample(&self, sample: Sample) -> &SampleSupport {
        match sample {
            Sample::Normal => &self.normal,
            Sample::Tumor => &self.tumor,
        }
    }

    fn sample_mut(&mut self, sample: Sample) -> &mut SampleSupport {
        match sample {
            Sample::Normal => &mut self.normal,
            Sample::Tumor => &mut self.tumor,
        }
    }

    /// Extract the support fields of normal and tumor from a BCF record.
    /// Missing tags, values and samples yield zero counts; negative counts are an error.
    pub fn from_bcf(record: &bcf::Record, chrom: &str, ordinals: &SampleOrdinals) -> Result<Self> {
        let mut support = TumorNormalSupport::default();
        for field in SupportField::iter() {
            let values = format_integers(record, field.tag());
            for &sample in &[Sample::Normal, Sample::Tumor] {
                let value = match values.get(ordinals.ordinal(sample)) {
                    Some(Some(value)) => *value,
                    _ => continue,
                };
                let count = u32::try_from(value).map_err(|_| {
                    invalid_bcf_record(
                        chrom,
                        record.pos() + 1,
                        &format!("negative {} value {} in {} sample", field, value, sample),
                    )
                })?;
                support.sample_mut(sample).set(field, count);
            }
        }
        Ok(support)
    }
}
