// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Result;

use crate::variants::breakends::BreakendPair;
use crate::variants::classification::{ClassifierParams, VariantClassification};
use crate::variants::record::VariantRecord;
use crate::variants::support::TumorNormalSupport;

/// Read-only view on a single breakend call: its parsed breakends, its
/// classification and its support. The soft filter predicates are implemented
/// on this type in `crate::filtration::filters`.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct StructuralVariantContext {
    #[getset(get = "pub")]
    record: VariantRecord,
    #[getset(get = "pub")]
    breakends: BreakendPair,
    #[getset(get_copy = "pub")]
    classification: VariantClassification,
}

impl StructuralVariantContext {
    /// Fails if the ALT allele does not follow breakend notation.
    pub fn new(record: VariantRecord, params: &ClassifierParams) -> Result<Self> {
        let breakends = BreakendPair::parse(
            record.chrom(),
            record.pos(),
            record.ref_allele(),
            record.alt_allele(),
        )?;
        let classification = VariantClassification::classify(&breakends, params);

        Ok(StructuralVariantContext {
            record,
            breakends,
            classification,
        })
    }

    pub fn support(&self) -> &TumorNormalSupport {
        self.record.support()
    }

    pub fn is_single(&self) -> bool {
        self.classification == VariantClassification::Single
    }

    pub fn is_short(&self) -> bool {
        self.classification.is_short()
    }

    pub fn is_short_del(&self) -> bool {
        self.classification == VariantClassification::ShortDeletion
    }

    pub fn is_short_dup(&self) -> bool {
        self.classification == VariantClassification::ShortDuplication
    }

    pub fn is_short_ins(&self) -> bool {
        self.classification == VariantClassification::ShortInsertion
    }

    pub fn is_short_inv(&self) -> bool {
        self.classification == VariantClassification::ShortInversion
    }
}
