// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Soft filter predicates on structural variant contexts.
//!
//! Every predicate returns true if the call shall be filtered. Each one matches
//! the classification without a wildcard arm, so that a new variant class has to
//! be handled explicitly by every filter.

use itertools::Itertools;

use crate::variants::classification::VariantClassification::*;
use crate::variants::context::StructuralVariantContext;
use crate::variants::support::SampleSupport;

/// Minimum length of a G or C homopolymer in the insert sequence of a single breakend
/// for it to be considered an artifact.
pub const POLY_GC_MIN_RUN: usize = 16;

impl StructuralVariantContext {
    fn normal(&self) -> &SampleSupport {
        self.support().normal()
    }

    fn tumor(&self) -> &SampleSupport {
        self.support().tumor()
    }

    /// Single breakends without any breakend assembly read pair annotation.
    pub fn breakend_assembly_read_pairs_filter(&self) -> bool {
        match self.classification() {
            Single => self
                .record()
                .attributes()
                .breakend_assembly_read_pairs()
                .is_none(),
            ShortDeletion | ShortDuplication | ShortInversion | ShortInsertion | Breakpoint => {
                false
            }
        }
    }

    pub fn imprecise_filter(&self) -> bool {
        self.record().attributes().imprecise()
    }

    /// Normal fragment support exceeding the given fraction of the tumor fragment support.
    /// The threshold is expected to be validated by `FilterParams`.
    pub fn normal_support_filter(&self, max_normal_relative_support: f64) -> bool {
        debug_assert!(max_normal_relative_support >= 0.0);
        let normal = self.normal().fragment_support();
        let tumor = self.tumor().fragment_support();
        match self.classification() {
            Single | ShortDeletion | ShortDuplication | ShortInversion | ShortInsertion
            | Breakpoint => {
                if tumor == 0 {
                    normal > 0
                } else {
                    normal as f64 / tumor as f64 > max_normal_relative_support
                }
            }
        }
    }

    /// Quality below the minimum for the classification. Thresholds are expected
    /// to be validated by `FilterParams`.
    pub fn qual_filter(&self, min_qual_single: f64, min_qual_pair: f64) -> bool {
        debug_assert!(min_qual_single >= 0.0 && min_qual_pair >= 0.0);
        let min_qual = match self.classification() {
            Single => min_qual_single,
            ShortDeletion | ShortDuplication | ShortInversion | ShortInsertion | Breakpoint => {
                min_qual_pair
            }
        };
        self.record().qual() < min_qual
    }

    /// Single breakends with a poly-G or poly-C run in the inserted sequence.
    pub fn poly_gc_filter(&self) -> bool {
        match self.classification() {
            Single => has_poly_gc_run(self.breakends().insert_sequence()),
            ShortDeletion | ShortDuplication | ShortInversion | ShortInsertion | Breakpoint => {
                false
            }
        }
    }

    pub fn homology_length_filter(&self, max_homology_length: u32) -> bool {
        match self.classification() {
            Single => false,
            ShortDeletion | ShortDuplication | ShortInversion | ShortInsertion | Breakpoint => {
                self.record().attributes().homology_length() > max_homology_length
            }
        }
    }

    pub fn homology_length_short_inversion_filter(&self, max_homology_length: u32) -> bool {
        match self.classification() {
            ShortInversion => self.record().attributes().homology_length() > max_homology_length,
            Single | ShortDeletion | ShortDuplication | ShortInsertion | Breakpoint => false,
        }
    }

    /// Long inexact homology. Short duplications are exempt.
    pub fn inexact_homology_length_filter(&self, max_inexact_homology_length: u64) -> bool {
        match self.classification() {
            Single | ShortDuplication => false,
            ShortDeletion | ShortInversion | ShortInsertion | Breakpoint => {
                self.record().attributes().inexact_homology_length() > max_inexact_homology_length
            }
        }
    }

    /// Short deletions with a long inexact homology. Only deletions that are longer
    /// than the inexact homology interval itself are considered.
    pub fn inexact_homology_length_short_del_filter(
        &self,
        max_inexact_homology_length: u64,
    ) -> bool {
        let inexact_homology_length = self.record().attributes().inexact_homology_length();
        match self.classification() {
            ShortDeletion => {
                self.breakends().distance().unwrap_or(0) > inexact_homology_length
                    && inexact_homology_length > max_inexact_homology_length
            }
            Single | ShortDuplication | ShortInversion | ShortInsertion | Breakpoint => false,
        }
    }

    /// Long range calls without any read pair or assembled read pair support.
    pub fn long_dp_support_filter(&self) -> bool {
        match self.classification() {
            ShortInversion | Breakpoint => [self.normal(), self.tumor()]
                .iter()
                .all(|sample| sample.read_pairs() == 0 && sample.assembled_read_pairs() == 0),
            Single | ShortDeletion | ShortDuplication | ShortInsertion => false,
        }
    }

    /// Short calls without split read support in the tumor.
    pub fn short_split_read_tumor_filter(&self) -> bool {
        match self.classification() {
            ShortDeletion | ShortDuplication | ShortInsertion => self.tumor().split_reads() == 0,
            Single | ShortInversion | Breakpoint => false,
        }
    }

    /// Short calls with split read support in the normal.
    pub fn short_split_read_normal_filter(&self) -> bool {
        match self.classification() {
            ShortDeletion | ShortDuplication | ShortInsertion => self.normal().split_reads() > 0,
            Single | ShortInversion | Breakpoint => false,
        }
    }
}

fn has_poly_gc_run(seq: &[u8]) -> bool {
    for (base, run) in &seq.iter().map(|base| base.to_ascii_uppercase()).group_by(|base| *base) {
        if (base == b'G' || base == b'C') && run.count() >= POLY_GC_MIN_RUN {
            return true;
        }
    }
    false
}
