// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{bail, Result};

use crate::errors::Error;
use crate::variants::breakends::{BreakendPair, Orientation};

/// Default maximum distance (exclusive) between two breakends on the same
/// contig for them to be treated as a local event instead of a breakpoint.
pub const DEFAULT_SHORT_VARIANT_DISTANCE: u64 = 1000;

/// Structural variant archetype of a breakend record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum VariantClassification {
    #[strum(serialize = "SGL")]
    Single,
    #[strum(serialize = "DEL")]
    ShortDeletion,
    #[strum(serialize = "DUP")]
    ShortDuplication,
    #[strum(serialize = "INV")]
    ShortInversion,
    #[strum(serialize = "INS")]
    ShortInsertion,
    #[strum(serialize = "BND")]
    Breakpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, CopyGetters)]
#[serde(rename_all = "kebab-case", default)]
pub struct ClassifierParams {
    #[getset(get_copy = "pub")]
    short_variant_distance: u64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        ClassifierParams {
            short_variant_distance: DEFAULT_SHORT_VARIANT_DISTANCE,
        }
    }
}

impl ClassifierParams {
    pub fn new(short_variant_distance: u64) -> Result<Self> {
        let params = ClassifierParams {
            short_variant_distance,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.short_variant_distance == 0 {
            bail!(Error::InvalidShortVariantDistance);
        }
        Ok(())
    }
}

impl VariantClassification {
    /// Classify the given breakends. The first matching rule wins:
    /// single breakends, then inter-contig breakpoints, then local events
    /// (closer than the short variant distance), then long range breakpoints.
    pub fn classify(breakends: &BreakendPair, params: &ClassifierParams) -> Self {
        let first = breakends.first();
        let second = match breakends.second() {
            Some(second) => second,
            None => return VariantClassification::Single,
        };
        let distance = match breakends.distance() {
            Some(distance) => distance,
            None => return VariantClassification::Breakpoint,
        };
        if distance >= params.short_variant_distance {
            return VariantClassification::Breakpoint;
        }

        if first.orientation() == second.orientation() {
            return VariantClassification::ShortInversion;
        }
        let (forward, reverse) = match first.orientation() {
            Orientation::Forward => (first, second),
            Orientation::Reverse => (second, first),
        };
        if forward.pos() < reverse.pos() {
            if breakends.insert_len() as u64 > distance {
                VariantClassification::ShortInsertion
            } else {
                VariantClassification::ShortDeletion
            }
        } else {
            VariantClassification::ShortDuplication
        }
    }

    /// Local deletions, duplications and insertions.
    pub fn is_short(&self) -> bool {
        match self {
            VariantClassification::ShortDeletion
            | VariantClassification::ShortDuplication
            | VariantClassification::ShortInsertion => true,
            VariantClassification::Single
            | VariantClassification::ShortInversion
            | VariantClassification::Breakpoint => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn classify(pos: u64, alt: &str) -> VariantClassification {
        let breakends = BreakendPair::parse("1", pos, b"A", alt.as_bytes()).unwrap();
        VariantClassification::classify(&breakends, &ClassifierParams::default())
    }

    #[test]
    fn test_single() {
        assert_eq!(classify(1, ".A"), VariantClassification::Single);
        assert_eq!(classify(1, "AGGGG."), VariantClassification::Single);
    }

    #[test]
    fn test_inter_contig() {
        assert_eq!(
            classify(80, "ATACTGCTACA[2:100["),
            VariantClassification::Breakpoint
        );
    }

    #[test]
    fn test_deletion_and_duplication() {
        assert_eq!(
            classify(80, "ATACTGCTACA[1:100["),
            VariantClassification::ShortDeletion
        );
        assert_eq!(
            classify(100, "ATACTGCTACA[1:110["),
            VariantClassification::ShortDeletion
        );
        assert_eq!(
            classify(110, "ATACTGCTACA[1:100["),
            VariantClassification::ShortDuplication
        );
        // mate record of a deletion
        assert_eq!(classify(100, "]1:80]A"), VariantClassification::ShortDeletion);
        assert_eq!(classify(80, "]1:100]A"), VariantClassification::ShortDuplication);
    }

    #[test]
    fn test_insertion() {
        assert_eq!(
            classify(100, "ACGTACGTAC[1:105["),
            VariantClassification::ShortInsertion
        );
        assert_eq!(
            classify(100, "ACGTA[1:105["),
            VariantClassification::ShortDeletion
        );
    }

    #[test]
    fn test_inversion() {
        assert_eq!(classify(100, "ATT]1:110]"), VariantClassification::ShortInversion);
        assert_eq!(classify(100, "[1:110[TTA"), VariantClassification::ShortInversion);
        assert_eq!(classify(100, "ATT]1:5000]"), VariantClassification::Breakpoint);
    }

    #[test]
    fn test_short_distance_is_exclusive() {
        assert_eq!(classify(100, "A[1:1099["), VariantClassification::ShortDeletion);
        assert_eq!(classify(100, "A[1:1100["), VariantClassification::Breakpoint);

        let breakends = BreakendPair::parse("1", 100, b"A", b"A[1:1100[").unwrap();
        let params = ClassifierParams::new(2000).unwrap();
        assert_eq!(
            VariantClassification::classify(&breakends, &params),
            VariantClassification::ShortDeletion
        );
    }

    #[test]
    fn test_invalid_params() {
        assert!(ClassifierParams::new(0).is_err());
    }

    #[test]
    fn test_is_short() {
        let short: Vec<_> = VariantClassification::iter()
            .filter(|c| c.is_short())
            .collect();
        assert_eq!(
            short,
            vec![
                VariantClassification::ShortDeletion,
                VariantClassification::ShortDuplication,
                VariantClassification::ShortInsertion
            ]
        );
    }
}
