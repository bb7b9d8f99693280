// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::str;

use anyhow::{bail, Result};
use bio_types::genome::{self, AbstractLocus};
use regex::Regex;

use crate::errors::invalid_breakend_notation;

/// Strand orientation of a breakend.
///
/// # Examples
///
/// * `t[p[`: t is `Forward` (sequence continues up to t), p is `Reverse` (sequence continues right of p)
/// * `t]p]`: t is `Forward`, p is `Forward` (sequence left of p, reverse complemented)
/// * `]p]t`: t is `Reverse`, p is `Forward`
/// * `[p[t`: t is `Reverse`, p is `Reverse`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Orientation {
    /// The retained reference sequence ends at the breakend position.
    #[strum(serialize = "+")]
    Forward,
    /// The retained reference sequence starts at the breakend position.
    #[strum(serialize = "-")]
    Reverse,
}

/// One end of a rearrangement. Positions are 1-based, as in VCF.
#[derive(Debug, Clone, PartialEq, Eq, new, Getters, CopyGetters)]
pub struct Breakend {
    #[getset(get = "pub")]
    locus: genome::Locus,
    #[getset(get_copy = "pub")]
    orientation: Orientation,
}

impl Breakend {
    pub fn contig(&self) -> &str {
        self.locus.contig()
    }

    pub fn pos(&self) -> u64 {
        self.locus.pos()
    }
}

/// Parsed breakend notation of a single record. A missing `second` breakend
/// denotes a single (unpaired) breakend.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct BreakendPair {
    first: Breakend,
    second: Option<Breakend>,
    /// Bases inserted at the junction, i.e. the ALT bases without the anchor.
    insert_sequence: Vec<u8>,
}

impl BreakendPair {
    /// Parse the ALT allele of a breakend record at the given 1-based position.
    pub fn parse(chrom: &str, pos: u64, ref_allele: &[u8], alt_allele: &[u8]) -> Result<Self> {
        lazy_static! {
            static ref RE: Regex = Regex::new(
                r"^(?P<before>[A-Za-z]*)(?P<bracket1>[\]\[])(?P<contig>[^\]\[]+):(?P<pos>[0-9]+)(?P<bracket2>[\]\[])(?P<after>[A-Za-z]*)$"
            )
            .unwrap();
        }

        let anchor_len = ref_allele.len();
        let spec = match str::from_utf8(alt_allele) {
            Ok(spec) if anchor_len > 0 => spec,
            _ => bail!(invalid_breakend_notation(alt_allele)),
        };
        let first_locus = genome::Locus::new(chrom.to_owned(), pos);

        if !spec.contains(|c: char| c == '[' || c == ']') {
            let (bases, orientation) = if let Some(bases) = spec.strip_suffix('.') {
                (bases, Orientation::Forward)
            } else if let Some(bases) = spec.strip_prefix('.') {
                (bases, Orientation::Reverse)
            } else {
                bail!(invalid_breakend_notation(alt_allele));
            };
            let insert_sequence = insert_sequence(bases, anchor_len, orientation)
                .ok_or_else(|| invalid_breakend_notation(alt_allele))?;

            return Ok(BreakendPair {
                first: Breakend::new(first_locus, orientation),
                second: None,
                insert_sequence,
            });
        }

        let caps = match RE.captures(spec) {
            Some(caps) => caps,
            None => bail!(invalid_breakend_notation(alt_allele)),
        };
        let bracket = &caps["bracket1"];
        if bracket != &caps["bracket2"] {
            bail!(invalid_breakend_notation(alt_allele));
        }

        let (bases, orientation) = match (&caps["before"], &caps["after"]) {
            (before, "") if !before.is_empty() => (before, Orientation::Forward),
            ("", after) if !after.is_empty() => (after, Orientation::Reverse),
            _ => bail!(invalid_breakend_notation(alt_allele)),
        };
        let insert_sequence = insert_sequence(bases, anchor_len, orientation)
            .ok_or_else(|| invalid_breakend_notation(alt_allele))?;

        let mate_pos: u64 = match caps["pos"].parse() {
            Ok(mate_pos) if mate_pos > 0 => mate_pos,
            _ => bail!(invalid_breakend_notation(alt_allele)),
        };
        // [ means that the mate sequence extends to the right of p.
        let mate_orientation = if bracket == "[" {
            Orientation::Reverse
        } else {
            Orientation::Forward
        };

        Ok(BreakendPair {
            first: Breakend::new(first_locus, orientation),
            second: Some(Breakend::new(
                genome::Locus::new(caps["contig"].to_owned(), mate_pos),
                mate_orientation,
            )),
            insert_sequence,
        })
    }

    pub fn is_single(&self) -> bool {
        self.second.is_none()
    }

    /// Distance between both breakends, if they are located on the same contig.
    pub fn distance(&self) -> Option<u64> {
        self.second.as_ref().and_then(|second| {
            if second.contig() == self.first.contig() {
                Some(if second.pos() > self.first.pos() {
                    second.pos() - self.first.pos()
                } else {
                    self.first.pos() - second.pos()
                })
            } else {
                None
            }
        })
    }

    pub fn insert_len(&self) -> usize {
        self.insert_sequence.len()
    }
}

/// Strip the anchor bases from the breakend bases. The anchor is the leading
/// part for forward breakends and the trailing part for reverse ones.
fn insert_sequence(bases: &str, anchor_len: usize, orientation: Orientation) -> Option<Vec<u8>> {
    if bases.len() < anchor_len || !bases.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let bases = bases.as_bytes();
    Some(match orientation {
        Orientation::Forward => bases[anchor_len..].to_owned(),
        Orientation::Reverse => bases[..bases.len() - anchor_len].to_owned(),
    })
}
