// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs;
use std::path::{Path, PathBuf};

use svfilter::variants::record::{RecordAttributesBuilder, VariantRecordBuilder};
use svfilter::variants::support::{SampleSupportBuilder, TumorNormalSupport};
use svfilter::{ClassifierParams, StructuralVariantContext};

/// A breakend call on chromosome 1 with modest default support in both samples
/// (BVF, VF, REF and REFPAIR of 1 in the normal; BVF and VF of 10 in the tumor).
#[derive(Clone)]
pub struct Call {
    pos: u64,
    ref_allele: String,
    alt_allele: String,
    qual: f64,
    attributes: RecordAttributesBuilder,
    normal: SampleSupportBuilder,
    tumor: SampleSupportBuilder,
}

impl Call {
    pub fn new(pos: u64, ref_allele: &str, alt_allele: &str) -> Self {
        Call {
            pos,
            ref_allele: ref_allele.to_owned(),
            alt_allele: alt_allele.to_owned(),
            qual: 100.0,
            attributes: RecordAttributesBuilder::default(),
            normal: SampleSupportBuilder::default()
                .fragment_variant_breakend(1)
                .fragment_variant(1)
                .reference_reads(1)
                .reference_read_pairs(1)
                .clone(),
            tumor: SampleSupportBuilder::default()
                .fragment_variant_breakend(10)
                .fragment_variant(10)
                .reference_reads(1)
                .reference_read_pairs(1)
                .clone(),
        }
    }

    pub fn qual(mut self, qual: f64) -> Self {
        self.qual = qual;
        self
    }

    pub fn imprecise(mut self, imprecise: bool) -> Self {
        self.attributes.imprecise(imprecise);
        self
    }

    pub fn homology_length(mut self, homology_length: u32) -> Self {
        self.attributes.homology_length(homology_length);
        self
    }

    pub fn inexact_homology(mut self, start: i64, end: i64) -> Self {
        self.attributes.inexact_homology((start, end));
        self
    }

    pub fn breakend_assembly_read_pairs(mut self, count: u32) -> Self {
        self.attributes.breakend_assembly_read_pairs(count);
        self
    }

    pub fn fragment_support(mut self, normal: u32, tumor: u32) -> Self {
        self.normal.fragment_variant(normal).fragment_variant_breakend(normal);
        self.tumor.fragment_variant(tumor).fragment_variant_breakend(tumor);
        self
    }

    pub fn split_reads(mut self, normal: u32, tumor: u32) -> Self {
        self.normal.split_reads(normal);
        self.tumor.split_reads(tumor);
        self
    }

    pub fn read_pairs(mut self, normal: u32, tumor: u32) -> Self {
        self.normal.read_pairs(normal);
        self.tumor.read_pairs(tumor);
        self
    }

    pub fn assembled_read_pairs(mut self, normal: u32, tumor: u32) -> Self {
        self.normal.assembled_read_pairs(normal);
        self.tumor.assembled_read_pairs(tumor);
        self
    }

    pub fn to_sv(&self) -> StructuralVariantContext {
        let record = VariantRecordBuilder::default()
            .chrom("1")
            .pos(self.pos)
            .id(Some("id1".to_owned()))
            .ref_allele(self.ref_allele.as_bytes().to_vec())
            .alt_allele(self.alt_allele.as_bytes().to_vec())
            .qual(self.qual)
            .attributes(self.attributes.build().unwrap())
            .support(TumorNormalSupport::new(
                self.normal.build().unwrap(),
                self.tumor.build().unwrap(),
            ))
            .build()
            .unwrap();
        StructuralVariantContext::new(record, &ClassifierParams::default()).unwrap()
    }
}

pub fn create_single() -> Call {
    Call::new(1, "C", ".A")
}

pub fn create_breakpoint() -> Call {
    Call::new(1, "C", "A[2:1000[")
}

pub fn bnd() -> Call {
    Call::new(80, "A", "ATACTGCTACA[2:100[")
}

pub fn short_inv(pos: u64, other_pos: u64) -> Call {
    Call::new(pos, "A", &format!("ATT]1:{}]", other_pos))
}

/// A `t[p[` call inserting 10 bases. It is a deletion if `pos < other_pos`
/// (and the distance is at least 10), a duplication otherwise.
pub fn short_call(pos: u64, other_pos: u64) -> Call {
    Call::new(pos, "A", &format!("ATACTGCTACA[1:{}[", other_pos))
}

pub fn short_del() -> Call {
    short_call(80, 100)
}

pub fn short_dup() -> Call {
    short_call(110, 100)
}

const VCF_HEADER: &str = "##fileformat=VCFv4.2
##contig=<ID=1,length=10000>
##contig=<ID=2,length=10000>
##INFO=<ID=IMPRECISE,Number=0,Type=Flag,Description=\"Imprecise structural variation\">
##INFO=<ID=HOMLEN,Number=1,Type=Integer,Description=\"Length of base pair identical micro-homology at breakpoints\">
##INFO=<ID=IHOMPOS,Number=2,Type=Integer,Description=\"Position of inexact homology\">
##INFO=<ID=BASRP,Number=1,Type=Integer,Description=\"Count of read pairs incorporated into any breakend assembly\">
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=VF,Number=1,Type=Integer,Description=\"Count of fragments supporting the variant breakpoint allele\">
##FORMAT=<ID=BVF,Number=1,Type=Integer,Description=\"Count of fragments providing breakend for the variant allele\">
##FORMAT=<ID=REF,Number=1,Type=Integer,Description=\"Count of reads mapping across this breakend\">
##FORMAT=<ID=REFPAIR,Number=1,Type=Integer,Description=\"Count of reference read pairs spanning this breakend\">
##FORMAT=<ID=SR,Number=1,Type=Integer,Description=\"Count of split reads supporting breakpoint\">
##FORMAT=<ID=RP,Number=1,Type=Integer,Description=\"Count of read pairs supporting breakpoint\">
##FORMAT=<ID=ASRP,Number=1,Type=Integer,Description=\"Count of read pairs incorporated into any breakpoint assembly\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNORMAL\tTUMOR
";

/// Write a VCF with the given tab separated data lines into `dir`.
pub fn write_vcf(dir: &Path, lines: &[&str]) -> PathBuf {
    let path = dir.join("calls.vcf");
    let mut content = VCF_HEADER.to_owned();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}
