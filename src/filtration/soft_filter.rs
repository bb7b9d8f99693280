// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::Path;

use anyhow::Result;
use itertools::Itertools;
use linear_map::LinearMap;
use rayon::prelude::*;
use rust_htslib::bcf;
use rust_htslib::bcf::Read;
use strum::IntoEnumIterator;

use crate::filtration::params::{FilterConfig, FilterParams};
use crate::variants::context::StructuralVariantContext;
use crate::variants::record::VariantRecord;

/// Number of records that are read before being evaluated in parallel.
const BATCH_SIZE: usize = 10_000;

/// The soft filters, in the order in which they are reported.
/// The serialization is used as FILTER ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum SoftFilter {
    #[strum(serialize = "breakendAssemblyReadPairs")]
    BreakendAssemblyReadPairs,
    #[strum(serialize = "imprecise")]
    Imprecise,
    #[strum(serialize = "normalSupport")]
    NormalSupport,
    #[strum(serialize = "qual")]
    Qual,
    #[strum(serialize = "polyGC")]
    PolyGC,
    #[strum(serialize = "homologyLength")]
    HomologyLength,
    #[strum(serialize = "homologyLengthShortInversion")]
    HomologyLengthShortInversion,
    #[strum(serialize = "inexactHomologyLength")]
    InexactHomologyLength,
    #[strum(serialize = "inexactHomologyLengthShortDel")]
    InexactHomologyLengthShortDel,
    #[strum(serialize = "longDPSupport")]
    LongDPSupport,
    #[strum(serialize = "shortSRTumorSupport")]
    ShortSplitReadTumor,
    #[strum(serialize = "shortSRNormalSupport")]
    ShortSplitReadNormal,
}

impl SoftFilter {
    pub fn id(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            SoftFilter::BreakendAssemblyReadPairs => {
                "Single breakend without breakend assembly read pair support"
            }
            SoftFilter::Imprecise => "Imprecise variant",
            SoftFilter::NormalSupport => {
                "Normal fragment support exceeds the allowed fraction of the tumor fragment support"
            }
            SoftFilter::Qual => "Quality below the minimum for single breakends or breakpoints",
            SoftFilter::PolyGC => "Single breakend inserting a poly-G or poly-C run",
            SoftFilter::HomologyLength => "Homology length exceeds the maximum",
            SoftFilter::HomologyLengthShortInversion => {
                "Homology length of short inversion exceeds the maximum"
            }
            SoftFilter::InexactHomologyLength => "Inexact homology length exceeds the maximum",
            SoftFilter::InexactHomologyLengthShortDel => {
                "Inexact homology length of short deletion exceeds the maximum"
            }
            SoftFilter::LongDPSupport => {
                "Long range variant without read pair or assembled read pair support"
            }
            SoftFilter::ShortSplitReadTumor => "Short variant without split read support in tumor",
            SoftFilter::ShortSplitReadNormal => "Short variant with split read support in normal",
        }
    }

    /// Header line declaring this filter.
    pub fn header_record(self) -> String {
        format!(
            "##FILTER=<ID={},Description=\"{}\">",
            self.id(),
            self.description()
        )
    }

    pub fn is_filtered(self, sv: &StructuralVariantContext, params: &FilterParams) -> bool {
        match self {
            SoftFilter::BreakendAssemblyReadPairs => sv.breakend_assembly_read_pairs_filter(),
            SoftFilter::Imprecise => sv.imprecise_filter(),
            SoftFilter::NormalSupport => {
                sv.normal_support_filter(params.max_normal_relative_support())
            }
            SoftFilter::Qual => sv.qual_filter(params.min_qual_single(), params.min_qual_pair()),
            SoftFilter::PolyGC => sv.poly_gc_filter(),
            SoftFilter::HomologyLength => sv.homology_length_filter(params.max_homology_length()),
            SoftFilter::HomologyLengthShortInversion => sv
                .homology_length_short_inversion_filter(
                    params.max_homology_length_short_inversion(),
                ),
            SoftFilter::InexactHomologyLength => {
                sv.inexact_homology_length_filter(params.max_inexact_homology_length())
            }
            SoftFilter::InexactHomologyLengthShortDel => sv
                .inexact_homology_length_short_del_filter(
                    params.max_inexact_homology_length_short_del(),
                ),
            SoftFilter::LongDPSupport => sv.long_dp_support_filter(),
            SoftFilter::ShortSplitReadTumor => sv.short_split_read_tumor_filter(),
            SoftFilter::ShortSplitReadNormal => sv.short_split_read_normal_filter(),
        }
    }
}

/// Outcome of every soft filter for one call, in `SoftFilter` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDecision {
    outcomes: LinearMap<SoftFilter, bool>,
}

impl FilterDecision {
    pub fn new(sv: &StructuralVariantContext, params: &FilterParams) -> Self {
        FilterDecision {
            outcomes: SoftFilter::iter()
                .map(|filter| (filter, filter.is_filtered(sv, params)))
                .collect(),
        }
    }

    pub fn is_filtered(&self, filter: SoftFilter) -> bool {
        self.outcomes.get(&filter).copied().unwrap_or(false)
    }

    /// The filters that the call fails.
    pub fn filtered(&self) -> impl Iterator<Item = SoftFilter> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, filtered)| **filtered)
            .map(|(filter, _)| *filter)
    }

    pub fn is_pass(&self) -> bool {
        self.filtered().next().is_none()
    }

    /// Comma separated filter IDs, or PASS.
    pub fn to_filter_column(&self) -> String {
        if self.is_pass() {
            "PASS".to_owned()
        } else {
            self.filtered().map(|filter| filter.id()).join(",")
        }
    }
}

/// A classified call together with its soft filter outcomes.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Evaluation {
    sv: StructuralVariantContext,
    decision: FilterDecision,
}

impl Evaluation {
    pub fn new(record: VariantRecord, config: &FilterConfig) -> Result<Self> {
        let sv = StructuralVariantContext::new(record, config.classifier())?;
        let decision = FilterDecision::new(&sv, config.filters());
        Ok(Evaluation { sv, decision })
    }
}

/// Counts collected while processing a BCF/VCF.
#[derive(Debug, Clone, Default, CopyGetters)]
pub struct FilterStats {
    #[getset(get_copy = "pub")]
    records: usize,
    #[getset(get_copy = "pub")]
    passing: usize,
    #[getset(get_copy = "pub")]
    invalid: usize,
    filtered: LinearMap<SoftFilter, usize>,
}

impl FilterStats {
    fn register(&mut self, evaluation: &Evaluation) {
        self.records += 1;
        if evaluation.decision().is_pass() {
            self.passing += 1;
        }
        for filter in evaluation.decision().filtered() {
            *self.filtered.entry(filter).or_insert(0) += 1;
        }
    }

    pub fn filtered(&self, filter: SoftFilter) -> usize {
        self.filtered.get(&filter).copied().unwrap_or(0)
    }

    fn log(&self) {
        info!(
            "Processed {} records: {} passing, {} invalid",
            self.records + self.invalid,
            self.passing,
            self.invalid
        );
        for filter in SoftFilter::iter() {
            debug!("{}: {} records", filter, self.filtered(filter));
        }
    }
}

pub(crate) fn open_reader<P: AsRef<Path>>(input: Option<P>) -> Result<bcf::Reader> {
    Ok(match input {
        Some(path) => bcf::Reader::from_path(path)?,
        None => bcf::Reader::from_stdin()?,
    })
}

/// Classify and evaluate all records of the given reader, passing each record with its
/// evaluation to `sink` in input order. Batches of records are evaluated in parallel.
///
/// Records with malformed breakend notation abort processing, unless `skip_invalid`
/// is set, in which case they are passed to `sink` without evaluation.
pub(crate) fn process_records<F>(
    reader: &mut bcf::Reader,
    config: &FilterConfig,
    threads: usize,
    skip_invalid: bool,
    mut sink: F,
) -> Result<FilterStats>
where
    F: FnMut(&mut bcf::Record, Option<&Evaluation>) -> Result<()>,
{
    config
        .samples()
        .check(reader.header().sample_count() as usize)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    let mut stats = FilterStats::default();
    let mut i = 0;
    loop {
        let mut batch = Vec::with_capacity(BATCH_SIZE);
        while batch.len() < BATCH_SIZE {
            let mut record = reader.empty_record();
            match reader.read(&mut record) {
                None => break,
                Some(res) => res?,
            }
            batch.push(record);
        }
        if batch.is_empty() {
            break;
        }

        let variants = batch
            .iter()
            .enumerate()
            .map(|(j, record)| VariantRecord::from_bcf(record, i + j + 1, config.samples()))
            .collect_vec();
        let evaluations: Vec<Result<Evaluation>> = pool.install(|| {
            variants
                .into_par_iter()
                .map(|variant| variant.and_then(|variant| Evaluation::new(variant, config)))
                .collect()
        });

        for (mut record, evaluation) in batch.into_iter().zip(evaluations) {
            i += 1;
            match evaluation {
                Ok(evaluation) => {
                    stats.register(&evaluation);
                    sink(&mut record, Some(&evaluation))?;
                }
                Err(e) if skip_invalid => {
                    warn!("Skipping invalid record {}: {}", i, e);
                    stats.invalid += 1;
                    sink(&mut record, None)?;
                }
                Err(e) => return Err(e.context(format!("invalid record {} in BCF/VCF", i))),
            }
        }
    }

    stats.log();
    Ok(stats)
}

/// Annotate each record with the FILTER IDs of the soft filters it fails.
///
/// # Arguments
///
/// * `inbcf` - path to BCF/VCF with breakend calls (None for stdin)
/// * `outbcf` - path to resulting BCF (None for stdout)
/// * `config` - filter thresholds, classifier parameters and sample ordinals
/// * `threads` - number of threads used for evaluation (0 for all cores)
/// * `skip_invalid` - write records with malformed breakend notation unchanged instead of failing
pub fn soft_filter<R, W>(
    inbcf: Option<R>,
    outbcf: Option<W>,
    config: &FilterConfig,
    threads: usize,
    skip_invalid: bool,
) -> Result<FilterStats>
where
    R: AsRef<Path>,
    W: AsRef<Path>,
{
    let mut inbcf_reader = open_reader(inbcf)?;

    // setup output file
    let mut header = bcf::Header::from_template(inbcf_reader.header());
    for filter in SoftFilter::iter() {
        header.push_record(filter.header_record().as_bytes());
    }
    let mut outbcf = match outbcf {
        Some(p) => bcf::Writer::from_path(p, &header, false, bcf::Format::Bcf)?,
        None => bcf::Writer::from_stdout(&header, false, bcf::Format::Bcf)?,
    };

    process_records(
        &mut inbcf_reader,
        config,
        threads,
        skip_invalid,
        |record, evaluation| {
            outbcf.translate(record);
            if let Some(evaluation) = evaluation {
                for filter in evaluation.decision().filtered() {
                    record.push_filter(filter.id().as_bytes())?;
                }
            }
            outbcf.write(record)?;
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::classification::ClassifierParams;
    use crate::variants::record::{RecordAttributesBuilder, VariantRecordBuilder};

    fn sv(pos: u64, alt: &str, qual: f64) -> StructuralVariantContext {
        let record = VariantRecordBuilder::default()
            .chrom("1")
            .pos(pos)
            .ref_allele(b"A".to_vec())
            .alt_allele(alt.as_bytes().to_vec())
            .qual(qual)
            .attributes(
                RecordAttributesBuilder::default()
                    .imprecise(true)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        StructuralVariantContext::new(record, &ClassifierParams::default()).unwrap()
    }

    #[test]
    fn test_decision_order() {
        let decision = FilterDecision::new(&sv(80, "ATACTGCTACA[2:100[", 100.0), &FilterParams::default());
        assert_eq!(
            decision.filtered().collect_vec(),
            vec![SoftFilter::Imprecise, SoftFilter::Qual, SoftFilter::LongDPSupport]
        );
        assert!(!decision.is_pass());
        assert_eq!(decision.to_filter_column(), "imprecise,qual,longDPSupport");
        assert!(decision.is_filtered(SoftFilter::Qual));
        assert!(!decision.is_filtered(SoftFilter::PolyGC));
    }

    #[test]
    fn test_decision_is_idempotent() {
        let sv = sv(1, ".A", 2000.0);
        let params = FilterParams::default();
        assert_eq!(FilterDecision::new(&sv, &params), FilterDecision::new(&sv, &params));
    }

    #[test]
    fn test_header_record() {
        assert_eq!(
            SoftFilter::Imprecise.header_record(),
            "##FILTER=<ID=imprecise,Description=\"Imprecise variant\">"
        );
        assert_eq!(SoftFilter::iter().count(), 12);
    }
}
