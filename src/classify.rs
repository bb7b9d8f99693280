// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;
use std::path::Path;

use anyhow::Result;

use crate::filtration::params::FilterConfig;
use crate::filtration::soft_filter::{open_reader, process_records, FilterStats};

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    chrom: &'a str,
    pos: u64,
    id: &'a str,
    classification: &'static str,
    filters: String,
}

/// Write a tab separated report with classification and failed soft filters of each call.
/// Records with malformed breakend notation are omitted if `skip_invalid` is set.
pub fn classify<R, W>(
    inbcf: Option<R>,
    out: W,
    config: &FilterConfig,
    threads: usize,
    skip_invalid: bool,
) -> Result<FilterStats>
where
    R: AsRef<Path>,
    W: io::Write,
{
    let mut reader = open_reader(inbcf)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(out);

    let stats = process_records(
        &mut reader,
        config,
        threads,
        skip_invalid,
        |_, evaluation| {
            if let Some(evaluation) = evaluation {
                let record = evaluation.sv().record();
                writer.serialize(ReportRow {
                    chrom: record.chrom(),
                    pos: record.pos(),
                    id: record.id().as_deref().unwrap_or("."),
                    classification: evaluation.sv().classification().into(),
                    filters: evaluation.decision().to_filter_column(),
                })?;
            }
            Ok(())
        },
    )?;
    writer.flush()?;

    Ok(stats)
}
