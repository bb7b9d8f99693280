// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use crate::classify;
use crate::filtration;
use crate::filtration::params::FilterConfig;
use crate::variants::support::SampleOrdinals;

#[derive(Debug, StructOpt, Clone)]
#[structopt(
    name = "svfilter",
    about = "Classification and soft filtering of structural variant breakend calls in tumor-normal pairs.",
    setting = structopt::clap::AppSettings::ColoredHelp
)]
pub struct SvFilter {
    #[structopt(long, short, help = "Provide verbose output.")]
    pub verbose: bool,
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt, Clone)]
pub struct CommonOpts {
    #[structopt(
        parse(from_os_str),
        long,
        help = "VCF/BCF file with breakend calls (if omitted, read from STDIN)."
    )]
    input: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        long,
        help = "YAML file with filter thresholds, classifier parameters and sample ordinals. \
                Missing entries take their default values."
    )]
    config: Option<PathBuf>,
    #[structopt(
        long = "normal-ordinal",
        help = "Position of the normal sample in the VCF/BCF header (overrides the config file)."
    )]
    normal_ordinal: Option<usize>,
    #[structopt(
        long = "tumor-ordinal",
        help = "Position of the tumor sample in the VCF/BCF header (overrides the config file)."
    )]
    tumor_ordinal: Option<usize>,
    #[structopt(
        long,
        default_value = "0",
        help = "Number of threads to use for evaluation (0 means all available cores)."
    )]
    threads: usize,
    #[structopt(
        long = "skip-invalid",
        help = "Pass records with malformed breakend notation through unchanged instead of \
                aborting."
    )]
    skip_invalid: bool,
}

impl CommonOpts {
    fn config(&self) -> Result<FilterConfig> {
        let config = match self.config {
            Some(ref path) => FilterConfig::from_path(path)?,
            None => FilterConfig::default(),
        };
        let samples = SampleOrdinals::new(
            self.normal_ordinal.unwrap_or_else(|| config.samples().normal()),
            self.tumor_ordinal.unwrap_or_else(|| config.samples().tumor()),
        )?;
        Ok(config.with_samples(samples))
    }
}

#[derive(Debug, StructOpt, Clone)]
pub enum Command {
    #[structopt(
        name = "soft-filter",
        about = "Annotate breakend calls with the FILTER IDs of all soft filters they fail.",
        usage = "svfilter soft-filter --input calls.bcf --output filtered.bcf [--config filters.yaml]",
        setting = structopt::clap::AppSettings::ColoredHelp
    )]
    SoftFilter {
        #[structopt(flatten)]
        common: CommonOpts,
        #[structopt(
            parse(from_os_str),
            long,
            help = "BCF file that shall contain the results (if omitted, write to STDOUT)."
        )]
        output: Option<PathBuf>,
    },
    #[structopt(
        name = "classify",
        about = "Print a tab separated report with the classification and failed soft filters \
                 of each breakend call.",
        setting = structopt::clap::AppSettings::ColoredHelp
    )]
    Classify {
        #[structopt(flatten)]
        common: CommonOpts,
    },
}

pub fn run(opt: SvFilter) -> Result<()> {
    match opt.command {
        Command::SoftFilter { common, output } => {
            let config = common.config()?;
            filtration::soft_filter::soft_filter(
                common.input.as_ref(),
                output.as_ref(),
                &config,
                common.threads,
                common.skip_invalid,
            )?;
        }
        Command::Classify { common } => {
            let config = common.config()?;
            classify::classify(
                common.input.as_ref(),
                io::stdout(),
                &config,
                common.threads,
                common.skip_invalid,
            )?;
        }
    }
    Ok(())
}
