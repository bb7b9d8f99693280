// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::convert::TryFrom;
use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::errors::Error;
use crate::variants::classification::ClassifierParams;
use crate::variants::support::SampleOrdinals;

/// Thresholds of the soft filters.
///
/// Defaults follow the values commonly used for GRIDSS tumor-normal calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, CopyGetters)]
#[serde(rename_all = "kebab-case", default)]
#[builder(default, build_fn(private, name = "build_unvalidated"))]
#[getset(get_copy = "pub")]
pub struct FilterParams {
    min_qual_single: f64,
    min_qual_pair: f64,
    max_normal_relative_support: f64,
    max_homology_length: u32,
    max_homology_length_short_inversion: u32,
    max_inexact_homology_length: u64,
    max_inexact_homology_length_short_del: u64,
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams {
            min_qual_single: 1000.0,
            min_qual_pair: 400.0,
            max_normal_relative_support: 0.03,
            max_homology_length: 50,
            max_homology_length_short_inversion: 6,
            max_inexact_homology_length: 50,
            max_inexact_homology_length_short_del: 5,
        }
    }
}

impl FilterParamsBuilder {
    pub fn build(&self) -> Result<FilterParams> {
        let params = self.build_unvalidated()?;
        params.validate()?;
        Ok(params)
    }
}

impl FilterParams {
    /// Reject negative or NaN thresholds.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in &[
            ("min-qual-single", self.min_qual_single),
            ("min-qual-pair", self.min_qual_pair),
            (
                "max-normal-relative-support",
                self.max_normal_relative_support,
            ),
        ] {
            if value.is_nan() || *value < 0.0 {
                bail!(Error::InvalidFilterParameter {
                    name: name.to_string(),
                    value: *value,
                });
            }
        }
        Ok(())
    }
}

/// Complete configuration of a soft filtering run, as read from YAML.
///
/// # Example
///
/// ```yaml
/// filters:
///   min-qual-pair: 350
///   max-homology-length-short-inversion: 6
/// classifier:
///   short-variant-distance: 1000
/// samples:
///   normal: 0
///   tumor: 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters, new)]
#[serde(default)]
#[getset(get = "pub")]
pub struct FilterConfig {
    filters: FilterParams,
    classifier: ClassifierParams,
    samples: SampleOrdinals,
}

impl FilterConfig {
    pub fn validate(&self) -> Result<()> {
        self.filters.validate()?;
        self.classifier.validate()?;
        SampleOrdinals::new(self.samples.normal(), self.samples.tumor())?;
        Ok(())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = File::open(path)
            .with_context(|| format!("unable to open filter configuration {}", path.display()))?;
        let config: FilterConfig = serde_yaml::from_reader(reader)
            .with_context(|| format!("invalid filter configuration {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the sample ordinals, e.g. with values given on the command line.
    pub fn with_samples(mut self, samples: SampleOrdinals) -> Self {
        self.samples = samples;
        self
    }
}

impl<'a> TryFrom<&'a str> for FilterConfig {
    type Error = anyhow::Error;

    fn try_from(yaml: &str) -> Result<Self> {
        let config: FilterConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = FilterParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.min_qual_single(), 1000.0);
        assert_eq!(params.max_homology_length_short_inversion(), 6);
    }

    #[test]
    fn test_builder() {
        let params = FilterParamsBuilder::default()
            .min_qual_pair(200.0)
            .build()
            .unwrap();
        assert_eq!(params.min_qual_pair(), 200.0);
        assert_eq!(params.min_qual_single(), 1000.0);

        let err = FilterParamsBuilder::default()
            .max_normal_relative_support(-0.1)
            .build()
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::InvalidFilterParameter {
                name: "max-normal-relative-support".to_owned(),
                value: -0.1
            })
        );
        assert!(FilterParamsBuilder::default()
            .min_qual_single(f64::NAN)
            .build()
            .is_err());
    }

    #[test]
    fn test_yaml() {
        let config = FilterConfig::try_from(
            "filters:\n  min-qual-pair: 350\nclassifier:\n  short-variant-distance: 500\nsamples:\n  normal: 1\n  tumor: 0\n",
        )
        .unwrap();
        assert_eq!(config.filters().min_qual_pair(), 350.0);
        assert_eq!(config.filters().max_homology_length(), 50);
        assert_eq!(config.classifier().short_variant_distance(), 500);
        assert_eq!(config.samples().tumor(), 0);
    }

    #[test]
    fn test_yaml_invalid() {
        assert!(FilterConfig::try_from("filters:\n  min-qual-single: -1\n").is_err());
        assert!(FilterConfig::try_from("filters:\n  max-homology-length: -1\n").is_err());
        assert!(FilterConfig::try_from("classifier:\n  short-variant-distance: 0\n").is_err());
        assert!(FilterConfig::try_from("samples:\n  normal: 1\n  tumor: 1\n").is_err());
    }

    #[test]
    fn test_empty_yaml() {
        let config = FilterConfig::try_from("{}").unwrap();
        assert_eq!(config, FilterConfig::default());
    }
}
