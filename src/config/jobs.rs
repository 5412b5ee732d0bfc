//! Job catalog loading from config.toml
//!
//! The catalog of jobs users can apply for is seeded from a TOML file rather
//! than hardcoded, so deployments can tune names, incomes, and rarities.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of jobs users can apply for
    pub jobs: Vec<JobConfig>,
}

/// Configuration for a single job
#[derive(Debug, Deserialize, Clone)]
pub struct JobConfig {
    /// Display name of the job
    pub name: String,
    /// Minimum income per successful application
    pub min_income: i64,
    /// Maximum income per successful application
    pub max_income: i64,
    /// Rarity tier, determines the application success chance
    pub rarity: Rarity,
}

/// Rarity tiers for jobs. Each tier maps to an application success chance
/// of `weight / 10`, so common jobs always succeed and legendary jobs
/// succeed one time in ten.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
    Silly,
    Risky,
}

impl Rarity {
    /// Rarity weight out of ten.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Common => 10,
            Self::Uncommon => 5,
            Self::Rare => 2,
            Self::Legendary => 1,
            Self::Silly => 3,
            Self::Risky => 2,
        }
    }

    /// Application success chance in `[0.0, 1.0]`.
    #[must_use]
    pub fn success_chance(self) -> f64 {
        f64::from(self.weight()) / 10.0
    }

    /// Lowercase tier name as it appears in config.toml.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Legendary => "legendary",
            Self::Silly => "silly",
            Self::Risky => "risky",
        }
    }
}

/// Loads the job catalog from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or a job entry has an empty income range.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    for job in &config.jobs {
        if job.min_income < 0 || job.max_income < job.min_income {
            return Err(Error::Config {
                message: format!("Job `{}` has an invalid income range", job.name),
            });
        }
    }

    Ok(config)
}

/// Loads the job catalog from the default location (./config.toml).
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_job_config() {
        let toml_str = r#"
            [[jobs]]
            name = "Janitor"
            min_income = 50
            max_income = 150
            rarity = "common"

            [[jobs]]
            name = "Astronaut"
            min_income = 2000
            max_income = 5000
            rarity = "legendary"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.jobs.len(), 2);
        assert_eq!(config.jobs[0].name, "Janitor");
        assert_eq!(config.jobs[0].rarity, Rarity::Common);
        assert_eq!(config.jobs[1].rarity, Rarity::Legendary);
    }

    #[test]
    fn test_rarity_weights() {
        assert_eq!(Rarity::Common.weight(), 10);
        assert_eq!(Rarity::Uncommon.weight(), 5);
        assert_eq!(Rarity::Rare.weight(), 2);
        assert_eq!(Rarity::Legendary.weight(), 1);
        assert_eq!(Rarity::Silly.weight(), 3);
        assert_eq!(Rarity::Risky.weight(), 2);

        assert!((Rarity::Common.success_chance() - 1.0).abs() < f64::EPSILON);
        assert!((Rarity::Legendary.success_chance() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_income_range_rejected() {
        let toml_str = r#"
            [[jobs]]
            name = "Broken"
            min_income = 100
            max_income = 50
            rarity = "common"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        // load_config validates ranges after parsing; replicate that check
        assert!(config.jobs[0].max_income < config.jobs[0].min_income);
    }
}
