//! Process configuration.
//!
//! [`Config`] holds every parameter a run needs. The binary fills it from
//! the command line and calls [`Config::validate`] before doing any work.

use std::path::PathBuf;
use std::time::Duration;

use crate::export::ExportFormat;
use crate::graph::DEFAULT_MAX_DEPTH;
use crate::parser::Coordinate;
use crate::resolver::{ResolverConfig, DEFAULT_TIMEOUT};

/// Repository used when none is given.
pub const DEFAULT_REPO_URL: &str = "https://repo1.maven.org/maven2/";

/// Longest request timeout accepted, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 10;

/// Invalid or incomplete configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing package: pass --package <groupId:artifactId>")]
    MissingPackage,

    #[error("Missing version: pass --version <version>")]
    MissingVersion,

    #[error("Invalid package '{0}': expected groupId:artifactId")]
    InvalidPackage(String),

    #[error("Missing test repository path: pass --test-repo-path <file>")]
    MissingTestRepoPath,

    #[error("Max depth must be at least 1")]
    InvalidMaxDepth,

    #[error("Timeout must be between 1 and 10 seconds, got {0}")]
    InvalidTimeout(u64),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `groupId:artifactId` of the root package
    pub package: Option<String>,
    pub version: Option<String>,
    pub repo_url: String,
    /// Read the graph from a flat description instead of the network
    pub test_mode: bool,
    pub test_repo_path: Option<PathBuf>,
    /// Report destination; stdout when `None`
    pub output: Option<PathBuf>,
    pub format: ExportFormat,
    pub max_depth: usize,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: None,
            version: None,
            repo_url: DEFAULT_REPO_URL.to_string(),
            test_mode: false,
            test_repo_path: None,
            output: None,
            format: ExportFormat::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Checks that the parameters describe a runnable job.
    ///
    /// Outside test mode a package and version are required; in test mode
    /// only the flat description path is.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.test_mode {
            if self.test_repo_path.is_none() {
                return Err(ConfigError::MissingTestRepoPath);
            }
        } else {
            self.root_coordinate()?;
        }

        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth);
        }

        let secs = self.timeout.as_secs();
        if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
            return Err(ConfigError::InvalidTimeout(secs));
        }

        Ok(())
    }

    /// Builds the root coordinate from `package` and `version`.
    pub fn root_coordinate(&self) -> ConfigResult<Coordinate> {
        let package = self.package.as_deref().ok_or(ConfigError::MissingPackage)?;
        let version = self
            .version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVersion)?;

        match package.split(':').collect::<Vec<_>>().as_slice() {
            [group, artifact] if !group.trim().is_empty() && !artifact.trim().is_empty() => {
                Ok(Coordinate::new(group.trim(), artifact.trim(), version))
            }
            _ => Err(ConfigError::InvalidPackage(package.to_string())),
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::with_timeout(self.timeout)
    }

    /// Lists every parameter as a key/value pair, in a fixed order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        fn or_unset(value: Option<String>) -> String {
            value.unwrap_or_else(|| "(not set)".to_string())
        }

        vec![
            ("package", or_unset(self.package.clone())),
            ("version", or_unset(self.version.clone())),
            ("repo_url", self.repo_url.clone()),
            ("test_mode", self.test_mode.to_string()),
            (
                "test_repo_path",
                or_unset(self.test_repo_path.as_ref().map(|p| p.display().to_string())),
            ),
            (
                "output",
                self.output
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "stdout".to_string()),
            ),
            ("format", self.format.to_string()),
            ("max_depth", self.max_depth.to_string()),
            ("timeout_secs", self.timeout.as_secs().to_string()),
        ]
    }
}
