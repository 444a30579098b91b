//! Reading the reporter configuration from YAML.
//!
//! ```yaml
//! groups:
//!   api: [tests/api]
//!   failed: tests/_output/failed
//!   "g_*": tests/_log/g_*
//! group_filter:
//!   include: [api]
//!   exclude: [slow]
//! paths:
//!   output: tests/_output
//! reports:
//!   xml: report.xml
//!   strict_xml: false
//! ```
//!
//! Every section is optional.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::{
    ConfigurationError,
    group::{GroupConfig, GroupResolver, path::is_path_absolute},
    report::{ReportTarget, StackTraceFilter, SuiteAggregator},
};

/// Output directory used when `paths.output` is not set.
pub const DEFAULT_OUTPUT_DIR: &str = "tests/_output";

/// Group names to include and exclude when selecting tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSelection {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl GroupSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include(mut self, include: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include.extend(include.into_iter().map(Into::into));
        self
    }

    pub fn with_exclude(mut self, exclude: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(exclude.into_iter().map(Into::into));
        self
    }

    /// Read a `group_filter` section, `include` and `exclude` must be sequences.
    pub fn from_yaml_value(value: &Value) -> Result<Self, ConfigurationError> {
        Ok(Self {
            include: names(value, "include")?,
            exclude: names(value, "exclude")?,
        })
    }
}

fn names(section: &Value, key: &str) -> Result<Vec<String>, ConfigurationError> {
    let not_a_sequence = || ConfigurationError::NotASequence {
        key: key.to_string(),
    };

    match section.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(name) => Ok(name.clone()),
                Value::Number(number) => Ok(number.to_string()),
                _ => Err(not_a_sequence()),
            })
            .collect(),
        Some(_) => Err(not_a_sequence()),
    }
}

/// The `reports` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Where to write the JUnit XML report, relative to the output directory.
    pub xml: Option<PathBuf>,

    #[serde(rename = "strict_xml")]
    pub strict: bool,

    /// Stack frames from these paths are left out of fault messages.
    pub trace_exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PathsSection {
    output: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    groups: Value,
    group_filter: Value,
    paths: PathsSection,
    reports: ReportOptions,
}

/// Everything the reporter needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    root: PathBuf,
    pub groups: GroupConfig,
    pub selection: GroupSelection,
    pub output_dir: PathBuf,
    pub reports: ReportOptions,
}

impl ReporterConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            root,
            groups: GroupConfig::default(),
            selection: GroupSelection::default(),
            reports: ReportOptions::default(),
        }
    }

    pub fn with_groups(self, groups: GroupConfig) -> Self {
        Self { groups, ..self }
    }

    pub fn with_selection(self, selection: GroupSelection) -> Self {
        Self { selection, ..self }
    }

    pub fn with_reports(self, reports: ReportOptions) -> Self {
        Self { reports, ..self }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parse a configuration document for a project rooted at `root`.
    pub fn from_yaml_str(yaml: &str, root: impl Into<PathBuf>) -> Result<Self, ConfigurationError> {
        let root = root.into();
        let raw: RawConfig = match yaml.trim().is_empty() {
            true => RawConfig::default(),
            false => serde_yaml::from_str(yaml)?,
        };

        let output_dir = match raw.paths.output {
            Some(output) if is_path_absolute(&output.to_string_lossy()) => output,
            Some(output) => root.join(output),
            None => root.join(DEFAULT_OUTPUT_DIR),
        };

        Ok(Self {
            groups: GroupConfig::from_yaml_value(&raw.groups)?,
            selection: GroupSelection::from_yaml_value(&raw.group_filter)?,
            reports: raw.reports,
            output_dir,
            root,
        })
    }

    /// Load a configuration file, the project root is the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!(config = %path.display(), "loading reporter configuration");
        Self::from_yaml_str(&yaml, root)
    }

    pub fn resolver(&self) -> GroupResolver {
        GroupResolver::new(&self.root)
    }

    pub fn aggregator(&self) -> SuiteAggregator {
        SuiteAggregator::new()
            .with_strict(self.reports.strict)
            .with_trace_filter(
                StackTraceFilter::new().extend_excluded(self.reports.trace_exclude.iter().cloned()),
            )
    }

    /// The XML report destination, `None` when no report is configured.
    pub fn report_target(&self) -> Option<ReportTarget> {
        self.reports
            .xml
            .as_ref()
            .map(|xml| ReportTarget::resolve(xml, &self.output_dir))
    }
}
