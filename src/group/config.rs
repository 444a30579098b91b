use std::{collections::BTreeMap, path::PathBuf};

use serde_yaml::Value;

use crate::ConfigurationError;

/// Where the members of one configured group come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSource {
    /// Literal `path` or `path:method` locators.
    Locators(Vec<String>),

    /// A newline separated file of locators, or a wildcard pattern when the
    /// group name contains `*`.
    Path(PathBuf),
}

impl GroupSource {
    /// Interpret one YAML value of the `groups` mapping.
    pub fn from_yaml_value(group: &str, value: &Value) -> Result<Self, ConfigurationError> {
        let invalid = || ConfigurationError::InvalidShape {
            group: group.to_string(),
            expected: "a path or a sequence of paths",
        };

        match value {
            Value::String(path) => Ok(Self::Path(PathBuf::from(path))),
            Value::Sequence(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<Result<_, _>>()
                .map(Self::Locators),
            _ => Err(invalid()),
        }
    }
}

/// The configured groups, keyed by group name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupConfig {
    pub(crate) entries: BTreeMap<String, GroupSource>,
}

impl GroupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locators(
        mut self,
        group: impl Into<String>,
        locators: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let locators = locators.into_iter().map(Into::into).collect();
        self.entries
            .insert(group.into(), GroupSource::Locators(locators));
        self
    }

    pub fn with_path(mut self, group: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.entries
            .insert(group.into(), GroupSource::Path(path.into()));
        self
    }

    /// Read the `groups` mapping of a configuration file.
    pub fn from_yaml_value(value: &Value) -> Result<Self, ConfigurationError> {
        let mapping = match value {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ConfigurationError::InvalidShape {
                    group: "groups".into(),
                    expected: "a mapping of group names",
                });
            }
        };

        let mut entries = BTreeMap::new();
        for (key, value) in mapping {
            let group = match key {
                Value::String(name) => name.clone(),
                Value::Number(number) => number.to_string(),
                _ => {
                    return Err(ConfigurationError::InvalidShape {
                        group: format!("{key:?}"),
                        expected: "named by a string",
                    });
                }
            };
            let source = GroupSource::from_yaml_value(&group, value)?;
            entries.insert(group, source);
        }

        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupSource)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
