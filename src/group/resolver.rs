use std::{
    fs, io,
    path::{MAIN_SEPARATOR_STR, Path, PathBuf},
};

use glob::Pattern;
use tracing::{debug, warn};

use crate::{
    ConfigurationError,
    group::{
        FileFinder, GroupConfig, GroupSource, ResolvedGroups, WalkDirFinder,
        path::{is_path_absolute, normalize_locator, unify_separators},
    },
};

const WILDCARD: char = '*';

/// Resolves a [`GroupConfig`] into [`ResolvedGroups`].
///
/// Relative paths in the configuration are resolved against `root`.
/// Construct one per run and call [`resolve`](Self::resolve) once.
#[derive(Debug, Clone)]
pub struct GroupResolver<Finder = WalkDirFinder> {
    root: PathBuf,
    finder: Finder,
}

impl GroupResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            finder: WalkDirFinder::default(),
        }
    }
}

impl<Finder> GroupResolver<Finder> {
    pub fn with_finder<WithFinder: FileFinder>(
        self,
        finder: WithFinder,
    ) -> GroupResolver<WithFinder> {
        GroupResolver {
            root: self.root,
            finder,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl<Finder: FileFinder> GroupResolver<Finder> {
    /// Resolve every configured group.
    ///
    /// Wildcard groups are expanded first, then every group's locators are
    /// normalized. The first invalid entry aborts resolution.
    pub fn resolve(&self, config: &GroupConfig) -> Result<ResolvedGroups, ConfigurationError> {
        let expanded = self.expand_wildcards(config)?;

        let mut resolved = ResolvedGroups::new();
        for (group, source) in expanded.iter() {
            resolved.declare(group);
            match source {
                GroupSource::Locators(locators) => {
                    for locator in locators {
                        let locator = normalize_locator(locator, &self.root, group)?;
                        resolved.insert(group, locator);
                    }
                }
                GroupSource::Path(path) => {
                    for locator in self.read_list_file(path, group)? {
                        resolved.insert(group, locator);
                    }
                }
            }
            debug!(
                group,
                locators = resolved.get(group).map_or(0, <[String]>::len),
                "resolved test group"
            );
        }

        Ok(resolved)
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        match is_path_absolute(&path.to_string_lossy()) {
            true => path.to_path_buf(),
            false => self.root.join(path),
        }
    }

    /// Replace every wildcard group with one generated group per matched file.
    ///
    /// `"g_*": "tests/_log/g_*"` with the files `g_1` and `g_2` becomes
    /// `"g_1": "tests/_log/g_1"` and `"g_2": "tests/_log/g_2"`.
    fn expand_wildcards(&self, config: &GroupConfig) -> Result<GroupConfig, ConfigurationError> {
        let mut expanded = config.clone();

        for (group, source) in config.iter() {
            if !group.contains(WILDCARD) {
                continue;
            }

            let GroupSource::Path(pattern) = source else {
                return Err(ConfigurationError::InvalidShape {
                    group: group.to_string(),
                    expected: "a path pattern when its name contains a wildcard",
                });
            };
            expanded.entries.remove(group);

            let pattern_text = pattern.to_string_lossy();
            let file_pattern = pattern
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            if group.matches(WILDCARD).count() > 1 || file_pattern.matches(WILDCARD).count() > 1 {
                return Err(ConfigurationError::AmbiguousWildcard {
                    group: group.to_string(),
                    pattern: pattern_text.into_owned(),
                });
            }
            if !file_pattern.contains(WILDCARD) {
                return Err(ConfigurationError::MissingWildcard {
                    group: group.to_string(),
                    pattern: pattern_text.into_owned(),
                });
            }

            let parent = pattern.parent().unwrap_or(Path::new(""));
            let dir = self.absolute(parent);
            let name =
                Pattern::new(&file_pattern).map_err(|source| ConfigurationError::InvalidPattern {
                    group: group.to_string(),
                    pattern: pattern_text.to_string(),
                    source,
                })?;

            let files = match self.finder.find(&dir, &name) {
                Ok(files) => files,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    warn!(group, dir = %dir.display(), "wildcard group directory not found");
                    continue;
                }
                Err(source) => {
                    return Err(ConfigurationError::Enumerate {
                        path: dir,
                        group: group.to_string(),
                        source,
                    });
                }
            };

            let (prefix, suffix) = file_pattern
                .split_once(WILDCARD)
                .unwrap_or((file_pattern.as_str(), ""));
            for relative in files {
                let captured = wildcard_capture(&relative, prefix, suffix);
                let generated = group.replacen(WILDCARD, &captured, 1);
                expanded
                    .entries
                    .insert(generated, GroupSource::Path(parent.join(&relative)));
            }
        }

        Ok(expanded)
    }

    /// Read the locators listed in a group file.
    ///
    /// A missing file makes an empty group. Blank lines are skipped, otherwise
    /// they would resolve to the root directory and put every test in the group.
    fn read_list_file(&self, path: &Path, group: &str) -> Result<Vec<String>, ConfigurationError> {
        let path = self.absolute(path);
        if !path.is_file() {
            debug!(group, path = %path.display(), "group list file does not exist");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigurationError::ListFile {
            path: path.clone(),
            group: group.to_string(),
            source,
        })?;

        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| normalize_locator(line, &self.root, group))
            .collect()
    }
}

/// The part of a matched path that the wildcard stood for.
///
/// Matches in sub directories keep their directory, so `sub/g_3` matched by
/// `g_*` captures `sub/3`.
fn wildcard_capture(relative: &Path, prefix: &str, suffix: &str) -> String {
    let file_name = relative
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let captured = file_name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .unwrap_or(&file_name);

    match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            let parent = unify_separators(&parent.to_string_lossy());
            format!("{parent}{MAIN_SEPARATOR_STR}{captured}")
        }
        _ => captured.to_string(),
    }
}
