use std::collections::{BTreeMap, BTreeSet};

use crate::{
    group::MetadataGroups,
    test::{TestLocator, strip_data_set},
};

/// The result of group resolution: group name to normalized locators.
///
/// Built once per run by [`GroupResolver`](super::GroupResolver) and only read
/// afterwards, so it can be shared freely between worker threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedGroups {
    groups: BTreeMap<String, Vec<String>>,
}

impl ResolvedGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `group` exists, even if nothing ends up in it.
    pub(crate) fn declare(&mut self, group: &str) {
        self.groups.entry(group.to_string()).or_default();
    }

    /// Add a locator to `group`, keeping insertion order and skipping duplicates.
    pub fn insert(&mut self, group: &str, locator: String) {
        let locators = self.groups.entry(group.to_string()).or_default();
        if !locators.contains(&locator) {
            locators.push(locator);
        }
    }

    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, locators)| (name.as_str(), locators.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every group `test` belongs to.
    ///
    /// A test is in a group when one of the group's locators
    /// - is exactly its file name,
    /// - is a prefix of `file:method`, or
    /// - equals `file:feature` ignoring case, for behaviour-driven scenarios.
    ///
    /// Groups the test declares itself and groups found through `metadata`
    /// are merged in.
    pub fn groups_for_test(
        &self,
        test: &TestLocator,
        metadata: &impl MetadataGroups,
    ) -> BTreeSet<String> {
        let mut groups: BTreeSet<String> = test.groups.iter().cloned().collect();

        if let Some(class) = &test.class {
            groups.extend(metadata.groups(class, strip_data_set(&test.name)));
        }

        let Some(file) = &test.file else {
            return groups;
        };

        let with_method = format!("{file}:{}", test.method());
        let with_feature = test
            .feature
            .as_ref()
            .map(|feature| format!("{file}:{feature}").to_lowercase());

        for (group, locators) in &self.groups {
            if groups.contains(group) {
                continue;
            }

            let matched = locators.iter().any(|locator| {
                locator == file
                    || with_method.starts_with(locator.as_str())
                    || with_feature
                        .as_ref()
                        .is_some_and(|feature| *feature == locator.to_lowercase())
            });

            if matched {
                groups.insert(group.clone());
            }
        }

        groups
    }
}

impl FromIterator<(String, Vec<String>)> for ResolvedGroups {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut resolved = Self::new();
        for (group, locators) in iter {
            resolved.declare(&group);
            for locator in locators {
                resolved.insert(&group, locator);
            }
        }
        resolved
    }
}
