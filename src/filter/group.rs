use std::{slice, vec};

use serde_yaml::Value;

use crate::{
    ConfigurationError,
    config::GroupSelection,
    filter::{FilteredTests, TestFilter},
    group::{MetadataGroups, NoMetadata, ResolvedGroups},
    test::TestLocator,
};

/// Select tests by group membership.
///
/// With a non-empty include list only tests in at least one included group are
/// kept. Tests in any excluded group are always dropped, even if they are also
/// in an included one.
#[derive(Debug)]
pub struct GroupFilter<'g, Metadata = NoMetadata> {
    groups: &'g ResolvedGroups,
    metadata: Metadata,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl<'g> GroupFilter<'g> {
    pub fn new(groups: &'g ResolvedGroups) -> Self {
        Self {
            groups,
            metadata: NoMetadata,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Build a filter from a `group_filter` configuration section.
    pub fn from_yaml_value(
        groups: &'g ResolvedGroups,
        value: &Value,
    ) -> Result<Self, ConfigurationError> {
        let selection = GroupSelection::from_yaml_value(value)?;
        Ok(Self::new(groups).with_selection(&selection))
    }
}

impl<'g, Metadata> GroupFilter<'g, Metadata> {
    pub fn with_metadata<WithMetadata: MetadataGroups>(
        self,
        metadata: WithMetadata,
    ) -> GroupFilter<'g, WithMetadata> {
        GroupFilter {
            groups: self.groups,
            metadata,
            include: self.include,
            exclude: self.exclude,
        }
    }

    pub fn with_selection(self, selection: &GroupSelection) -> Self {
        self.extend_include(selection.include.iter().cloned())
            .extend_exclude(selection.exclude.iter().cloned())
    }

    pub fn extend_include(mut self, include: impl IntoIterator<Item = String>) -> Self {
        self.include.extend(include);
        self
    }

    pub fn extend_exclude(mut self, exclude: impl IntoIterator<Item = String>) -> Self {
        self.exclude.extend(exclude);
        self
    }
}

#[derive(Debug)]
enum GroupFilterIterator<'t> {
    Slice(slice::Iter<'t, TestLocator>),
    Vec(vec::IntoIter<&'t TestLocator>),
}

impl<'t> Iterator for GroupFilterIterator<'t> {
    type Item = &'t TestLocator;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            GroupFilterIterator::Slice(iter) => iter.next(),
            GroupFilterIterator::Vec(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            GroupFilterIterator::Slice(iter) => iter.size_hint(),
            GroupFilterIterator::Vec(iter) => iter.size_hint(),
        }
    }
}

impl<'t> ExactSizeIterator for GroupFilterIterator<'t> {}

impl<'g, Metadata: MetadataGroups> TestFilter for GroupFilter<'g, Metadata> {
    fn filter<'t>(
        &self,
        tests: &'t [TestLocator],
    ) -> FilteredTests<'t, impl ExactSizeIterator<Item = &'t TestLocator>> {
        if self.include.is_empty() && self.exclude.is_empty() {
            return FilteredTests {
                tests: GroupFilterIterator::Slice(tests.iter()),
                filtered_out: 0,
            };
        }

        let mut remaining = Vec::new();
        let mut filtered = 0;
        for test in tests {
            let groups = self.groups.groups_for_test(test, &self.metadata);
            let included =
                self.include.is_empty() || self.include.iter().any(|g| groups.contains(g));
            let excluded = self.exclude.iter().any(|g| groups.contains(g));

            match included && !excluded {
                true => remaining.push(test),
                false => filtered += 1,
            }
        }

        FilteredTests {
            tests: GroupFilterIterator::Vec(remaining.into_iter()),
            filtered_out: filtered,
        }
    }
}
