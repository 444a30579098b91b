use std::collections::{BTreeSet, HashMap};

/// Lookup of groups declared on test methods through annotations or attributes.
///
/// The resolver never inspects test classes itself, it asks an implementation
/// of this trait with the class name and the method name (data set suffix
/// already removed).
pub trait MetadataGroups {
    fn groups(&self, class: &str, method: &str) -> BTreeSet<String>;
}

impl<F> MetadataGroups for F
where
    F: Fn(&str, &str) -> BTreeSet<String>,
{
    fn groups(&self, class: &str, method: &str) -> BTreeSet<String> {
        self(class, method)
    }
}

/// No annotation lookup available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMetadata;

impl MetadataGroups for NoMetadata {
    fn groups(&self, _: &str, _: &str) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

/// Groups of test methods collected up front, keyed by class and method.
#[derive(Debug, Default, Clone)]
pub struct MetadataTable {
    methods: HashMap<(String, String), BTreeSet<String>>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(
        mut self,
        class: impl Into<String>,
        method: impl Into<String>,
        groups: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.insert(class, method, groups);
        self
    }

    pub fn insert(
        &mut self,
        class: impl Into<String>,
        method: impl Into<String>,
        groups: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.methods
            .entry((class.into(), method.into()))
            .or_default()
            .extend(groups.into_iter().map(Into::into));
    }
}

impl MetadataGroups for MetadataTable {
    fn groups(&self, class: &str, method: &str) -> BTreeSet<String> {
        self.methods
            .get(&(class.to_string(), method.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}
