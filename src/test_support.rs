use crate::test::{ReportFields, TestLocator};

/// An optional string field that can be built from a plain `&str`.
#[derive(Debug, Default)]
pub struct Opt(pub Option<String>);

impl From<&str> for Opt {
    fn from(value: &str) -> Self {
        Self(Some(value.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct Groups(pub Vec<String>);

impl<const N: usize> From<[&str; N]> for Groups {
    fn from(value: [&str; N]) -> Self {
        Self(value.into_iter().map(String::from).collect())
    }
}

#[derive(Debug, Default)]
pub struct BuildLocator {
    pub name: String,
    pub file: Opt,
    pub class: Opt,
    pub line: Option<u32>,
    pub feature: Opt,
    pub groups: Groups,
    pub reported: Option<ReportFields>,
    pub description: Opt,
}

impl From<BuildLocator> for TestLocator {
    fn from(value: BuildLocator) -> Self {
        TestLocator {
            name: value.name,
            file: value.file.0,
            class: value.class.0,
            line: value.line,
            feature: value.feature.0,
            groups: value.groups.0,
            reported: value.reported,
            description: value.description.0,
        }
    }
}

macro_rules! locator {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::test::TestLocator::from($crate::test_support::BuildLocator {
            $($field: From::from($value),)*
            ..($crate::test_support::BuildLocator {
                name: concat!(module_path!(), "::", line!(), ":", column!()).into(),
                ..Default::default()
            })
        })
    };
}

pub(crate) use locator;
