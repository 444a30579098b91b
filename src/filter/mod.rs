//! Selecting which tests take part in a run.
//!
//! A filter decides which tests from the input slice are included in the run.
//! Tests that do not pass the filter are removed entirely: they are neither
//! executed nor reported, only counted as filtered out.
//!
//! [`GroupFilter`] is the filter used for `--group` / `--skip-group` style
//! selection. Without any include or exclude groups it keeps every test.

use crate::test::TestLocator;

mod group;
pub use group::*;

/// The result of applying a [`TestFilter`].
///
/// The iterator is an [`ExactSizeIterator`] so the runner knows upfront how
/// many tests are left.
#[derive(Debug)]
pub struct FilteredTests<'t, I>
where
    I: ExactSizeIterator<Item = &'t TestLocator>,
{
    /// The tests that are included in the run.
    pub tests: I,

    /// The number of tests that were filtered out.
    pub filtered_out: usize,
}

/// A strategy for selecting which tests are included in a test run.
pub trait TestFilter {
    /// Filter the given slice of tests.
    ///
    /// The returned iterator yields references into `tests`, in input order.
    fn filter<'t>(
        &self,
        tests: &'t [TestLocator],
    ) -> FilteredTests<'t, impl ExactSizeIterator<Item = &'t TestLocator>>;
}
