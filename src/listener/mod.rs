//! Receiving suite and test lifecycle events.
//!
//! The test runner reports what happens through a [`SuiteListener`], one
//! event at a time and well nested: every `begin_suite` is matched by one later
//! `end_suite` at the same depth, and a test's `begin_test`/`end_test` pair
//! never interleaves with another test's pair.
//!
//! [`SuiteAggregator`](crate::report::SuiteAggregator) is the listener that
//! builds the report. When tests run on several threads, each worker gets an
//! [`EventSender`] and the aggregator lives on the coordinating thread, see
//! [`SuiteAggregator::drain`](crate::report::SuiteAggregator::drain).

use std::time::Duration;

use crate::{
    report::{FaultKind, Throwable},
    test::TestLocator,
};

mod channel;
pub use channel::*;

/// Everything known about a test once it has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinishedTest {
    pub duration: Duration,
    pub assertions: u64,
    /// Output the test printed. Only reported when non-empty.
    pub output: String,
}

impl FinishedTest {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn with_assertions(self, assertions: u64) -> Self {
        Self { assertions, ..self }
    }

    pub fn with_output(self, output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..self
        }
    }
}

/// A receiver of suite and test lifecycle events.
///
/// Faults, skips and useless markers are only meaningful between `begin_test`
/// and `end_test`; implementations ignore them anywhere else.
pub trait SuiteListener {
    type Error;

    fn begin_suite(&mut self, name: &str) -> Result<(), Self::Error>;

    fn end_suite(&mut self) -> Result<(), Self::Error>;

    fn begin_test(&mut self, test: &TestLocator) -> Result<(), Self::Error>;

    fn end_test(&mut self, finished: FinishedTest) -> Result<(), Self::Error>;

    fn record_fault(
        &mut self,
        test: &TestLocator,
        throwable: &Throwable,
        kind: FaultKind,
    ) -> Result<(), Self::Error>;

    fn record_skipped(&mut self) -> Result<(), Self::Error>;

    fn record_useless(&mut self) -> Result<(), Self::Error>;
}
