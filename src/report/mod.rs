//! Collecting suite results into a nested JUnit report.
//!
//! [`SuiteAggregator`] listens to suite and test lifecycle events and keeps a
//! stack of open suites. When a nested suite closes, its counters (tests,
//! assertions, errors, failures, skipped, useless and time) are added to the
//! suite around it. The finished [`Report`] is a tree of [`SuiteNode`]s and
//! [`CaseNode`]s that [`Report::to_xml`] renders in the JUnit layout and
//! [`ReportTarget`] writes to disk.

mod aggregator;
pub use aggregator::*;

mod counters;
pub use counters::*;

mod fault;
pub use fault::*;

mod node;
pub use node::*;

mod target;
pub use target::*;

mod xml;
pub use xml::{format_time, prepare_string};
