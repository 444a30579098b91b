//! Group based test selection and nested JUnit reporting for test runners.
//!
//! Configure groups in YAML or with [`group::GroupConfig`], resolve them once
//! with [`group::GroupResolver`], select tests with [`filter::GroupFilter`] and
//! feed the run's lifecycle events into a [`report::SuiteAggregator`] to get a
//! [`report::Report`] that renders as JUnit XML.

pub mod config;
pub mod filter;
pub mod group;
pub mod listener;
pub mod report;

mod error;
pub use error::*;

#[cfg(test)]
mod test_support;
