//! Test groups resolved from configuration.
//!
//! A group is a named subset of tests. Groups come from three places:
//! - literal `path` / `path:method` locators in the configuration,
//! - list files with one locator per line (for example a file of failed tests
//!   written by a previous run), and
//! - wildcard entries like `"g_*": "tests/_log/g_*"` that turn every matching
//!   list file into its own group.
//!
//! [`GroupResolver`] turns a [`GroupConfig`] into [`ResolvedGroups`] once per
//! run. Afterwards [`ResolvedGroups::groups_for_test`] answers which groups a
//! single test belongs to, also consulting [`MetadataGroups`] for groups
//! declared on the test methods themselves.

mod config;
pub use config::*;

mod finder;
pub use finder::*;

mod metadata;
pub use metadata::*;

pub mod path;

mod resolved;
pub use resolved::*;

mod resolver;
pub use resolver::*;
