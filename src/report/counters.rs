use std::ops::AddAssign;

use crate::report::SuiteNode;

/// Totals of one suite.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SuiteCounters {
    pub tests: u64,
    pub assertions: u64,
    pub errors: u64,
    pub failures: u64,
    pub skipped: u64,
    pub useless: u64,
    /// Elapsed time in seconds.
    pub time: f64,
}

impl AddAssign for SuiteCounters {
    fn add_assign(&mut self, child: Self) {
        self.tests += child.tests;
        self.assertions += child.assertions;
        self.errors += child.errors;
        self.failures += child.failures;
        self.skipped += child.skipped;
        self.useless += child.useless;
        self.time += child.time;
    }
}

/// One level of suite nesting while a report is collected.
#[derive(Debug)]
pub(crate) struct SuiteFrame {
    pub counters: SuiteCounters,
    pub node: SuiteNode,
}

impl SuiteFrame {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            counters: SuiteCounters::default(),
            node: SuiteNode::new(name),
        }
    }

    /// Write the counters onto the node and hand both out.
    pub fn close(mut self) -> (SuiteCounters, SuiteNode) {
        self.node.counters = self.counters;
        (self.counters, self.node)
    }
}
