use crate::report::{FaultRecord, SuiteCounters};

/// A finished report: the top level suites of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub suites: Vec<SuiteNode>,
}

impl Report {
    /// Find a suite by name, searching nested suites depth first.
    pub fn suite(&self, name: &str) -> Option<&SuiteNode> {
        self.suites.iter().find_map(|suite| suite.find(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuiteNode {
    pub name: String,
    pub counters: SuiteCounters,
    pub children: Vec<SuiteChild>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuiteChild {
    Suite(SuiteNode),
    Case(CaseNode),
}

impl SuiteNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counters: SuiteCounters::default(),
            children: Vec::new(),
        }
    }

    pub fn suites(&self) -> impl Iterator<Item = &SuiteNode> {
        self.children.iter().filter_map(|child| match child {
            SuiteChild::Suite(suite) => Some(suite),
            SuiteChild::Case(_) => None,
        })
    }

    pub fn cases(&self) -> impl Iterator<Item = &CaseNode> {
        self.children.iter().filter_map(|child| match child {
            SuiteChild::Case(case) => Some(case),
            SuiteChild::Suite(_) => None,
        })
    }

    fn find(&self, name: &str) -> Option<&SuiteNode> {
        if self.name == name {
            return Some(self);
        }
        self.suites().find_map(|suite| suite.find(name))
    }
}

/// One executed test.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseNode {
    /// Descriptive attributes (`name`, `class`, `file`, ...) in output order.
    pub attributes: Vec<(String, String)>,
    pub time: f64,
    pub assertions: u64,
    pub children: Vec<CaseChild>,
}

impl CaseNode {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn faults(&self) -> impl Iterator<Item = &FaultRecord> {
        self.children.iter().filter_map(|child| match child {
            CaseChild::Fault(fault) => Some(fault),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseChild {
    Fault(FaultRecord),
    Skipped,
    Useless,
    SystemOut(String),
}
