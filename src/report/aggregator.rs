use crossbeam_channel::Receiver;
use tracing::{debug, warn};

use crate::{
    ReportError,
    listener::{FinishedTest, ReportEvent, SuiteListener, TestRecord},
    report::{
        CaseChild, CaseNode, FaultKind, FaultRecord, Report, StackTraceFilter, SuiteChild,
        SuiteFrame, Throwable,
    },
    test::TestLocator,
};

/// Reported fields that survive strict mode.
const STRICT_ATTRIBUTES: [&str; 3] = ["file", "name", "class"];

/// Collects lifecycle events into a nested [`Report`].
///
/// The aggregator keeps one [`SuiteFrame`] per open suite. Closing a suite
/// writes its counters onto its node and adds them to the enclosing suite,
/// so every suite ends up with the totals of everything nested in it.
#[derive(Debug, Default)]
pub struct SuiteAggregator {
    frames: Vec<SuiteFrame>,
    current: Option<CaseNode>,
    report: Report,
    strict: bool,
    trace_filter: StackTraceFilter,
}

impl SuiteAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep the `file`, `name` and `class` fields of self-reported tests.
    pub fn with_strict(self, strict: bool) -> Self {
        Self { strict, ..self }
    }

    pub fn with_trace_filter(self, trace_filter: StackTraceFilter) -> Self {
        Self {
            trace_filter,
            ..self
        }
    }

    /// The number of currently open suites, `0` when idle.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_idle(&self) -> bool {
        self.frames.is_empty()
    }

    /// Apply a whole test at once.
    pub fn record_test(&mut self, record: TestRecord) -> Result<(), ReportError> {
        record.replay(self)
    }

    /// Finish collecting and hand out the report.
    ///
    /// Fails if suites are still open.
    pub fn finalize(self) -> Result<Report, ReportError> {
        if !self.frames.is_empty() {
            return Err(ReportError::UnclosedSuites {
                depth: self.frames.len(),
            });
        }
        Ok(self.report)
    }

    /// Apply events from `rx` until every sender is gone, then finalize.
    ///
    /// Run this on the coordinating thread while workers report through
    /// [`EventSender`](crate::listener::EventSender)s.
    pub fn drain(mut self, rx: Receiver<ReportEvent>) -> Result<Report, ReportError> {
        while let Ok(event) = rx.recv() {
            event.apply(&mut self)?;
        }
        self.finalize()
    }

    fn case_from(&self, test: &TestLocator) -> CaseNode {
        let mut case = CaseNode::default();

        if let Some(fields) = &test.reported {
            case.attributes = fields
                .iter()
                .filter(|(key, _)| !self.strict || STRICT_ATTRIBUTES.contains(key))
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            return case;
        }

        case.attributes.push(("name".into(), test.name.clone()));
        if let (Some(class), Some(file), Some(line)) = (&test.class, &test.file, test.line) {
            let classname = class.replace("::", ".").replace('\\', ".");
            case.attributes.extend([
                ("class".to_string(), class.clone()),
                ("classname".to_string(), classname),
                ("file".to_string(), file.clone()),
                ("line".to_string(), line.to_string()),
            ]);
        }
        case
    }
}

impl SuiteListener for SuiteAggregator {
    type Error = ReportError;

    fn begin_suite(&mut self, name: &str) -> Result<(), Self::Error> {
        debug!(suite = name, depth = self.frames.len() + 1, "suite started");
        self.frames.push(SuiteFrame::new(name));
        Ok(())
    }

    fn end_suite(&mut self) -> Result<(), Self::Error> {
        let frame = self.frames.pop().ok_or(ReportError::UnbalancedSuite)?;
        let (counters, node) = frame.close();
        debug!(suite = %node.name, tests = counters.tests, "suite finished");

        match self.frames.last_mut() {
            Some(parent) => {
                parent.counters += counters;
                parent.node.children.push(SuiteChild::Suite(node));
            }
            None => self.report.suites.push(node),
        }
        Ok(())
    }

    fn begin_test(&mut self, test: &TestLocator) -> Result<(), Self::Error> {
        if self.current.is_some() {
            warn!(test = %test.name, "test started before the previous one ended");
        }
        self.current = Some(self.case_from(test));
        Ok(())
    }

    fn end_test(&mut self, finished: FinishedTest) -> Result<(), Self::Error> {
        let frame = self.frames.last_mut().ok_or(ReportError::NoOpenSuite)?;
        let mut case = self.current.take().ok_or(ReportError::NoTestInProgress)?;

        let time = finished.duration.as_secs_f64();
        case.time = time;
        case.assertions = finished.assertions;
        if !finished.output.is_empty() {
            case.children.push(CaseChild::SystemOut(finished.output));
        }

        frame.node.children.push(SuiteChild::Case(case));
        frame.counters.tests += 1;
        frame.counters.assertions += finished.assertions;
        frame.counters.time += time;
        Ok(())
    }

    fn record_fault(
        &mut self,
        test: &TestLocator,
        throwable: &Throwable,
        kind: FaultKind,
    ) -> Result<(), Self::Error> {
        let Some(case) = self.current.as_mut() else {
            return Ok(());
        };
        let record = FaultRecord::new(kind, test, throwable, &self.trace_filter);
        case.children.push(CaseChild::Fault(record));

        if let Some(frame) = self.frames.last_mut() {
            match kind {
                FaultKind::Error => frame.counters.errors += 1,
                // Warnings are reported as failures.
                FaultKind::Failure | FaultKind::Warning => frame.counters.failures += 1,
            }
        }
        Ok(())
    }

    fn record_skipped(&mut self) -> Result<(), Self::Error> {
        let Some(case) = self.current.as_mut() else {
            return Ok(());
        };
        case.children.push(CaseChild::Skipped);
        if let Some(frame) = self.frames.last_mut() {
            frame.counters.skipped += 1;
        }
        Ok(())
    }

    fn record_useless(&mut self) -> Result<(), Self::Error> {
        let Some(case) = self.current.as_mut() else {
            return Ok(());
        };
        case.children.push(CaseChild::Useless);
        if let Some(frame) = self.frames.last_mut() {
            frame.counters.useless += 1;
        }
        Ok(())
    }
}
