use crossbeam_channel::{Receiver, Sender};

use crate::{
    ReportError,
    listener::{FinishedTest, SuiteListener},
    report::{FaultKind, Throwable},
    test::TestLocator,
};

/// Something that happened inside one test, between its begin and end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestEvent {
    Fault { throwable: Throwable, kind: FaultKind },
    Skipped,
    Useless,
}

/// A complete test, sent in one piece so tests of different workers never
/// interleave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    pub test: TestLocator,
    pub events: Vec<TestEvent>,
    pub finished: FinishedTest,
}

impl TestRecord {
    /// Replay this test on `listener`.
    pub fn replay<L: SuiteListener>(self, listener: &mut L) -> Result<(), L::Error> {
        listener.begin_test(&self.test)?;
        for event in self.events {
            match event {
                TestEvent::Fault { throwable, kind } => {
                    listener.record_fault(&self.test, &throwable, kind)?
                }
                TestEvent::Skipped => listener.record_skipped()?,
                TestEvent::Useless => listener.record_useless()?,
            }
        }
        listener.end_test(self.finished)
    }
}

/// One message from an [`EventSender`] to the collecting thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    BeginSuite(String),
    EndSuite,
    Test(TestRecord),
}

impl ReportEvent {
    pub fn apply<L: SuiteListener>(self, listener: &mut L) -> Result<(), L::Error> {
        match self {
            ReportEvent::BeginSuite(name) => listener.begin_suite(&name),
            ReportEvent::EndSuite => listener.end_suite(),
            ReportEvent::Test(record) => record.replay(listener),
        }
    }
}

/// Create a connected [`EventSender`] and receiver.
///
/// The receiver is meant for [`SuiteAggregator::drain`](crate::report::SuiteAggregator::drain).
pub fn event_channel() -> (EventSender, Receiver<ReportEvent>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (EventSender::new(tx), rx)
}

/// A [`SuiteListener`] that forwards events to another thread.
///
/// Test events are buffered until `end_test` and then sent as one
/// [`TestRecord`]. Suite events are sent right away, so they should come from
/// a single thread to stay well nested.
#[derive(Debug)]
pub struct EventSender {
    tx: Sender<ReportEvent>,
    current: Option<(TestLocator, Vec<TestEvent>)>,
}

impl EventSender {
    pub fn new(tx: Sender<ReportEvent>) -> Self {
        Self { tx, current: None }
    }

    fn send(&self, event: ReportEvent) -> Result<(), ReportError> {
        self.tx.send(event).map_err(|_| ReportError::Disconnected)
    }

    fn push(&mut self, event: TestEvent) {
        if let Some((_, events)) = self.current.as_mut() {
            events.push(event);
        }
    }
}

impl Clone for EventSender {
    /// A new sender on the same channel, without the test in progress.
    fn clone(&self) -> Self {
        Self::new(self.tx.clone())
    }
}

impl SuiteListener for EventSender {
    type Error = ReportError;

    fn begin_suite(&mut self, name: &str) -> Result<(), Self::Error> {
        self.send(ReportEvent::BeginSuite(name.to_string()))
    }

    fn end_suite(&mut self) -> Result<(), Self::Error> {
        self.send(ReportEvent::EndSuite)
    }

    fn begin_test(&mut self, test: &TestLocator) -> Result<(), Self::Error> {
        self.current = Some((test.clone(), Vec::new()));
        Ok(())
    }

    fn end_test(&mut self, finished: FinishedTest) -> Result<(), Self::Error> {
        let Some((test, events)) = self.current.take() else {
            return Err(ReportError::NoTestInProgress);
        };
        self.send(ReportEvent::Test(TestRecord {
            test,
            events,
            finished,
        }))
    }

    fn record_fault(
        &mut self,
        _: &TestLocator,
        throwable: &Throwable,
        kind: FaultKind,
    ) -> Result<(), Self::Error> {
        self.push(TestEvent::Fault {
            throwable: throwable.clone(),
            kind,
        });
        Ok(())
    }

    fn record_skipped(&mut self) -> Result<(), Self::Error> {
        self.push(TestEvent::Skipped);
        Ok(())
    }

    fn record_useless(&mut self) -> Result<(), Self::Error> {
        self.push(TestEvent::Useless);
        Ok(())
    }
}
