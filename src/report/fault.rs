use std::fmt::{self, Display};

use crate::test::TestLocator;

/// The kind of a [`FaultRecord`], also its element name in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    Error,
    Failure,
    Warning,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Error => "error",
            FaultKind::Failure => "failure",
            FaultKind::Warning => "warning",
        }
    }
}

impl Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One frame of a stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl TraceFrame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
        }
    }
}

/// Whatever was thrown or raised while a test ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throwable {
    pub type_name: String,
    pub message: String,
    pub trace: Vec<TraceFrame>,

    /// Assertion failures print their message only, everything else is
    /// prefixed with its type name.
    pub assertion: bool,
}

impl Throwable {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            trace: Vec::new(),
            assertion: false,
        }
    }

    pub fn assertion(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            assertion: true,
            ..Self::new(type_name, message)
        }
    }

    pub fn with_trace(self, trace: impl IntoIterator<Item = TraceFrame>) -> Self {
        Self {
            trace: trace.into_iter().collect(),
            ..self
        }
    }

    fn exception_text(&self) -> String {
        match self.assertion {
            true => self.message.clone(),
            false => format!("{}: {}", self.type_name, self.message),
        }
    }
}

/// Removes frames of the test framework itself from stack traces.
#[derive(Debug, Clone, Default)]
pub struct StackTraceFilter {
    excluded: Vec<String>,
}

impl StackTraceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_excluded(mut self, excluded: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded.extend(excluded.into_iter().map(Into::into));
        self
    }

    /// Render the remaining frames, one `file:line` per line.
    pub fn filter(&self, trace: &[TraceFrame]) -> String {
        let mut out = String::new();
        for frame in trace {
            let Some(file) = &frame.file else {
                continue;
            };
            if self.excluded.iter().any(|prefix| file.starts_with(prefix.as_str())) {
                continue;
            }
            out.push_str(&format!("{file}:{}\n", frame.line.unwrap_or_default()));
        }
        out
    }
}

/// An error, failure or warning attached to a test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultRecord {
    pub kind: FaultKind,
    pub type_name: String,
    pub message: String,
}

impl FaultRecord {
    /// Describe `throwable` raised by `test`.
    ///
    /// The message is the test description (if any), the exception text and
    /// the filtered stack trace, each starting on a new line.
    pub fn new(
        kind: FaultKind,
        test: &TestLocator,
        throwable: &Throwable,
        filter: &StackTraceFilter,
    ) -> Self {
        let mut message = String::new();
        if let Some(description) = &test.description {
            message.push_str(description);
            message.push('\n');
        }
        message.push_str(&throwable.exception_text());
        message.push('\n');
        message.push_str(&filter.filter(&throwable.trace));

        Self {
            kind,
            type_name: throwable.type_name.clone(),
            message,
        }
    }
}
