use std::io;

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    ReportError,
    report::{CaseChild, CaseNode, Report, SuiteChild, SuiteNode},
};

const INDENT: usize = 2;

/// Render a time in seconds the way JUnit consumers expect it: fixed
/// notation, six decimals, never exponential.
pub fn format_time(seconds: f64) -> String {
    format!("{seconds:.6}")
}

/// Drop characters that are not allowed in an XML 1.0 document.
pub fn prepare_string(text: &str) -> String {
    text.chars()
        .filter(|c| {
            matches!(c,
                '\t' | '\n' | '\r'
                | '\u{20}'..='\u{D7FF}'
                | '\u{E000}'..='\u{FFFD}'
                | '\u{10000}'..='\u{10FFFF}')
        })
        .collect()
}

impl Report {
    /// Serialize the report as a JUnit XML document.
    pub fn to_xml(&self) -> Result<String, ReportError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        match self.suites.is_empty() {
            true => writer.write_event(Event::Empty(BytesStart::new("testsuites")))?,
            false => {
                writer.write_event(Event::Start(BytesStart::new("testsuites")))?;
                for suite in &self.suites {
                    write_suite(&mut writer, suite)?;
                }
                writer.write_event(Event::End(BytesEnd::new("testsuites")))?;
            }
        }

        let mut xml = writer.into_inner();
        xml.push(b'\n');
        String::from_utf8(xml).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
    }
}

fn write_suite(writer: &mut Writer<Vec<u8>>, suite: &SuiteNode) -> io::Result<()> {
    let counters = &suite.counters;
    let mut start = BytesStart::new("testsuite");
    start.push_attribute(("name", prepare_string(&suite.name).as_str()));
    for (key, value) in [
        ("tests", counters.tests),
        ("assertions", counters.assertions),
        ("errors", counters.errors),
        ("failures", counters.failures),
        ("skipped", counters.skipped),
        ("useless", counters.useless),
    ] {
        start.push_attribute((key, value.to_string().as_str()));
    }
    start.push_attribute(("time", format_time(counters.time).as_str()));

    if suite.children.is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    for child in &suite.children {
        match child {
            SuiteChild::Suite(nested) => write_suite(writer, nested)?,
            SuiteChild::Case(case) => write_case(writer, case)?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new("testsuite")))
}

fn write_case(writer: &mut Writer<Vec<u8>>, case: &CaseNode) -> io::Result<()> {
    let mut start = BytesStart::new("testcase");
    for (key, value) in &case.attributes {
        start.push_attribute((key.as_str(), prepare_string(value).as_str()));
    }
    start.push_attribute(("time", format_time(case.time).as_str()));
    start.push_attribute(("assertions", case.assertions.to_string().as_str()));

    if case.children.is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    for child in &case.children {
        match child {
            CaseChild::Fault(fault) => {
                let mut element = BytesStart::new(fault.kind.as_str());
                element.push_attribute(("type", prepare_string(&fault.type_name).as_str()));
                write_text_element(writer, element, &fault.message)?;
            }
            CaseChild::Skipped => writer.write_event(Event::Empty(BytesStart::new("skipped")))?,
            CaseChild::Useless => {
                write_text_element(writer, BytesStart::new("error"), "Useless Test")?
            }
            CaseChild::SystemOut(output) => {
                write_text_element(writer, BytesStart::new("system-out"), output)?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new("testcase")))
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    element: BytesStart<'_>,
    text: &str,
) -> io::Result<()> {
    let end = element.to_end().into_owned();
    writer.write_event(Event::Start(element))?;
    writer.write_event(Event::Text(BytesText::new(&prepare_string(text))))?;
    writer.write_event(Event::End(end))
}
