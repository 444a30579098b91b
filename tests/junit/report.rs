use std::time::Duration;

use grouped_junit::{
    ReportError,
    listener::{FinishedTest, SuiteListener},
    report::{FaultKind, SuiteAggregator, Throwable, TraceFrame},
    test::{DescribeTest, ReportFields, TestLocator},
};
use pretty_assertions::assert_eq;

struct Scenario {
    title: &'static str,
}

impl DescribeTest for Scenario {
    fn name(&self) -> &str {
        self.title
    }

    fn report_fields(&self) -> Option<ReportFields> {
        Some(
            ReportFields::new()
                .with("name", self.title)
                .with("feature", "login")
                .with("file", "tests/acceptance/Login.feature"),
        )
    }
}

#[test]
fn single_failing_test() {
    let mut aggregator = SuiteAggregator::new();
    let test = TestLocator::new("t1");

    aggregator.begin_suite("Root").unwrap();
    aggregator.begin_test(&test).unwrap();
    aggregator
        .record_fault(
            &test,
            &Throwable::assertion("AssertionFailedError", "expected true"),
            FaultKind::Failure,
        )
        .unwrap();
    aggregator
        .end_test(FinishedTest::new(Duration::from_millis(500)))
        .unwrap();
    aggregator.end_suite().unwrap();

    let xml = aggregator.finalize().unwrap().to_xml().unwrap();
    assert!(xml.contains(
        r#"<testsuite name="Root" tests="1" assertions="0" errors="0" failures="1" skipped="0" useless="0" time="0.500000">"#
    ));
    assert!(xml.contains(r#"<failure type="AssertionFailedError">expected true"#));
}

#[test]
fn three_levels_roll_up() {
    let mut aggregator = SuiteAggregator::new();
    let unit = TestLocator::new("testSum")
        .with_class("Math\\SumTest")
        .with_file("/app/tests/unit/SumTest.php")
        .with_line(12);
    let scenario = TestLocator::probe(&Scenario {
        title: "log in as admin",
    });

    aggregator.begin_suite("all").unwrap();
    aggregator.begin_suite("unit").unwrap();
    aggregator.begin_suite("Math\\SumTest").unwrap();
    aggregator.begin_test(&unit).unwrap();
    aggregator
        .end_test(FinishedTest::new(Duration::from_millis(250)).with_assertions(3))
        .unwrap();
    aggregator.begin_test(&unit).unwrap();
    aggregator
        .record_fault(
            &unit,
            &Throwable::new("RuntimeException", "boom").with_trace([
                TraceFrame::new("/app/vendor/framework/Runner.php", 80),
                TraceFrame::new("/app/tests/unit/SumTest.php", 14),
            ]),
            FaultKind::Error,
        )
        .unwrap();
    aggregator
        .end_test(FinishedTest::new(Duration::from_millis(250)))
        .unwrap();
    aggregator.end_suite().unwrap();
    aggregator.end_suite().unwrap();

    aggregator.begin_suite("acceptance").unwrap();
    aggregator.begin_test(&scenario).unwrap();
    aggregator.record_skipped().unwrap();
    aggregator
        .end_test(FinishedTest::new(Duration::ZERO).with_output("skipping on CI"))
        .unwrap();
    aggregator.end_suite().unwrap();
    aggregator.end_suite().unwrap();

    let report = aggregator.finalize().unwrap();
    let all = report.suite("all").unwrap();
    assert_eq!(all.counters.tests, 3);
    assert_eq!(all.counters.assertions, 3);
    assert_eq!(all.counters.errors, 1);
    assert_eq!(all.counters.skipped, 1);
    assert_eq!(all.counters.time, 0.5);
    assert_eq!(report.suite("unit").unwrap().counters.tests, 2);

    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites>
  <testsuite name="all" tests="3" assertions="3" errors="1" failures="0" skipped="1" useless="0" time="0.500000">
    <testsuite name="unit" tests="2" assertions="3" errors="1" failures="0" skipped="0" useless="0" time="0.500000">
      <testsuite name="Math\SumTest" tests="2" assertions="3" errors="1" failures="0" skipped="0" useless="0" time="0.500000">
        <testcase name="testSum" class="Math\SumTest" classname="Math.SumTest" file="/app/tests/unit/SumTest.php" line="12" time="0.250000" assertions="3"/>
        <testcase name="testSum" class="Math\SumTest" classname="Math.SumTest" file="/app/tests/unit/SumTest.php" line="12" time="0.250000" assertions="0">
          <error type="RuntimeException">RuntimeException: boom
/app/vendor/framework/Runner.php:80
/app/tests/unit/SumTest.php:14
</error>
        </testcase>
      </testsuite>
    </testsuite>
    <testsuite name="acceptance" tests="1" assertions="0" errors="0" failures="0" skipped="1" useless="0" time="0.000000">
      <testcase name="log in as admin" feature="login" file="tests/acceptance/Login.feature" time="0.000000" assertions="0">
        <skipped/>
        <system-out>skipping on CI</system-out>
      </testcase>
    </testsuite>
  </testsuite>
</testsuites>
"#;
    assert_eq!(report.to_xml().unwrap(), expected);
}

#[test]
fn out_of_order_events_are_errors() {
    let mut aggregator = SuiteAggregator::new();
    assert!(matches!(
        aggregator.end_suite(),
        Err(ReportError::UnbalancedSuite)
    ));
    assert!(matches!(
        aggregator.end_test(FinishedTest::default()),
        Err(ReportError::NoOpenSuite)
    ));

    aggregator.begin_suite("open").unwrap();
    assert!(matches!(
        aggregator.end_test(FinishedTest::default()),
        Err(ReportError::NoTestInProgress)
    ));
    assert!(matches!(
        aggregator.finalize(),
        Err(ReportError::UnclosedSuites { depth: 1 })
    ));
}
