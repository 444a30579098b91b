use std::{fs, thread, time::Duration};

use grouped_junit::{
    config::ReporterConfig,
    filter::{FilteredTests, GroupFilter, TestFilter},
    group::MetadataTable,
    listener::{EventSender, FinishedTest, SuiteListener, event_channel},
    report::{FaultKind, Throwable},
    test::TestLocator,
};
use pretty_assertions::assert_eq;

use crate::lib::{Project, sanitize_root};

fn run_one(sender: &mut EventSender, test: &TestLocator) {
    sender.begin_test(test).unwrap();
    if test.name.contains("Fails") {
        sender
            .record_fault(
                test,
                &Throwable::assertion("AssertionFailedError", "mismatch"),
                FaultKind::Failure,
            )
            .unwrap();
    }
    sender
        .end_test(FinishedTest::new(Duration::from_millis(100)).with_assertions(1))
        .unwrap();
}

#[test]
fn selected_tests_end_up_in_the_written_report() {
    let project = Project::new()
        .with_file("tests/api/UserCest.php", "")
        .with_file("tests/api/PostCest.php", "")
        .with_file("tests/unit/MathTest.php", "")
        .with_file("tests/_data/flaky.txt", "tests/api/PostCest.php:testFails\n")
        .with_file(
            "reporter.yml",
            r#"
groups:
  api: [tests/api]
  flaky: tests/_data/flaky.txt
group_filter:
  include: [api, math]
  exclude: [flaky]
paths:
  output: build
reports:
  xml: report.xml
"#,
        )
        .with_dir("build");

    let config = ReporterConfig::load(project.root().join("reporter.yml")).unwrap();
    let resolved = config.resolver().resolve(&config.groups).unwrap();

    let tests: Vec<TestLocator> = [
        ("tests/api/UserCest.php", "UserCest", "testList"),
        ("tests/api/UserCest.php", "UserCest", "testFails"),
        ("tests/api/PostCest.php", "PostCest", "testFails"),
        ("tests/unit/MathTest.php", "MathTest", "testSum"),
        ("tests/unit/MathTest.php", "MathTest", "testDiv"),
    ]
    .into_iter()
    .map(|(file, class, name)| {
        TestLocator::new(name)
            .with_file(project.real(file))
            .with_class(class)
            .with_line(10)
    })
    .collect();

    let filter = GroupFilter::new(&resolved)
        .with_metadata(MetadataTable::new().with_method("MathTest", "testSum", ["math"]))
        .with_selection(&config.selection);
    let FilteredTests {
        tests: selected,
        filtered_out,
    } = filter.filter(&tests);
    let selected: Vec<&TestLocator> = selected.collect();
    assert_eq!(filtered_out, 2);

    let (sender, rx) = event_channel();
    let report = thread::scope(|scope| {
        let collector = scope.spawn(|| config.aggregator().drain(rx));

        let mut root = sender.clone();
        root.begin_suite("selected").unwrap();
        for chunk in selected.chunks(2) {
            let mut worker = sender.clone();
            scope
                .spawn(move || {
                    for test in chunk {
                        run_one(&mut worker, test);
                    }
                })
                .join()
                .unwrap();
        }
        root.end_suite().unwrap();
        drop(root);
        drop(sender);

        collector.join().unwrap()
    })
    .unwrap();

    let suite = report.suite("selected").unwrap();
    assert_eq!(suite.counters.tests, 3);
    assert_eq!(suite.counters.assertions, 3);
    assert_eq!(suite.counters.failures, 1);

    let target = config.report_target().unwrap();
    target.write(&report).unwrap();

    let written = fs::read_to_string(project.root().join("build/report.xml")).unwrap();
    let written = sanitize_root(&written, &project.canonical_root());
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites>
  <testsuite name="selected" tests="3" assertions="3" errors="0" failures="1" skipped="0" useless="0" time="0.300000">
    <testcase name="testList" class="UserCest" classname="UserCest" file="<root>/tests/api/UserCest.php" line="10" time="0.100000" assertions="1"/>
    <testcase name="testFails" class="UserCest" classname="UserCest" file="<root>/tests/api/UserCest.php" line="10" time="0.100000" assertions="1">
      <failure type="AssertionFailedError">mismatch
</failure>
    </testcase>
    <testcase name="testSum" class="MathTest" classname="MathTest" file="<root>/tests/unit/MathTest.php" line="10" time="0.100000" assertions="1"/>
  </testsuite>
</testsuites>
"#;
    assert_eq!(written, expected);
}
