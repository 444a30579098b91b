use grouped_junit::{
    ConfigurationError,
    config::ReporterConfig,
    group::{GroupConfig, GroupResolver},
};
use pretty_assertions::assert_eq;

use crate::lib::Project;

#[test]
fn wildcard_groups_from_failed_logs() {
    let project = Project::new()
        .with_file("tests/unit/UserTest.php", "")
        .with_file("tests/unit/PostTest.php", "")
        .with_file("tests/_log/g_1", "tests/unit/UserTest.php\n")
        .with_file("tests/_log/g_2", "tests/unit/PostTest.php:testCreate\n\n")
        .with_file("tests/_log/other", "tests/unit/UserTest.php\n");

    let config =
        ReporterConfig::from_yaml_str("groups:\n  \"g_*\": tests/_log/g_*\n", project.root())
            .unwrap();
    let resolved = config.resolver().resolve(&config.groups).unwrap();

    assert_eq!(resolved.names().collect::<Vec<_>>(), vec!["g_1", "g_2"]);
    assert_eq!(
        resolved.get("g_1").unwrap(),
        [project.real("tests/unit/UserTest.php")]
    );
    assert_eq!(
        resolved.get("g_2").unwrap(),
        [format!("{}:testCreate", project.real("tests/unit/PostTest.php"))]
    );
}

#[test]
fn list_file_with_missing_test_names_path_and_group() {
    let project = Project::new()
        .with_file("tests/unit/UserTest.php", "")
        .with_file(
            "tests/_data/failed.txt",
            "tests/unit/UserTest.php\ntests/unit/GoneTest.php\n",
        );

    let config = GroupConfig::new().with_path("failed", "tests/_data/failed.txt");
    let err = GroupResolver::new(project.root())
        .resolve(&config)
        .unwrap_err();

    match &err {
        ConfigurationError::MissingPath { path, group } => {
            assert!(path.ends_with("tests/unit/GoneTest.php"));
            assert_eq!(group, "failed");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("failed group does not exist"));
}

#[test]
fn directories_and_methods_mix() {
    let project = Project::new()
        .with_file("tests/api/UserCest.php", "")
        .with_file("tests/api/PostCest.php", "")
        .with_dir("tests/unit");

    let config = ReporterConfig::from_yaml_str(
        "groups:\n  api: [tests/api]\n  create: ['tests/api/PostCest.php:create']\n  unit: [tests/unit]\n",
        project.root(),
    )
    .unwrap();
    let resolved = config.resolver().resolve(&config.groups).unwrap();

    assert_eq!(resolved.get("api").unwrap(), [project.real("tests/api")]);
    assert_eq!(
        resolved.get("create").unwrap(),
        [format!("{}:create", project.real("tests/api/PostCest.php"))]
    );
    assert_eq!(resolved.get("unit").unwrap(), [project.real("tests/unit")]);
}
