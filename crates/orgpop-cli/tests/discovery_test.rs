
use fixtures::TestFixture;
use predicates::prelude::*;

#[test]
fn test_missing_manifest_entry_is_fatal() {
    let fixture = TestFixture::new();
    fixture.tree.write_manifest(&["notes.org"]).unwrap();

    fixture
        .command()
        .args(["--date", "2024-03-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("notes.org"));
}

#[test]
fn test_empty_manifest_disables_directory_listing() {
    let fixture = TestFixture::new();
    fixture.tree.write_manifest(&[]).unwrap();
    fixture
        .tree
        .write_file("stray.org", "* Stray\n<2024-03-05 Tue>\n")
        .unwrap();

    let output = fixture
        .command()
        .args(["--date", "2024-03-05", "--format", "json"])
        .output()
        .expect("Failed to run orgpop");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["days"], serde_json::json!({}));
}

#[test]
fn test_manifest_selects_only_listed_files() {
    let fixture = TestFixture::new();
    fixture
        .tree
        .write_file("picked.org", "* Picked\n<2024-03-05 Tue>\n")
        .unwrap();
    fixture
        .tree
        .write_file("ignored.org", "* Ignored\n<2024-03-06 Wed>\n")
        .unwrap();
    fixture.tree.write_manifest(&["picked.org"]).unwrap();

    let output = fixture
        .command()
        .args(["--date", "2024-03-05", "--format", "json"])
        .output()
        .expect("Failed to run orgpop");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["days"]["5"][0], "Picked");
    assert!(value["days"]["6"].is_null());
}

#[test]
fn test_archive_files_are_never_scanned() {
    let fixture = TestFixture::new();
    fixture
        .tree
        .write_file("live.org", "* Live\n<2024-03-05 Tue>\n")
        .unwrap();
    fixture
        .tree
        .write_file("done_archive.org", "* Done\n<2024-03-06 Wed>\n")
        .unwrap();

    let output = fixture
        .command()
        .args(["--date", "2024-03-05", "--format", "json"])
        .output()
        .expect("Failed to run orgpop");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["days"]["5"][0], "Live");
    assert!(value["days"]["6"].is_null());
}

#[test]
fn test_manifest_listed_archive_is_still_excluded() {
    let fixture = TestFixture::new();
    fixture
        .tree
        .write_file("done_archive.org", "* Done\n<2024-03-06 Wed>\n")
        .unwrap();
    fixture.tree.write_manifest(&["done_archive.org"]).unwrap();

    let output = fixture
        .command()
        .args(["--date", "2024-03-06", "--format", "json"])
        .output()
        .expect("Failed to run orgpop");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["days"], serde_json::json!({}));
}

#[test]
fn test_config_file_provides_roots() {
    let fixture = TestFixture::new();
    fixture
        .tree
        .write_file("a.org", "* Configured\n<2024-03-05 Tue>\n")
        .unwrap();
    let config_path = fixture
        .tree
        .write_file(
            "orgpop.toml",
            &format!("roots = [{:?}]\n", fixture.tree.root().to_str().unwrap()),
        )
        .unwrap();

    fixture
        .bare_command()
        .arg("--config")
        .arg(&config_path)
        .args(["--date", "2024-03-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  - Configured"));
}
