// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use serde::Deserialize;
use tempfile::NamedTempFile;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Expectation {
    contains: Vec<String>,
    absent: Vec<String>,
}

fn read_expectation(fixture_dir: &Path) -> datatest_stable::Result<Expectation> {
    let content = fs::read_to_string(fixture_dir.join("expect.yaml"))?;
    Ok(serde_yaml::from_str(&content)?)
}

fn check(fixture_dir: &Path, expectation: &Expectation, actual: &str) {
    for needle in &expectation.contains {
        assert!(
            actual.contains(needle.as_str()),
            "{}: expected `{needle}` in output:\n{actual}",
            fixture_dir.display()
        );
    }
    for needle in &expectation.absent {
        assert!(
            !actual.contains(needle.as_str()),
            "{}: unexpected `{needle}` in output:\n{actual}",
            fixture_dir.display()
        );
    }
}

// 对每个 fixture：输出文件与 stdout 都应满足同一组期望。
fn golden_cli_case(path: &Path) -> datatest_stable::Result<()> {
    let fixture_dir = path
        .parent()
        .ok_or("fixture input path should have a parent directory")?;
    let expectation = read_expectation(fixture_dir)?;

    let output = NamedTempFile::new()?;
    cargo_bin_cmd!("markhtml")
        .arg("-o")
        .arg(output.path())
        .arg(path)
        .assert()
        .success();
    check(fixture_dir, &expectation, &fs::read_to_string(output.path())?);

    let assert = cargo_bin_cmd!("markhtml").arg(path).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    check(fixture_dir, &expectation, &stdout);
    Ok(())
}

datatest_stable::harness!({
    test = golden_cli_case,
    root = concat!(env!("CARGO_MANIFEST_DIR"), "/../markhtml-core/tests/fixtures"),
    pattern = r"^[^/]+/input\.md$",
});
