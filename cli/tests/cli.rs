use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SCHEMA: &str = "\
% a template with one parameter
pattern P(param1):
  single: attribute_set
  attribute_set mapto param1
end

many: P(input1): i
";

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn compile_prints_facts() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "schema.is", SCHEMA);

    let mut cmd = cargo_bin_cmd!("isc");
    cmd.current_dir(dir.path()).arg("compile").arg(&input);

    cmd.assert().success().stdout(
        predicate::str::starts_with("set(many, i)\napply_instance(P, i)\n")
            .and(predicate::str::contains("apply_mapto(__i__attribute_set, input1)")),
    );
}

#[test]
fn compile_reads_stdin() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("isc");
    cmd.current_dir(dir.path())
        .arg("compile")
        .arg("-")
        .write_stdin("structure: history structures webpages\n");

    cmd.assert()
        .success()
        .stdout("structure(history)\napply_structures(history, webpages)\n");
}

#[test]
fn compile_writes_output_file_with_header() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "schema.is", "many: text: prompt\n");
    write(&dir, "prelude.pl", ":- dynamic set/2.\n");
    let config = write(&dir, "custom.toml", "[output]\nheader = \"prelude.pl\"\n");
    let out = dir.path().join("out.pl");

    // WHEN
    let mut cmd = cargo_bin_cmd!("isc");
    cmd.current_dir(dir.path())
        .arg("compile")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--config")
        .arg(&config);

    // THEN
    cmd.assert().success().stdout("");
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        ":- dynamic set/2.\nset(many, prompt)\ninstance(text, prompt)\n"
    );
}

#[test]
fn no_header_flag_skips_header() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "schema.is", "many: text: prompt\n");
    write(&dir, "prelude.pl", ":- dynamic set/2.\n");
    write(&dir, "isc.toml", "[output]\nheader = \"prelude.pl\"\n");

    let mut cmd = cargo_bin_cmd!("isc");
    cmd.current_dir(dir.path())
        .arg("compile")
        .arg(&input)
        .arg("--no-header");

    cmd.assert()
        .success()
        .stdout("set(many, prompt)\ninstance(text, prompt)\n");
}

#[test]
fn local_config_changes_structure_tags() {
    let dir = TempDir::new().unwrap();
    write(&dir, "isc.toml", "[transpile]\nstructure_tags = [\"grid\"]\n");

    let mut cmd = cargo_bin_cmd!("isc");
    cmd.current_dir(dir.path())
        .arg("compile")
        .arg("-")
        .write_stdin("many: grid: cells\n");

    cmd.assert()
        .success()
        .stdout("set(many, cells)\nstructure(cells)\ninstance(grid, cells)\n");
}

#[test]
fn syntax_error_exits_with_hints() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("isc");
    cmd.current_dir(dir.path())
        .arg("compile")
        .arg("-")
        .write_stdin("pattern P:\n  single: x\n");

    cmd.assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("[Failed!]").and(predicate::str::contains("'end'")));
}

#[test]
fn semantic_error_exits_nonzero() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("isc");
    cmd.current_dir(dir.path())
        .arg("check")
        .arg("-")
        .write_stdin("many: Missing(x): i\n");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Undeclared template 'Missing'"));
}

#[test]
fn check_reports_ok() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "schema.is", SCHEMA);

    let mut cmd = cargo_bin_cmd!("isc");
    cmd.current_dir(dir.path()).arg("check").arg(&input);

    cmd.assert().success().stdout("ok\n");
}

#[test]
fn parse_prints_json_ast() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("isc");
    cmd.current_dir(dir.path())
        .arg("parse")
        .arg("-")
        .write_stdin("a mapto many b\n");

    cmd.assert().success().stdout(
        predicate::str::contains("\"_type\": \"BinaryRelation\"")
            .and(predicate::str::contains("\"relation\": \"mapto many\"")),
    );
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("isc");
    cmd.current_dir(dir.path()).arg("compile").arg("nope.is");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read nope.is"));
}
