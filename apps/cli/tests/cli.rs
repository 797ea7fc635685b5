use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LEGACY: &str = r#"{
  "idShort": "",
  "semanticId": { "keys": [] },
  "inOutputVariables": [],
  "modelType": "Operation"
}"#;

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).expect("fixture written");
    path.display().to_string()
}

fn twin(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("twin");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().expect("tempdir");
    twin(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("canonicalize"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn canonicalize_prints_compact_document() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "op.json", LEGACY);

    twin(&dir)
        .args(["canonicalize", &input, "--compact"])
        .assert()
        .success()
        .stdout(r#"{"inoutputVariables":[],"modelType":"Operation"}"#.to_owned() + "\n");
}

#[test]
fn canonicalize_writes_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "op.json", LEGACY);
    let output = dir.path().join("out.json");

    twin(&dir)
        .args(["canonicalize", &input, "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("output")).expect("json");
    assert_eq!(written, serde_json::json!({ "inoutputVariables": [], "modelType": "Operation" }));
}

#[test]
fn canonicalize_reads_stdin() {
    let dir = TempDir::new().expect("tempdir");
    twin(&dir)
        .args(["canonicalize", "-", "--compact"])
        .write_stdin(r#"{"idShort":"","semanticId":{"keys":[]},"modelType":"Property"}"#)
        .assert()
        .success()
        .stdout("{\"modelType\":\"Property\"}\n");
}

#[test]
fn canonicalize_fails_on_invalid_json() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "broken.json", "{ not json");

    twin(&dir).args(["canonicalize", &input]).assert().failure();
}

#[test]
fn legacy_key_fails_when_the_rename_is_disabled() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "op.json", LEGACY);
    let config = write(
        dir.path(),
        "strict.toml",
        "[serializer]\nrules = \"empty-semantic-id,empty-arrays,empty-id-short\"\n",
    );

    twin(&dir)
        .args(["--config", &config, "canonicalize", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inOutputVariables"));
}

#[test]
fn missing_explicit_config_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "op.json", LEGACY);

    twin(&dir)
        .args(["--config", "absent.toml", "check", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}

#[test]
fn check_reports_canonical_state() {
    let dir = TempDir::new().expect("tempdir");
    let raw = write(dir.path(), "raw.json", LEGACY);
    let canonical = write(dir.path(), "canonical.json", r#"{"modelType":"Property"}"#);

    twin(&dir)
        .args(["check", &raw])
        .assert()
        .failure()
        .stdout(predicate::str::contains("not canonical"));
    twin(&dir)
        .args(["check", &canonical])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(": canonical\n"));
}

#[test]
fn plan_prints_steps_and_actions() {
    let dir = TempDir::new().expect("tempdir");
    let plan = serde_json::json!({
        "idShort": "ProductionPlan",
        "id": "https://example.org/submodels/plan",
        "modelType": "Submodel",
        "submodelElements": [
            {
                "idShort": "QuantityInformation",
                "modelType": "SubmodelElementCollection",
                "value": [
                    { "idShort": "TotalNumberOfPieces", "valueType": "xs:integer", "value": "4", "modelType": "Property" }
                ]
            },
            {
                "idShort": "Step001",
                "modelType": "SubmodelElementCollection",
                "value": [
                    { "idShort": "StepTitle", "valueType": "xs:string", "value": "Drilling", "modelType": "Property" },
                    { "idShort": "Status", "valueType": "xs:string", "value": "executing", "modelType": "Property" },
                    {
                        "idShort": "Actions",
                        "modelType": "SubmodelElementCollection",
                        "value": [
                            {
                                "idShort": "Action001",
                                "modelType": "SubmodelElementCollection",
                                "value": [
                                    { "idShort": "ActionTitle", "valueType": "xs:string", "value": "Drill hole", "modelType": "Property" },
                                    { "idShort": "Status", "valueType": "xs:string", "value": "done", "modelType": "Property" }
                                ]
                            }
                        ]
                    }
                ]
            }
        ]
    });
    let input = write(dir.path(), "plan.json", &plan.to_string());

    twin(&dir)
        .args(["plan", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan https://example.org/submodels/plan"))
        .stdout(predicate::str::contains("quantity: 4"))
        .stdout(predicate::str::is_match(r"Step001\s+executing\s+Drilling").expect("regex"))
        .stdout(predicate::str::is_match(r"Action001\s+done\s+Drill hole").expect("regex"));
}

#[test]
fn plan_rejects_non_submodel_documents() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(dir.path(), "list.json", "[1, 2, 3]");

    twin(&dir).args(["plan", &input]).assert().failure();
}
