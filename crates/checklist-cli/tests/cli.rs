use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;
use serde_json::Value;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const TWO_TOOLS: &str = include_str!("../../checklist-spec/tests/fixtures/model_details_two_tools.json");
const BROKEN_TEMPLATE: &str = include_str!("../../checklist-spec/tests/fixtures/broken_template.json");

/// A command isolated from the caller's config file and environment.
fn checklist(workspace: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("checklist")?;
    cmd.current_dir(workspace)
        .env_remove("RUST_LOG")
        .env_remove("CHECKLIST_OWNER")
        .env_remove("CHECKLIST_FONTS_DIR")
        .env_remove("CHECKLIST_TEMPLATES_DIR")
        .env("CHECKLIST_STORE_DIR", workspace.join("store"))
        .env("CHECKLIST_SHARE_URL", "https://forms.example.org/");
    Ok(cmd)
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf8 stdout")
}

/// Pulls `<id>` out of a `Saved form <id> (revision N)` line.
fn saved_id(stdout: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Saved form "))
        .and_then(|rest| rest.split_whitespace().next())
        .expect("saved form line")
        .to_string()
}

#[test]
fn templates_lists_builtins() -> TestResult {
    let workspace = TempDir::new()?;
    let stdout = stdout_of(checklist(workspace.path())?.arg("templates"));
    assert!(stdout.contains("ai-disclosure\t"));
    assert!(stdout.contains("aapor-transparency\t"));
    Ok(())
}

#[test]
fn check_reports_template_problems() -> TestResult {
    let workspace = TempDir::new()?;
    let path = workspace.path().join("broken.json");
    fs::write(&path, BROKEN_TEMPLATE)?;
    let output = checklist(workspace.path())?
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output)?;
    assert!(stdout.contains("Template broken: invalid"));
    assert!(stdout.contains("[duplicate_question]"));
    assert!(stdout.contains("warning [ungrouped_section]"));
    Ok(())
}

#[test]
fn schema_describes_template_files() -> TestResult {
    let workspace = TempDir::new()?;
    let stdout = stdout_of(checklist(workspace.path())?.arg("schema"));
    let schema: Value = serde_json::from_str(&stdout)?;
    assert!(schema["properties"]["sections"].is_object());
    Ok(())
}

#[test]
fn guest_fill_writes_snapshot_without_storing() -> TestResult {
    let workspace = TempDir::new()?;
    let out = workspace.path().join("study.json");
    let stdout = stdout_of(
        checklist(workspace.path())?
            .arg("fill")
            .arg("--title")
            .arg("Pilot Study")
            .arg("--out")
            .arg(&out)
            .write_stdin("Used for drafting\n"),
    );
    assert!(stdout.contains("Guest mode"));
    assert!(stdout.contains("1. How was the AI tool used? *"));
    assert!(stdout.contains("required answer(s) still missing"));

    let snapshot: Value = serde_json::from_str(&fs::read_to_string(&out)?)?;
    assert_eq!(snapshot["title"], "Pilot Study");
    assert_eq!(snapshot["template_id"], "ai-disclosure");
    assert_eq!(snapshot["form_data"]["q1"], "Used for drafting");
    assert!(!workspace.path().join("store").exists());
    Ok(())
}

#[test]
fn export_writes_named_text_file() -> TestResult {
    let workspace = TempDir::new()?;
    let snapshot = workspace.path().join("two_tools.json");
    fs::write(&snapshot, TWO_TOOLS)?;
    let out_dir = workspace.path().join("exports");

    stdout_of(
        checklist(workspace.path())?
            .args(["export", "--format", "txt", "--mode", "summary", "--skip-empty"])
            .arg("--snapshot")
            .arg(&snapshot)
            .arg("--out")
            .arg(&out_dir),
    );
    let text = fs::read_to_string(out_dir.join("Panel_Study_2026_summary.txt"))?;
    assert!(text.starts_with("Panel Study 2026\n"));
    assert!(text.contains("\nAI Tool 2:\nLlama 3 Open Source Yes Internal coded responses\n"));
    assert!(!text.contains("ignored while q8 is No"));
    Ok(())
}

#[test]
fn status_lists_missing_answers_per_instance() -> TestResult {
    let workspace = TempDir::new()?;
    let snapshot = workspace.path().join("two_tools.json");
    fs::write(&snapshot, TWO_TOOLS)?;
    let stdout = stdout_of(
        checklist(workspace.path())?
            .arg("status")
            .arg("--snapshot")
            .arg(&snapshot),
    );
    assert!(stdout.contains("[ ] Model Details (missing: q7 (AI Tool 1)"));
    assert!(stdout.contains("Status: need_input"));
    Ok(())
}

#[test]
fn saving_requires_an_owner() -> TestResult {
    let workspace = TempDir::new()?;
    let snapshot = workspace.path().join("two_tools.json");
    fs::write(&snapshot, TWO_TOOLS)?;
    let output = checklist(workspace.path())?
        .arg("save")
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8(output)?.contains("no owner configured"));
    Ok(())
}

#[test]
fn stored_form_can_be_published_viewed_and_unpublished() -> TestResult {
    let workspace = TempDir::new()?;
    let snapshot = workspace.path().join("two_tools.json");
    fs::write(&snapshot, TWO_TOOLS)?;

    let stdout = stdout_of(
        checklist(workspace.path())?
            .args(["--owner", "ada", "save", "--snapshot"])
            .arg(&snapshot),
    );
    let id = saved_id(&stdout);

    let listed = stdout_of(checklist(workspace.path())?.args(["--owner", "ada", "list"]));
    assert!(listed.contains(&id));
    assert!(listed.contains("private"));
    assert!(listed.contains("Panel Study 2026"));

    let published = stdout_of(checklist(workspace.path())?.args([
        "publish", "--id", &id, "--author", "Ada Lovelace",
    ]));
    let url = published
        .trim()
        .strip_prefix("Published: ")
        .expect("published line")
        .to_string();
    assert!(url.starts_with("https://forms.example.org/#/view/"));

    let view = stdout_of(checklist(workspace.path())?.args(["view", &url]));
    assert!(view.starts_with("Panel Study 2026\nBy Ada Lovelace\n"));
    assert!(view.contains("[AI Tool 2]"));
    assert!(!view.contains("ignored while q8 is No"));

    let republished = stdout_of(checklist(workspace.path())?.args([
        "publish", "--id", &id, "--author", "Grace",
    ]));
    assert_eq!(republished.trim(), format!("Published: {}", url));

    stdout_of(checklist(workspace.path())?.args(["unpublish", "--id", &id]));
    checklist(workspace.path())?
        .args(["view", &url])
        .assert()
        .failure();

    stdout_of(checklist(workspace.path())?.args(["delete", "--id", &id]));
    let listed = stdout_of(checklist(workspace.path())?.args(["--owner", "ada", "list"]));
    assert!(listed.contains("No active forms."));
    Ok(())
}

#[test]
fn config_file_supplies_owner_and_store() -> TestResult {
    let workspace = TempDir::new()?;
    let snapshot = workspace.path().join("two_tools.json");
    fs::write(&snapshot, TWO_TOOLS)?;
    fs::write(
        workspace.path().join("checklist.toml"),
        "owner = \"grace\"\nstore_dir = \"records\"\n",
    )?;

    let mut cmd = Command::cargo_bin("checklist")?;
    cmd.current_dir(workspace.path())
        .env_remove("CHECKLIST_OWNER")
        .env_remove("CHECKLIST_STORE_DIR")
        .arg("save")
        .arg("--snapshot")
        .arg(&snapshot);
    let id = saved_id(&stdout_of(&mut cmd));
    assert!(
        workspace
            .path()
            .join("records")
            .join("forms")
            .join(format!("{}.json", id))
            .exists()
    );
    Ok(())
}

#[test]
fn saving_over_a_stored_form_rejects_a_blank_title() -> TestResult {
    let workspace = TempDir::new()?;
    let snapshot = workspace.path().join("two_tools.json");
    fs::write(&snapshot, TWO_TOOLS)?;
    let id = saved_id(&stdout_of(
        checklist(workspace.path())?
            .args(["--owner", "ada", "save", "--snapshot"])
            .arg(&snapshot),
    ));

    let mut blank: Value = serde_json::from_str(TWO_TOOLS)?;
    blank["title"] = Value::from("  ");
    let blank_path = workspace.path().join("blank_title.json");
    fs::write(&blank_path, serde_json::to_string(&blank)?)?;

    let output = checklist(workspace.path())?
        .args(["--owner", "ada", "save", "--id", &id, "--snapshot"])
        .arg(&blank_path)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8(output)?.contains("EmptyTitle"));

    let listed = stdout_of(checklist(workspace.path())?.args(["--owner", "ada", "list"]));
    assert!(listed.contains("Panel Study 2026"));
    Ok(())
}
