//! Integration tests that drive the companion-seed binary end to end.

use super::test_utils::{
    companion_seed_command, completion_body, write_categories, write_roster,
    write_workspace_config, FakeChatServer,
};
use companion_seed::prompt::PromptKind;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run_cli(workspace: &Path, args: &[&str]) -> Output {
    companion_seed_command(workspace).args(args).output().unwrap()
}

#[test]
fn test_roster_json_lists_resolved_categories() {
    let temp = TempDir::new().unwrap();
    write_categories(temp.path(), &[("c1", "Games")]);
    write_roster(temp.path(), &[("Fortnite", "Games"), ("Socrates", "Philosophy")]);

    let output = run_cli(
        temp.path(),
        &["roster", "--roster", "roster.json", "--format", "json"],
    );
    assert!(
        output.status.success(),
        "roster should succeed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["name"], "Fortnite");
    assert_eq!(rows[0]["categoryId"], "c1");
    assert!(rows[1]["categoryId"].is_null());
}

#[test]
fn test_generate_without_owner_exits_with_error() {
    let temp = TempDir::new().unwrap();
    write_categories(temp.path(), &[("c1", "Games")]);
    write_workspace_config(
        temp.path(),
        "[provider]\nprovider_type = \"openai\"\napi_key = \"test-key\"\n",
    );

    let output = run_cli(temp.path(), &["generate"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("owner.id"), "stderr: {stderr}");
    assert!(!temp.path().join("Generated_Companions.json").exists());
}

#[test]
fn test_generate_without_api_key_exits_with_error() {
    let temp = TempDir::new().unwrap();
    write_categories(temp.path(), &[("c1", "Games")]);
    write_workspace_config(temp.path(), "[owner]\nid = \"user_1\"\nname = \"Owner\"\n");

    let output = run_cli(temp.path(), &["generate"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OPENAI_API_KEY"), "stderr: {stderr}");
}

#[test]
fn test_generate_missing_category_file_exits_with_error() {
    let temp = TempDir::new().unwrap();
    write_workspace_config(
        temp.path(),
        "[provider]\nprovider_type = \"openai\"\napi_key = \"test-key\"\nendpoint = \"http://127.0.0.1:9\"\n\n[owner]\nid = \"user_1\"\nname = \"Owner\"\n",
    );

    let output = run_cli(temp.path(), &["generate"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Category.json"), "stderr: {stderr}");
}

#[test]
fn test_generate_against_fake_server_writes_output() {
    let temp = TempDir::new().unwrap();
    write_categories(temp.path(), &[("c1", "Games")]);
    write_roster(temp.path(), &[("Fortnite", "Games")]);

    let server = FakeChatServer::start(3, |request| {
        let prompt = request.prompt();
        let reply = if prompt == PromptKind::Description.render("Fortnite") {
            "D"
        } else if prompt == PromptKind::Instructions.render("Fortnite") {
            "I"
        } else {
            "S"
        };
        (200, completion_body(reply))
    });
    write_workspace_config(
        temp.path(),
        &format!(
            "[provider]\nprovider_type = \"openai\"\napi_key = \"test-key\"\nendpoint = \"{}\"\n\n\
             [owner]\nid = \"user_1\"\nname = \"Owner\"\n\n\
             [paths]\nroster = \"roster.json\"\noutput = \"out/companions.json\"\n",
            server.base_url
        ),
    );

    let output = run_cli(temp.path(), &["generate"]);
    assert!(
        output.status.success(),
        "generate should succeed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("generated=1, failed=0"), "stdout: {stdout}");

    let requests = server.finish();
    let prompts: Vec<String> = requests.iter().map(|r| r.prompt()).collect();
    assert_eq!(
        prompts,
        PromptKind::ALL
            .iter()
            .map(|kind| kind.render("Fortnite"))
            .collect::<Vec<_>>()
    );

    let raw = fs::read_to_string(temp.path().join("out/companions.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(records[0]["description"], "D");
    assert_eq!(records[0]["instructions"], "I");
    assert_eq!(records[0]["seed"], "S");
    assert_eq!(records[0]["categoryId"], "c1");
    assert_eq!(records[0]["userId"], "user_1");
}

#[test]
fn test_config_command_masks_api_key() {
    let temp = TempDir::new().unwrap();
    write_workspace_config(temp.path(), "[provider]\napi_key = \"sk-very-secret\"\n");

    let output = run_cli(temp.path(), &["config"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("sk-very-secret"));
    assert!(stdout.contains("model = \"gpt-4\""), "stdout: {stdout}");
}
