use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Binary under test with deployment variables cleared, so results don't
/// depend on whether the suite runs on GitHub Actions.
fn cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("reflex-showcase");
    for var in [
        "GITHUB_ACTIONS",
        "GITHUB_REPOSITORY",
        "VITE_BASE",
        "VITEPRESS_BASE",
        "REFLEX_SHOWCASE_VIEWER__DEFAULT_TAB",
        "REFLEX_SHOWCASE_VIEWER__CATALOG",
        "REFLEX_SHOWCASE_VIEWER__SNIPPETS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_list_shows_every_label() {
    cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database"))
        .stdout(predicate::str::contains("Events"))
        .stdout(predicate::str::contains("Effects"))
        .stdout(predicate::str::contains("Subscriptions"))
        .stdout(predicate::str::contains("View"))
        .stdout(predicate::str::contains("* db"));
}

#[test]
fn test_list_quick_start_catalog() {
    cmd()
        .args(["list", "--catalog", "quick-start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* install"))
        .stdout(predicate::str::contains("Install packages"))
        .stdout(predicate::str::contains("Enable tracing & devtools"))
        .stdout(predicate::str::contains("Database").not());
}

#[test]
fn test_render_plain_prints_source() {
    cmd()
        .args(["render", "events", "--format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("// events.ts\n"))
        .stdout(predicate::str::contains(
            "import { regEvent } from '@flexsurfer/reflex'",
        ));
}

#[test]
fn test_render_defaults_to_first_tab() {
    cmd()
        .args(["render", "--format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("// db.ts"));
}

#[test]
fn test_render_unknown_key_fails() {
    cmd()
        .args(["render", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_render_html_escapes_markup() {
    cmd()
        .args(["render", "view", "--format", "html"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<pre class=\"language-tsx\"><code>",
        ))
        .stdout(predicate::str::contains("&lt;"))
        .stdout(predicate::str::contains("<span class=\"token keyword\">"));
}

#[test]
fn test_render_json_is_valid() {
    let output = cmd()
        .args([
            "render",
            "install",
            "--catalog",
            "quick-start",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["key"], "install");
    assert_eq!(value["language"], "bash");
    let lines = value["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 4);
    let third: String = lines[2]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|token| token["text"].as_str())
        .collect();
    assert_eq!(third, "Optionally:");
}

#[test]
fn test_render_from_snippet_file() {
    let dir = std::env::temp_dir().join(format!("reflex-showcase-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("snippets.toml");
    std::fs::write(
        &path,
        r#"
default = "second"

[[snippets]]
key = "first"
label = "First"
language = "xyz"
code = "alpha <beta>"

[[snippets]]
key = "second"
label = "Second"
language = "xyz"
code = "gamma"
"#,
    )
    .unwrap();

    cmd()
        .args(["render", "--format", "plain", "--snippets"])
        .arg(&path)
        .assert()
        .success()
        .stdout("gamma\n");

    cmd()
        .args(["list", "--snippets"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("* second"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_invalid_snippet_file_fails() {
    cmd()
        .args(["list", "--snippets", "/definitely/not/here.toml"])
        .assert()
        .failure();
}

#[test]
fn test_missing_config_file_fails() {
    cmd()
        .args(["list", "--config", "/definitely/not/here.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_site_base_path_local() {
    cmd()
        .args(["site", "base-path"])
        .assert()
        .success()
        .stdout("/\n");
}

#[test]
fn test_site_base_path_override() {
    cmd()
        .args(["site", "base-path"])
        .env("VITE_BASE", "preview")
        .assert()
        .success()
        .stdout("/preview/\n");
}

#[test]
fn test_site_base_path_github_actions() {
    cmd()
        .args(["site", "base-path"])
        .env("GITHUB_ACTIONS", "true")
        .env("GITHUB_REPOSITORY", "someone/fork-site")
        .assert()
        .success()
        .stdout("/fork-site/\n");

    cmd()
        .args(["site", "base-path", "--profile", "docs"])
        .env("GITHUB_ACTIONS", "true")
        .assert()
        .success()
        .stdout("/docs/\n");
}

#[test]
fn test_site_nav_docs_joins_base() {
    cmd()
        .args(["site", "nav", "--profile", "docs"])
        .env("VITEPRESS_BASE", "/reflex/docs/")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"href\": \"/reflex/docs/quick-start\"",
        ))
        .stdout(predicate::str::contains("Getting Started"));
}

#[test]
fn test_completions() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reflex-showcase"));
}

#[test]
fn test_unknown_format_rejected() {
    cmd()
        .args(["render", "db", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
