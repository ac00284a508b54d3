// tests/cli.rs

mod common;

use assert_cmd::prelude::*;
use common::{array, group_json, groupmirror_cmd, project_json, MockGitLab, Reply};
use predicates::prelude::*;
use tempfile::tempdir;

/// backend(5) -> [api, legacy] + mobile(6) -> [ios]
fn backend_server() -> MockGitLab {
    MockGitLab::start(vec![
        (
            "/api/v4/groups?per_page=100&page=1",
            Reply::json(&array(&[group_json(9, "frontend"), group_json(5, "backend")])),
        ),
        (
            "/api/v4/groups/5/projects?per_page=100&page=1",
            Reply::json(&array(&[
                project_json(50, "api", "backend"),
                project_json(51, "legacy", "backend"),
            ])),
        ),
        (
            "/api/v4/groups/5/subgroups?per_page=100&page=1",
            Reply::json(&array(&[group_json(6, "mobile")])),
        ),
        (
            "/api/v4/groups/6/projects?per_page=100&page=1",
            Reply::json(&array(&[project_json(60, "ios", "backend/mobile")])),
        ),
        (
            "/api/v4/groups/6/subgroups?per_page=100&page=1",
            Reply::json("[]"),
        ),
    ])
}

#[test]
fn test_help_lists_main_options() -> Result<(), Box<dyn std::error::Error>> {
    groupmirror_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--gitlab-url"))
        .stdout(predicate::str::contains("--group"))
        .stdout(predicate::str::contains("--ignore"))
        .stdout(predicate::str::contains("--project-dir"));
    Ok(())
}

#[test]
fn test_missing_token_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    groupmirror_cmd()
        .args(["--gitlab-url", "https://gitlab.example.com", "-g", "backend"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required option: --token"));
    Ok(())
}

#[test]
fn test_invalid_url_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    groupmirror_cmd()
        .args(["--gitlab-url", "ftp://gitlab.example.com", "--token", "t", "-g", "backend"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported scheme 'ftp'"));
    Ok(())
}

#[test]
fn test_unreachable_gitlab_fails_the_run() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    groupmirror_cmd()
        .args(["--gitlab-url", "http://127.0.0.1:1", "--token", "t", "-g", "backend"])
        .arg("-d")
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to list groups"));
    Ok(())
}

#[test]
fn test_unknown_group_exits_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let server = backend_server();
    let temp = tempdir()?;
    groupmirror_cmd()
        .args(["--gitlab-url", server.base_url.as_str(), "--token", "t", "-g", "platform"])
        .arg("-d")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Group 'platform' does not exist"));
    assert_eq!(server.paths(), ["/api/v4/groups?per_page=100&page=1"]);
    Ok(())
}

#[test]
fn test_dry_run_lists_planned_clones() -> Result<(), Box<dyn std::error::Error>> {
    let server = backend_server();
    let temp = tempdir()?;
    groupmirror_cmd()
        .args(["--gitlab-url", server.base_url.as_str(), "--token", "glpat-secret", "-g", "backend"])
        .args(["-i", "legacy", "--embed-token", "-D"])
        .arg("-d")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Dry Run: Clones that would run ---"))
        .stdout(predicate::str::contains(
            "- git clone -b master https://gitlab.example.com/backend/api.git backend/api\n- git clone -b master https://gitlab.example.com/backend/mobile/ios.git backend/mobile/ios\n",
        ))
        .stdout(predicate::str::contains("legacy").not())
        .stdout(predicate::str::contains("glpat-secret").not())
        .stdout(predicate::str::contains("Planned clones: 2"));
    Ok(())
}

#[test]
fn test_remote_default_branch_is_used() -> Result<(), Box<dyn std::error::Error>> {
    let server = backend_server();
    let temp = tempdir()?;
    groupmirror_cmd()
        .args(["--gitlab-url", server.base_url.as_str(), "--token", "t", "-g", "backend"])
        .args(["--remote-default-branch", "-D"])
        .arg("-d")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- git clone -b main https://gitlab.example.com/backend/api.git backend/api",
        ));
    Ok(())
}

#[cfg(unix)]
mod with_fake_git {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_clones_every_project_into_namespace_layout() -> Result<(), Box<dyn std::error::Error>> {
        let server = backend_server();
        let bin = tempdir()?;
        let root = tempdir()?;

        // Records each invocation and fails for the "api" project.
        let git = bin.path().join("fake-git");
        fs::write(
            &git,
            r#"#!/bin/sh
echo "$5" >> clones.log
case "$5" in
  */api) echo "fatal: could not read Username" >&2; exit 128 ;;
esac
mkdir -p "$5"
"#,
        )?;
        let mut perms = fs::metadata(&git)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&git, perms)?;

        groupmirror_cmd()
            .args(["--gitlab-url", server.base_url.as_str(), "--token", "t", "-g", "backend"])
            .arg("--git")
            .arg(&git)
            .arg("-d")
            .arg(root.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Cloned: 2"))
            .stdout(predicate::str::contains("Failed: 1"))
            .stdout(predicate::str::contains(
                "- api (backend/api): git exited with status 128: fatal: could not read Username",
            ));

        let log = fs::read_to_string(root.path().join("clones.log"))?;
        assert_eq!(log, "backend/api\nbackend/legacy\nbackend/mobile/ios\n");
        assert!(root.path().join("backend/legacy").is_dir());
        assert!(root.path().join("backend/mobile/ios").is_dir());
        assert!(!root.path().join("backend/api").exists());
        Ok(())
    }
}
