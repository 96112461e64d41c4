//! End-to-end tests for the nsbuild binary
//!
//! Runs the real binary in temporary project directories, with git
//! repositories built through git2 where tagging is involved.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use git2::{Commit, Repository, Signature};
use predicates::prelude::*;
use tempfile::TempDir;

const PYPROJECT: &str = r#"
[project]
name = "acme"
version = "1.2.3"
dependencies = ["shared-core>=1"]

[tool.pdm.namespace.packages.acme-client.project]
name = "acme-client"
dependencies = ["httpx>=0.27"]
"#;

fn nsbuild(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nsbuild").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn write_pyproject(dir: &Path) {
    fs::write(dir.join("pyproject.toml"), PYPROJECT).unwrap();
}

/// Initialize a repository with one commit holding pyproject.toml.
fn init_committed_repo(dir: &Path) -> Repository {
    let repo = Repository::init(dir).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    commit_all(&repo, "chore: initial commit");
    repo
}

fn commit_all(repo: &Repository, message: &str) {
    let signature = Signature::now("Test", "test@example.com").unwrap();
    let tree_id = {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        index.write_tree().unwrap()
    };
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap();
}

fn tag_names(repo: &Repository) -> Vec<String> {
    repo.tag_names(None)
        .unwrap()
        .iter()
        .flatten()
        .map(str::to_string)
        .collect()
}

#[test]
fn bump_without_action_prints_current_version() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());

    nsbuild(temp.path())
        .args(["bump"])
        .assert()
        .success()
        .stdout("1.2.3\n")
        .stderr(predicate::str::contains("current version is"));
}

#[test]
fn bump_minor_prints_next_version() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());

    nsbuild(temp.path())
        .args(["bump", "minor"])
        .assert()
        .success()
        .stdout("1.3.0\n")
        .stderr(predicate::str::contains("new version will be"));
}

#[test]
fn bump_pre_with_label_walks_the_ladder() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());

    nsbuild(temp.path())
        .args(["bump", "pre", "--label", "rc"])
        .assert()
        .success()
        .stdout("1.2.4rc1\n");
}

#[test]
fn bump_fails_without_a_version() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("pyproject.toml"),
        "[project]\nname = \"acme\"\ndynamic = [\"version\"]\n",
    )
    .unwrap();

    nsbuild(temp.path())
        .args(["bump", "minor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not declare project.version"));
}

#[test]
fn bump_with_tag_creates_a_prefixed_tag() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());
    let repo = init_committed_repo(temp.path());

    nsbuild(temp.path())
        .args(["bump", "micro", "--tag"])
        .assert()
        .success()
        .stdout("1.2.4\n")
        .stderr(predicate::str::contains("created tag v1.2.4"));

    assert_eq!(tag_names(&repo), ["v1.2.4"]);
}

#[test]
fn tag_prefix_can_be_disabled() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());
    let repo = init_committed_repo(temp.path());

    nsbuild(temp.path())
        .args(["bump", "micro", "--tag", "--no-tag-prefix"])
        .assert()
        .success();

    assert_eq!(tag_names(&repo), ["1.2.4"]);
}

#[test]
fn dirty_tree_refuses_the_tag_but_succeeds() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());
    let repo = init_committed_repo(temp.path());
    fs::write(temp.path().join("scratch.txt"), "wip").unwrap();

    nsbuild(temp.path())
        .args(["bump", "micro", "--tag"])
        .assert()
        .success()
        .stdout("1.2.4\n")
        .stderr(predicate::str::contains("repository is dirty"));

    assert!(tag_names(&repo).is_empty());
}

#[test]
fn dirty_flag_allows_tagging_a_dirty_tree() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());
    let repo = init_committed_repo(temp.path());
    fs::write(temp.path().join("scratch.txt"), "wip").unwrap();

    nsbuild(temp.path())
        .args(["bump", "micro", "--tag", "--dirty"])
        .assert()
        .success();

    assert_eq!(tag_names(&repo), ["v1.2.4"]);
}

#[test]
fn unchanged_version_refuses_the_tag() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());
    let repo = init_committed_repo(temp.path());

    // finalize on an already-final version computes the same version
    nsbuild(temp.path())
        .args(["bump", "finalize", "--tag"])
        .assert()
        .success()
        .stdout("1.2.3\n")
        .stderr(predicate::str::contains("not creating a tag"));

    assert!(tag_names(&repo).is_empty());
}

#[test]
fn suggest_reads_commit_history() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());
    let repo = init_committed_repo(temp.path());
    {
        let head = repo.head().unwrap().peel(git2::ObjectType::Commit).unwrap();
        repo.tag_lightweight("v1.2.3", &head, false).unwrap();
    }
    fs::write(temp.path().join("feature.py"), "# new").unwrap();
    commit_all(&repo, "feat: add feature module");

    nsbuild(temp.path())
        .args(["bump", "suggest"])
        .assert()
        .success()
        .stdout("1.3.0\n");
}

#[test]
fn resolve_prints_the_effective_manifest() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());

    let output = nsbuild(temp.path())
        .args(["resolve", "--namespace", "acme-client"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rendered = String::from_utf8(output).unwrap();
    let manifest = nsbuild_manifest::Manifest::parse(&rendered).unwrap();

    assert_eq!(
        manifest.metadata().unwrap()["name"].as_str(),
        Some("acme-client")
    );
    assert_eq!(
        manifest.build_config().unwrap()["namespace_build"].as_bool(),
        Some(true)
    );
    assert_eq!(
        manifest.table_at(&["tool", "pdm", "namespace"]).unwrap(),
        None
    );
}

#[test]
fn resolve_rejects_an_undeclared_namespace() {
    let temp = TempDir::new().unwrap();
    write_pyproject(temp.path());

    nsbuild(temp.path())
        .args(["resolve", "--namespace", "acme-clinet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no namespace package named 'acme-clinet' was declared",
        ));
}
