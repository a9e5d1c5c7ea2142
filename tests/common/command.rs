use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository whose `master` holds one commit tracking `f.txt` ("A")
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("f.txt"),
        "A".to_string(),
    ));
    run_twig_command(repository_dir.path(), &["add", "f.txt"])
        .assert()
        .success();
    twig_commit(repository_dir.path(), "m1").assert().success();

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("TWIG_COMMIT_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    run_twig_command(dir, &["commit", message])
}

/// Stage everything in the working directory and commit it
pub fn twig_commit_all(dir: &Path, message: &str) {
    run_twig_command(dir, &["add", "."]).assert().success();
    twig_commit(dir, message).assert().success();
}

pub fn twig_checkout(dir: &Path, branch: &str) {
    run_twig_command(dir, &["checkout", branch])
        .assert()
        .success()
        .stdout("");
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run twig");
    assert!(output.status.success(), "twig failed: {:?}", output);

    String::from_utf8(output.stdout).expect("twig printed invalid UTF-8")
}

/// Commit the active branch points at
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_path = dir.join(".twig").join("HEAD");
    let head_content = std::fs::read_to_string(head_path)?;

    let ref_path = head_content
        .trim()
        .strip_prefix("ref: ")
        .ok_or("HEAD is not a symbolic ref")?;
    let commit_sha = std::fs::read_to_string(dir.join(".twig").join(ref_path))?;

    Ok(commit_sha.trim().to_string())
}

pub fn get_branch_commit_sha(dir: &Path, branch: &str) -> Result<String, Box<dyn std::error::Error>> {
    let ref_file = dir.join(".twig").join("refs").join("heads").join(branch);

    Ok(std::fs::read_to_string(ref_file)?.trim().to_string())
}

/// Commit IDs in the order `global-log` prints them
pub fn global_log_ids(dir: &Path) -> Vec<String> {
    stdout_of(&mut run_twig_command(dir, &["global-log"]))
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}
