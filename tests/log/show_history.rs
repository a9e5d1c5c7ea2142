use crate::common::command::{
    get_head_commit_sha, global_log_ids, init_repository_dir, run_twig_command, stdout_of,
    twig_checkout, twig_commit_all,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn log_block_has_the_expected_layout(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir).unwrap();

    let log = stdout_of(&mut run_twig_command(dir, &["log"]));
    let first_block = log.split("\n\n").next().unwrap();
    let lines = first_block.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "===");
    assert_eq!(lines[1], format!("commit {head}"));
    assert!(lines[2].starts_with("Date: "));
    assert_eq!(lines[3], "m1");
}

#[rstest]
fn log_follows_the_active_branch_only(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "side"]).assert().success();
    twig_checkout(dir, "side");
    write_file(FileSpec::new(dir.join("side.txt"), "S".to_string()));
    twig_commit_all(dir, "on side");
    twig_checkout(dir, "master");
    write_file(FileSpec::new(dir.join("main.txt"), "M".to_string()));
    twig_commit_all(dir, "on master");

    run_twig_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on master"))
        .stdout(predicate::str::contains("on side").not());

    let global_log = stdout_of(&mut run_twig_command(dir, &["global-log"]));
    assert!(global_log.contains("on master"));
    assert!(global_log.contains("on side"));
}

#[rstest]
fn global_log_lists_commits_in_creation_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("f.txt"), "B".to_string()));
    twig_commit_all(dir, "m2");

    let ids = global_log_ids(dir);
    let log_ids = stdout_of(&mut run_twig_command(dir, &["log"]))
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect::<Vec<_>>();

    assert_eq!(ids.len(), 3);
    assert_eq!(log_ids.into_iter().rev().collect::<Vec<_>>(), ids);
}
