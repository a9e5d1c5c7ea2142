use crate::common::command::{
    get_head_commit_sha, global_log_ids, init_repository_dir, run_twig_command, stdout_of,
    twig_checkout, twig_commit, twig_commit_all,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Diverge from m1 with `f.txt` set to X on master and Y on b
fn diverge(dir: &std::path::Path, master_content: Option<&str>, b_content: Option<&str>) {
    run_twig_command(dir, &["branch", "b"]).assert().success();

    set_or_remove(dir, b_content, "b", true);
    set_or_remove(dir, master_content, "master", false);
}

fn set_or_remove(dir: &std::path::Path, content: Option<&str>, branch: &str, switch: bool) {
    if switch {
        twig_checkout(dir, branch);
    }

    write_file(FileSpec::new(dir.join(format!("{branch}.txt")), branch.to_string()));
    match content {
        Some(content) => write_file(FileSpec::new(dir.join("f.txt"), content.to_string())),
        None => {
            run_twig_command(dir, &["rm", "f.txt"]).assert().success();
        }
    }
    twig_commit_all(dir, &format!("{branch} work"));

    if switch {
        twig_checkout(dir, "master");
    }
}

#[rstest]
fn conflicting_edits_produce_a_marker_block(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    diverge(dir, Some("X\n"), Some("Y\n"));
    let master_head = get_head_commit_sha(dir).unwrap();
    let commits = global_log_ids(dir);

    run_twig_command(dir, &["merge", "b"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\nX\n=======\nY\n>>>>>>>\n"
    );
    // the non-conflicting side of the merge is applied and staged
    assert_eq!(read_file(&dir.join("b.txt")), "b");
    assert_eq!(get_head_commit_sha(dir).unwrap(), master_head);
    assert_eq!(global_log_ids(dir), commits);

    let status = stdout_of(&mut run_twig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\nb.txt\n\n"));
    assert!(status.contains("f.txt (modified)"));
}

#[rstest]
fn deleted_on_one_side_leaves_that_side_empty(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    diverge(dir, Some("X\n"), None);

    run_twig_command(dir, &["merge", "b"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\nX\n=======\n>>>>>>>\n"
    );
}

#[rstest]
fn identical_edits_on_both_sides_merge_cleanly(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    diverge(dir, Some("same\n"), Some("same\n"));

    run_twig_command(dir, &["merge", "b"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("f.txt")), "same\n");
    assert_eq!(read_file(&dir.join("b.txt")), "b");
    run_twig_command(dir, &["find", "Merged master with b."])
        .assert()
        .success();
}

#[rstest]
fn resolving_the_conflict_and_committing_finishes_the_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    diverge(dir, Some("X\n"), Some("Y\n"));
    run_twig_command(dir, &["merge", "b"]).assert().success();

    write_file(FileSpec::new(dir.join("f.txt"), "X and Y\n".to_string()));
    run_twig_command(dir, &["add", "f.txt"]).assert().success();
    twig_commit(dir, "resolve").assert().success().stdout("");

    std::fs::remove_file(dir.join("b.txt")).unwrap();
    run_twig_command(dir, &["checkout", "--", "b.txt"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(read_file(&dir.join("b.txt")), "b");
    assert_eq!(read_file(&dir.join("f.txt")), "X and Y\n");
}
