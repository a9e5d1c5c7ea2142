use crate::common::command::{
    get_branch_commit_sha, get_head_commit_sha, init_repository_dir, run_twig_command,
    stdout_of, twig_checkout, twig_commit_all,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn switching_branches_replaces_the_tracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();

    write_file(FileSpec::new(dir.join("f.txt"), "B".to_string()));
    write_file(FileSpec::new(dir.join("a").join("g.txt"), "G".to_string()));
    twig_commit_all(dir, "master work");
    let master_head = get_head_commit_sha(dir).unwrap();

    twig_checkout(dir, "other");

    assert_eq!(read_file(&dir.join("f.txt")), "A");
    assert!(!dir.join("a").exists());
    assert_eq!(
        std::fs::read_to_string(dir.join(".twig").join("HEAD")).unwrap().trim(),
        "ref: refs/heads/other"
    );
    assert_eq!(get_branch_commit_sha(dir, "master").unwrap(), master_head);

    twig_checkout(dir, "master");

    assert_eq!(read_file(&dir.join("f.txt")), "B");
    assert_eq!(read_file(&dir.join("a").join("g.txt")), "G");
}

#[rstest]
fn switching_branches_clears_the_staging_area(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("g.txt"), "G".to_string()));
    run_twig_command(dir, &["add", "g.txt"]).assert().success();

    twig_checkout(dir, "other");

    let status = stdout_of(&mut run_twig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\ng.txt\n"));
}

#[rstest]
fn checking_out_the_active_branch_is_refused(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("No need to checkout the current branch.\n");
}

#[rstest]
fn checking_out_an_unknown_branch_is_refused(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["checkout", "nope"])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");
}
