use crate::common::command::{
    get_branch_commit_sha, get_head_commit_sha, global_log_ids, init_repository_dir,
    run_twig_command, stdout_of, twig_checkout, twig_commit, twig_commit_all,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_restores_the_snapshot_and_moves_the_active_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let target = get_head_commit_sha(dir).unwrap();

    write_file(FileSpec::new(dir.join("f.txt"), "B".to_string()));
    write_file(FileSpec::new(dir.join("g.txt"), "G".to_string()));
    twig_commit_all(dir, "m2");
    write_file(FileSpec::new(dir.join("h.txt"), "H".to_string()));
    run_twig_command(dir, &["add", "h.txt"]).assert().success();

    run_twig_command(dir, &["reset", &target[..10]])
        .assert()
        .success()
        .stdout("");

    assert_eq!(get_head_commit_sha(dir).unwrap(), target);
    assert_eq!(read_file(&dir.join("f.txt")), "A");
    assert!(!dir.join("g.txt").exists());

    let status = stdout_of(&mut run_twig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\nh.txt\n"));
}

#[rstest]
fn reset_can_move_to_a_commit_of_another_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    twig_checkout(dir, "other");
    write_file(FileSpec::new(dir.join("o.txt"), "O".to_string()));
    twig_commit_all(dir, "other work");
    let other_head = get_head_commit_sha(dir).unwrap();
    twig_checkout(dir, "master");
    let master_before = get_branch_commit_sha(dir, "master").unwrap();

    run_twig_command(dir, &["reset", &other_head]).assert().success();

    assert_eq!(get_branch_commit_sha(dir, "master").unwrap(), other_head);
    assert_ne!(master_before, other_head);
    assert_eq!(read_file(&dir.join("o.txt")), "O");
    assert_eq!(
        std::fs::read_to_string(dir.join(".twig").join("HEAD")).unwrap().trim(),
        "ref: refs/heads/master"
    );
}

#[rstest]
fn reset_to_an_unknown_commit_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir).unwrap();

    run_twig_command(dir, &["reset", "ffffffffff"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");

    assert_eq!(get_head_commit_sha(dir).unwrap(), head);
}

#[rstest]
fn reset_refuses_to_overwrite_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("g.txt"), "G".to_string()));
    twig_commit_all(dir, "add g");
    let with_g = global_log_ids(dir)[2].clone();
    run_twig_command(dir, &["rm", "g.txt"]).assert().success();
    twig_commit(dir, "drop g").assert().success();
    write_file(FileSpec::new(dir.join("g.txt"), "precious".to_string()));

    run_twig_command(dir, &["reset", &with_g])
        .assert()
        .success()
        .stdout(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(read_file(&dir.join("g.txt")), "precious");
}
