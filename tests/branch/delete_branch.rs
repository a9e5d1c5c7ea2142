use crate::common::command::{
    get_branch_commit_sha, global_log_ids, init_repository_dir, run_twig_command, twig_checkout,
    twig_commit_all,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn deleting_a_branch_keeps_its_commits(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "dev"]).assert().success();
    twig_checkout(dir, "dev");
    write_file(FileSpec::new(dir.join("dev.txt"), "D".to_string()));
    twig_commit_all(dir, "dev work");
    twig_checkout(dir, "master");
    let commits = global_log_ids(dir);

    run_twig_command(dir, &["rm-branch", "dev"])
        .assert()
        .success()
        .stdout("");

    assert!(get_branch_commit_sha(dir, "dev").is_err());
    assert_eq!(global_log_ids(dir), commits);
    run_twig_command(dir, &["find", "dev work"])
        .assert()
        .success()
        .stdout(format!("{}\n", commits[2]));
}

#[rstest]
fn deleting_a_nested_branch_prunes_its_directory(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature/login"])
        .assert()
        .success();

    run_twig_command(dir, &["rm-branch", "feature/login"])
        .assert()
        .success();

    assert!(!dir.join(".twig").join("refs").join("heads").join("feature").exists());
}

#[rstest]
fn deleting_the_active_branch_is_refused(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["rm-branch", "master"])
        .assert()
        .success()
        .stdout("Cannot remove the current branch.\n");
}

#[rstest]
fn deleting_an_unknown_branch_is_refused(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["rm-branch", "nope"])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");
}
