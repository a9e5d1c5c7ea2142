use crate::common::command::{
    get_branch_commit_sha, get_head_commit_sha, init_repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
#[case("dev")]
#[case("feature/login")]
#[case("release-1.0")]
fn new_branch_points_at_the_current_commit(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", name])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        get_branch_commit_sha(dir, name).unwrap(),
        get_head_commit_sha(dir).unwrap()
    );
    // the active branch does not change
    assert_eq!(
        std::fs::read_to_string(dir.join(".twig").join("HEAD")).unwrap().trim(),
        "ref: refs/heads/master"
    );
}

#[rstest]
fn duplicate_branch_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "dev"]).assert().success();

    run_twig_command(dir, &["branch", "dev"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");
    run_twig_command(dir, &["branch", "master"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");
}

#[rstest]
#[case("bad..name")]
#[case("ends.lock")]
#[case("with space")]
#[case(".hidden")]
fn invalid_branch_names_are_refused(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", name])
        .assert()
        .success()
        .stdout(format!("Invalid branch name: {name}\n"));

    assert!(get_branch_commit_sha(dir, name).is_err());
}
