use crate::common::command::{
    get_head_commit_sha, init_repository_dir, run_twig_command, stdout_of, twig_commit_all,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_file_restores_the_head_version_without_staging_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("f.txt"), "scratch".to_string()));

    run_twig_command(dir, &["checkout", "--", "f.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("f.txt")), "A");
    let status = stdout_of(&mut run_twig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
}

#[rstest]
#[case(40)]
#[case(8)]
#[case(6)]
fn checkout_file_from_an_abbreviated_commit_id(init_repository_dir: TempDir, #[case] length: usize) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_sha(dir).unwrap();
    write_file(FileSpec::new(dir.join("f.txt"), "B".to_string()));
    twig_commit_all(dir, "m2");

    run_twig_command(dir, &["checkout", &first[..length], "--", "f.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("f.txt")), "A");
}

#[rstest]
#[case("0000000000")]
#[case("abc")]
#[case("not-a-commit-id")]
fn unknown_or_badly_sized_ids_are_reported(init_repository_dir: TempDir, #[case] commit: &str) {
    run_twig_command(init_repository_dir.path(), &["checkout", commit, "--", "f.txt"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}

#[rstest]
fn file_missing_from_the_commit_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir).unwrap();

    run_twig_command(dir, &["checkout", "--", "missing.txt"])
        .assert()
        .success()
        .stdout("File does not exist in that commit.\n");
    run_twig_command(dir, &["checkout", &head, "--", "missing.txt"])
        .assert()
        .success()
        .stdout("File does not exist in that commit.\n");
}

#[rstest]
fn checkout_without_operands_is_a_usage_error(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["checkout"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Incorrect operands."));
}
