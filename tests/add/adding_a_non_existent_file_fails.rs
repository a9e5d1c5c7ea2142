use crate::common::command::{init_repository_dir, run_twig_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn adding_a_missing_file_reports_it(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn nothing_is_staged_when_one_of_the_files_is_missing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("g.txt"), "G".to_string()));

    run_twig_command(dir, &["add", "g.txt", "missing.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");

    let status = stdout_of(&mut run_twig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\ng.txt\n"));
}
