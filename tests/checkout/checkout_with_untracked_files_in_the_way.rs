use crate::common::command::{
    init_repository_dir, run_twig_command, twig_checkout, twig_commit_all,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use rstest::rstest;

const IN_THE_WAY: &str =
    "There is an untracked file in the way; delete it, or add and commit it first.\n";

#[rstest]
fn untracked_file_that_would_be_overwritten_aborts_the_switch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    twig_checkout(dir, "other");
    write_file(FileSpec::new(dir.join("g.txt"), "committed".to_string()));
    twig_commit_all(dir, "add g");
    twig_checkout(dir, "master");

    write_file(FileSpec::new(dir.join("g.txt"), "precious".to_string()));
    write_file(FileSpec::new(dir.join("f.txt"), "edited".to_string()));

    run_twig_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout(IN_THE_WAY);

    // nothing was touched
    assert_eq!(read_file(&dir.join("g.txt")), "precious");
    assert_eq!(read_file(&dir.join("f.txt")), "edited");
    assert_eq!(
        std::fs::read_to_string(dir.join(".twig").join("HEAD")).unwrap().trim(),
        "ref: refs/heads/master"
    );
}

#[rstest]
fn untracked_file_with_the_target_content_is_not_in_the_way(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    twig_checkout(dir, "other");
    write_file(FileSpec::new(dir.join("g.txt"), "same".to_string()));
    twig_commit_all(dir, "add g");
    twig_checkout(dir, "master");

    write_file(FileSpec::new(dir.join("g.txt"), "same".to_string()));

    twig_checkout(dir, "other");
    assert_eq!(read_file(&dir.join("g.txt")), "same");
}

#[rstest]
fn untracked_files_the_target_does_not_track_are_left_alone(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("notes.txt"), "mine".to_string()));

    twig_checkout(dir, "other");

    assert_eq!(read_file(&dir.join("notes.txt")), "mine");
}
