use crate::common::command::{init_repository_dir, repository_dir, run_twig_command, stdout_of};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_single_file_lists_it_as_staged(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("g.txt"), "G".to_string()));

    run_twig_command(dir, &["add", "g.txt"])
        .assert()
        .success()
        .stdout("");

    let status = stdout_of(&mut run_twig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\ng.txt\n\n"));
    assert!(dir.join(".twig").join("index").is_file());
}

#[rstest]
fn add_directory_stages_every_file_below_it(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();

    let nested = dir.join("a").join("b");
    let mut expected = write_generated_files(&nested, 3)
        .into_iter()
        .map(|spec| {
            let name = spec.path.file_name().unwrap().to_string_lossy().to_string();
            format!("a/b/{name}")
        })
        .collect::<Vec<_>>();
    write_file(FileSpec::new(dir.join("a").join("top.txt"), "top".to_string()));
    expected.push("a/top.txt".to_string());
    expected.sort();

    run_twig_command(dir, &["add", "a"]).assert().success();

    let status = stdout_of(&mut run_twig_command(dir, &["status"]));
    let staged = status
        .split("=== Staged Files ===\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\n").next())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect::<Vec<_>>();
    assert_eq!(staged, expected);
}

#[rstest]
fn adding_a_file_again_replaces_the_staged_version(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("g.txt"), "first".to_string()));
    run_twig_command(dir, &["add", "g.txt"]).assert().success();

    write_file(FileSpec::new(dir.join("g.txt"), "second".to_string()));
    run_twig_command(dir, &["add", "g.txt"]).assert().success();
    run_twig_command(dir, &["commit", "second version"])
        .assert()
        .success();

    std::fs::remove_file(dir.join("g.txt")).unwrap();
    run_twig_command(dir, &["checkout", "--", "g.txt"])
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(dir.join("g.txt")).unwrap(), "second");
}
