use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn repository() -> TempDir {
    let temp = TempDir::new().unwrap();
    for marker in ["README.md", "LICENSE", ".gitignore"] {
        temp.child(marker).write_str("x").unwrap();
    }
    temp.child("docs/CNAME").write_str("repo.example.com").unwrap();
    temp.child("docs/com/example/widgets/2.0/widgets-2.0.jar")
        .write_binary(b"jar")
        .unwrap();
    temp
}

fn mavenpages(repo: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mavenpages").unwrap();
    cmd.arg("--repo").arg(repo.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_arguments_prints_help() {
    let repo = TempDir::new().unwrap();
    mavenpages(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains("build-checksums"))
        .stdout(predicate::str::contains("clean-indices"));
}

#[test]
fn build_in_repository() {
    let repo = repository();
    mavenpages(&repo).arg(" Build ").assert().success();

    repo.child("docs/com/example/widgets/2.0/widgets-2.0.pom")
        .assert(predicate::str::contains("<artifactId>widgets</artifactId>"));
    repo.child("docs/com/example/widgets/2.0/widgets-2.0.jar.sha512")
        .assert(predicate::path::exists());
    repo.child("docs/index.html").assert(predicate::str::contains("Index of /"));
}

#[test]
fn unknown_task_fails_before_running() {
    let repo = repository();
    mavenpages(&repo)
        .args(["build-poms", "publish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found: publish"));

    repo.child("docs/com/example/widgets/2.0/widgets-2.0.pom")
        .assert(predicate::path::missing());
}

#[test]
fn refuses_to_run_outside_a_repository() {
    let repo = TempDir::new().unwrap();
    repo.child("docs/a/b/1.0/b-1.0.jar").write_binary(b"jar").unwrap();

    mavenpages(&repo)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Preflight check failed"));

    repo.child("docs/index.html").assert(predicate::path::missing());
}
