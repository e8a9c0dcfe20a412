use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const BUILD_FILE: &str = r#"
{
    // a small project
    "project": "demo",
    "default": "test",
    "targets": [
        { "name": "init", "tasks": [ { "task": "echo", "message": "initializing" } ] },
        {
            "name": "compile",
            "description": "Compiles the sources",
            "depends": ["init"],
            "tasks": [ { "task": "echo", "message": "compiling" } ]
        },
        {
            "name": "test",
            "depends": ["compile"],
            "unless": "skip.tests",
            "tasks": [ { "task": "echo", "message": "testing" } ]
        },
        { "name": "broken", "tasks": [ { "task": "fail", "message": "disk on fire" } ] },
        {
            "name": "after-broken",
            "depends": ["broken"],
            "tasks": [ { "task": "echo", "message": "unreachable" } ]
        },
        { "name": "clean", "tasks": [ { "task": "echo", "message": "cleaning" } ] }
    ]
}
"#;

fn project() -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("anvil.json").write_str(BUILD_FILE).unwrap();
    dir
}

fn anvil(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("anvil").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn runs_the_default_target_and_its_dependencies() {
    let dir = project();

    anvil(&dir)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("init:"))
        .stdout(predicate::str::contains("[echo] initializing"))
        .stdout(predicate::str::contains("[echo] compiling"))
        .stdout(predicate::str::contains("[echo] testing"))
        .stdout(predicate::str::contains("BUILD SUCCESSFUL"));
}

#[test]
fn runs_the_requested_targets() {
    let dir = project();

    anvil(&dir)
        .args(["run", "clean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleaning"))
        .stdout(predicate::str::contains("compiling").not());
}

#[test]
fn properties_drive_guards() {
    let dir = project();

    anvil(&dir)
        .args(["run", "-v", "-D", "skip.tests=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped because property 'skip.tests' set."))
        .stdout(predicate::str::contains("testing").not());
}

#[test]
fn failures_fail_the_build() {
    let dir = project();

    anvil(&dir)
        .args(["run", "broken", "clean"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BUILD FAILED"))
        .stderr(predicate::str::contains("disk on fire"))
        .stdout(predicate::str::contains("cleaning").not());
}

#[test]
fn keep_going_runs_independent_targets() {
    let dir = project();

    anvil(&dir)
        .args(["run", "-k", "broken", "after-broken", "clean"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("cleaning"))
        .stdout(predicate::str::contains("unreachable").not())
        .stderr(predicate::str::contains(
            "Cannot execute 'after-broken' - 'broken' failed or was not executed.",
        ));
}

#[test]
fn unknown_targets_are_reported() {
    let dir = project();

    anvil(&dir)
        .args(["run", "deploy"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            r#"Target "deploy" does not exist in the project "demo""#,
        ));
}

#[test]
fn a_missing_default_target_is_an_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("anvil.json")
        .write_str(r#"{ "targets": [ { "name": "init" } ] }"#)
        .unwrap();

    anvil(&dir)
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No target specified"));
}

#[test]
fn a_missing_build_file_is_an_error() {
    let dir = assert_fs::TempDir::new().unwrap();

    anvil(&dir)
        .args(["run", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Could not find a build file"));
}

#[test]
fn other_build_files_can_be_picked() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("other.json")
        .write_str(r#"{ "targets": [ { "name": "hi", "tasks": [ { "task": "echo", "message": "hello there" } ] } ] }"#)
        .unwrap();

    anvil(&dir)
        .args(["run", "-f", "other.json", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello there"));
}

#[test]
fn lists_targets() {
    let dir = project();

    anvil(&dir)
        .arg("targets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compiles the sources"))
        .stdout(predicate::str::contains("Default target: test"));
}

#[test]
fn running_without_a_command_runs_the_default_target() {
    let dir = project();

    anvil(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("[echo] testing"));
}

#[cfg(unix)]
#[test]
fn exec_tasks_run_processes_and_fail_on_bad_exits() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("anvil.json")
        .write_str(
            r#"{
                "targets": [
                    { "name": "ok", "tasks": [
                        { "task": "exec", "command": "sh", "args": ["-c", "echo from-the-shell"] }
                    ] },
                    { "name": "bad", "tasks": [
                        { "task": "exec", "command": "sh", "args": ["-c", "exit 3"] }
                    ] }
                ]
            }"#,
        )
        .unwrap();

    anvil(&dir)
        .args(["run", "ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[exec] from-the-shell"));

    anvil(&dir)
        .args(["run", "bad"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("sh exited with"));
}

#[test]
fn property_checks_read_command_line_properties() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("anvil.json")
        .write_str(
            r#"{ "targets": [ { "name": "release", "tasks": [
                { "task": "property-check", "property": "version" }
            ] } ] }"#,
        )
        .unwrap();

    anvil(&dir)
        .args(["run", "release"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Property 'version' is not set"));

    anvil(&dir)
        .args(["run", "-D", "version=1.2.3", "release"])
        .assert()
        .success();
}

#[test]
fn listing_targets_warns_about_broken_dependencies() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("anvil.json")
        .write_str(r#"{ "project": "demo", "targets": [ { "name": "dist", "depends": ["jar"] } ] }"#)
        .unwrap();

    anvil(&dir)
        .arg("targets")
        .assert()
        .success()
        .stdout(predicate::str::contains("dist"))
        .stderr(predicate::str::contains(r#"Target "jar" does not exist in the project "demo""#));
}

#[test]
fn logging_can_be_turned_on_from_the_environment() {
    let dir = project();

    anvil(&dir)
        .env("ANVIL_LOG", "debug")
        .args(["run", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BUILD SUCCESSFUL"))
        .stdout(predicate::str::contains("Total time:"));
}
