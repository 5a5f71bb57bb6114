use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn task_cli(data_file: &assert_fs::fixture::ChildPath) -> Command {
    let mut cmd = Command::cargo_bin("task-cli").unwrap();
    cmd.arg("--data-file").arg(data_file.path());
    cmd.env_remove("TASK_CLI_DATA_FILE");
    cmd.env_remove("TASK_CLI_SEPARATOR");
    cmd
}

#[test]
fn test_adds_and_lists_tasks() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let data = dir.child("tasks.json");

    task_cli(&data)
        .write_stdin("todo read book\ndeadline Buy milk /by Sunday\nevent Trip /from Mon /to Fri\nlist\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Now you have 3 tasks in the list."))
        .stdout(predicate::str::contains("1.[T][ ] read book"))
        .stdout(predicate::str::contains("2.[D][ ] Buy milk (by: Sunday)"))
        .stdout(predicate::str::contains("3.[E][ ] Trip (from: Mon to: Fri)"));

    Ok(())
}

#[test]
fn test_tasks_survive_between_runs() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let data = dir.child("tasks.json");

    task_cli(&data)
        .write_stdin("todo read book\ntodo buy milk\nmark 2\ndelete 1\n")
        .assert()
        .success();
    data.assert(predicate::path::exists());

    task_cli(&data)
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.[T][X] buy milk"))
        .stdout(predicate::str::contains("read book").not());

    Ok(())
}

#[test]
fn test_bad_commands_do_not_end_the_session() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let data = dir.child("tasks.json");

    task_cli(&data)
        .write_stdin("mark 1\nfoobar\ndeadline wash car\ntodo\ntodo still here\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have 0 tasks"))
        .stdout(predicate::str::contains("don't know what 'foobar' means"))
        .stdout(predicate::str::contains("couldn't understand that deadline command"))
        .stdout(predicate::str::contains("The todo command needs something after it."))
        .stdout(predicate::str::contains("[T][ ] still here"))
        .stdout(predicate::str::contains("Bye. Hope to see you again soon!"));

    Ok(())
}

#[test]
fn test_corrupt_task_file_stops_startup() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let data = dir.child("tasks.json");
    data.write_str("{ definitely not a task list")?;

    task_cli(&data)
        .write_stdin("list\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not load saved tasks"));

    Ok(())
}

#[test]
fn test_separator_comes_from_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let data = dir.child("tasks.json");
    let config = dir.child("task-cli.toml");
    config.write_str("separator = \"~~~~~~~~\"\n")?;

    task_cli(&data)
        .arg("--config")
        .arg(config.path())
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have no tasks in your list.\n~~~~~~~~\n"));

    Ok(())
}

#[test]
fn test_environment_overrides_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let data = dir.child("tasks.json");
    let config = dir.child("task-cli.toml");
    config.write_str("separator = \"~~~~~~~~\"\n")?;

    task_cli(&data)
        .arg("--config")
        .arg(config.path())
        .env("TASK_CLI_SEPARATOR", "##ENV##")
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have no tasks in your list.\n##ENV##\n"))
        .stdout(predicate::str::contains("~~~~~~~~").not());

    Ok(())
}

#[test]
fn test_data_file_flag_overrides_environment() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let from_flag = dir.child("flag.json");
    let from_env = dir.child("env.json");

    task_cli(&from_flag)
        .env("TASK_CLI_DATA_FILE", from_env.path())
        .write_stdin("todo read book\n")
        .assert()
        .success();

    from_flag.assert(predicate::str::contains("read book"));
    from_env.assert(predicate::path::missing());

    Ok(())
}
