use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const LOGIN_USERS: &str = "\"users\"\n{\n\t\"76500001\"\n\t{\n\t\t\"AccountName\"\t\t\"alice\"\n\t\t\"PersonaName\"\t\t\"Alice\"\n\t\t\"AllowAutoLogin\"\t\t\"1\"\n\t\t\"MostRecent\"\t\t\"1\"\n\t\t\"Timestamp\"\t\t\"100\"\n\t}\n\n\t\"76500002\"\n\t{\n\t\t\"AccountName\"\t\t\"bob\"\n\t\t\"AllowAutoLogin\"\t\t\"0\"\n\t\t\"MostRecent\"\t\t\"0\"\n\t}\n}\n";

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

fn steam_dir(contents: &str) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir(dir.path().join("config")).expect("config dir");
    write_file(&dir.path().join("config/loginusers.vdf"), contents);
    dir
}

#[test]
fn list_prints_account_names() {
    let dir = steam_dir(LOGIN_USERS);

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .arg("--steam-path")
        .arg(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout("Accounts:\n - alice\n - bob\n");
}

#[test]
fn list_reads_steam_path_from_environment() {
    let dir = steam_dir(LOGIN_USERS);

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .env("STEAM_PATH", dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains(" - alice").and(contains(" - bob")));
}

#[test]
fn list_json() {
    let dir = steam_dir(LOGIN_USERS);

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .args(["list", "--json", "--steam-path"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(
            contains("\"account_name\": \"alice\"")
                .and(contains("\"persona_name\": \"Alice\""))
                .and(contains("\"most_recent\": true"))
                .and(contains("\"id\": \"76500002\"")),
        );
}

#[test]
fn list_without_users_section_is_empty() {
    let dir = steam_dir("\"other\"\n{\n}\n");

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .arg("--steam-path")
        .arg(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout("Accounts:\n");
}

#[test]
fn list_reports_missing_file() {
    let dir = TempDir::new().expect("tempdir");

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .arg("--steam-path")
        .arg(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("ERROR").and(contains("loginusers.vdf")));
}

#[test]
fn rewrite_prints_to_stdout() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("loginusers.vdf");
    write_file(&input, LOGIN_USERS);

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .arg("rewrite")
        .arg(&input)
        .arg("bob")
        .assert()
        .success()
        .stdout(
            contains("\t\t\"AccountName\"\t\t\"alice\"\n\t\t\"PersonaName\"\t\t\"Alice\"\n\t\t\"AllowAutoLogin\"\t\t\"0\"\n\t\t\"MostRecent\"\t\t\"0\"\n")
                .and(contains("\t\t\"AccountName\"\t\t\"bob\"\n\t\t\"RememberPassword\"\t\t\"1\"\n\t\t\"AllowAutoLogin\"\t\t\"1\"\n\t\t\"MostRecent\"\t\t\"1\"\n"))
                .and(contains("\t}\n\n\t\"76500002\"")),
        )
        .stderr("");

    assert_eq!(fs::read_to_string(&input).unwrap(), LOGIN_USERS);
}

#[test]
fn rewrite_writes_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("loginusers.vdf");
    let output = dir.path().join("out.vdf");
    write_file(&input, LOGIN_USERS);

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .arg("rewrite")
        .arg(&input)
        .arg("alice")
        .args(["-o", output.to_str().expect("output path")])
        .assert()
        .success()
        .stdout(contains("Rewrote").and(contains("out.vdf")));

    let contents = fs::read_to_string(&output).expect("read output");
    assert!(contents.starts_with("\"users\"\n{\n\t\"76500001\"\n\t{\n"));
    assert!(contents.contains("\t\t\"RememberPassword\"\t\t\"1\"\n"));
}

#[test]
fn rewrite_in_place() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("loginusers.vdf");
    write_file(&input, LOGIN_USERS);

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .arg("rewrite")
        .arg(&input)
        .arg("bob")
        .arg("--in-place")
        .assert()
        .success()
        .stdout("");

    let contents = fs::read_to_string(&input).expect("read input");
    let bob = &contents[contents.find("\"bob\"").expect("bob record")..];
    assert!(bob.contains("\"MostRecent\"\t\t\"1\""));
}

#[test]
fn rewrite_passes_through_without_section() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("other.vdf");
    let text = "\"config\"\n{\n\t\"x\"\t\t\"y\"\n}\n";
    write_file(&input, text);

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .arg("rewrite")
        .arg(&input)
        .arg("bob")
        .assert()
        .success()
        .stdout(text)
        .stderr(contains("section not found"));
}

#[test]
fn strict_rejects_truncated_section() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("loginusers.vdf");
    let end = LOGIN_USERS.rfind('}').expect("closing brace");
    let text = format!("{}\t\"76500003\"\n}}\n", &LOGIN_USERS[..end]);
    write_file(&input, &text);

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .arg("rewrite")
        .arg(&input)
        .arg("bob")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("ERROR").and(contains("truncated")));

    cargo_bin_cmd!("steam-switch")
        .env_remove("STEAM_SWITCH_LOG")
        .arg("rewrite")
        .arg(&input)
        .arg("bob")
        .assert()
        .success()
        .stderr(contains("trailing records dropped"));
}

#[test]
fn switch_rejects_conflicting_launch_flags() {
    cargo_bin_cmd!("steam-switch")
        .args(["switch", "bob", "-y", "--no-launch"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}
