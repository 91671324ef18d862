use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use prelex::testing::sample_path;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write test file");
    path.to_string_lossy().into_owned()
}

#[test]
fn process_prints_delimited_lines() {
    let workdir = TempDir::new().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("prelex");
    cmd.current_dir(workdir.path())
        .arg("process")
        .arg(sample_path("stm32f4.repl"));

    let output_pred = predicate::str::contains("nvic: IRQControllers.NVIC @ sysbus 0xE000E000{\n")
        .and(predicate::str::contains("    cpuType: \"cortex-m4\";\n"))
        .and(predicate::str::contains("    -> nvic@38}\n"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn process_preserves_missing_final_newline() {
    let workdir = TempDir::new().expect("temp dir");
    let input = write_file(workdir.path(), "flat.repl", "a\nb");
    let mut cmd = cargo_bin_cmd!("prelex");
    cmd.current_dir(workdir.path()).arg("process").arg(&input);

    cmd.assert().success().stdout("a;\nb");
}

#[test]
fn process_renders_json() {
    let workdir = TempDir::new().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("prelex");
    cmd.current_dir(workdir.path())
        .arg("process")
        .arg(sample_path("nested_blocks.repl"))
        .arg("--format")
        .arg("json");

    let output_pred = predicate::str::contains("\"lines\": [")
        .and(predicate::str::contains("\"        invert: true}};\""));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn process_renders_yaml() {
    let workdir = TempDir::new().expect("temp dir");
    let input = write_file(workdir.path(), "flat.repl", "a\nb\n");
    let mut cmd = cargo_bin_cmd!("prelex");
    cmd.current_dir(workdir.path())
        .arg("process")
        .arg(&input)
        .arg("-f")
        .arg("yaml");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("lines:").and(predicate::str::contains("- a;")));
}

#[test]
fn process_reports_error_location() {
    let workdir = TempDir::new().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("prelex");
    cmd.current_dir(workdir.path())
        .arg("process")
        .arg(sample_path("bad_dedent.repl"));

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("cpu: CPU.CortexM @ sysbus{"))
        .stderr(
            predicate::str::contains("bad_dedent.repl:3:")
                .and(predicate::str::contains("wrong indentation")),
        );
}

#[test]
fn check_accepts_valid_file() {
    let workdir = TempDir::new().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("prelex");
    cmd.current_dir(workdir.path())
        .arg("check")
        .arg(sample_path("braces_and_comments.repl"));

    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("braces_and_comments.repl: ok\n"));
}

#[test]
fn check_rejects_misplaced_comment_unless_relaxed() {
    let workdir = TempDir::new().expect("temp dir");
    let input = write_file(workdir.path(), "comment.repl", "a\n  /*x*/b\n");

    let mut strict = cargo_bin_cmd!("prelex");
    strict.current_dir(workdir.path()).arg("check").arg(&input);
    strict
        .assert()
        .code(1)
        .stderr(predicate::str::contains("comment.repl:2:").and(predicate::str::contains("syntax error")));

    let mut relaxed = cargo_bin_cmd!("prelex");
    relaxed
        .current_dir(workdir.path())
        .arg("check")
        .arg(&input)
        .arg("--relaxed");
    relaxed.assert().success();
}

#[test]
fn pad_comments_flag_keeps_blanked_tails() {
    let workdir = TempDir::new().expect("temp dir");
    let input = write_file(workdir.path(), "padded.repl", "a/* x\n */\nb");
    let mut cmd = cargo_bin_cmd!("prelex");
    cmd.current_dir(workdir.path())
        .arg("process")
        .arg(&input)
        .arg("--pad-comments");

    cmd.assert().success().stdout("a    ;\n   \nb");
}

#[test]
fn config_file_selects_output_format() {
    let workdir = TempDir::new().expect("temp dir");
    let input = write_file(workdir.path(), "flat.repl", "a\nb\n");
    let config = write_file(workdir.path(), "custom.toml", "[output]\nformat = \"json\"\n");
    let mut cmd = cargo_bin_cmd!("prelex");
    cmd.current_dir(workdir.path())
        .arg("process")
        .arg(&input)
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"a;\"").and(predicate::str::contains("\"lines\"")));
}

#[test]
fn local_config_is_picked_up_and_flags_win() {
    let workdir = TempDir::new().expect("temp dir");
    let input = write_file(workdir.path(), "flat.repl", "a\nb");
    write_file(workdir.path(), "prelex.toml", "[output]\nformat = \"yaml\"\n");

    let mut from_file = cargo_bin_cmd!("prelex");
    from_file.current_dir(workdir.path()).arg("process").arg(&input);
    from_file
        .assert()
        .success()
        .stdout(predicate::str::starts_with("lines:"));

    let mut overridden = cargo_bin_cmd!("prelex");
    overridden
        .current_dir(workdir.path())
        .arg("process")
        .arg(&input)
        .arg("--format")
        .arg("text");
    overridden.assert().success().stdout("a;\nb");
}

#[test]
fn missing_input_is_a_usage_failure() {
    let workdir = TempDir::new().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("prelex");
    cmd.current_dir(workdir.path())
        .arg("process")
        .arg("does-not-exist.repl");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("does-not-exist.repl"));
}

#[test]
fn invalid_config_is_a_usage_failure() {
    let workdir = TempDir::new().expect("temp dir");
    let input = write_file(workdir.path(), "flat.repl", "a\n");
    let config = write_file(workdir.path(), "bad.toml", "[comments]\nblock_tail = \"sideways\"\n");
    let mut cmd = cargo_bin_cmd!("prelex");
    cmd.current_dir(workdir.path())
        .arg("check")
        .arg(&input)
        .arg("-c")
        .arg(&config);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}
