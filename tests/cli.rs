use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn sketchboard_cmd() -> Command {
    Command::cargo_bin("sketchboard").expect("binary exists")
}

/// Writes a config whose exports land in `dir/exports`.
fn write_config(dir: &Path) -> std::path::PathBuf {
    let exports = dir.join("exports");
    let config_path = dir.join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[canvas]\nwidth = 200\nheight = 120\n\n[export]\ndirectory = {:?}\nfilename_template = \"sketch\"\n",
            exports.to_string_lossy()
        ),
    )
    .unwrap();
    config_path
}

fn png_size(path: &Path) -> (i32, i32) {
    let mut file = std::fs::File::open(path).unwrap();
    let surface = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    (surface.width(), surface.height())
}

#[test]
fn sketchboard_help_prints_usage() {
    sketchboard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand sketch surface with snapshot undo/redo history",
        ))
        .stdout(predicate::str::contains("--script"));
}

#[test]
fn version_includes_package_version() {
    sketchboard_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_actions_prints_summary() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    sketchboard_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("200x120 surface ready"));
}

#[test]
fn init_config_writes_once() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("nested").join("config.toml");

    sketchboard_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("[canvas]"));

    sketchboard_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn script_output_and_export() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    let script = temp.path().join("steps.json");
    std::fs::write(
        &script,
        r#"{ "steps": [
            { "action": "pointer", "kind": "down", "x": 10, "y": 10 },
            { "action": "pointer", "kind": "move", "x": 150, "y": 90 },
            { "action": "pointer", "kind": "up", "x": 150, "y": 90 },
            { "action": "save" }
        ] }"#,
    )
    .unwrap();
    let output = temp.path().join("drawing.png");

    sketchboard_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Replayed 4 steps (1 saves), history 2/2"))
        .stdout(predicate::str::contains("Saved drawing to"));

    assert_eq!(png_size(&output), (200, 120));
    assert!(temp.path().join("exports").join("sketch.png").exists());
}

#[test]
fn size_flags_override_config() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    let output = temp.path().join("drawing.png");

    sketchboard_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--width", "64", "--height", "48"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(png_size(&output), (64, 48));
}

#[test]
fn view_includes_toolbar_and_border() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    let view = temp.path().join("view.png");

    sketchboard_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--width", "400", "--height", "300"])
        .arg("--view")
        .arg(&view)
        .assert()
        .success();

    assert_eq!(png_size(&view), (402, 362));
}

#[test]
fn data_url_is_printed() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    sketchboard_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--data-url")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("data:image/png;base64,"));
}

#[test]
fn invalid_script_fails() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    let script = temp.path().join("broken.json");
    std::fs::write(&script, r#"{ "steps": [{ "action": "fly" }] }"#).unwrap();

    sketchboard_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid script"));
}

#[test]
fn zero_width_falls_back_to_default() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    let output = temp.path().join("drawing.png");

    sketchboard_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--width", "0"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(png_size(&output), (500, 120));
}

#[test]
fn dump_config_schema_prints_json() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"canvas\""))
        .stdout(predicate::str::contains("\"toolbar\""));
}
