//! CLI integration tests
//!
//! These run the `toon` binary against scratch rosters and check exit codes,
//! printed output and written files.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn toon_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_toon"))
}

fn fixture(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(rel)
}

/// Run `toon` inside `dir` so no stray toon.toml is picked up.
fn toon(dir: &Path, args: &[&str]) -> Output {
    Command::new(toon_binary())
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("TOON_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute toon")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    assert!(output.status.success(), "toon failed: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn test_roster_init_and_list() {
    let temp = TempDir::new().unwrap();
    let out = toon(temp.path(), &["roster", "--roster", "crew.json", "init"]);
    assert_success(&out);
    assert!(temp.path().join("crew.json").exists());

    let again = toon(temp.path(), &["roster", "--roster", "crew.json", "init"]);
    assert_eq!(again.status.code(), Some(1));

    let list = toon(temp.path(), &["roster", "--roster", "crew.json", "list"]);
    assert_success(&list);
    assert!(stdout(&list).contains("Host Dexter"));
    assert!(stdout(&list).contains("x1.10"));
}

#[test]
fn test_roster_editing_round_trip() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    assert_success(&toon(dir, &["roster", "--roster", "crew.json", "init"]));
    assert_success(&toon(dir, &["roster", "--roster", "crew.json", "clone", "dex_1", "--id", "dex_2", "--name", "Dex II"]));
    assert_success(&toon(
        dir,
        &["roster", "--roster", "crew.json", "set-slot", "dex_2", "hair", "--color", "#00FF00", "--material", "glossy"],
    ));
    assert_success(&toon(dir, &["roster", "--roster", "crew.json", "set-field", "dex_2", "hairStyle", "bowl_cut"]));
    assert_success(&toon(dir, &["roster", "--roster", "crew.json", "adopt", "c2"]));

    let json = stdout(&toon(dir, &["roster", "--roster", "crew.json", "list", "--json"]));
    let characters: serde_json::Value = serde_json::from_str(&json).expect("list --json should be JSON");
    let characters = characters.as_array().expect("array");
    assert_eq!(characters.len(), 3);
    assert_eq!(characters[1]["hair"]["color"], "#00FF00");
    assert_eq!(characters[1]["hair"]["material"], "glossy");
    assert_eq!(characters[1]["hairStyle"], "bowl_cut");
    assert_eq!(characters[0]["hair"]["color"], "#FF4500");
    assert_eq!(characters[2]["name"], "Cyber Z");

    assert_success(&toon(dir, &["roster", "--roster", "crew.json", "remove", "dex_2"]));
    assert_success(&toon(dir, &["roster", "--roster", "crew.json", "remove", "adopted_1"]));
    let last = toon(dir, &["roster", "--roster", "crew.json", "remove", "dex_1"]);
    assert_eq!(last.status.code(), Some(1));
}

#[test]
fn test_invalid_edits_are_argument_errors() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    assert_success(&toon(dir, &["roster", "--roster", "crew.json", "init"]));

    let bad_slot = toon(dir, &["roster", "--roster", "crew.json", "set-slot", "dex_1", "cape", "--color", "#000"]);
    assert_eq!(bad_slot.status.code(), Some(2));

    let nothing = toon(dir, &["roster", "--roster", "crew.json", "set-slot", "dex_1", "hair"]);
    assert_eq!(nothing.status.code(), Some(2));

    let long_name = "x".repeat(31);
    let bad_name = toon(dir, &["roster", "--roster", "crew.json", "set-field", "dex_1", "name", &long_name]);
    assert_eq!(bad_name.status.code(), Some(2));

    let unknown = toon(dir, &["roster", "--roster", "crew.json", "set-slot", "ghost", "hair", "--color", "#000"]);
    assert_eq!(unknown.status.code(), Some(1));
}

#[test]
fn test_render_single_and_all() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    assert_success(&toon(dir, &["roster", "--roster", "crew.json", "init"]));
    assert_success(&toon(dir, &["roster", "--roster", "crew.json", "new"]));

    let single = toon(dir, &["render", "crew.json", "--size", "200x240"]);
    assert_success(&single);
    let png = dir.join("crew_dex_1.png");
    assert!(stdout(&single).contains("crew_dex_1.png"));
    let image = image::open(&png).expect("should decode").to_rgba8();
    assert_eq!(image.dimensions(), (200, 240));
    assert!(image.pixels().any(|p| p.0[3] > 0));

    let all = toon(dir, &["render", "crew.json", "--all", "-o", "renders/"]);
    assert_success(&all);
    assert!(dir.join("renders/dex_1.png").exists());
    assert!(dir.join("renders/char_1.png").exists());
}

#[test]
fn test_render_bad_size_and_unknown_character() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let bad_size = toon(dir, &["render", "crew.json", "--size", "huge"]);
    assert_eq!(bad_size.status.code(), Some(2));

    let huge = toon(dir, &["render", "crew.json", "--size", "60000x60000"]);
    assert_eq!(huge.status.code(), Some(2));

    let missing = toon(dir, &["render", "crew.json", "--character", "nobody"]);
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("nobody"));
}

#[test]
fn test_tree_prints_layers() {
    let temp = TempDir::new().unwrap();
    let out = toon(temp.path(), &["tree", "crew.json", "--preview", "bowl_cut", "--compact"]);
    assert_success(&out);
    let tree: serde_json::Value = serde_json::from_str(stdout(&out).trim()).expect("tree should be JSON");
    assert!(tree["scale"].as_f64().is_some());
    let text = stdout(&out);
    assert!(text.contains("\"hair_preview\""));
    assert!(text.contains("\"dashed\":true"));
}

#[test]
fn test_apply_item_updates_roster() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    assert_success(&toon(dir, &["roster", "--roster", "crew.json", "init"]));

    let item = fixture("items/lava_locks.json");
    let out = toon(dir, &["apply-item", "crew.json", item.to_str().unwrap()]);
    assert_success(&out);
    assert!(stdout(&out).contains("Lava Locks"));

    let json = stdout(&toon(dir, &["roster", "--roster", "crew.json", "list", "--json"]));
    let characters: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(characters[0]["hair"]["id"], "ai_gen");
    assert_eq!(characters[0]["hair"]["texture"], "shine");
}

#[test]
fn test_party_reports_vibe_and_earnings() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    let conga = fixture("events/conga_line.json");
    let dj = fixture("events/dj_asleep.json");

    let out = toon(
        dir,
        &[
            "party",
            "crew.json",
            "--location",
            "volcano",
            "--event",
            conga.to_str().unwrap(),
            "--event",
            dj.to_str().unwrap(),
            "--json",
        ],
    );
    assert_success(&out);
    let session: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(session["vibe"], 85.0);
    assert_eq!(session["location"], "volcano");
    assert_eq!(session["events"].as_array().map(|e| e.len()), Some(2));
    assert_eq!(session["events"][1]["type"], "hazard");
    let earned = session["earned"].as_f64().unwrap();
    assert!((earned - 5.5).abs() < 1e-9);

    let nowhere = toon(dir, &["party", "crew.json", "--location", "moon"]);
    assert_eq!(nowhere.status.code(), Some(2));
}

#[test]
fn test_catalog_listing() {
    let temp = TempDir::new().unwrap();
    let out = toon(temp.path(), &["catalog", "hair_styles"]);
    assert_success(&out);
    assert!(stdout(&out).contains("bowl_cut"));

    let locations = toon(temp.path(), &["catalog", "locations", "--json"]);
    let rows: serde_json::Value = serde_json::from_str(&stdout(&locations)).unwrap();
    assert_eq!(rows.as_array().map(|r| r.len()), Some(20));

    let unknown = toon(temp.path(), &["catalog", "spaceships"]);
    assert_eq!(unknown.status.code(), Some(2));
}

#[test]
fn test_config_file_sets_defaults() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    std::fs::write(dir.join("toon.toml"), "[render]\nsize = \"120x150\"\n\n[roster]\ndir = \"saves\"\n").unwrap();

    let out = toon(dir, &["render", "-o", "dex.png"]);
    assert_success(&out);
    let image = image::open(dir.join("dex.png")).unwrap();
    assert_eq!((image.width(), image.height()), (120, 150));

    std::fs::write(dir.join("toon.toml"), "[render]\nscale = -1.0\n").unwrap();
    let invalid = toon(dir, &["render"]);
    assert_eq!(invalid.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&invalid.stderr).contains("render.scale"));

    std::fs::write(dir.join("toon.toml"), "[render]\nsize = \"60000x60000\"\n").unwrap();
    let huge = toon(dir, &["render"]);
    assert_eq!(huge.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&huge.stderr).contains("render.size"));
}

#[test]
fn test_dark_mode_setting() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    let off = toon(dir, &["roster", "--roster", "store", "dark-mode"]);
    assert!(stdout(&off).contains("off"));
    assert_success(&toon(dir, &["roster", "--roster", "store", "dark-mode", "true"]));
    let on = toon(dir, &["roster", "--roster", "store", "dark-mode"]);
    assert!(stdout(&on).contains("on"));
    assert!(dir.join("store/party-world-dark-mode.json").exists());
}
