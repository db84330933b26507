use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(tag: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("dashboard_settings_{tag}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(SETTINGS_FILE);
    fs::write(&path, contents).expect("write settings");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn missing_file_yields_defaults() {
    let path = env::temp_dir().join("dashboard_settings_missing").join(SETTINGS_FILE);
    let settings = load_settings_from(&path, no_env).expect("defaults");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.search_debounce(), Duration::from_millis(300));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "file_values",
        r#"
api_base_url = "https://dinners.example.com"
save_shortcut = "ctrl+shift+s"
"#,
    );
    let settings = load_settings_from(&path, no_env).expect("settings");
    assert_eq!(settings.api_base_url, "https://dinners.example.com");
    assert_eq!(settings.save_shortcut, "ctrl+shift+s");
    assert_eq!(settings.cancel_shortcut, "escape");

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file() {
    let path = temp_settings_file("env_overrides", "search_debounce_ms = 50\n");
    let vars: HashMap<&str, &str> = [
        ("APP__SEARCH_DEBOUNCE_MS", "125"),
        ("APP__CANCEL_SHORTCUT", "ctrl+q"),
    ]
    .into_iter()
    .collect();

    let settings =
        load_settings_from(&path, |name| vars.get(name).map(|v| v.to_string())).expect("settings");
    assert_eq!(settings.search_debounce_ms, 125);
    assert_eq!(settings.cancel_shortcut, "ctrl+q");

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn invalid_env_number_is_ignored() {
    let path = env::temp_dir().join("dashboard_settings_missing_env").join(SETTINGS_FILE);
    let settings = load_settings_from(&path, |name| {
        (name == "APP__SEARCH_DEBOUNCE_MS").then(|| "soon".to_string())
    })
    .expect("settings");
    assert_eq!(settings.search_debounce_ms, 300);
}

#[test]
fn malformed_file_is_an_error() {
    let path = temp_settings_file("malformed", "search_debounce_ms = \"fast\"\n");
    let err = load_settings_from(&path, no_env).expect_err("malformed");
    assert!(err.to_string().contains("failed to parse settings file"));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn shortcuts_parse_and_report_bad_combos() {
    let shortcuts = Settings::default().shortcuts().expect("default shortcuts");
    assert_eq!(shortcuts.save, KeyCombo::ctrl_s());
    assert_eq!(shortcuts.cancel, KeyCombo::escape());

    let settings = Settings {
        save_shortcut: "hyper+s".into(),
        ..Settings::default()
    };
    let err = settings.shortcuts().expect_err("bad combo");
    assert!(err.to_string().contains("invalid save_shortcut 'hyper+s'"));
}
