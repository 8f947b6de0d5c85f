use std::{collections::HashMap, fs, path::PathBuf};

use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_active_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");

    let settings = load_settings_from(&dir.path().join("missing.toml"), env_from(&[]));

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.sheet_name, "Activo");
    assert_eq!(settings.sheet_layout, SheetLayout::Reflections);
    assert_eq!(settings.reflection_mode, ReflectionMode::Sheet);
    assert!(settings.genai_api_key.is_none());
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("daily_verse.toml");
    fs::write(
        &path,
        "sheet_id = \"abc\"\nsheet_layout = \"comment\"\nreflection_mode = \"generated\"\n",
    )
    .expect("write settings");

    let settings = load_settings_from(&path, env_from(&[]));

    assert_eq!(settings.sheet_id, "abc");
    assert_eq!(settings.sheet_name, "Activo");
    assert_eq!(settings.sheet_layout, SheetLayout::Comment);
    assert_eq!(settings.reflection_mode, ReflectionMode::Generated);
}

#[test]
fn env_overrides_file_and_prefixed_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("daily_verse.toml");
    fs::write(&path, "sheet_name = \"Archivo\"\nwhatsapp_number = \"1\"\n").expect("write settings");

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("SHEET_NAME", "Plain"),
            ("APP__SHEET_NAME", "Prefixed"),
            ("WHATSAPP_NUMBER", "2"),
            ("PREFERENCES_PATH", "/tmp/prefs.toml"),
        ]),
    );

    assert_eq!(settings.sheet_name, "Prefixed");
    assert_eq!(settings.whatsapp_number, "2");
    assert_eq!(settings.preferences_path, Some(PathBuf::from("/tmp/prefs.toml")));
}

#[test]
fn api_key_is_a_fallback_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.toml");

    let fallback = load_settings_from(&path, env_from(&[("API_KEY", "from-api-key")]));
    assert_eq!(fallback.genai_api_key.as_deref(), Some("from-api-key"));

    let explicit = load_settings_from(
        &path,
        env_from(&[("API_KEY", "from-api-key"), ("GEMINI_API_KEY", "from-gemini")]),
    );
    assert_eq!(explicit.genai_api_key.as_deref(), Some("from-gemini"));
}

#[test]
fn blank_api_key_is_treated_as_missing() {
    let dir = tempfile::tempdir().expect("tempdir");

    let settings = load_settings_from(
        &dir.path().join("missing.toml"),
        env_from(&[("GEMINI_API_KEY", "   "), ("API_KEY", "")]),
    );

    assert!(settings.genai_api_key.is_none());
    assert!(!settings.gemini_config().is_configured());
}

#[test]
fn unknown_enum_values_keep_previous_setting() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("daily_verse.toml");
    fs::write(&path, "sheet_layout = \"comment\"\n").expect("write settings");

    let settings = load_settings_from(
        &path,
        env_from(&[("SHEET_LAYOUT", "columns"), ("REFLECTION_MODE", "maybe")]),
    );

    assert_eq!(settings.sheet_layout, SheetLayout::Comment);
    assert_eq!(settings.reflection_mode, ReflectionMode::Sheet);
}

#[test]
fn unreadable_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("daily_verse.toml");
    fs::write(&path, "sheet_id = [1, 2]\n").expect("write settings");

    let settings = load_settings_from(&path, env_from(&[("SHEET_ID", "from-env")]));

    assert_eq!(settings.sheet_id, "from-env");
}

#[test]
fn sheet_source_points_at_configured_sheet() {
    let settings = Settings {
        sheet_id: "id".into(),
        sheet_name: "Hoja".into(),
        ..Settings::default()
    };

    let url = settings.sheet_source().csv_url().expect("url");

    assert_eq!(
        url.as_str(),
        "https://docs.google.com/spreadsheets/d/id/gviz/tq?tqx=out%3Acsv&sheet=Hoja"
    );
}
