use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use genai_integration::{GeminiConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use shared::domain::SheetLayout;
use tracing::warn;
use verse_core::{PromoBanner, SheetSource};

pub const SETTINGS_FILE: &str = "daily_verse.toml";

/// Where the reflection for a verse comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReflectionMode {
    /// Pre-authored reflection columns of the sheet.
    #[default]
    Sheet,
    /// Generated on demand by the text generation service.
    Generated,
}

impl ReflectionMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sheet" | "static" => Some(Self::Sheet),
            "generated" | "ai" => Some(Self::Generated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub sheet_id: String,
    pub sheet_name: String,
    pub sheet_layout: SheetLayout,
    pub reflection_mode: ReflectionMode,
    pub genai_api_key: Option<String>,
    pub genai_model: String,
    pub genai_endpoint: String,
    pub whatsapp_number: String,
    pub preferences_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sheet_id: "1y35vZaHK_zv1-aylHYMk92FwHFpqk5aPzeEyO9BLk1Q".into(),
            sheet_name: "Activo".into(),
            sheet_layout: SheetLayout::Reflections,
            reflection_mode: ReflectionMode::Sheet,
            genai_api_key: None,
            genai_model: DEFAULT_MODEL.into(),
            genai_endpoint: DEFAULT_ENDPOINT.into(),
            whatsapp_number: verse_core::promo::DEFAULT_WHATSAPP_NUMBER.into(),
            preferences_path: None,
        }
    }
}

impl Settings {
    pub fn sheet_source(&self) -> SheetSource {
        SheetSource::new(&self.sheet_id, &self.sheet_name)
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig::new(self.genai_api_key.clone())
            .with_model(&self.genai_model)
            .with_endpoint(&self.genai_endpoint)
    }

    pub fn promo_banner(&self) -> PromoBanner {
        PromoBanner::new(&self.whatsapp_number)
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the flat `key = "value"` settings file, then environment.
/// For each setting the `APP__`-prefixed variable wins over the plain one.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => apply(&mut settings, |key| file_cfg.get(key).cloned()),
            Err(err) => warn!("ignoring unreadable settings file {}: {err}", path.display()),
        }
    }

    apply(&mut settings, |key| {
        env(&format!("APP__{}", key.to_ascii_uppercase())).or_else(|| env(&key.to_ascii_uppercase()))
    });

    // Name used by the hosted variant of the app.
    if settings.genai_api_key.is_none() {
        settings.genai_api_key = env("API_KEY").filter(|v| !v.trim().is_empty());
    }

    settings
}

fn apply(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("sheet_id") {
        settings.sheet_id = v;
    }
    if let Some(v) = lookup("sheet_name") {
        settings.sheet_name = v;
    }
    if let Some(v) = lookup("sheet_layout") {
        match SheetLayout::parse(&v) {
            Some(layout) => settings.sheet_layout = layout,
            None => warn!("unknown sheet_layout '{v}', keeping {:?}", settings.sheet_layout),
        }
    }
    if let Some(v) = lookup("reflection_mode") {
        match ReflectionMode::parse(&v) {
            Some(mode) => settings.reflection_mode = mode,
            None => warn!(
                "unknown reflection_mode '{v}', keeping {:?}",
                settings.reflection_mode
            ),
        }
    }
    if let Some(v) = lookup("gemini_api_key").filter(|v| !v.trim().is_empty()) {
        settings.genai_api_key = Some(v);
    }
    if let Some(v) = lookup("genai_model") {
        settings.genai_model = v;
    }
    if let Some(v) = lookup("genai_endpoint") {
        settings.genai_endpoint = v;
    }
    if let Some(v) = lookup("whatsapp_number") {
        settings.whatsapp_number = v;
    }
    if let Some(v) = lookup("preferences_path") {
        settings.preferences_path = Some(PathBuf::from(v));
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
