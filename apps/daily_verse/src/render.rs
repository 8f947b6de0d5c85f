//! Text rendering of the session for the terminal.

use shared::{
    domain::{Theme, VerseRecord},
    locale,
};
use verse_core::{FetchOutcome, PromoBanner, ReflectionOutcome, ReflectionPanel, SessionSnapshot};

use crate::config::ReflectionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    accent: &'static str,
    body: &'static str,
    muted: &'static str,
    error: &'static str,
    reset: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                accent: "\x1b[38;5;125m",
                body: "\x1b[38;5;236m",
                muted: "\x1b[38;5;244m",
                error: "\x1b[38;5;160m",
                reset: "\x1b[0m",
            },
            Theme::Dark => Self {
                accent: "\x1b[38;5;211m",
                body: "\x1b[38;5;255m",
                muted: "\x1b[38;5;248m",
                error: "\x1b[38;5;203m",
                reset: "\x1b[0m",
            },
        }
    }

    pub fn plain() -> Self {
        Self {
            accent: "",
            body: "",
            muted: "",
            error: "",
            reset: "",
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        format!("{color}{text}{}", self.reset)
    }
}

pub fn render_header(palette: &Palette) -> String {
    format!(
        "{}\n{}\n",
        palette.paint(palette.accent, locale::APP_TITLE),
        palette.paint(palette.muted, locale::APP_TAGLINE)
    )
}

pub fn render_main(snapshot: &SessionSnapshot, mode: ReflectionMode, palette: &Palette) -> String {
    if snapshot.outcome.is_loading() && snapshot.current.is_none() {
        return format!("{}\n", palette.paint(palette.muted, locale::LOADING_VERSE));
    }
    if let FetchOutcome::Failed(err) = &snapshot.outcome {
        return format!("{}\n", palette.paint(palette.error, &err.message));
    }
    let Some(verse) = &snapshot.current else {
        return format!("{}\n", palette.paint(palette.muted, locale::NO_VERSES_FOUND));
    };

    let mut out = render_verse(verse, palette);
    let offers_reflection = match mode {
        ReflectionMode::Sheet => verse.has_reflection(),
        ReflectionMode::Generated => true,
    };
    if offers_reflection {
        out.push_str(&format!(
            "\n  {}\n",
            palette.paint(palette.accent, &format!("✦ {}", locale::SHOW_REFLECTION))
        ));
    }
    out
}

fn render_verse(verse: &VerseRecord, palette: &Palette) -> String {
    format!(
        "\n  {}\n\n  {}\n",
        palette.paint(palette.body, &format!("“{}”", verse.text)),
        palette.paint(palette.accent, &format!("— {}", verse.reference))
    )
}

/// Pre-authored reflection columns, closed with the blessing.
pub fn render_sheet_reflection(verse: &VerseRecord, palette: &Palette) -> Option<String> {
    let paragraphs = verse.reflection_paragraphs();
    if paragraphs.is_empty() {
        return None;
    }
    let mut out = format!("\n{}\n", palette.paint(palette.accent, locale::REFLECTION_TITLE));
    for paragraph in paragraphs {
        out.push_str(&format!("\n{}\n", palette.paint(palette.body, paragraph)));
    }
    out.push_str(&format!("\n{}\n", palette.paint(palette.accent, locale::BLESSING)));
    Some(out)
}

pub fn render_generated_reflection(panel: &ReflectionPanel, palette: &Palette) -> Option<String> {
    if panel.is_generating() {
        return Some(format!(
            "\n{}\n",
            palette.paint(palette.muted, locale::REFLECTION_GENERATING)
        ));
    }
    let body = match panel.visible_outcome()? {
        ReflectionOutcome::Text(text) => palette.paint(palette.body, text),
        ReflectionOutcome::Failed(err) => palette.paint(palette.error, &err.message),
    };
    Some(format!(
        "\n{}\n\n{body}\n",
        palette.paint(palette.accent, locale::REFLECTION_TITLE)
    ))
}

pub fn render_banner(banner: &PromoBanner, palette: &Palette) -> String {
    format!(
        "\n{} {}\n{} {}\n",
        palette.paint(palette.accent, locale::PROMO_TITLE),
        palette.paint(palette.muted, locale::PROMO_TAGLINE),
        palette.paint(palette.body, locale::PROMO_CALL_TO_ACTION),
        banner.contact_url()
    )
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
