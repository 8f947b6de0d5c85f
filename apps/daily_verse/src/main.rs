use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use genai_integration::{GeminiTextGenerator, TextGenerator, UnconfiguredTextGenerator};
use shared::domain::Theme;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use verse_core::{HttpVerseSource, ThreadRandom, VerseSession};

mod config;
mod preferences;
mod render;

use config::{load_settings, load_settings_from, ReflectionMode, Settings};
use preferences::{default_preferences_path, load_preferences, save_preferences, Preferences};
use render::{
    render_banner, render_generated_reflection, render_header, render_main,
    render_sheet_reflection, Palette,
};

#[derive(Parser, Debug)]
#[command(about = "Shows a random verse from the published sheet")]
struct Args {
    /// Persist and use this theme (`light` or `dark`).
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,
    /// Show the reflection for the verse right away.
    #[arg(long)]
    reflect: bool,
    /// Keep reading commands from stdin: r(eflection), n(ext), l(oad), t(heme), q(uit).
    #[arg(long, short)]
    interactive: bool,
    /// Settings file to read instead of ./daily_verse.toml.
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    Theme::parse(value).ok_or_else(|| format!("unknown theme '{value}', expected light or dark"))
}

struct App {
    session: Arc<VerseSession>,
    settings: Settings,
    preferences_path: Option<PathBuf>,
    theme: Theme,
    sheet_reflection_open: bool,
}

impl App {
    fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    async fn print_main(&self) {
        let snapshot = self.session.snapshot().await;
        print!(
            "{}",
            render_main(&snapshot, self.settings.reflection_mode, &self.palette())
        );
    }

    async fn toggle_reflection(&mut self) {
        let palette = self.palette();
        match self.settings.reflection_mode {
            ReflectionMode::Sheet => {
                let Some(verse) = self.session.current().await else {
                    return;
                };
                self.sheet_reflection_open = !self.sheet_reflection_open;
                if self.sheet_reflection_open {
                    if let Some(text) = render_sheet_reflection(&verse, &palette) {
                        print!("{text}");
                    }
                }
            }
            ReflectionMode::Generated => {
                let panel = self.session.toggle_reflection().await;
                if let Some(text) = render_generated_reflection(&panel, &palette) {
                    print!("{text}");
                }
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        persist_theme(self.preferences_path.as_deref(), self.theme);
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match line.trim() {
                "r" => self.toggle_reflection().await,
                "n" => {
                    self.sheet_reflection_open = false;
                    self.session.shuffle().await;
                    self.print_main().await;
                }
                "l" => {
                    self.sheet_reflection_open = false;
                    self.session.load().await;
                    self.print_main().await;
                }
                "t" => {
                    self.toggle_theme();
                    self.print_main().await;
                }
                "q" => break,
                "" => {}
                other => warn!("unknown command '{other}'"),
            }
        }
        Ok(())
    }
}

fn persist_theme(path: Option<&std::path::Path>, theme: Theme) {
    let Some(path) = path else {
        return;
    };
    if let Err(err) = save_preferences(path, &Preferences { theme }) {
        warn!("failed to persist theme preference: {err:#}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => load_settings_from(path, |key| std::env::var(key).ok()),
        None => load_settings(),
    };

    let preferences_path = match settings.preferences_path.clone() {
        Some(path) => Some(path),
        None => default_preferences_path()
            .inspect_err(|err| warn!("theme preference will not be persisted: {err:#}"))
            .ok(),
    };
    let theme = match args.theme {
        Some(theme) => {
            persist_theme(preferences_path.as_deref(), theme);
            theme
        }
        None => preferences_path
            .as_deref()
            .map(load_preferences)
            .unwrap_or_default()
            .theme,
    };

    let source = HttpVerseSource::for_sheet(&settings.sheet_source())?;
    info!(url = %source.url(), "using verse sheet");
    let generator: Arc<dyn TextGenerator> = match settings.reflection_mode {
        ReflectionMode::Generated => Arc::new(GeminiTextGenerator::new(settings.gemini_config())),
        ReflectionMode::Sheet => Arc::new(UnconfiguredTextGenerator),
    };
    let session = VerseSession::new_with_dependencies(
        Arc::new(source),
        settings.sheet_layout,
        generator,
        Arc::new(ThreadRandom),
    );

    let mut app = App {
        session,
        settings,
        preferences_path,
        theme,
        sheet_reflection_open: false,
    };

    print!("{}", render_header(&app.palette()));
    app.session.load().await;
    app.print_main().await;
    if args.reflect {
        app.toggle_reflection().await;
    }
    print!("{}", render_banner(&app.settings.promo_banner(), &app.palette()));

    if args.interactive {
        app.run_interactive().await?;
    }

    Ok(())
}
