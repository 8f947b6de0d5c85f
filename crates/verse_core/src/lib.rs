use std::sync::Arc;

use genai_integration::{TextGenerator, UnconfiguredTextGenerator};
use shared::{
    domain::{SheetLayout, VerseRecord},
    error::{ErrorCode, UserError},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{error, info};

pub mod csv_decoder;
pub mod promo;
pub mod random;
pub mod reflection;
pub mod transport;

pub use csv_decoder::{decode, decode_with_layout, decode_with_report, DecodeReport};
pub use promo::PromoBanner;
pub use random::{pick_random, RandomSource, SeededRandom, ThreadRandom};
pub use reflection::{ReflectionOutcome, ReflectionPanel, ToggleAction};
pub use transport::{HttpVerseSource, SheetSource, VerseSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loading,
    Failed(UserError),
    Loaded(Vec<VerseRecord>),
}

impl FetchOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn verses(&self) -> &[VerseRecord] {
        match self {
            Self::Loaded(verses) => verses,
            _ => &[],
        }
    }
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub outcome: FetchOutcome,
    pub current: Option<VerseRecord>,
    pub reflection: ReflectionPanel,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    StateChanged(SessionSnapshot),
    ReflectionChanged(ReflectionPanel),
}

struct SessionState {
    outcome: FetchOutcome,
    current: Option<usize>,
    reflection: ReflectionPanel,
    last_report: Option<DecodeReport>,
    /// Bumped whenever the current verse changes so a late reflection
    /// result is not attached to a different verse.
    epoch: u64,
}

impl SessionState {
    fn current_verse(&self) -> Option<&VerseRecord> {
        self.current.and_then(|index| self.outcome.verses().get(index))
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            outcome: self.outcome.clone(),
            current: self.current_verse().cloned(),
            reflection: self.reflection.clone(),
        }
    }
}

/// Owns fetch, decode, random selection and the reflection panel for one
/// session activation.
pub struct VerseSession {
    source: Arc<dyn VerseSource>,
    generator: Arc<dyn TextGenerator>,
    random: Arc<dyn RandomSource>,
    layout: SheetLayout,
    inner: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl VerseSession {
    pub fn new(source: Arc<dyn VerseSource>, layout: SheetLayout) -> Arc<Self> {
        Self::new_with_dependencies(
            source,
            layout,
            Arc::new(UnconfiguredTextGenerator),
            Arc::new(ThreadRandom),
        )
    }

    pub fn new_with_dependencies(
        source: Arc<dyn VerseSource>,
        layout: SheetLayout,
        generator: Arc<dyn TextGenerator>,
        random: Arc<dyn RandomSource>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            source,
            generator,
            random,
            layout,
            inner: Mutex::new(SessionState {
                outcome: FetchOutcome::Loading,
                current: None,
                reflection: ReflectionPanel::Idle,
                last_report: None,
                epoch: 0,
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn current(&self) -> Option<VerseRecord> {
        self.inner.lock().await.current_verse().cloned()
    }

    pub async fn last_report(&self) -> Option<DecodeReport> {
        self.inner.lock().await.last_report
    }

    /// Fetches, decodes and picks a verse. Never retried automatically;
    /// calling it again is a full reload.
    pub async fn load(&self) -> FetchOutcome {
        {
            let mut guard = self.inner.lock().await;
            guard.outcome = FetchOutcome::Loading;
            guard.current = None;
            guard.reflection = ReflectionPanel::Idle;
            guard.epoch += 1;
            self.emit_state(&guard);
        }

        let (outcome, current, report) = match self.source.fetch_csv().await {
            Ok(raw) => {
                let (verses, report) = decode_with_report(&raw, self.layout);
                info!(
                    rows_seen = report.rows_seen,
                    rows_kept = report.rows_kept,
                    "decoded verse sheet"
                );
                let current = random::pick_index(verses.len(), self.random.next_unit());
                (FetchOutcome::Loaded(verses), current, Some(report))
            }
            Err(err) => {
                error!("failed to fetch or parse verses: {err:#}");
                (
                    FetchOutcome::Failed(UserError::new(ErrorCode::VersesUnavailable)),
                    None,
                    None,
                )
            }
        };

        let mut guard = self.inner.lock().await;
        guard.outcome = outcome.clone();
        guard.current = current;
        guard.last_report = report;
        self.emit_state(&guard);
        outcome
    }

    /// Picks another verse from the already fetched set.
    pub async fn shuffle(&self) -> Option<VerseRecord> {
        let mut guard = self.inner.lock().await;
        let len = guard.outcome.verses().len();
        let index = random::pick_index(len, self.random.next_unit())?;
        guard.current = Some(index);
        guard.reflection = ReflectionPanel::Idle;
        guard.epoch += 1;
        self.emit_state(&guard);
        guard.current_verse().cloned()
    }

    /// Drives the reflection panel for the current verse. The first toggle
    /// generates; later toggles only show or hide the cached result.
    pub async fn toggle_reflection(&self) -> ReflectionPanel {
        let (verse, epoch) = {
            let mut guard = self.inner.lock().await;
            let Some(verse) = guard.current_verse().cloned() else {
                return guard.reflection.clone();
            };
            let action = guard.reflection.toggle();
            if action != ToggleAction::StartGeneration {
                if action != ToggleAction::Ignored {
                    self.emit_reflection(&guard.reflection);
                }
                return guard.reflection.clone();
            }
            self.emit_reflection(&guard.reflection);
            (verse, guard.epoch)
        };

        let result = reflection::generate_reflection(self.generator.as_ref(), &verse).await;

        let mut guard = self.inner.lock().await;
        if guard.epoch != epoch {
            info!(verse_id = %verse.id, "discarding reflection for a verse no longer shown");
            return guard.reflection.clone();
        }
        if guard.reflection.complete(ReflectionOutcome::from(result)) {
            self.emit_reflection(&guard.reflection);
        }
        guard.reflection.clone()
    }

    fn emit_state(&self, state: &SessionState) {
        let _ = self.events.send(SessionEvent::StateChanged(state.snapshot()));
    }

    fn emit_reflection(&self, panel: &ReflectionPanel) {
        let _ = self.events.send(SessionEvent::ReflectionChanged(panel.clone()));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
