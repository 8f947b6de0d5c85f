use shared::error::{ErrorCode, UserError};

use super::*;

fn snapshot(outcome: FetchOutcome, current: Option<VerseRecord>) -> SessionSnapshot {
    SessionSnapshot {
        outcome,
        current,
        reflection: ReflectionPanel::Idle,
    }
}

fn juan() -> VerseRecord {
    VerseRecord::new("1", "Porque de tal manera amó Dios al mundo", "Juan 3:16")
}

#[test]
fn loading_shows_placeholder() {
    let out = render_main(
        &snapshot(FetchOutcome::Loading, None),
        ReflectionMode::Sheet,
        &Palette::plain(),
    );

    assert_eq!(out, format!("{}\n", locale::LOADING_VERSE));
}

#[test]
fn failure_shows_only_user_message() {
    let out = render_main(
        &snapshot(
            FetchOutcome::Failed(UserError::new(ErrorCode::VersesUnavailable)),
            None,
        ),
        ReflectionMode::Sheet,
        &Palette::plain(),
    );

    assert_eq!(out, format!("{}\n", locale::VERSES_UNAVAILABLE));
}

#[test]
fn empty_sheet_shows_no_verses_found() {
    let out = render_main(
        &snapshot(FetchOutcome::Loaded(Vec::new()), None),
        ReflectionMode::Sheet,
        &Palette::plain(),
    );

    assert_eq!(out, format!("{}\n", locale::NO_VERSES_FOUND));
}

#[test]
fn verse_without_sheet_reflection_has_no_hint() {
    let verse = juan();
    let out = render_main(
        &snapshot(FetchOutcome::Loaded(vec![verse.clone()]), Some(verse)),
        ReflectionMode::Sheet,
        &Palette::plain(),
    );

    assert!(out.contains("“Porque de tal manera amó Dios al mundo”"));
    assert!(out.contains("— Juan 3:16"));
    assert!(!out.contains(locale::SHOW_REFLECTION));
}

#[test]
fn generated_mode_always_offers_reflection() {
    let verse = juan();
    let out = render_main(
        &snapshot(FetchOutcome::Loaded(vec![verse.clone()]), Some(verse)),
        ReflectionMode::Generated,
        &Palette::plain(),
    );

    assert!(out.contains(locale::SHOW_REFLECTION));
}

#[test]
fn sheet_reflection_lists_paragraphs_then_blessing() {
    let mut verse = juan();
    verse.reflection_primary = Some("Primera".into());
    verse.reflection_secondary = Some("  ".into());
    verse.comment = Some("Segunda".into());

    let out = render_sheet_reflection(&verse, &Palette::plain()).expect("reflection");

    let title = out.find(locale::REFLECTION_TITLE).expect("title");
    let first = out.find("Primera").expect("first");
    let second = out.find("Segunda").expect("second");
    let blessing = out.find(locale::BLESSING).expect("blessing");
    assert!(title < first && first < second && second < blessing);
    assert!(render_sheet_reflection(&juan(), &Palette::plain()).is_none());
}

#[test]
fn generated_panel_states() {
    let palette = Palette::plain();

    assert!(render_generated_reflection(&ReflectionPanel::Idle, &palette).is_none());
    assert_eq!(
        render_generated_reflection(&ReflectionPanel::Generating, &palette),
        Some(format!("\n{}\n", locale::REFLECTION_GENERATING))
    );

    let shown = ReflectionPanel::Ready {
        outcome: ReflectionOutcome::Text("Dios es amor.".into()),
        visible: true,
    };
    let out = render_generated_reflection(&shown, &palette).expect("visible");
    assert!(out.contains(locale::REFLECTION_TITLE));
    assert!(out.contains("Dios es amor."));

    let hidden = ReflectionPanel::Ready {
        outcome: ReflectionOutcome::Text("Dios es amor.".into()),
        visible: false,
    };
    assert!(render_generated_reflection(&hidden, &palette).is_none());

    let failed = ReflectionPanel::Ready {
        outcome: ReflectionOutcome::Failed(UserError::new(ErrorCode::ReflectionNotConfigured)),
        visible: true,
    };
    let out = render_generated_reflection(&failed, &palette).expect("visible");
    assert!(out.contains(locale::REFLECTION_NOT_CONFIGURED));
}

#[test]
fn banner_links_to_whatsapp() {
    let out = render_banner(&PromoBanner::default(), &Palette::plain());

    assert!(out.contains(locale::PROMO_TITLE));
    assert!(out.contains(locale::PROMO_CALL_TO_ACTION));
    assert!(out.contains("https://wa.me/584125384440?text=%C2%A1Hola!"));
}

#[test]
fn themed_palette_wraps_text_in_color_codes() {
    let out = render_header(&Palette::for_theme(Theme::Dark));

    assert!(out.contains("\x1b[0m"));
    assert_ne!(
        Palette::for_theme(Theme::Dark),
        Palette::for_theme(Theme::Light)
    );
}
