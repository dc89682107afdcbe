use portfolio_behaviors::{
    BehaviorConfig, ConsoleLevel, DeniedClipboard, Error, FixedClock, LoaderState, MemoryClipboard,
    Page, Result, TypingState,
};

const PORTFOLIO_HTML: &str = include_str!("fixtures/portfolio.html");

fn page_with_year(year: i32) -> Result<Page> {
    Page::from_html_with(
        PORTFOLIO_HTML,
        BehaviorConfig::default(),
        Box::new(MemoryClipboard::new()),
        &FixedClock::new(year),
    )
}

#[test]
fn typing_effect_reveals_one_character_per_tick() -> Result<()> {
    let mut page = Page::from_html(PORTFOLIO_HTML)?;
    assert_eq!(page.typing_state(), Some(TypingState::Idle));
    page.assert_text(".hero-subtitle", "Senior Backend Engineer")?;

    page.dispatch_load()?;
    page.assert_text(".hero-subtitle", "")?;
    assert_eq!(page.typing_state(), Some(TypingState::Running { revealed: 0 }));

    page.advance_time(499)?;
    page.assert_text(".hero-subtitle", "")?;
    page.advance_time(1)?;
    page.assert_text(".hero-subtitle", "S")?;

    page.advance_time_to(2600)?;
    page.assert_text(".hero-subtitle", "Senior Backend Enginee")?;

    page.advance_time_to(2700)?;
    page.assert_text(".hero-subtitle", "Senior Backend Engineer")?;
    assert_eq!(
        page.typing_state(),
        Some(TypingState::Running { revealed: 23 })
    );
    assert_eq!(page.typing_steps(), 23);

    page.advance_time_to(2800)?;
    assert_eq!(page.typing_state(), Some(TypingState::Complete));
    assert_eq!(page.typing_steps(), 24);
    assert!(page.pending_timers().iter().all(|timer| timer.label != "typing"));
    page.assert_text(".hero-subtitle", "Senior Backend Engineer")?;
    Ok(())
}

#[test]
fn empty_typing_text_completes_on_the_first_tick() -> Result<()> {
    let config = BehaviorConfig {
        typing_text: String::new(),
        ..BehaviorConfig::default()
    };
    let mut page = Page::from_html_with_config(PORTFOLIO_HTML, config)?;
    page.dispatch_load()?;
    page.advance_time(500)?;
    assert_eq!(page.typing_state(), Some(TypingState::Complete));
    assert_eq!(page.typing_steps(), 1);
    page.assert_text(".hero-subtitle", "")?;
    Ok(())
}

#[test]
fn loading_screen_fades_then_leaves_the_document() -> Result<()> {
    let mut page = Page::from_html(PORTFOLIO_HTML)?;
    page.assert_missing(".loading")?;
    assert_eq!(page.loader_state(), LoaderState::Idle);

    page.dispatch_load()?;
    page.assert_exists(".loading > .loading-spinner")?;
    assert_eq!(page.loader_state(), LoaderState::Showing);

    page.advance_time(999)?;
    page.assert_style(".loading", "opacity", "")?;
    page.advance_time(1)?;
    page.assert_style(".loading", "opacity", "0")?;
    assert_eq!(page.loader_state(), LoaderState::FadingOut);

    page.advance_time(299)?;
    page.assert_exists(".loading")?;
    page.advance_time(1)?;
    page.assert_missing(".loading")?;
    page.assert_missing(".loading-spinner")?;
    assert_eq!(page.loader_state(), LoaderState::Removed);
    Ok(())
}

#[test]
fn lifecycle_events_do_not_repeat() -> Result<()> {
    let mut page = Page::from_html(PORTFOLIO_HTML)?;
    page.finish_loading()?;
    page.finish_loading()?;
    page.dispatch_load()?;
    assert_eq!(page.count(".loading")?, 1);
    Ok(())
}

#[test]
fn email_link_copies_address_and_shows_toast() -> Result<()> {
    let mut page = Page::from_html(PORTFOLIO_HTML)?;
    page.click(".contact-email")?;

    assert_eq!(page.clipboard_contents(), Some("anirudhsingla8@gmail.com"));
    page.assert_missing("input")?;
    page.assert_text("body > div", "Email copied to clipboard!")?;
    page.assert_style("body > div", "position", "fixed")?;
    page.assert_style("body > div", "bottom", "20px")?;

    page.advance_time(1999)?;
    page.assert_style("body > div", "opacity", "")?;
    page.advance_time(1)?;
    page.assert_style("body > div", "opacity", "0")?;
    page.advance_time(300)?;
    page.assert_missing("body > div")?;
    Ok(())
}

#[test]
fn each_email_click_gets_its_own_toast() -> Result<()> {
    let mut page = Page::from_html(PORTFOLIO_HTML)?;
    page.click(".contact-email")?;
    page.advance_time(1000)?;
    page.click(".contact-email")?;
    assert_eq!(page.count("body > div")?, 2);

    page.advance_time(1300)?;
    assert_eq!(page.count("body > div")?, 1);
    page.advance_time(1000)?;
    assert_eq!(page.count("body > div")?, 0);
    Ok(())
}

#[test]
fn denied_clipboard_logs_an_error_and_skips_the_toast() -> Result<()> {
    let mut page = Page::from_html_with(
        PORTFOLIO_HTML,
        BehaviorConfig::default(),
        Box::new(DeniedClipboard),
        &FixedClock::new(2026),
    )?;
    page.click(".contact-email")?;

    let last = page.console_messages().last().expect("console message");
    assert_eq!(last.level, ConsoleLevel::Error);
    assert_eq!(last.text, "Failed to copy email: clipboard access denied");
    assert!(page.clipboard_contents().is_none());
    page.assert_missing("body > div")?;
    page.assert_missing("input")?;
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn malformed_mailto_address_is_still_copied() -> Result<()> {
    let mut page = Page::from_html(r#"<body><a href="mailto:not-an-email">x</a></body>"#)?;
    page.click("a")?;
    assert_eq!(page.clipboard_contents(), Some("not-an-email"));
    Ok(())
}

#[test]
fn footer_shows_the_clock_year() -> Result<()> {
    let page = page_with_year(2031)?;
    page.assert_text(".footer p", "© 2031 Anirudh Singla. All rights reserved.")?;
    Ok(())
}

#[test]
fn console_banner_is_logged_at_bind_time() -> Result<()> {
    let page = page_with_year(2026)?;
    let messages = page.console_messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].text, "👋 Hi there!");
    assert_eq!(
        messages[0].style.as_deref(),
        Some("font-size: 24px; font-weight: bold; color: #4F46E5;")
    );
    assert_eq!(messages[1].text, "Looking for a talented backend engineer?");
    assert_eq!(messages[2].text, "Let's connect: anirudhsingla8@gmail.com");
    assert!(messages.iter().all(|m| m.level == ConsoleLevel::Log));
    Ok(())
}

#[test]
fn dom_content_loaded_preloads_images_and_staggers_timeline() -> Result<()> {
    let config = BehaviorConfig {
        preload_images: vec!["img/profile.jpg".into(), "img/ledger.png".into()],
        ..BehaviorConfig::default()
    };
    let mut page = Page::from_html_with_config(PORTFOLIO_HTML, config)?;
    assert!(page.preloaded_images().is_empty());
    page.assert_style("#job-2", "animation-delay", "")?;

    page.dispatch_dom_content_loaded()?;
    assert_eq!(
        page.preloaded_images(),
        vec!["img/profile.jpg".to_string(), "img/ledger.png".to_string()]
    );
    page.assert_missing("img")?;
    page.assert_style("#job-1", "animation-delay", "0s")?;
    page.assert_style("#job-2", "animation-delay", "0.1s")?;
    page.assert_style("#job-3", "animation-delay", "0.2s")?;
    Ok(())
}

#[test]
fn negative_time_travel_is_rejected() -> Result<()> {
    let mut page = Page::from_html(PORTFOLIO_HTML)?;
    page.advance_time(10)?;
    assert!(matches!(page.advance_time(-1), Err(Error::Timer(_))));
    assert!(matches!(page.advance_time_to(5), Err(Error::Timer(_))));
    assert_eq!(page.now_ms(), 10);
    Ok(())
}

#[test]
fn run_next_timer_jumps_to_the_next_due_time() -> Result<()> {
    let mut page = Page::from_html(PORTFOLIO_HTML)?;
    page.dispatch_load()?;
    assert!(page.run_next_timer()?);
    assert_eq!(page.now_ms(), 500);
    page.assert_text(".hero-subtitle", "S")?;
    assert_eq!(page.run_due_timers()?, 0);

    assert_eq!(page.clear_all_timers(), 2);
    assert!(!page.run_next_timer()?);
    Ok(())
}
