use portfolio_behaviors::{Page, TypingState};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};

const BEHAVIOR_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/behavior_property_test.txt";
const DEFAULT_BEHAVIOR_PROPTEST_CASES: u32 = 64;

const PORTFOLIO_HTML: &str = include_str!("fixtures/portfolio.html");
const SECTIONS: [(&str, f64); 5] = [
    ("home", 0.0),
    ("about", 800.0),
    ("skills", 1600.0),
    ("projects", 2400.0),
    ("contact", 3200.0),
];

#[derive(Clone, Debug)]
enum PageAction {
    ScrollTo(f64),
    ToggleMenu,
    ClickNavLink(usize),
    AdvanceTime(i64),
    HoverCard(bool),
}

fn behavior_proptest_cases() -> u32 {
    std::env::var("PORTFOLIO_BEHAVIORS_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_BEHAVIOR_PROPTEST_CASES)
}

fn fail<E: std::fmt::Debug>(err: E) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn laid_out_page() -> Result<Page, TestCaseError> {
    let mut page = Page::from_html(PORTFOLIO_HTML).map_err(fail)?;
    for (id, top) in SECTIONS {
        page.set_layout(&format!("#{id}"), top, 800.0).map_err(fail)?;
    }
    Ok(page)
}

fn page_action_strategy() -> BoxedStrategy<PageAction> {
    prop_oneof![
        5 => (-400.0f64..4400.0).prop_map(PageAction::ScrollTo),
        2 => Just(PageAction::ToggleMenu),
        2 => (0usize..SECTIONS.len()).prop_map(PageAction::ClickNavLink),
        3 => (0i64..400).prop_map(PageAction::AdvanceTime),
        1 => any::<bool>().prop_map(PageAction::HoverCard),
    ]
    .boxed()
}

fn run_action(page: &mut Page, action: &PageAction) -> portfolio_behaviors::Result<()> {
    match action {
        PageAction::ScrollTo(y) => page.scroll_to(*y),
        PageAction::ToggleMenu => page.click(".hamburger"),
        PageAction::ClickNavLink(idx) => {
            let (id, _) = SECTIONS[*idx];
            page.click(&format!(r##"a.nav-link[href="#{id}"]"##))
        }
        PageAction::AdvanceTime(delta) => page.advance_time(*delta),
        PageAction::HoverCard(true) => page.pointer_enter("#card-1"),
        PageAction::HoverCard(false) => page.pointer_leave("#card-1"),
    }
}

fn assert_action_sequence_is_consistent(actions: &[PageAction]) -> TestCaseResult {
    let mut page = laid_out_page()?;
    for (step, action) in actions.iter().enumerate() {
        if let Err(err) = run_action(&mut page, action) {
            prop_assert!(
                false,
                "action returned error at step {step}: {action:?}, error={err:?}"
            );
        }

        let scrolled = page.has_class(".navbar", "scrolled").map_err(fail)?;
        prop_assert_eq!(scrolled, page.scroll_y() > 50.0, "step {}: {:?}", step, action);

        let menu_active = page.has_class(".nav-menu", "active").map_err(fail)?;
        let hamburger_active = page.has_class(".hamburger", "active").map_err(fail)?;
        prop_assert_eq!(menu_active, hamburger_active);
        prop_assert_eq!(menu_active, page.menu_open());

        let active_links = page.count(".nav-link.active").map_err(fail)?;
        prop_assert!(active_links <= 1, "{active_links} active links at step {step}");
    }

    // Once scrolling settles the debounced pass agrees with the direct one.
    page.flush().map_err(fail)?;
    let expected = page.current_section();
    for (id, _) in SECTIONS {
        let active = page
            .has_class(&format!(r##"a.nav-link[href="#{id}"]"##), "active")
            .map_err(fail)?;
        prop_assert_eq!(active, expected.as_deref() == Some(id));
    }
    prop_assert!(page.pending_timers().is_empty());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: behavior_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(BEHAVIOR_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn random_interaction_sequences_keep_page_state_consistent(
        actions in vec(page_action_strategy(), 1..=32)
    ) {
        assert_action_sequence_is_consistent(&actions)?;
    }

    #[test]
    fn hamburger_state_tracks_click_parity(clicks in 0usize..16) {
        let mut page = laid_out_page()?;
        for _ in 0..clicks {
            page.click(".hamburger").map_err(fail)?;
        }
        prop_assert_eq!(page.menu_open(), clicks % 2 == 1);
        prop_assert_eq!(
            page.has_class(".nav-menu", "active").map_err(fail)?,
            clicks % 2 == 1
        );
    }

    #[test]
    fn typing_progress_matches_elapsed_time(elapsed in 0i64..3500) {
        let mut page = Page::from_html(PORTFOLIO_HTML).map_err(fail)?;
        page.dispatch_load().map_err(fail)?;
        page.advance_time(elapsed).map_err(fail)?;

        let full = "Senior Backend Engineer";
        let revealed = if elapsed < 500 {
            0
        } else {
            (((elapsed - 500) / 100 + 1) as usize).min(full.chars().count())
        };
        let expected = full.chars().take(revealed).collect::<String>();
        prop_assert_eq!(page.text(".hero-subtitle").map_err(fail)?, expected);
        if elapsed >= 2800 {
            prop_assert_eq!(page.typing_state(), Some(TypingState::Complete));
        } else {
            prop_assert_eq!(page.typing_state(), Some(TypingState::Running { revealed }));
        }
    }
}
