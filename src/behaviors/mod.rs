//! The page's event-driven behaviors.
//!
//! Elements are looked up once in [`Bindings::bind`]; every behavior owns the
//! node ids and timer handles it needs. Listeners and timers carry small
//! enums ([`Handler`], [`Task`]) that [`PageBehaviors`] routes back to the
//! owning behavior.

use super::*;
use clipboard::Clipboard;
use clock::Clock;
use config::BehaviorConfig;
use console::Console;
use events::{EventKind, EventState, EventTarget, ListenerStore};
use observer::{ObserverOptions, ObserverRegistry, RootMargin};
use scheduler::{Scheduler, TimerLabel};
use window::WindowState;

pub(crate) mod cards;
pub(crate) mod cosmetics;
pub(crate) mod email;
pub(crate) mod loader;
pub(crate) mod navigation;
pub(crate) mod reveal;
pub(crate) mod scroll;
pub(crate) mod skills;
pub(crate) mod typing;

use cards::CardHover;
use cosmetics::DomReadyTasks;
use email::EmailCopy;
use loader::LoadingScreen;
use navigation::MobileMenu;
use reveal::SectionReveal;
use scroll::{ActiveLinkHighlighter, DebouncedHighlighter, NavbarStyle, Parallax};
use skills::SkillBars;
use typing::TypingEffect;

/// What a registered listener does when its event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handler {
    SmoothScroll,
    ToggleMenu,
    CloseMenu,
    NavbarStyle,
    StartTyping,
    HighlightActiveLink,
    LiftCard,
    RestCard,
    ShowLoader,
    CopyEmail,
    Parallax,
    DebouncedHighlight,
    DomReady,
}

/// Deferred work queued on the page timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Task {
    TypeNext,
    RestoreSkillBars,
    FadeLoader,
    RemoveLoader,
    FadeToast(NodeId),
    RemoveToast(NodeId),
    DebouncedHighlight,
}

impl TimerLabel for Task {
    fn label(&self) -> &'static str {
        match self {
            Self::TypeNext => "typing",
            Self::RestoreSkillBars => "skill-bars",
            Self::FadeLoader => "loader-fade",
            Self::RemoveLoader => "loader-remove",
            Self::FadeToast(_) => "toast-fade",
            Self::RemoveToast(_) => "toast-remove",
            Self::DebouncedHighlight => "debounced-highlight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObserverOwner {
    SectionReveal,
    SkillBars,
}

/// Mutable page state a behavior may touch while handling an event or task.
pub(crate) struct Context<'a> {
    pub(crate) dom: &'a mut Dom,
    pub(crate) window: &'a mut WindowState,
    pub(crate) timers: &'a mut Scheduler<Task>,
    pub(crate) observers: &'a mut ObserverRegistry<ObserverOwner>,
    pub(crate) clipboard: &'a mut dyn Clipboard,
    pub(crate) console: &'a mut Console,
    pub(crate) config: &'a BehaviorConfig,
}

/// Elements the behaviors attach to, looked up once.
#[derive(Debug, Clone, Default)]
pub(crate) struct Bindings {
    pub(crate) fragment_links: Vec<NodeId>,
    pub(crate) hamburger: Option<NodeId>,
    pub(crate) nav_menu: Option<NodeId>,
    pub(crate) nav_links: Vec<NodeId>,
    pub(crate) navbar: Option<NodeId>,
    pub(crate) sections: Vec<NodeId>,
    pub(crate) subtitle: Option<NodeId>,
    pub(crate) skills: Option<NodeId>,
    pub(crate) skill_bars: Vec<NodeId>,
    pub(crate) project_cards: Vec<NodeId>,
    pub(crate) hero: Option<NodeId>,
    pub(crate) mail_links: Vec<NodeId>,
    pub(crate) footer_text: Option<NodeId>,
    pub(crate) timeline_items: Vec<NodeId>,
}

impl Bindings {
    pub(crate) fn bind(dom: &Dom) -> Result<Self> {
        Ok(Self {
            fragment_links: dom.query_selector_all(r##"a[href^="#"]"##)?,
            hamburger: dom.query_selector(".hamburger")?,
            nav_menu: dom.query_selector(".nav-menu")?,
            nav_links: dom.query_selector_all(".nav-link")?,
            navbar: dom.query_selector(".navbar")?,
            sections: dom.query_selector_all("section")?,
            subtitle: dom.query_selector(".hero-subtitle")?,
            skills: dom.query_selector(".skills")?,
            skill_bars: dom.query_selector_all(".skill-progress")?,
            project_cards: dom.query_selector_all(".project-card")?,
            hero: dom.query_selector(".hero")?,
            mail_links: dom.query_selector_all(r#"a[href^="mailto:"]"#)?,
            footer_text: dom.query_selector(".footer p")?,
            timeline_items: dom.query_selector_all(".timeline-item")?,
        })
    }
}

/// Owns one handler object per behavior.
#[derive(Debug)]
pub(crate) struct PageBehaviors {
    menu: Option<MobileMenu>,
    navbar: Option<NavbarStyle>,
    reveal: SectionReveal,
    typing: Option<TypingEffect>,
    highlighter: ActiveLinkHighlighter,
    debounced: DebouncedHighlighter,
    skills: Option<SkillBars>,
    cards: CardHover,
    loader: LoadingScreen,
    email: EmailCopy,
    parallax: Option<Parallax>,
    dom_ready: DomReadyTasks,
}

impl PageBehaviors {
    /// Binds every behavior and registers its listeners and observers, in the
    /// order the page script attaches them. Missing elements skip the
    /// behavior that needs them.
    pub(crate) fn bind(
        cx: &mut Context<'_>,
        listeners: &mut ListenerStore<Handler>,
        clock: &dyn Clock,
    ) -> Result<Self> {
        let bindings = Bindings::bind(cx.dom)?;
        let config = cx.config;

        for link in &bindings.fragment_links {
            listeners.add(EventTarget::Node(*link), EventKind::Click, Handler::SmoothScroll);
        }

        let menu = MobileMenu::bind(cx.dom, &bindings, &config.classes.active);
        if let Some(menu) = &menu {
            listeners.add(
                EventTarget::Node(menu.hamburger()),
                EventKind::Click,
                Handler::ToggleMenu,
            );
            for link in &bindings.nav_links {
                listeners.add(EventTarget::Node(*link), EventKind::Click, Handler::CloseMenu);
            }
        }

        let navbar = bindings.navbar.map(|navbar| NavbarStyle::new(navbar, config));
        if navbar.is_some() {
            listeners.add(EventTarget::Window, EventKind::Scroll, Handler::NavbarStyle);
        }

        let reveal = SectionReveal::new(&bindings.sections, &config.classes.visible);
        cx.observers.create(
            ObserverOwner::SectionReveal,
            ObserverOptions {
                threshold: config.reveal_threshold,
                root_margin: config.reveal_margin()?,
            },
        );
        for section in reveal.sections() {
            cx.observers.observe(ObserverOwner::SectionReveal, *section);
        }

        let typing = bindings
            .subtitle
            .map(|subtitle| TypingEffect::new(subtitle, config));
        if typing.is_some() {
            listeners.add(EventTarget::Window, EventKind::Load, Handler::StartTyping);
        }

        let highlighter = ActiveLinkHighlighter::new(&bindings, config);
        if !bindings.nav_links.is_empty() {
            listeners.add(
                EventTarget::Window,
                EventKind::Scroll,
                Handler::HighlightActiveLink,
            );
        }

        let skills = bindings
            .skills
            .map(|section| SkillBars::new(section, &bindings.skill_bars, config));
        if let Some(skills) = &skills {
            cx.observers.create(
                ObserverOwner::SkillBars,
                ObserverOptions {
                    threshold: config.skills_threshold,
                    root_margin: RootMargin::default(),
                },
            );
            cx.observers.observe(ObserverOwner::SkillBars, skills.section());
        }

        let cards = CardHover::new(config);
        for card in &bindings.project_cards {
            listeners.add(EventTarget::Node(*card), EventKind::MouseEnter, Handler::LiftCard);
            listeners.add(EventTarget::Node(*card), EventKind::MouseLeave, Handler::RestCard);
        }

        let loader = LoadingScreen::new(config);
        listeners.add(EventTarget::Window, EventKind::Load, Handler::ShowLoader);

        let email = EmailCopy::new(config);
        for link in &bindings.mail_links {
            listeners.add(EventTarget::Node(*link), EventKind::Click, Handler::CopyEmail);
        }

        let parallax = bindings.hero.map(|hero| Parallax::new(hero, config));
        if parallax.is_some() {
            listeners.add(EventTarget::Window, EventKind::Scroll, Handler::Parallax);
        }

        cosmetics::log_banner(cx.console, config);
        if let Some(footer_text) = bindings.footer_text {
            cosmetics::write_footer_year(cx.dom, footer_text, clock, config)?;
        }

        let debounced = DebouncedHighlighter::new(config);
        if !bindings.nav_links.is_empty() {
            listeners.add(
                EventTarget::Window,
                EventKind::Scroll,
                Handler::DebouncedHighlight,
            );
        }

        let dom_ready = DomReadyTasks::new(&bindings.timeline_items);
        listeners.add(
            EventTarget::Document,
            EventKind::DomContentLoaded,
            Handler::DomReady,
        );

        tracing::debug!(
            sections = bindings.sections.len(),
            nav_links = bindings.nav_links.len(),
            mail_links = bindings.mail_links.len(),
            "page behaviors bound"
        );

        Ok(Self {
            menu,
            navbar,
            reveal,
            typing,
            highlighter,
            debounced,
            skills,
            cards,
            loader,
            email,
            parallax,
            dom_ready,
        })
    }

    pub(crate) fn handle(
        &mut self,
        handler: Handler,
        event: &mut EventState,
        cx: &mut Context<'_>,
    ) -> Result<()> {
        match handler {
            Handler::SmoothScroll => navigation::smooth_scroll(event, cx),
            Handler::ToggleMenu => match &mut self.menu {
                Some(menu) => menu.toggle(cx.dom),
                None => Ok(()),
            },
            Handler::CloseMenu => match &mut self.menu {
                Some(menu) => menu.close(cx.dom),
                None => Ok(()),
            },
            Handler::NavbarStyle => match &self.navbar {
                Some(navbar) => navbar.update(cx),
                None => Ok(()),
            },
            Handler::StartTyping => match &mut self.typing {
                Some(typing) => typing.start(cx),
                None => Ok(()),
            },
            Handler::HighlightActiveLink => self.highlighter.refresh(cx),
            Handler::LiftCard => self.cards.lift(event, cx),
            Handler::RestCard => self.cards.rest(event, cx),
            Handler::ShowLoader => self.loader.show(cx),
            Handler::CopyEmail => self.email.copy_from_link(event, cx),
            Handler::Parallax => match &self.parallax {
                Some(parallax) => parallax.update(cx),
                None => Ok(()),
            },
            Handler::DebouncedHighlight => {
                self.debounced.schedule(cx);
                Ok(())
            }
            Handler::DomReady => self.dom_ready.run(cx),
        }
    }

    pub(crate) fn run_task(&mut self, task: Task, cx: &mut Context<'_>) -> Result<()> {
        match task {
            Task::TypeNext => match &mut self.typing {
                Some(typing) => typing.step(cx),
                None => Ok(()),
            },
            Task::RestoreSkillBars => match &mut self.skills {
                Some(skills) => skills.restore(cx),
                None => Ok(()),
            },
            Task::FadeLoader => self.loader.fade(cx),
            Task::RemoveLoader => self.loader.remove(cx),
            Task::FadeToast(toast) => self.email.fade_toast(toast, cx),
            Task::RemoveToast(toast) => self.email.remove_toast(toast, cx),
            Task::DebouncedHighlight => {
                self.debounced.fired();
                self.highlighter.refresh(cx)
            }
        }
    }

    pub(crate) fn intersected(
        &mut self,
        owner: ObserverOwner,
        target: NodeId,
        cx: &mut Context<'_>,
    ) -> Result<()> {
        match owner {
            ObserverOwner::SectionReveal => self.reveal.reveal(target, cx),
            ObserverOwner::SkillBars => match &mut self.skills {
                Some(skills) => skills.animate(cx),
                None => Ok(()),
            },
        }
    }

    pub(crate) fn highlighter(&self) -> &ActiveLinkHighlighter {
        &self.highlighter
    }

    pub(crate) fn menu(&self) -> Option<&MobileMenu> {
        self.menu.as_ref()
    }

    pub(crate) fn typing(&self) -> Option<&TypingEffect> {
        self.typing.as_ref()
    }

    pub(crate) fn skills(&self) -> Option<&SkillBars> {
        self.skills.as_ref()
    }

    pub(crate) fn loader(&self) -> &LoadingScreen {
        &self.loader
    }

    pub(crate) fn dom_ready(&self) -> &DomReadyTasks {
        &self.dom_ready
    }
}
