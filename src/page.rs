use super::*;
use std::collections::VecDeque;

use behaviors::{Context, Handler, ObserverOwner, PageBehaviors, Task};
use clipboard::{Clipboard, MemoryClipboard};
use clock::{Clock, SystemClock};
use config::BehaviorConfig;
use console::{Console, ConsoleMessage};
use events::{EventKind, EventState, EventTarget, ListenerStore};
use observer::ObserverRegistry;
use scheduler::{PendingTimer, ScheduledTask, Scheduler, TimerLabel};
use window::{LayoutBox, ScrollRequest, WindowState};

const DEFAULT_TRACE_LOG_LIMIT: usize = 10_000;

#[derive(Debug, Clone)]
struct TraceState {
    enabled: bool,
    events: bool,
    timers: bool,
    logs: VecDeque<String>,
    log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: DEFAULT_TRACE_LOG_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Lifecycle {
    dom_content_loaded: bool,
    loaded: bool,
}

/// A parsed portfolio page with its behaviors attached.
///
/// Time is virtual: timers only run through [`Page::advance_time`],
/// [`Page::flush`] and friends. Scrolling and layout are driven by the host
/// with [`Page::scroll_to`] and [`Page::set_layout`].
pub struct Page {
    dom: Dom,
    window: WindowState,
    timers: Scheduler<Task>,
    listeners: ListenerStore<Handler>,
    observers: ObserverRegistry<ObserverOwner>,
    behaviors: PageBehaviors,
    config: BehaviorConfig,
    clipboard: Box<dyn Clipboard>,
    console: Console,
    lifecycle: Lifecycle,
    trace_state: TraceState,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_config(html, BehaviorConfig::default())
    }

    pub fn from_html_with_config(html: &str, config: BehaviorConfig) -> Result<Self> {
        Self::from_html_with(html, config, Box::new(MemoryClipboard::new()), &SystemClock)
    }

    /// Parses `html` and binds every behavior as the page script would when
    /// it runs at the end of `<body>`.
    pub fn from_html_with(
        html: &str,
        config: BehaviorConfig,
        mut clipboard: Box<dyn Clipboard>,
        clock: &dyn Clock,
    ) -> Result<Self> {
        config.validate()?;
        let mut dom = html::parse_html(html)?;
        let mut window = WindowState::new(config.viewport_height);
        let mut timers = Scheduler::new(config.timer_step_limit);
        let mut listeners = ListenerStore::default();
        let mut observers = ObserverRegistry::default();
        let mut console = Console::default();

        let behaviors = {
            let mut cx = Context {
                dom: &mut dom,
                window: &mut window,
                timers: &mut timers,
                observers: &mut observers,
                clipboard: clipboard.as_mut(),
                console: &mut console,
                config: &config,
            };
            PageBehaviors::bind(&mut cx, &mut listeners, clock)?
        };

        let mut page = Self {
            dom,
            window,
            timers,
            listeners,
            observers,
            behaviors,
            config,
            clipboard,
            console,
            lifecycle: Lifecycle::default(),
            trace_state: TraceState::default(),
        };
        page.update_intersections()?;
        Ok(page)
    }

    fn parts(&mut self) -> (&mut PageBehaviors, Context<'_>) {
        (
            &mut self.behaviors,
            Context {
                dom: &mut self.dom,
                window: &mut self.window,
                timers: &mut self.timers,
                observers: &mut self.observers,
                clipboard: self.clipboard.as_mut(),
                console: &mut self.console,
                config: &self.config,
            },
        )
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    // Lifecycle

    pub fn dispatch_dom_content_loaded(&mut self) -> Result<()> {
        if self.lifecycle.dom_content_loaded {
            return Ok(());
        }
        self.lifecycle.dom_content_loaded = true;
        self.dispatch_event(EventKind::DomContentLoaded, EventTarget::Document)?;
        Ok(())
    }

    pub fn dispatch_load(&mut self) -> Result<()> {
        if self.lifecycle.loaded {
            return Ok(());
        }
        self.lifecycle.loaded = true;
        self.dispatch_event(EventKind::Load, EventTarget::Window)?;
        Ok(())
    }

    /// `DOMContentLoaded` then `load`, skipping whichever already fired.
    pub fn finish_loading(&mut self) -> Result<()> {
        self.dispatch_dom_content_loaded()?;
        self.dispatch_load()
    }

    // User actions

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(EventKind::Click, EventTarget::Node(target))?;
        Ok(())
    }

    pub fn pointer_enter(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(EventKind::MouseEnter, EventTarget::Node(target))?;
        Ok(())
    }

    pub fn pointer_leave(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(EventKind::MouseLeave, EventTarget::Node(target))?;
        Ok(())
    }

    /// Sets the vertical scroll offset, fires `scroll` on the window and
    /// re-evaluates intersection observers. Negative offsets are kept as is.
    pub fn scroll_to(&mut self, y: f64) -> Result<()> {
        if !y.is_finite() {
            return Err(Error::Dom(format!("scroll offset must be finite, got {y}")));
        }
        self.window.scroll_y = y;
        self.dispatch_event(EventKind::Scroll, EventTarget::Window)?;
        self.update_intersections()
    }

    pub fn scroll_by(&mut self, delta: f64) -> Result<()> {
        self.scroll_to(self.window.scroll_y + delta)
    }

    // Layout

    pub fn set_layout(&mut self, selector: &str, top: f64, height: f64) -> Result<()> {
        if !top.is_finite() || !height.is_finite() {
            return Err(Error::Dom(format!(
                "layout for {selector} must be finite, got top={top} height={height}"
            )));
        }
        let target = self.select_one(selector)?;
        self.window.set_layout(target, LayoutBox::new(top, height));
        self.update_intersections()
    }

    pub fn set_viewport_height(&mut self, height: f64) -> Result<()> {
        if !height.is_finite() || height < 0.0 {
            return Err(Error::Dom(format!(
                "viewport height must be finite and non-negative, got {height}"
            )));
        }
        self.window.inner_height = height;
        self.update_intersections()
    }

    // Timers

    pub fn now_ms(&self) -> i64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.timers.pending()
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        self.timers.set_step_limit(max_steps)
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.timers.clear_all();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    /// Runs every timer due within the next `delta_ms`, each at its own due
    /// time, then leaves the clock at `now + delta_ms`.
    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Timer(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.timers.now_ms();
        let to = from.saturating_add(delta_ms);
        let ran = self.run_timer_queue(Some(to), true)?;
        self.timers.set_now(to)?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={delta_ms} from={from} to={to} ran_due={ran}"
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        let from = self.timers.now_ms();
        if target_ms < from {
            return Err(Error::Timer(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={from})"
            )));
        }
        let ran = self.run_timer_queue(Some(target_ms), true)?;
        self.timers.set_now(target_ms)?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={from} to={target_ms} ran_due={ran}"
        ));
        Ok(())
    }

    /// Runs timers until the queue is empty, jumping the clock as needed.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.timers.now_ms();
        let ran = self.run_timer_queue(None, true)?;
        self.trace_timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.timers.now_ms()
        ));
        Ok(())
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(task) = self.timers.pop_next(None, true) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };
        self.execute_timer_task(task)?;
        Ok(true)
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.timers.now_ms()), false)?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={ran}",
            self.timers.now_ms()
        ));
        Ok(ran)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while self.timers.has_task(due_limit) {
            steps += 1;
            if steps > self.timers.step_limit() {
                return Err(self.timers.step_limit_error(steps, due_limit));
            }
            let Some(task) = self.timers.pop_next(due_limit, advance_clock) else {
                break;
            };
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn execute_timer_task(&mut self, task: ScheduledTask<Task>) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} due_at={} now_ms={} label={}",
            task.id,
            task.due_at,
            self.timers.now_ms(),
            task.payload.label()
        ));
        let (behaviors, mut cx) = self.parts();
        behaviors.run_task(task.payload, &mut cx)
    }

    // Event plumbing

    fn dispatch_event(&mut self, kind: EventKind, target: EventTarget) -> Result<EventState> {
        let mut event = EventState::new(kind, target);
        for current in events::propagation_path(&self.dom, target, kind) {
            event.current_target = current;
            for handler in self.listeners.get(current, kind) {
                let line = format!(
                    "[event] {} target={} current={} handler={handler:?}",
                    event.kind.name(),
                    self.target_label(event.target),
                    self.target_label(current)
                );
                self.trace_event_line(line);
                let (behaviors, mut cx) = self.parts();
                behaviors.handle(handler, &mut event, &mut cx)?;
            }
        }
        let line = format!(
            "[event] done {} target={} default_prevented={}",
            event.kind.name(),
            self.target_label(event.target),
            event.default_prevented
        );
        self.trace_event_line(line);

        if let Some(request) = self.window.take_pending_scroll() {
            self.scroll_to(request.top)?;
        }
        Ok(event)
    }

    fn update_intersections(&mut self) -> Result<()> {
        for (owner, target) in self.observers.intersecting_entries(&self.window) {
            // An earlier entry's callback may have stopped observing this one.
            if !self.observers.is_observing(owner, target) {
                continue;
            }
            let (behaviors, mut cx) = self.parts();
            behaviors.intersected(owner, target, &mut cx)?;
        }
        Ok(())
    }

    fn target_label(&self, target: EventTarget) -> String {
        let node = match target {
            EventTarget::Window => return "window".into(),
            EventTarget::Document => return "document".into(),
            EventTarget::Node(node) => node,
        };
        let tag = self.dom.tag_name(node).unwrap_or("#text");
        if let Some(id) = self.dom.attr(node, "id") {
            return format!("{tag}#{id}");
        }
        match self
            .dom
            .attr(node, "class")
            .and_then(|class| class.split_whitespace().next().map(str::to_string))
        {
            Some(class) => format!("{tag}.{class}"),
            None => tag.to_string(),
        }
    }

    // Inspection

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.has_class(target, class_name))
    }

    /// Inline style property value, empty when unset.
    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.style_get(target, property))
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.dom.query_selector(selector)?.is_some())
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y
    }

    pub fn inner_height(&self) -> f64 {
        self.window.inner_height
    }

    pub fn location_hash(&self) -> &str {
        &self.window.location_hash
    }

    pub fn last_scroll_request(&self) -> Option<&ScrollRequest> {
        self.window.last_scroll_request()
    }

    pub fn console_messages(&self) -> &[ConsoleMessage] {
        self.console.messages()
    }

    pub fn clipboard_contents(&self) -> Option<&str> {
        self.clipboard.contents()
    }

    pub fn preloaded_images(&self) -> Vec<String> {
        self.behaviors.dom_ready().preloaded_sources(&self.dom)
    }

    pub fn menu_open(&self) -> bool {
        self.behaviors.menu().is_some_and(|menu| menu.is_open())
    }

    pub fn typing_state(&self) -> Option<TypingState> {
        self.behaviors.typing().map(|typing| typing.state())
    }

    pub fn typing_steps(&self) -> usize {
        self.behaviors.typing().map_or(0, |typing| typing.steps())
    }

    pub fn skill_bar_state(&self) -> Option<SkillBarState> {
        self.behaviors.skills().map(|skills| skills.state())
    }

    pub fn loader_state(&self) -> LoaderState {
        self.behaviors.loader().state()
    }

    /// Section id the active-link highlighter would pick at the current
    /// scroll offset.
    pub fn current_section(&self) -> Option<String> {
        self.behaviors
            .highlighter()
            .current_section(&self.dom, &self.window, self.window.scroll_y)
    }

    // Assertions

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(self.assertion_failed(selector, target, expected, actual));
        }
        Ok(())
    }

    pub fn assert_class(&self, selector: &str, class_name: &str) -> Result<()> {
        self.assert_class_state(selector, class_name, true)
    }

    pub fn assert_no_class(&self, selector: &str, class_name: &str) -> Result<()> {
        self.assert_class_state(selector, class_name, false)
    }

    fn assert_class_state(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.has_class(target, class_name) != expected {
            let describe = |present: bool| {
                if present {
                    format!("class {class_name:?}")
                } else {
                    format!("no class {class_name:?}")
                }
            };
            return Err(self.assertion_failed(
                selector,
                target,
                &describe(expected),
                describe(!expected),
            ));
        }
        Ok(())
    }

    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.style_get(target, property);
        if actual != expected {
            return Err(self.assertion_failed(
                selector,
                target,
                &format!("{property}: {expected}"),
                format!("{property}: {actual}"),
            ));
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn assert_missing(&self, selector: &str) -> Result<()> {
        if let Some(target) = self.dom.query_selector(selector)? {
            return Err(self.assertion_failed(selector, target, "no match", "present".into()));
        }
        Ok(())
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn assertion_failed(
        &self,
        selector: &str,
        target: NodeId,
        expected: &str,
        actual: String,
    ) -> Error {
        Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual,
            dom_snippet: truncate_chars(&self.dom.dump_node(target), 200),
        }
    }

    // Trace

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_state.timers = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Config(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_state.log_limit = max_entries;
        while self.trace_state.logs.len() > self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        Ok(())
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.logs.drain(..).collect()
    }

    fn trace_event_line(&mut self, line: String) {
        if self.trace_state.events {
            self.trace_line(line);
        }
    }

    fn trace_timer_line(&mut self, line: String) {
        if self.trace_state.timers {
            self.trace_line(line);
        }
    }

    fn trace_line(&mut self, line: String) {
        if !self.trace_state.enabled {
            return;
        }
        tracing::debug!(target: "portfolio_behaviors::trace", "{line}");
        if self.trace_state.logs.len() >= self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        self.trace_state.logs.push_back(line);
    }
}
