use super::*;

/// Marks the navbar once the page has scrolled past a threshold.
#[derive(Debug, Clone)]
pub(crate) struct NavbarStyle {
    navbar: NodeId,
    threshold: f64,
    class_name: String,
}

impl NavbarStyle {
    pub(crate) fn new(navbar: NodeId, config: &BehaviorConfig) -> Self {
        Self {
            navbar,
            threshold: config.navbar_scroll_threshold,
            class_name: config.classes.scrolled.clone(),
        }
    }

    pub(crate) fn update(&self, cx: &mut Context<'_>) -> Result<()> {
        let scrolled = cx.window.scroll_y > self.threshold;
        cx.dom.class_set(self.navbar, &self.class_name, scrolled)
    }
}

/// Highlights the nav link of the section the viewport has scrolled into.
///
/// Both the direct and the debounced scroll listener go through
/// [`ActiveLinkHighlighter::refresh`].
#[derive(Debug, Clone)]
pub(crate) struct ActiveLinkHighlighter {
    sections: Vec<NodeId>,
    links: Vec<NodeId>,
    look_ahead: f64,
    class_name: String,
}

impl ActiveLinkHighlighter {
    pub(crate) fn new(bindings: &Bindings, config: &BehaviorConfig) -> Self {
        Self {
            sections: bindings.sections.clone(),
            links: bindings.nav_links.clone(),
            look_ahead: config.active_link_offset,
            class_name: config.classes.active.clone(),
        }
    }

    /// Id of the last section whose top, less the look-ahead margin, is at or
    /// above `scroll_y`. A qualifying section without an id yields `None`.
    pub(crate) fn current_section(
        &self,
        dom: &Dom,
        window: &WindowState,
        scroll_y: f64,
    ) -> Option<String> {
        let mut current = None;
        for section in &self.sections {
            if scroll_y >= window.offset_top(*section) - self.look_ahead {
                current = dom.attr(*section, "id");
            }
        }
        current
    }

    pub(crate) fn refresh(&self, cx: &mut Context<'_>) -> Result<()> {
        let current = self.current_section(cx.dom, cx.window, cx.window.scroll_y);
        for link in &self.links {
            let fragment = cx
                .dom
                .attr(*link, "href")
                .and_then(|href| href.strip_prefix('#').map(ToOwned::to_owned));
            let active = current.is_some() && fragment == current;
            cx.dom.class_set(*link, &self.class_name, active)?;
        }
        Ok(())
    }
}

/// Re-runs the highlighter once scroll events stop for `wait_ms`.
#[derive(Debug, Clone)]
pub(crate) struct DebouncedHighlighter {
    wait_ms: i64,
    pending: Option<i64>,
}

impl DebouncedHighlighter {
    pub(crate) fn new(config: &BehaviorConfig) -> Self {
        Self {
            wait_ms: config.debounce_ms,
            pending: None,
        }
    }

    pub(crate) fn schedule(&mut self, cx: &mut Context<'_>) {
        if let Some(previous) = self.pending.take() {
            cx.timers.clear_timeout(previous);
        }
        self.pending = Some(cx.timers.set_timeout(self.wait_ms, Task::DebouncedHighlight));
    }

    pub(crate) fn fired(&mut self) {
        self.pending = None;
    }
}

/// Moves the hero at a fraction of the scroll speed while it is on screen.
#[derive(Debug, Clone)]
pub(crate) struct Parallax {
    hero: NodeId,
    factor: f64,
}

impl Parallax {
    pub(crate) fn new(hero: NodeId, config: &BehaviorConfig) -> Self {
        Self {
            hero,
            factor: config.parallax_factor,
        }
    }

    pub(crate) fn update(&self, cx: &mut Context<'_>) -> Result<()> {
        let scrolled = cx.window.scroll_y;
        if scrolled >= cx.window.inner_height {
            return Ok(());
        }
        let offset = format_float(scrolled * self.factor);
        cx.dom
            .style_set(self.hero, "transform", &format!("translateY({offset}px)"))
    }
}
