use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Idle,
    Showing,
    FadingOut,
    Removed,
}

/// Full-screen overlay shown briefly after the page loads.
#[derive(Debug, Clone)]
pub(crate) struct LoadingScreen {
    visible_ms: i64,
    fade_ms: i64,
    overlay: Option<NodeId>,
    state: LoaderState,
}

impl LoadingScreen {
    pub(crate) fn new(config: &BehaviorConfig) -> Self {
        Self {
            visible_ms: config.loader_visible_ms,
            fade_ms: config.loader_fade_ms,
            overlay: None,
            state: LoaderState::Idle,
        }
    }

    pub(crate) fn state(&self) -> LoaderState {
        self.state
    }

    pub(crate) fn show(&mut self, cx: &mut Context<'_>) -> Result<()> {
        if self.state != LoaderState::Idle {
            return Ok(());
        }
        let overlay = cx.dom.create_detached_element("div");
        cx.dom.set_attr(overlay, "class", "loading")?;
        let spinner = cx.dom.create_detached_element("div");
        cx.dom.set_attr(spinner, "class", "loading-spinner")?;
        cx.dom.append_child(overlay, spinner)?;
        let body = cx.dom.body();
        cx.dom.append_child(body, overlay)?;

        self.overlay = Some(overlay);
        self.state = LoaderState::Showing;
        cx.timers.set_timeout(self.visible_ms, Task::FadeLoader);
        Ok(())
    }

    pub(crate) fn fade(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let (LoaderState::Showing, Some(overlay)) = (self.state, self.overlay) else {
            return Ok(());
        };
        cx.dom.style_set(overlay, "opacity", "0")?;
        self.state = LoaderState::FadingOut;
        cx.timers.set_timeout(self.fade_ms, Task::RemoveLoader);
        Ok(())
    }

    pub(crate) fn remove(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let (LoaderState::FadingOut, Some(overlay)) = (self.state, self.overlay) else {
            return Ok(());
        };
        cx.dom.remove_node(overlay)?;
        self.overlay = None;
        self.state = LoaderState::Removed;
        Ok(())
    }
}
