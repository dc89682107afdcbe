use super::*;

/// Progress of the hero subtitle typing animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingState {
    Idle,
    Running { revealed: usize },
    Complete,
}

/// Types the subtitle text one character per tick after an initial delay.
#[derive(Debug, Clone)]
pub(crate) struct TypingEffect {
    subtitle: NodeId,
    text: Vec<char>,
    start_delay_ms: i64,
    interval_ms: i64,
    state: TypingState,
    steps: usize,
}

impl TypingEffect {
    pub(crate) fn new(subtitle: NodeId, config: &BehaviorConfig) -> Self {
        Self {
            subtitle,
            text: config.typing_text.chars().collect(),
            start_delay_ms: config.typing_start_delay_ms,
            interval_ms: config.typing_interval_ms,
            state: TypingState::Idle,
            steps: 0,
        }
    }

    pub(crate) fn state(&self) -> TypingState {
        self.state
    }

    /// Timer callbacks run so far, including the final one that finds the
    /// text exhausted.
    pub(crate) fn steps(&self) -> usize {
        self.steps
    }

    pub(crate) fn start(&mut self, cx: &mut Context<'_>) -> Result<()> {
        if self.state != TypingState::Idle {
            return Ok(());
        }
        cx.dom.set_text_content(self.subtitle, "")?;
        self.state = TypingState::Running { revealed: 0 };
        cx.timers.set_timeout(self.start_delay_ms, Task::TypeNext);
        Ok(())
    }

    pub(crate) fn step(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let TypingState::Running { revealed } = self.state else {
            return Ok(());
        };
        self.steps += 1;

        let Some(ch) = self.text.get(revealed) else {
            self.state = TypingState::Complete;
            tracing::debug!(steps = self.steps, "typing effect complete");
            return Ok(());
        };

        let mut current = cx.dom.text_content(self.subtitle);
        current.push(*ch);
        cx.dom.set_text_content(self.subtitle, &current)?;
        self.state = TypingState::Running {
            revealed: revealed + 1,
        };
        cx.timers.set_timeout(self.interval_ms, Task::TypeNext);
        Ok(())
    }
}
