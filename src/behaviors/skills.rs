use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillBarState {
    Idle,
    Filling,
    Complete,
}

/// Replays the skill bar fill once the skills section is half visible.
#[derive(Debug, Clone)]
pub(crate) struct SkillBars {
    section: NodeId,
    bars: Vec<NodeId>,
    delay_ms: i64,
    state: SkillBarState,
    captured: Vec<(NodeId, String)>,
}

impl SkillBars {
    pub(crate) fn new(section: NodeId, bars: &[NodeId], config: &BehaviorConfig) -> Self {
        Self {
            section,
            bars: bars.to_vec(),
            delay_ms: config.skill_fill_delay_ms,
            state: SkillBarState::Idle,
            captured: Vec::new(),
        }
    }

    pub(crate) fn section(&self) -> NodeId {
        self.section
    }

    pub(crate) fn state(&self) -> SkillBarState {
        self.state
    }

    pub(crate) fn animate(&mut self, cx: &mut Context<'_>) -> Result<()> {
        cx.observers.unobserve(ObserverOwner::SkillBars, self.section);
        if self.state != SkillBarState::Idle {
            return Ok(());
        }

        // Capture every target width before any bar is zeroed.
        self.captured = self
            .bars
            .iter()
            .map(|bar| (*bar, cx.dom.style_get(*bar, "width")))
            .collect();
        for bar in &self.bars {
            cx.dom.style_set(*bar, "width", "0")?;
        }

        self.state = SkillBarState::Filling;
        cx.timers.set_timeout(self.delay_ms, Task::RestoreSkillBars);
        Ok(())
    }

    pub(crate) fn restore(&mut self, cx: &mut Context<'_>) -> Result<()> {
        if self.state != SkillBarState::Filling {
            return Ok(());
        }
        for (bar, width) in std::mem::take(&mut self.captured) {
            cx.dom.style_set(bar, "width", &width)?;
        }
        self.state = SkillBarState::Complete;
        Ok(())
    }
}
