use super::*;

#[derive(Debug, Clone)]
pub(crate) struct CardHover {
    lift_px: f64,
}

impl CardHover {
    pub(crate) fn new(config: &BehaviorConfig) -> Self {
        Self {
            lift_px: config.card_lift_px,
        }
    }

    pub(crate) fn lift(&self, event: &EventState, cx: &mut Context<'_>) -> Result<()> {
        let Some(card) = event.current_node() else {
            return Ok(());
        };
        let lift = format_float(-self.lift_px);
        cx.dom
            .style_set(card, "transform", &format!("translateY({lift}px)"))
    }

    pub(crate) fn rest(&self, event: &EventState, cx: &mut Context<'_>) -> Result<()> {
        let Some(card) = event.current_node() else {
            return Ok(());
        };
        cx.dom.style_set(card, "transform", "translateY(0)")
    }
}
