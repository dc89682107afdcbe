use super::*;

/// Document-relative geometry of one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBox {
    pub top: f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
}

/// A `scrollIntoView`-style request recorded by a behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    pub target_id: Option<String>,
    pub top: f64,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

#[derive(Debug, Clone)]
pub(crate) struct WindowState {
    pub(crate) scroll_y: f64,
    pub(crate) inner_height: f64,
    pub(crate) location_hash: String,
    pub(crate) selection: Option<NodeId>,
    layout: HashMap<NodeId, LayoutBox>,
    pending_scroll: Option<ScrollRequest>,
    last_scroll_request: Option<ScrollRequest>,
}

impl WindowState {
    pub(crate) fn new(inner_height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            inner_height,
            location_hash: String::new(),
            selection: None,
            layout: HashMap::new(),
            pending_scroll: None,
            last_scroll_request: None,
        }
    }

    pub(crate) fn set_layout(&mut self, node: NodeId, layout: LayoutBox) {
        self.layout.insert(node, layout);
    }

    /// `None` for elements that were never laid out.
    pub(crate) fn layout(&self, node: NodeId) -> Option<LayoutBox> {
        self.layout.get(&node).copied()
    }

    pub(crate) fn offset_top(&self, node: NodeId) -> f64 {
        self.layout(node).unwrap_or_default().top
    }

    pub(crate) fn scroll_into_view(&mut self, dom: &Dom, node: NodeId, behavior: ScrollBehavior) {
        let request = ScrollRequest {
            target_id: dom.attr(node, "id"),
            top: self.offset_top(node),
            behavior,
            block: ScrollBlock::Start,
        };
        self.pending_scroll = Some(request);
    }

    pub(crate) fn take_pending_scroll(&mut self) -> Option<ScrollRequest> {
        let request = self.pending_scroll.take()?;
        self.last_scroll_request = Some(request.clone());
        Some(request)
    }

    pub(crate) fn last_scroll_request(&self) -> Option<&ScrollRequest> {
        self.last_scroll_request.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_into_view_records_target_top() -> Result<()> {
        let dom = html::parse_html("<section id='skills'></section>")?;
        let skills = dom.by_id("skills").expect("skills");
        let mut window = WindowState::new(800.0);
        window.set_layout(skills, LayoutBox::new(1200.0, 600.0));
        window.scroll_into_view(&dom, skills, ScrollBehavior::Smooth);

        let request = window.take_pending_scroll().expect("pending request");
        assert_eq!(request.target_id.as_deref(), Some("skills"));
        assert_eq!(request.top, 1200.0);
        assert_eq!(request.behavior, ScrollBehavior::Smooth);
        assert_eq!(request.block, ScrollBlock::Start);
        assert!(window.take_pending_scroll().is_none());
        assert_eq!(window.last_scroll_request(), Some(&request));
        Ok(())
    }

    #[test]
    fn missing_layout_has_no_box_and_zero_offset() -> Result<()> {
        let dom = html::parse_html("<section id='a'></section>")?;
        let window = WindowState::new(800.0);
        let node = dom.by_id("a").expect("section");
        assert_eq!(window.layout(node), None);
        assert_eq!(window.offset_top(node), 0.0);
        Ok(())
    }

    #[test]
    fn negative_height_is_clamped() {
        assert_eq!(LayoutBox::new(10.0, -5.0).height, 0.0);
    }
}
