use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EventKind {
    Click,
    Scroll,
    Load,
    DomContentLoaded,
    MouseEnter,
    MouseLeave,
}

impl EventKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::Load => "load",
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }

    pub(crate) fn bubbles(self) -> bool {
        matches!(self, Self::Click)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EventTarget {
    Window,
    Document,
    Node(NodeId),
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) kind: EventKind,
    pub(crate) target: EventTarget,
    pub(crate) current_target: EventTarget,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub(crate) fn new(kind: EventKind, target: EventTarget) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub(crate) fn current_node(&self) -> Option<NodeId> {
        match self.current_target {
            EventTarget::Node(node) => Some(node),
            EventTarget::Window | EventTarget::Document => None,
        }
    }
}

/// Listeners per target and event kind, kept in registration order.
#[derive(Debug, Clone)]
pub(crate) struct ListenerStore<H> {
    map: HashMap<EventTarget, HashMap<EventKind, Vec<H>>>,
}

impl<H> Default for ListenerStore<H> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<H: Clone> ListenerStore<H> {
    pub(crate) fn add(&mut self, target: EventTarget, kind: EventKind, handler: H) {
        self.map
            .entry(target)
            .or_default()
            .entry(kind)
            .or_default()
            .push(handler);
    }

    pub(crate) fn get(&self, target: EventTarget, kind: EventKind) -> Vec<H> {
        self.map
            .get(&target)
            .and_then(|events| events.get(&kind))
            .cloned()
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn count(&self, target: EventTarget, kind: EventKind) -> usize {
        self.map
            .get(&target)
            .and_then(|events| events.get(&kind))
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// Targets visited by an event, innermost first.
pub(crate) fn propagation_path(
    dom: &Dom,
    target: EventTarget,
    kind: EventKind,
) -> Vec<EventTarget> {
    let EventTarget::Node(node) = target else {
        return vec![target];
    };
    if !kind.bubbles() {
        return vec![target];
    }
    let mut path = dom
        .ancestors_inclusive(node)
        .into_iter()
        .filter(|id| *id != dom.root)
        .map(EventTarget::Node)
        .collect::<Vec<_>>();
    if dom.is_connected(node) {
        path.push(EventTarget::Document);
        path.push(EventTarget::Window);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_keep_registration_order() {
        let mut store = ListenerStore::default();
        store.add(EventTarget::Window, EventKind::Scroll, "navbar");
        store.add(EventTarget::Window, EventKind::Scroll, "links");
        store.add(EventTarget::Window, EventKind::Load, "typing");
        assert_eq!(
            store.get(EventTarget::Window, EventKind::Scroll),
            vec!["navbar", "links"]
        );
        assert_eq!(store.count(EventTarget::Document, EventKind::Click), 0);
    }

    #[test]
    fn click_bubbles_to_document_and_window() -> Result<()> {
        let dom = html::parse_html("<a id='a' href='#x'><span id='s'>go</span></a>")?;
        let span = dom.by_id("s").expect("span");
        let anchor = dom.by_id("a").expect("anchor");
        let path = propagation_path(&dom, EventTarget::Node(span), EventKind::Click);
        assert_eq!(
            path,
            vec![
                EventTarget::Node(span),
                EventTarget::Node(anchor),
                EventTarget::Document,
                EventTarget::Window,
            ]
        );
        Ok(())
    }

    #[test]
    fn mouseenter_does_not_bubble() -> Result<()> {
        let dom = html::parse_html("<div class='project-card'><p id='p'>x</p></div>")?;
        let p = dom.by_id("p").expect("paragraph");
        let path = propagation_path(&dom, EventTarget::Node(p), EventKind::MouseEnter);
        assert_eq!(path, vec![EventTarget::Node(p)]);
        Ok(())
    }
}
