use super::*;
use window::ScrollBehavior;

/// Fragment links scroll smoothly to their target instead of jumping.
///
/// The default jump is always prevented, even when the target is missing.
pub(crate) fn smooth_scroll(event: &mut EventState, cx: &mut Context<'_>) -> Result<()> {
    event.prevent_default();
    let Some(anchor) = event.current_node() else {
        return Ok(());
    };
    let Some(href) = cx.dom.attr(anchor, "href") else {
        return Ok(());
    };
    // `#` alone or a malformed fragment is not a usable selector.
    let Ok(Some(target)) = cx.dom.query_selector(&href) else {
        tracing::debug!(%href, "smooth scroll target missing");
        return Ok(());
    };
    cx.window.scroll_into_view(cx.dom, target, ScrollBehavior::Smooth);
    Ok(())
}

/// Hamburger toggle and menu container, open or closed together.
#[derive(Debug, Clone)]
pub(crate) struct MobileMenu {
    hamburger: NodeId,
    menu: NodeId,
    active_class: String,
    open: bool,
}

impl MobileMenu {
    pub(crate) fn bind(dom: &Dom, bindings: &Bindings, active_class: &str) -> Option<Self> {
        let hamburger = bindings.hamburger?;
        let menu = bindings.nav_menu?;
        Some(Self {
            hamburger,
            menu,
            active_class: active_class.to_string(),
            open: dom.has_class(hamburger, active_class),
        })
    }

    pub(crate) fn hamburger(&self) -> NodeId {
        self.hamburger
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn toggle(&mut self, dom: &mut Dom) -> Result<()> {
        self.set_open(dom, !self.open)
    }

    pub(crate) fn close(&mut self, dom: &mut Dom) -> Result<()> {
        self.set_open(dom, false)
    }

    fn set_open(&mut self, dom: &mut Dom, open: bool) -> Result<()> {
        self.open = open;
        dom.class_set(self.hamburger, &self.active_class, open)?;
        dom.class_set(self.menu, &self.active_class, open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_dom() -> Result<Dom> {
        html::parse_html(
            r#"<div class="hamburger active"></div><ul class="nav-menu"></ul>"#,
        )
    }

    #[test]
    fn initial_state_follows_hamburger_and_syncs_menu() -> Result<()> {
        let mut dom = menu_dom()?;
        let bindings = Bindings::bind(&dom)?;
        let mut menu = MobileMenu::bind(&dom, &bindings, "active").expect("menu");
        assert!(menu.is_open());

        menu.toggle(&mut dom)?;
        assert!(!menu.is_open());
        assert!(!dom.has_class(bindings.hamburger.expect("hamburger"), "active"));
        assert!(!dom.has_class(bindings.nav_menu.expect("menu"), "active"));

        menu.toggle(&mut dom)?;
        assert!(dom.has_class(bindings.hamburger.expect("hamburger"), "active"));
        assert!(dom.has_class(bindings.nav_menu.expect("menu"), "active"));
        Ok(())
    }

    #[test]
    fn close_is_idempotent() -> Result<()> {
        let mut dom = menu_dom()?;
        let bindings = Bindings::bind(&dom)?;
        let mut menu = MobileMenu::bind(&dom, &bindings, "active").expect("menu");
        menu.close(&mut dom)?;
        menu.close(&mut dom)?;
        assert!(!menu.is_open());
        assert!(!dom.has_class(bindings.nav_menu.expect("menu"), "active"));
        Ok(())
    }

    #[test]
    fn menu_needs_both_elements() -> Result<()> {
        let dom = html::parse_html(r#"<div class="hamburger"></div>"#)?;
        let bindings = Bindings::bind(&dom)?;
        assert!(MobileMenu::bind(&dom, &bindings, "active").is_none());
        Ok(())
    }
}
