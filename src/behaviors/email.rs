use super::*;

use fancy_regex::Regex;
use once_cell::sync::Lazy;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const TOAST_STYLE: &str = "position: fixed; bottom: 20px; left: 50%; \
    transform: translateX(-50%); background: var(--primary-color); color: white; \
    padding: 10px 20px; border-radius: 5px; z-index: 1000; animation: fadeIn 0.3s ease;";

/// Loose `local@domain.tld` shape check.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email).unwrap_or(false)
}

/// Copies `mailto:` addresses to the clipboard and confirms with a toast.
#[derive(Debug, Clone)]
pub(crate) struct EmailCopy {
    message: String,
    visible_ms: i64,
    fade_ms: i64,
}

impl EmailCopy {
    pub(crate) fn new(config: &BehaviorConfig) -> Self {
        Self {
            message: config.toast_message.clone(),
            visible_ms: config.toast_visible_ms,
            fade_ms: config.toast_fade_ms,
        }
    }

    pub(crate) fn copy_from_link(&self, event: &EventState, cx: &mut Context<'_>) -> Result<()> {
        let Some(link) = event.current_node() else {
            return Ok(());
        };
        let href = cx.dom.attr(link, "href").unwrap_or_default();
        let email = href.replacen("mailto:", "", 1);
        if !validate_email(&email) {
            tracing::warn!(%email, "mailto link does not look like an email address");
        }

        let input = cx.dom.create_detached_element("input");
        cx.dom.set_value(input, &email)?;
        let body = cx.dom.body();
        cx.dom.append_child(body, input)?;
        cx.window.selection = Some(input);

        let selected = cx
            .window
            .selection
            .and_then(|node| cx.dom.value(node))
            .unwrap_or_default()
            .to_string();
        match cx.clipboard.copy(&selected) {
            Ok(()) => self.show_toast(cx)?,
            Err(err) => cx.console.error(format!("Failed to copy email: {err}")),
        }

        cx.dom.remove_node(input)?;
        cx.window.selection = None;
        Ok(())
    }

    fn show_toast(&self, cx: &mut Context<'_>) -> Result<()> {
        let toast = cx.dom.create_detached_element("div");
        cx.dom.set_text_content(toast, &self.message)?;
        cx.dom.set_style_text(toast, TOAST_STYLE)?;
        let body = cx.dom.body();
        cx.dom.append_child(body, toast)?;
        cx.timers.set_timeout(self.visible_ms, Task::FadeToast(toast));
        Ok(())
    }

    pub(crate) fn fade_toast(&self, toast: NodeId, cx: &mut Context<'_>) -> Result<()> {
        cx.dom.style_set(toast, "opacity", "0")?;
        cx.timers.set_timeout(self.fade_ms, Task::RemoveToast(toast));
        Ok(())
    }

    pub(crate) fn remove_toast(&self, toast: NodeId, cx: &mut Context<'_>) -> Result<()> {
        cx.dom.remove_node(toast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_email_accepts_plain_addresses() {
        assert!(validate_email("anirudhsingla8@gmail.com"));
        assert!(validate_email("a.b+c@sub.example.org"));
    }

    #[test]
    fn validate_email_rejects_malformed_addresses() {
        for email in ["", "plain", "a@b", "a @b.co", "a@@b.co", "@b.co", "a@b.", "a@.co "] {
            assert!(!validate_email(email), "should reject {email:?}");
        }
    }
}
