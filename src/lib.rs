use std::collections::{HashMap, HashSet};

mod behaviors;
mod clipboard;
mod clock;
mod config;
mod console;
mod dom;
mod events;
mod html;
mod observer;
mod page;
mod scheduler;
mod selector;
mod window;

pub use behaviors::email::validate_email;
pub use behaviors::loader::LoaderState;
pub use behaviors::skills::SkillBarState;
pub use behaviors::typing::TypingState;
pub use clipboard::{Clipboard, ClipboardError, DeniedClipboard, MemoryClipboard};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{BehaviorConfig, ClassNames};
pub use console::{ConsoleLevel, ConsoleMessage};
pub use page::Page;
pub use scheduler::PendingTimer;
pub use window::{LayoutBox, ScrollBehavior, ScrollBlock, ScrollRequest};

use dom::{Dom, NodeId};
use selector::parse_selector_groups;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("timer error: {0}")]
    Timer(String),
    #[error("dom error: {0}")]
    Dom(String),
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

fn format_float(value: f64) -> String {
    let mut out = format!("{:.16}", value);
    while out.contains('.') && out.ends_with('0') {
        out.pop();
    }
    if out.ends_with('.') {
        out.pop();
    }
    if out == "-0" {
        out = "0".to_string();
    }
    out
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_float_trims_trailing_zeros() {
        assert_eq!(format_float(25.0), "25");
        assert_eq!(format_float(37.5), "37.5");
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(-0.0), "0");
        assert_eq!(format_float(0.30000000000000004), "0.3");
    }

    #[test]
    fn truncate_chars_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
    }
}
