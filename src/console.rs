#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Error,
}

/// One `console.log`/`console.error` call, with its `%c` style if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub text: String,
    pub style: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Console {
    messages: Vec<ConsoleMessage>,
}

impl Console {
    pub(crate) fn log_styled(&mut self, text: impl Into<String>, style: impl Into<String>) {
        let text = text.into();
        tracing::info!(target: "portfolio_behaviors::console", "{text}");
        self.messages.push(ConsoleMessage {
            level: ConsoleLevel::Log,
            text,
            style: Some(style.into()),
        });
    }

    pub(crate) fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::error!(target: "portfolio_behaviors::console", "{text}");
        self.messages.push(ConsoleMessage {
            level: ConsoleLevel::Error,
            text,
            style: None,
        });
    }

    pub(crate) fn messages(&self) -> &[ConsoleMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_messages_in_call_order() {
        let mut console = Console::default();
        console.log_styled("hi", "color: red;");
        console.error("boom");
        let levels = console
            .messages()
            .iter()
            .map(|m| m.level)
            .collect::<Vec<_>>();
        assert_eq!(levels, vec![ConsoleLevel::Log, ConsoleLevel::Error]);
        assert_eq!(console.messages()[0].style.as_deref(), Some("color: red;"));
    }
}
