#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard access denied")]
    Denied,
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// The system clipboard as seen by a `copy` command.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;

    fn contents(&self) -> Option<&str> {
        None
    }
}

/// Keeps the last copied text in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    copies: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copies(&self) -> usize {
        self.copies
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        self.copies += 1;
        Ok(())
    }

    fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

/// Rejects every copy, like a browser without clipboard permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedClipboard;

impl Clipboard for DeniedClipboard {
    fn copy(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Denied)
    }
}
