// Clipboard access for copy actions
use crate::error::{EngineError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::Write;

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Sets the system clipboard through the terminal's OSC 52 escape sequence.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<()> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))
            .and_then(|_| self.out.flush())
            .map_err(|e| EngineError::ClipboardError(e.to_string()))
    }
}

/// Copies `text`, logging instead of failing when the clipboard refuses.
pub fn copy_or_log(clipboard: &mut dyn Clipboard, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    match clipboard.copy(text) {
        Ok(()) => {
            tracing::info!(bytes = text.len(), "Copied result to clipboard");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to copy to clipboard");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RefusingClipboard;

    impl Clipboard for RefusingClipboard {
        fn copy(&mut self, _text: &str) -> Result<()> {
            Err(EngineError::ClipboardError("denied".to_string()))
        }
    }

    #[test]
    fn test_osc52_sequence() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.copy("hi").unwrap();
        assert_eq!(clipboard.into_inner(), b"\x1b]52;c;aGk=\x07".to_vec());
    }

    #[test]
    fn test_failures_are_not_fatal() {
        assert!(!copy_or_log(&mut RefusingClipboard, "text"));
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        assert!(!copy_or_log(&mut clipboard, ""));
        assert!(clipboard.into_inner().is_empty());
    }
}
