// =============================================================================
// clipboard.rs - System clipboard access
// =============================================================================

use crate::error::Result;

/// Presse-papiers texte
/// Text clipboard
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// In-process clipboard used headless and in tests
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of writes since creation
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_replaces_contents() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);

        clipboard.write_text("#FFFFFF").unwrap();
        clipboard.write_text("#000000").unwrap();
        assert_eq!(clipboard.contents(), Some("#000000"));
        assert_eq!(clipboard.writes(), 2);
    }
}
