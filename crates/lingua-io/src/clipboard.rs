/// Write access to the system clipboard
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Clipboard of the desktop session, via arboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> anyhow::Result<()> {
        // arboard handles are not shareable across threads on every platform
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }
}
