pub mod bridge;
pub mod clipboard;

pub use bridge::{Bridge, BridgeConnection};
pub use clipboard::{Clipboard, SystemClipboard};
