//! Shared UI icons and emojis.
//!
//! Each icon falls back to plain text when the terminal can't render emoji.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[i]");

// Board
pub static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
pub static TODO: Emoji<'_, '_> = Emoji("📋 ", "[ ]");
pub static IN_PROGRESS: Emoji<'_, '_> = Emoji("🚧 ", "[~]");
pub static DONE: Emoji<'_, '_> = Emoji("🏁 ", "[x]");
pub static COMMENT: Emoji<'_, '_> = Emoji("💬 ", "#");
pub static USER: Emoji<'_, '_> = Emoji("👤 ", "@");
pub static LOCK: Emoji<'_, '_> = Emoji("🔒 ", "[auth]");
