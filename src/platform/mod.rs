pub mod telegram;

use std::collections::BTreeSet;

/// Kind of chat a message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ChatKind {
    /// Anything that is not a group or supergroup counts as a personal chat.
    pub fn is_personal(self) -> bool {
        !matches!(self, ChatKind::Group | ChatKind::Supergroup)
    }
}

/// A message received from the platform, reduced to what classification needs
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// The message text, empty for stickers
    pub raw_text: String,
    /// Lowercase whitespace-separated tokens of `raw_text`
    pub words: BTreeSet<String>,
    pub chat_kind: ChatKind,
    pub has_sticker: bool,
    pub sticker_emoji: Option<String>,
}

impl IncomingMessage {
    pub fn text(raw_text: impl Into<String>, chat_kind: ChatKind) -> Self {
        let raw_text = raw_text.into();
        let words = tokenize(&raw_text);
        Self {
            raw_text,
            words,
            chat_kind,
            has_sticker: false,
            sticker_emoji: None,
        }
    }

    pub fn sticker(emoji: Option<String>, chat_kind: ChatKind) -> Self {
        Self {
            raw_text: String::new(),
            words: BTreeSet::new(),
            chat_kind,
            has_sticker: true,
            sticker_emoji: emoji,
        }
    }
}

/// Lowercase the text and split it on whitespace into a set of words.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// What the bot sends back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Photo { url: String, caption: String },
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_dedups() {
        let words = tokenize("Woof  WOOF\nbark!");
        assert_eq!(words.len(), 2);
        assert!(words.contains("woof"));
        assert!(words.contains("bark!"));
    }

    #[test]
    fn test_tokenize_empty_message() {
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_personal_chat_kinds() {
        assert!(ChatKind::Private.is_personal());
        assert!(ChatKind::Channel.is_personal());
        assert!(!ChatKind::Group.is_personal());
        assert!(!ChatKind::Supergroup.is_personal());
    }

    #[test]
    fn test_sticker_message_has_no_words() {
        let msg = IncomingMessage::sticker(Some("🐶".to_string()), ChatKind::Group);
        assert!(msg.has_sticker);
        assert!(msg.words.is_empty());
    }
}
