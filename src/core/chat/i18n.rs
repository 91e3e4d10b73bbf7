//! Localized strings for the chat panel.
//!
//! Lookups return `None` for unknown keys; every call site supplies its own
//! literal fallback through [`tr`].

use std::collections::HashMap;

/// Translation keys used by the panel.
pub mod keys {
    pub const START_CONVERSATION: &str = "characterChat.startConversation";
    pub const IS_TYPING: &str = "characterChat.isTyping";
    pub const TYPE_MESSAGE: &str = "characterChat.typeMessage";
    pub const SEND: &str = "characterChat.send";
    pub const STORY_PROGRESS: &str = "characterChat.storyProgress";
    pub const PERSPECTIVE: &str = "characterChat.perspective";
    pub const NOVEL_PERSPECTIVE: &str = "characterChat.novelPerspective";
    pub const PROTAGONIST_PERSPECTIVE: &str = "characterChat.protagonistPerspective";
    pub const SCENE_TRANSITION: &str = "characterChat.sceneTransition";
    pub const JUMP_TO_MESSAGE: &str = "characterChat.jumpToMessage";
    pub const GENERATING: &str = "characterChat.generating";
    pub const NEW_MESSAGES_BELOW: &str = "characterChat.newMessagesBelow";
}

/// Source of localized strings.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> Option<String>;
}

/// Look up `key`, falling back to the literal `fallback`.
pub fn tr(translator: &dyn Translator, key: &str, fallback: &str) -> String {
    translator
        .translate(key)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Look up `key` with no literal fallback; an unresolved key is shown as-is.
pub fn tr_key(translator: &dyn Translator, key: &str) -> String {
    tr(translator, key, key)
}

/// Static string table for one locale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<&'static str, &'static str>,
}

const EN: &[(&str, &str)] = &[
    (keys::START_CONVERSATION, "Start a conversation..."),
    (keys::IS_TYPING, "is typing..."),
    (keys::TYPE_MESSAGE, "Type a message..."),
    (keys::SEND, "Send"),
    (keys::STORY_PROGRESS, "Story Progress"),
    (keys::PERSPECTIVE, "Perspective"),
    (keys::NOVEL_PERSPECTIVE, "Novel View"),
    (keys::PROTAGONIST_PERSPECTIVE, "Protagonist View"),
    (keys::SCENE_TRANSITION, "Scene Setting"),
    (keys::JUMP_TO_MESSAGE, "Jump to this message"),
    (keys::GENERATING, "Writing..."),
    (keys::NEW_MESSAGES_BELOW, "new messages below"),
];

const ZH: &[(&str, &str)] = &[
    (keys::START_CONVERSATION, "开始对话..."),
    (keys::IS_TYPING, "正在输入..."),
    (keys::TYPE_MESSAGE, "输入消息..."),
    (keys::SEND, "发送"),
    (keys::STORY_PROGRESS, "剧情推进"),
    (keys::PERSPECTIVE, "视角设计"),
    (keys::NOVEL_PERSPECTIVE, "小说视角"),
    (keys::PROTAGONIST_PERSPECTIVE, "主角视角"),
    (keys::SCENE_TRANSITION, "场景设置"),
    (keys::JUMP_TO_MESSAGE, "跳转到此消息"),
    (keys::GENERATING, "生成中..."),
    (keys::NEW_MESSAGES_BELOW, "下方有新消息"),
];

impl Catalog {
    /// Built-in catalog for `locale`. Unknown locales get an empty table,
    /// so every lookup falls through to the call-site default.
    pub fn for_locale(locale: &str) -> Self {
        let table = match locale.to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => EN,
            "zh" | "zh-cn" | "zh-hans" => ZH,
            other => {
                log::warn!("No built-in catalog for locale {other:?}; using fallbacks");
                &[]
            }
        };
        Self {
            entries: table.iter().copied().collect(),
        }
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|s| (*s).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_resolves() {
        let en = Catalog::for_locale("en");
        assert_eq!(tr(&en, keys::SEND, "x"), "Send");
        let zh = Catalog::for_locale("zh-CN");
        assert_eq!(tr(&zh, keys::SEND, "x"), "发送");
    }

    #[test]
    fn test_unknown_locale_uses_fallbacks() {
        let cat = Catalog::for_locale("tlh");
        assert_eq!(tr(&cat, keys::SEND, "Send"), "Send");
    }

    #[test]
    fn test_tr_key_shows_raw_key_when_unresolved() {
        let cat = Catalog::for_locale("tlh");
        assert_eq!(tr_key(&cat, keys::SCENE_TRANSITION), keys::SCENE_TRANSITION);
    }

    #[test]
    fn test_catalogs_cover_same_keys() {
        let en = Catalog::for_locale("en");
        let zh = Catalog::for_locale("zh");
        for (key, _) in EN {
            assert!(zh.translate(key).is_some(), "zh missing {key}");
        }
        for (key, _) in ZH {
            assert!(en.translate(key).is_some(), "en missing {key}");
        }
    }
}
