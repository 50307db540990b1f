//! Fixed emotion taxonomy used to label segments.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EmotionCategory {
    pub value: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

pub const EMOTION_TAXONOMY: [EmotionCategory; 5] = [
    EmotionCategory {
        value: "positive",
        label: "积极/正面",
        color: "#52c41a",
        description: "表达快乐、满意、兴奋等正面情绪",
    },
    EmotionCategory {
        value: "negative",
        label: "消极/负面",
        color: "#ff4d4f",
        description: "表达愤怒、悲伤、不满等负面情绪",
    },
    EmotionCategory {
        value: "neutral",
        label: "中性/平静",
        color: "#d9d9d9",
        description: "情绪平稳，无明显情感倾向",
    },
    EmotionCategory {
        value: "surprised",
        label: "惊讶",
        color: "#faad14",
        description: "表达意外、震惊等情绪",
    },
    EmotionCategory {
        value: "confused",
        label: "困惑",
        color: "#722ed1",
        description: "表达疑惑、不理解等情绪",
    },
];

pub fn is_known_emotion(value: &str) -> bool {
    EMOTION_TAXONOMY.iter().any(|e| e.value == value)
}
