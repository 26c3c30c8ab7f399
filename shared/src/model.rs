use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    FillBlank,
    Matching,
    Ordering,
}

pub const ALL_QUESTION_TYPES: [QuestionType; 5] = [
    QuestionType::MultipleChoice,
    QuestionType::TrueFalse,
    QuestionType::FillBlank,
    QuestionType::Matching,
    QuestionType::Ordering,
];

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true-false",
            QuestionType::FillBlank => "fill-blank",
            QuestionType::Matching => "matching",
            QuestionType::Ordering => "ordering",
        }
    }

    /// Human readable label, e.g. "Multiple Choice".
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True False",
            QuestionType::FillBlank => "Fill Blank",
            QuestionType::Matching => "Matching",
            QuestionType::Ordering => "Ordering",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GuideDepth {
    Summary,
    #[default]
    InDepth,
    Expert,
}

impl GuideDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuideDepth::Summary => "summary",
            GuideDepth::InDepth => "in-depth",
            GuideDepth::Expert => "expert",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GuideFormat {
    #[default]
    KeyPoints,
    QAndA,
    ConceptMap,
}

impl GuideFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuideFormat::KeyPoints => "key-points",
            GuideFormat::QAndA => "q-and-a",
            GuideFormat::ConceptMap => "concept-map",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Guides,
    Tutor,
    Bookmarks,
    About,
    Contact,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Guides => "guides",
            Page::Tutor => "tutor",
            Page::Bookmarks => "bookmarks",
            Page::About => "about",
            Page::Contact => "contact",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuizFormData {
    pub topic: String,
    pub source_text: String,
    pub explanation_guidelines: String,
    pub difficulty: Difficulty,
    pub question_types: Vec<QuestionType>,
    pub num_questions: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GuideFormData {
    pub topic: String,
    pub depth: GuideDepth,
    pub format: GuideFormat,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Assistant,
    Tutor,
}

impl Persona {
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Assistant => "assistant",
            Persona::Tutor => "tutor",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

/// A transient user-facing message raised by a voice action.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}
