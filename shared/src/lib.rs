pub mod ipc;
pub mod model;

pub use ipc::{
    CaptureErrorKind, CaptureEvent, Command, FormSnapshot, InterpretOutcome, IpcError,
    RecognitionResult, Response, StatusInfo,
};
pub use model::{
    ChatMessage, ChatRole, Difficulty, GuideDepth, GuideFormData, GuideFormat, Notification,
    NotificationKind, Page, Persona, QuestionType, QuizFormData, ALL_QUESTION_TYPES,
};
