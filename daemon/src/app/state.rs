use shared::ipc::FormSnapshot;
use shared::model::{GuideFormData, Page, QuizFormData};
use tracing::info;

use super::generation::{GenerationDispatcher, GenerationRequest};
use super::notify::Notifier;
use crate::config::Config;

/// Everything voice actions are allowed to touch.
#[derive(Debug)]
pub struct AppState {
    pub current_page: Page,
    pub dark_mode: bool,
    pub quiz: QuizFormData,
    pub guide: GuideFormData,
    /// Upper bound accepted by "set number of questions to *".
    pub max_questions: u32,
    pub notifications: Notifier,
    generator: GenerationDispatcher,
}

impl AppState {
    pub fn new(
        quiz: QuizFormData,
        guide: GuideFormData,
        max_questions: u32,
        generator: GenerationDispatcher,
    ) -> Self {
        Self {
            current_page: Page::Home,
            dark_mode: true,
            quiz,
            guide,
            max_questions,
            notifications: Notifier::new(),
            generator,
        }
    }

    pub fn from_config(config: &Config, generator: GenerationDispatcher) -> Self {
        Self::new(
            config.quiz.form(),
            config.guide.form(),
            config.quiz.max_questions,
            generator,
        )
    }

    pub fn navigate_to(&mut self, page: Page) {
        info!("Navigating {} -> {}", self.current_page, page);
        self.current_page = page;
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        info!("Dark mode {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Validate the quiz form and hand it to the generator.
    ///
    /// Returns `true` when a request was dispatched.
    pub fn generate_quiz(&mut self) -> bool {
        if self.quiz.topic.trim().is_empty() {
            self.notifications.error("Please provide a topic for your quiz.");
            return false;
        }
        if self.quiz.question_types.is_empty() {
            self.notifications.error("Please select at least one question type.");
            return false;
        }

        if self.generator.dispatch(GenerationRequest::Quiz(self.quiz.clone())) {
            true
        } else {
            self.notifications.error("Quiz generation is unavailable right now.");
            false
        }
    }

    pub fn generate_guide(&mut self) -> bool {
        if self.guide.topic.trim().is_empty() {
            self.notifications.error("Please provide a topic for your study guide.");
            return false;
        }

        if self.generator.dispatch(GenerationRequest::StudyGuide(self.guide.clone())) {
            true
        } else {
            self.notifications.error("Study guide generation is unavailable right now.");
            false
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            current_page: self.current_page,
            dark_mode: self.dark_mode,
            quiz: self.quiz.clone(),
            guide: self.guide.clone(),
        }
    }
}
