//! Voice command table for the quiz and study-guide surface.
//!
//! Captured text is validated inside each action. Single-value commands
//! (topic, difficulty, count) reject the whole utterance on bad input and
//! leave the form untouched; list commands (add/remove question types) apply
//! what they recognize and report the rest.

use regex::Regex;
use shared::model::{Difficulty, GuideDepth, GuideFormat, Page, QuestionType};
use std::sync::OnceLock;

use crate::app::AppState;
use crate::command::{CommandInterpreter, CommandPattern, TemplateError};

/// Pages reachable by voice navigation.
pub const VOICE_PAGES: [Page; 5] = [Page::Home, Page::Guides, Page::Tutor, Page::About, Page::Contact];

const QUESTION_TYPE_PHRASES: &[(&str, QuestionType)] = &[
    ("multiple choice", QuestionType::MultipleChoice),
    ("multi choice", QuestionType::MultipleChoice),
    ("mcq", QuestionType::MultipleChoice),
    ("true false", QuestionType::TrueFalse),
    ("true or false", QuestionType::TrueFalse),
    ("fill blank", QuestionType::FillBlank),
    ("fill blanks", QuestionType::FillBlank),
    ("fill in blank", QuestionType::FillBlank),
    ("fill in the blank", QuestionType::FillBlank),
    ("fill in the blanks", QuestionType::FillBlank),
    ("matching", QuestionType::Matching),
    ("match", QuestionType::Matching),
    ("ordering", QuestionType::Ordering),
    ("order", QuestionType::Ordering),
    ("sequencing", QuestionType::Ordering),
];

const NUMBER_WORDS: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
];

/// Recognized and rejected entries of a spoken question-type list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeSelection {
    pub recognized: Vec<QuestionType>,
    pub unrecognized: Vec<String>,
}

/// Trim trailing sentence punctuation the recognizer tends to append.
fn clean(value: &str) -> &str {
    value.trim().trim_end_matches(['.', '!', '?']).trim_end()
}

fn lowered(value: &str) -> String {
    clean(value).to_lowercase()
}

pub fn parse_page(value: &str) -> Option<Page> {
    let value = lowered(value);
    VOICE_PAGES.into_iter().find(|p| p.as_str() == value)
}

/// Parse a strictly positive count, spoken as digits or a number word.
pub fn parse_count(value: &str) -> Option<u32> {
    let value = lowered(value);
    let count = value.parse::<u32>().ok().or_else(|| {
        NUMBER_WORDS
            .iter()
            .find(|(word, _)| *word == value)
            .map(|(_, n)| *n)
    })?;
    (count > 0).then_some(count)
}

pub fn parse_question_type(phrase: &str) -> Option<QuestionType> {
    let normalized = lowered(phrase).replace(['-', '/'], " ");
    let mut words: Vec<&str> = normalized.split_whitespace().collect();
    if matches!(words.last(), Some(&"question" | &"questions")) {
        words.pop();
    }
    let phrase = words.join(" ");

    QUESTION_TYPE_PHRASES
        .iter()
        .find(|(known, _)| *known == phrase)
        .map(|(_, ty)| *ty)
}

/// Split a list such as "matching, ordering and true or false" into question
/// types, keeping the phrases that map to nothing.
pub fn parse_question_types(list: &str) -> TypeSelection {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    let separator = SEPARATOR_RE
        .get_or_init(|| Regex::new(r"(?i),|\band\b").expect("separator regex is valid"));

    let mut selection = TypeSelection::default();
    for item in separator.split(list).map(str::trim).filter(|s| !s.is_empty()) {
        match parse_question_type(item) {
            Some(ty) if !selection.recognized.contains(&ty) => selection.recognized.push(ty),
            Some(_) => {}
            None => selection.unrecognized.push(item.to_lowercase()),
        }
    }
    selection
}

pub fn parse_difficulty(value: &str) -> Option<Difficulty> {
    Difficulty::parse(&lowered(value))
}

pub fn parse_depth(value: &str) -> Option<GuideDepth> {
    match lowered(value).replace('-', " ").as_str() {
        "summary" => Some(GuideDepth::Summary),
        "in depth" | "indepth" | "detailed" => Some(GuideDepth::InDepth),
        "expert" => Some(GuideDepth::Expert),
        _ => None,
    }
}

pub fn parse_format(value: &str) -> Option<GuideFormat> {
    match lowered(value).replace('-', " ").as_str() {
        "key points" | "bullet points" => Some(GuideFormat::KeyPoints),
        "q and a" | "q&a" | "questions and answers" | "question and answer" => {
            Some(GuideFormat::QAndA)
        }
        "concept map" => Some(GuideFormat::ConceptMap),
        _ => None,
    }
}

fn type_names(types: &[QuestionType]) -> String {
    types
        .iter()
        .map(QuestionType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn quoted(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

fn navigate(app: &mut AppState, args: &[String]) {
    let [page] = args else { return };
    let name = lowered(page);
    match parse_page(&name) {
        Some(target) => {
            app.notifications.info(format!("Navigating to {name} page..."));
            app.navigate_to(target);
        }
        None => {
            app.notifications
                .error(format!("Sorry, I can't find the \"{name}\" page."));
        }
    }
}

fn reject_count(app: &mut AppState, value: &str) {
    app.notifications.error(format!(
        "Invalid number of questions: \"{}\". Please say a positive number.",
        clean(value)
    ));
}

fn generate_detailed_quiz(app: &mut AppState, args: &[String]) {
    let [count, topic, types] = args else { return };

    let Some(count) = parse_count(count) else {
        return reject_count(app, count);
    };
    let topic = clean(topic);
    if topic.is_empty() {
        app.notifications.error("Please say a topic for your quiz.");
        return;
    }
    let selection = parse_question_types(types);
    if !selection.unrecognized.is_empty() || selection.recognized.is_empty() {
        app.notifications.error(format!(
            "Unrecognized question type(s): {}. Quiz not generated.",
            quoted(&selection.unrecognized)
        ));
        return;
    }

    app.notifications.info(format!(
        "Generating a {count} question quiz about \"{topic}\" with {}...",
        type_names(&selection.recognized)
    ));
    app.quiz.topic = topic.to_string();
    app.quiz.num_questions = count;
    app.quiz.question_types = selection.recognized;
    app.generate_quiz();
}

fn generate_counted_quiz(app: &mut AppState, args: &[String]) {
    let [count, topic] = args else { return };

    let Some(count) = parse_count(count) else {
        return reject_count(app, count);
    };
    let topic = clean(topic);
    if topic.is_empty() {
        app.notifications.error("Please say a topic for your quiz.");
        return;
    }

    app.notifications
        .info(format!("Generating a {count} question quiz about \"{topic}\"..."));
    app.quiz.topic = topic.to_string();
    app.quiz.num_questions = count;
    app.generate_quiz();
}

fn generate_quiz_about(app: &mut AppState, args: &[String]) {
    let [topic] = args else { return };
    let topic = clean(topic);
    if topic.is_empty() {
        app.notifications.error("Please say a topic for your quiz.");
        return;
    }

    app.notifications
        .info(format!("Setting topic to \"{topic}\" and generating quiz..."));
    app.quiz.topic = topic.to_string();
    app.generate_quiz();
}

fn generate_quiz(app: &mut AppState, _args: &[String]) {
    app.notifications.info("Generating quiz now...");
    app.generate_quiz();
}

fn set_topic(app: &mut AppState, args: &[String]) {
    let [topic] = args else { return };
    let topic = clean(topic);
    if topic.is_empty() {
        app.notifications.error("Please say a topic.");
        return;
    }

    app.notifications.info(format!("Setting topic to: {topic}"));
    app.quiz.topic = topic.to_string();
}

fn set_difficulty(app: &mut AppState, args: &[String]) {
    let [difficulty] = args else { return };
    match parse_difficulty(difficulty) {
        Some(level) => {
            app.notifications
                .info(format!("Setting difficulty to {level}."));
            app.quiz.difficulty = level;
        }
        None => {
            app.notifications.error(format!(
                "Invalid difficulty: \"{}\". Please say easy, medium, or hard.",
                clean(difficulty)
            ));
        }
    }
}

fn set_question_count(app: &mut AppState, args: &[String]) {
    let [count] = args else { return };
    let max = app.max_questions;
    match parse_count(count).filter(|n| *n <= max) {
        Some(n) => {
            app.notifications
                .info(format!("Setting number of questions to {n}."));
            app.quiz.num_questions = n;
        }
        None => {
            app.notifications.error(format!(
                "Invalid number of questions: \"{}\". Please say a number from 1 to {max}.",
                clean(count)
            ));
        }
    }
}

fn report_unrecognized(app: &mut AppState, selection: &TypeSelection) {
    if !selection.unrecognized.is_empty() {
        app.notifications.error(format!(
            "Unrecognized question type(s): {}.",
            quoted(&selection.unrecognized)
        ));
    }
}

fn add_question_types(app: &mut AppState, args: &[String]) {
    let [list] = args else { return };
    let selection = parse_question_types(list);

    let added: Vec<QuestionType> = selection
        .recognized
        .iter()
        .copied()
        .filter(|ty| !app.quiz.question_types.contains(ty))
        .collect();

    if !added.is_empty() {
        app.quiz.question_types.extend(&added);
        app.notifications
            .info(format!("Added question types: {}.", type_names(&added)));
    } else if !selection.recognized.is_empty() {
        app.notifications.info(format!(
            "Question types already selected: {}.",
            type_names(&selection.recognized)
        ));
    }
    report_unrecognized(app, &selection);
}

fn remove_question_types(app: &mut AppState, args: &[String]) {
    let [list] = args else { return };
    let selection = parse_question_types(list);

    let removed: Vec<QuestionType> = selection
        .recognized
        .iter()
        .copied()
        .filter(|ty| app.quiz.question_types.contains(ty))
        .collect();

    if !removed.is_empty() {
        app.quiz.question_types.retain(|ty| !removed.contains(ty));
        app.notifications
            .info(format!("Removed question types: {}.", type_names(&removed)));
    } else if !selection.recognized.is_empty() {
        app.notifications.info(format!(
            "Question types were not selected: {}.",
            type_names(&selection.recognized)
        ));
    }
    report_unrecognized(app, &selection);
}

fn set_source_text(app: &mut AppState, args: &[String]) {
    let [text] = args else { return };
    app.notifications.info("Setting source text.");
    app.quiz.source_text = text.clone();
}

fn clear_source_text(app: &mut AppState, _args: &[String]) {
    app.notifications.info("Clearing source text.");
    app.quiz.source_text.clear();
}

fn set_explanation_guidelines(app: &mut AppState, args: &[String]) {
    let [text] = args else { return };
    app.notifications.info("Setting explanation guidelines.");
    app.quiz.explanation_guidelines = text.clone();
}

fn clear_explanation_guidelines(app: &mut AppState, _args: &[String]) {
    app.notifications.info("Clearing explanation guidelines.");
    app.quiz.explanation_guidelines.clear();
}

fn generate_guide_about(app: &mut AppState, args: &[String]) {
    let [topic] = args else { return };
    let topic = clean(topic);
    if topic.is_empty() {
        app.notifications
            .error("Please say a topic for your study guide.");
        return;
    }

    app.notifications.info(format!(
        "Setting study guide topic to \"{topic}\" and generating study guide..."
    ));
    app.guide.topic = topic.to_string();
    app.generate_guide();
}

fn generate_guide(app: &mut AppState, _args: &[String]) {
    app.notifications.info("Generating study guide now...");
    app.generate_guide();
}

fn set_guide_topic(app: &mut AppState, args: &[String]) {
    let [topic] = args else { return };
    let topic = clean(topic);
    if topic.is_empty() {
        app.notifications.error("Please say a topic.");
        return;
    }

    app.notifications
        .info(format!("Setting study guide topic to: {topic}"));
    app.guide.topic = topic.to_string();
}

fn set_guide_depth(app: &mut AppState, args: &[String]) {
    let [depth] = args else { return };
    match parse_depth(depth) {
        Some(depth) => {
            app.notifications
                .info(format!("Setting study guide depth to {}.", depth.as_str()));
            app.guide.depth = depth;
        }
        None => {
            app.notifications.error(format!(
                "Invalid depth: \"{}\". Please say summary, in depth, or expert.",
                clean(depth)
            ));
        }
    }
}

fn set_guide_format(app: &mut AppState, args: &[String]) {
    let [format] = args else { return };
    match parse_format(format) {
        Some(format) => {
            app.notifications
                .info(format!("Setting study guide format to {}.", format.as_str()));
            app.guide.format = format;
        }
        None => {
            app.notifications.error(format!(
                "Invalid format: \"{}\". Please say key points, Q and A, or concept map.",
                clean(format)
            ));
        }
    }
}

fn enable_dark_mode(app: &mut AppState, _args: &[String]) {
    app.set_dark_mode(true);
    app.notifications.info("Dark mode enabled.");
}

fn disable_dark_mode(app: &mut AppState, _args: &[String]) {
    app.set_dark_mode(false);
    app.notifications.info("Light mode enabled.");
}

/// Build the ordered command table. Longer phrasings come before the shorter
/// ones they extend.
pub fn build_commands() -> Result<Vec<CommandPattern<AppState>>, TemplateError> {
    Ok(vec![
        CommandPattern::new(
            ["navigate to * page", "go to * page", "show me the * page"],
            navigate,
        )?,
        CommandPattern::new(
            ["generate a * question quiz about * with *"],
            generate_detailed_quiz,
        )?,
        CommandPattern::new(["generate a * question quiz about *"], generate_counted_quiz)?,
        CommandPattern::new(["generate quiz about *"], generate_quiz_about)?,
        CommandPattern::new(["generate quiz", "create quiz", "start quiz"], generate_quiz)?,
        CommandPattern::new(["set topic to *"], set_topic)?,
        CommandPattern::new(["set difficulty to *"], set_difficulty)?,
        CommandPattern::new(
            ["set number of questions to *", "set question count to *"],
            set_question_count,
        )?,
        CommandPattern::new(
            ["add * questions", "add * question types"],
            add_question_types,
        )?,
        CommandPattern::new(
            ["remove * questions", "remove * question types"],
            remove_question_types,
        )?,
        CommandPattern::new(["set source text to *"], set_source_text)?,
        CommandPattern::new(["clear source text"], clear_source_text)?,
        CommandPattern::new(
            ["set explanation guidelines to *"],
            set_explanation_guidelines,
        )?,
        CommandPattern::new(
            ["clear explanation guidelines"],
            clear_explanation_guidelines,
        )?,
        CommandPattern::new(
            ["generate study guide about *", "generate guide about *"],
            generate_guide_about,
        )?,
        CommandPattern::new(
            ["generate study guide", "create study guide"],
            generate_guide,
        )?,
        CommandPattern::new(["set guide topic to *"], set_guide_topic)?,
        CommandPattern::new(["set guide depth to *"], set_guide_depth)?,
        CommandPattern::new(["set guide format to *"], set_guide_format)?,
        CommandPattern::new(
            ["enable dark mode", "switch to dark mode"],
            enable_dark_mode,
        )?,
        CommandPattern::new(
            ["disable dark mode", "switch to light mode"],
            disable_dark_mode,
        )?,
    ])
}

pub fn build_interpreter() -> Result<CommandInterpreter<AppState>, TemplateError> {
    let mut interpreter = CommandInterpreter::new();
    interpreter.register_all(build_commands()?);
    tracing::info!("Registered {} voice commands", interpreter.len());
    Ok(interpreter)
}
