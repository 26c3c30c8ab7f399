use anyhow::Result;
use serde::{Deserialize, Serialize};
use shared::model::{
    Difficulty, GuideDepth, GuideFormData, GuideFormat, QuestionType, QuizFormData,
};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "QUIZVOX_CONFIG";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default = "Config::default")]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub guide: GuideConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub socket_path: Option<String>,
}

impl ServerConfig {
    pub fn socket_path(&self) -> PathBuf {
        self.socket_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(shared::ipc::default_socket_path)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct VoiceConfig {
    /// Whether a speech capture bridge is expected to feed recognition events.
    #[serde(default = "default_voice_enabled")]
    pub enabled: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_continuous")]
    pub continuous: bool,
    #[serde(default = "default_interim_results")]
    pub interim_results: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: default_voice_enabled(),
            language: default_language(),
            continuous: default_continuous(),
            interim_results: default_interim_results(),
        }
    }
}

fn default_voice_enabled() -> bool {
    true
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_continuous() -> bool {
    true
}

fn default_interim_results() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QuizConfig {
    #[serde(default = "default_quiz_topic")]
    pub topic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_question_types")]
    pub question_types: Vec<QuestionType>,
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            topic: default_quiz_topic(),
            difficulty: Difficulty::Medium,
            question_types: default_question_types(),
            num_questions: default_num_questions(),
            max_questions: default_max_questions(),
        }
    }
}

impl QuizConfig {
    /// Initial quiz form built from these defaults.
    pub fn form(&self) -> QuizFormData {
        QuizFormData {
            topic: self.topic.clone(),
            source_text: String::new(),
            explanation_guidelines: String::new(),
            difficulty: self.difficulty,
            question_types: self.question_types.clone(),
            num_questions: self.num_questions,
        }
    }
}

fn default_quiz_topic() -> String {
    "The Solar System".to_string()
}

fn default_question_types() -> Vec<QuestionType> {
    vec![QuestionType::MultipleChoice, QuestionType::TrueFalse]
}

fn default_num_questions() -> u32 {
    5
}

fn default_max_questions() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GuideConfig {
    #[serde(default = "default_guide_topic")]
    pub topic: String,
    #[serde(default)]
    pub depth: GuideDepth,
    #[serde(default)]
    pub format: GuideFormat,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            topic: default_guide_topic(),
            depth: GuideDepth::InDepth,
            format: GuideFormat::KeyPoints,
        }
    }
}

impl GuideConfig {
    pub fn form(&self) -> GuideFormData {
        GuideFormData {
            topic: self.topic.clone(),
            depth: self.depth,
            format: self.format,
        }
    }
}

fn default_guide_topic() -> String {
    "Introduction to Quantum Mechanics".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RateLimitConfig {
    #[serde(default = "default_commands_per_second")]
    pub commands_per_second: u32,
    #[serde(default = "default_burst_capacity")]
    pub burst_capacity: u32,
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            commands_per_second: default_commands_per_second(),
            burst_capacity: default_burst_capacity(),
            enabled: default_rate_limit_enabled(),
        }
    }
}

fn default_commands_per_second() -> u32 {
    10
}

fn default_burst_capacity() -> u32 {
    20
}

fn default_rate_limit_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TimeoutsConfig {
    #[serde(default = "default_socket_operation_timeout")]
    pub socket_operation_timeout_seconds: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            socket_operation_timeout_seconds: default_socket_operation_timeout(),
        }
    }
}

fn default_socket_operation_timeout() -> u64 {
    10
}

pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        tracing::info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }

    tracing::info!("Loading config from {:?}", config_path);
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

    tracing::info!("Config loaded successfully");
    Ok(config)
}

fn get_config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|dir| dir.join("quizvox").join("config.toml"))
        .ok_or_else(|| anyhow::anyhow!("Failed to get config directory"))
}
