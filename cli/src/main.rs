mod client;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use client::DaemonClient;
use shared::ipc::{Command, FormSnapshot, InterpretOutcome, Response, StatusInfo};
use shared::model::{Notification, NotificationKind, Persona, ALL_QUESTION_TYPES};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quizvox")]
#[command(about = "CLI tool for the quizvox voice command daemon")]
struct Cli {
    /// Daemon socket (defaults to $XDG_RUNTIME_DIR/quizvoxd.sock)
    #[arg(long, global = true)]
    socket: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start listening for voice commands
    Start,
    /// Stop listening
    Stop,
    Toggle,
    Status,
    /// Send a finalized transcript, as if it had been spoken
    Say {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Show the current quiz and study guide forms
    Form,
    /// Send a chat message to one of the assistants
    Chat {
        #[arg(value_enum)]
        persona: PersonaArg,
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Record the AI client's answer in a chat session
    Reply {
        #[arg(value_enum)]
        persona: PersonaArg,
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Drop a chat session and its history
    ResetChat {
        #[arg(value_enum)]
        persona: PersonaArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PersonaArg {
    Assistant,
    Tutor,
}

impl From<PersonaArg> for Persona {
    fn from(arg: PersonaArg) -> Self {
        match arg {
            PersonaArg::Assistant => Persona::Assistant,
            PersonaArg::Tutor => Persona::Tutor,
        }
    }
}

fn notification_line(n: &Notification) -> String {
    let tag = match n.kind {
        NotificationKind::Info => "info",
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
    };
    format!("[{}] {}", tag, n.message)
}

fn status_lines(info: &StatusInfo) -> Vec<String> {
    vec![
        "Status:".to_string(),
        format!("  Running: {}", info.is_running),
        format!("  Listening: {}", info.is_listening),
        format!("  Continuous: {}", info.continuous),
        format!("  Interim results: {}", info.interim_results),
        format!("  Language: {}", info.language),
        format!("  Page: {}", info.current_page),
    ]
}

fn outcome_lines(outcome: &InterpretOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    if !outcome.matched {
        lines.push("No command matched".to_string());
    }
    lines.extend(outcome.notifications.iter().map(notification_line));
    lines
}

fn form_lines(form: &FormSnapshot) -> Vec<String> {
    let mut lines = vec![
        format!("Page: {}", form.current_page),
        format!("Dark mode: {}", form.dark_mode),
        "Quiz:".to_string(),
        format!("  Topic: {}", form.quiz.topic),
        format!("  Difficulty: {}", form.quiz.difficulty),
        format!("  Questions: {}", form.quiz.num_questions),
        "  Question types:".to_string(),
    ];
    for ty in ALL_QUESTION_TYPES {
        let mark = if form.quiz.question_types.contains(&ty) { "x" } else { " " };
        lines.push(format!("    [{}] {}", mark, ty.label()));
    }
    if !form.quiz.source_text.is_empty() {
        lines.push(format!("  Source text: {}", form.quiz.source_text));
    }
    if !form.quiz.explanation_guidelines.is_empty() {
        lines.push(format!(
            "  Explanation guidelines: {}",
            form.quiz.explanation_guidelines
        ));
    }
    lines.extend([
        "Study guide:".to_string(),
        format!("  Topic: {}", form.guide.topic),
        format!("  Depth: {}", form.guide.depth.as_str()),
        format!("  Format: {}", form.guide.format.as_str()),
    ]);
    lines
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = DaemonClient::new(cli.socket);

    let command = match cli.command {
        Commands::Start => Command::Start,
        Commands::Stop => Command::Stop,
        Commands::Toggle => Command::Toggle,
        Commands::Status => Command::Status,
        Commands::Say { words } => Command::Transcript(words.join(" ")),
        Commands::Form => Command::Form,
        Commands::Chat { persona, words } => Command::Chat {
            persona: persona.into(),
            message: words.join(" "),
        },
        Commands::Reply { persona, words } => Command::ChatReply {
            persona: persona.into(),
            reply: words.join(" "),
        },
        Commands::ResetChat { persona } => Command::ResetChat(persona.into()),
    };

    let lines = match client.send_command(command).await {
        Ok(Response::Ok) => vec!["Success".to_string()],
        Ok(Response::Notified(notifications)) => {
            notifications.iter().map(notification_line).collect()
        }
        Ok(Response::Status(info)) => status_lines(&info),
        Ok(Response::Interpreted(outcome)) => outcome_lines(&outcome),
        Ok(Response::Form(form)) => form_lines(&form),
        Ok(Response::Error(msg)) => {
            eprintln!("Error: {}", msg);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to connect to quizvoxd: {}", e);
            std::process::exit(1);
        }
    };

    for line in lines {
        println!("{}", line);
    }

    Ok(())
}
