use shared::model::{ChatMessage, GuideFormData, Persona, QuizFormData};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Work handed to the external generative-AI client.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Quiz(QuizFormData),
    StudyGuide(GuideFormData),
    Chat {
        persona: Persona,
        system_instruction: String,
        history: Vec<ChatMessage>,
    },
}

impl GenerationRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationRequest::Quiz(_) => "quiz",
            GenerationRequest::StudyGuide(_) => "study-guide",
            GenerationRequest::Chat { .. } => "chat",
        }
    }
}

/// Fire-and-forget sender for generation requests.
#[derive(Debug, Clone)]
pub struct GenerationDispatcher {
    tx: Option<mpsc::UnboundedSender<GenerationRequest>>,
}

impl GenerationDispatcher {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GenerationRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A dispatcher with nobody listening; every request is dropped.
    pub fn disconnected() -> Self {
        Self { tx: None }
    }

    /// Queue a request without waiting for it. Returns `false` when there is no
    /// receiver left to take it.
    pub fn dispatch(&self, request: GenerationRequest) -> bool {
        let kind = request.kind();
        match &self.tx {
            Some(tx) => match tx.send(request) {
                Ok(()) => {
                    info!("Dispatched {} generation request", kind);
                    true
                }
                Err(_) => {
                    warn!("Generation receiver closed, dropping {} request", kind);
                    false
                }
            },
            None => {
                warn!("No generation backend connected, dropping {} request", kind);
                false
            }
        }
    }
}

/// Drain requests until every dispatcher is dropped.
///
/// The AI client lives outside this process; requests are logged here so an
/// operator can see what would be sent.
pub async fn forward_requests(mut rx: mpsc::UnboundedReceiver<GenerationRequest>) {
    info!("Generation forwarding task started");
    while let Some(request) = rx.recv().await {
        match &request {
            GenerationRequest::Quiz(form) => info!(
                "Quiz request: topic='{}', difficulty={}, questions={}, types={:?}",
                form.topic, form.difficulty, form.num_questions, form.question_types
            ),
            GenerationRequest::StudyGuide(form) => info!(
                "Study guide request: topic='{}', depth={}, format={}",
                form.topic,
                form.depth.as_str(),
                form.format.as_str()
            ),
            GenerationRequest::Chat {
                persona, history, ..
            } => info!(
                "Chat request for {}: {} message(s) in history",
                persona.as_str(),
                history.len()
            ),
        }
    }
    info!("Generation channel closed, forwarding task stopped");
}
