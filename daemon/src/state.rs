use crate::app::{AppState, GenerationDispatcher};
use crate::command::CommandInterpreter;
use crate::config::Config;
use crate::listener::{ExternalCapture, VoiceListener};
use crate::sessions::SessionRegistry;
use crate::voice_commands;
use shared::ipc::{CaptureEvent, FormSnapshot, InterpretOutcome, RecognitionResult, StatusInfo};
use shared::model::{Notification, Persona};
use tracing::info;

pub struct DaemonState {
    pub config: Config,
    pub app: AppState,
    interpreter: CommandInterpreter<AppState>,
    listener: VoiceListener<ExternalCapture>,
    sessions: SessionRegistry,
    dispatcher: GenerationDispatcher,
}

impl DaemonState {
    pub fn new(config: Config, dispatcher: GenerationDispatcher) -> anyhow::Result<Self> {
        let interpreter = voice_commands::build_interpreter()?;
        let listener = VoiceListener::new(
            ExternalCapture::new(config.voice.enabled),
            config.voice.continuous,
        );

        Ok(Self {
            app: AppState::from_config(&config, dispatcher.clone()),
            config,
            interpreter,
            listener,
            sessions: SessionRegistry::new(),
            dispatcher,
        })
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_listening()
    }

    pub fn activate(&mut self) -> Vec<Notification> {
        if !self.listener.is_listening() {
            match self.listener.start() {
                Ok(()) => {
                    self.app.notifications.success("Voice control activated!");
                    info!("Voice control activated");
                }
                Err(e) => {
                    self.app
                        .notifications
                        .error(format!("Could not start voice control: {}", e));
                }
            }
        }
        self.app.notifications.drain()
    }

    pub fn deactivate(&mut self) -> Vec<Notification> {
        if self.listener.is_listening() {
            self.listener.stop();
            self.app.notifications.info("Voice control deactivated.");
            info!("Voice control deactivated");
        }
        self.app.notifications.drain()
    }

    pub fn toggle(&mut self) -> Vec<Notification> {
        if self.listener.is_listening() {
            self.deactivate()
        } else {
            self.activate()
        }
    }

    pub fn get_status(&self) -> StatusInfo {
        StatusInfo {
            is_running: true,
            is_listening: self.listener.is_listening(),
            continuous: self.listener.continuous(),
            interim_results: self.config.voice.interim_results,
            language: self.config.voice.language.clone(),
            current_page: self.app.current_page,
        }
    }

    /// Feed one capture engine event through the listener and, for a
    /// finalized transcript, the interpreter.
    pub fn handle_capture_event(&mut self, event: &CaptureEvent) -> InterpretOutcome {
        let was_listening = self.listener.is_listening();
        let matched = match self.listener.handle_event(event) {
            Some(transcript) => self.interpreter.interpret(&mut self.app, &transcript),
            None => false,
        };

        if let CaptureEvent::Error(kind) = event {
            if was_listening && !self.listener.is_listening() {
                self.app
                    .notifications
                    .error(format!("Speech recognition error: {}", kind.as_str()));
            }
        }

        InterpretOutcome {
            matched,
            notifications: self.app.notifications.drain(),
        }
    }

    /// Interpret a transcript delivered as one final recognition result.
    pub fn handle_transcript(&mut self, transcript: &str) -> anyhow::Result<InterpretOutcome> {
        if !self.listener.is_listening() {
            anyhow::bail!("Voice control is not active");
        }

        let event = CaptureEvent::Results {
            result_index: 0,
            results: vec![RecognitionResult {
                transcript: transcript.to_string(),
                is_final: true,
            }],
        };
        Ok(self.handle_capture_event(&event))
    }

    pub fn chat(&mut self, persona: Persona, message: &str) -> anyhow::Result<()> {
        let message = message.trim();
        if message.is_empty() {
            anyhow::bail!("Message is empty");
        }

        let request = self.sessions.send(persona, message);
        if !self.dispatcher.dispatch(request) {
            anyhow::bail!("Chat is unavailable right now");
        }
        Ok(())
    }

    pub fn chat_reply(&mut self, persona: Persona, reply: &str) -> anyhow::Result<()> {
        if reply.trim().is_empty() {
            anyhow::bail!("Reply is empty");
        }
        if !self.sessions.record_reply(persona, reply) {
            anyhow::bail!("No {} chat session to reply to", persona.as_str());
        }
        Ok(())
    }

    pub fn reset_chat(&mut self, persona: Persona) -> anyhow::Result<()> {
        if !self.sessions.reset(persona) {
            anyhow::bail!("No {} chat session to reset", persona.as_str());
        }
        info!("Reset {} chat session", persona.as_str());
        Ok(())
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn form(&self) -> FormSnapshot {
        self.app.snapshot()
    }
}
