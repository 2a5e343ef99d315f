//! Notes handler: answers card commands and submissions, and streams LLM summaries into the chat.
//!
//! Summaries go through [`StreamingResponseAggregator`] with a [`ChatSink`], so the reply is one
//! Telegram message created on the first text and edited in batches until the model finishes.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use llm_client::{GenerationRequest, GenerationSource, DEFAULT_MAX_OUTPUT_TOKENS};
use notes_core::{Bot, Handler, HandlerResponse, Message, Result};
use stream_edit::{
    AggregateError, AggregationOutcome, CancellationToken, StreamingResponseAggregator,
};
use tracing::{debug, error, info, instrument, warn};

use crate::actions::{
    Action, Submission, VERB_AI_CARD, VERB_AI_SUMMARIZE_PREP, VERB_CONFIRM, VERB_SAVE,
};
use crate::cards::CardTemplates;
use crate::responses::ResponseTables;
use crate::sink::ChatSink;
use crate::source::VisibleTextSource;
use crate::state::ConversationStore;
use crate::variant::BotVariant;

pub const MSG_SEND_FAILED: &str = "Sorry, something went wrong while sending the reply.";
pub const MSG_REQUEST_FAILED: &str =
    "Sorry, something went wrong processing your request. Please try again later.";
pub const MSG_STREAM_FAILED: &str = "Sorry, LLM response failed.";
pub const MSG_EMPTY_SUMMARY: &str = "Sorry, I couldn't come up with a summary for those notes.";
pub const MSG_TIMED_OUT: &str = "Sorry, the summary took too long and was stopped.";
pub const MSG_UNSUPPORTED_VERB: &str = "I do not understand that command.";
pub const MSG_SAVED: &str = "Okay, I've saved your notes.";
pub const MSG_CONFIRMED: &str = "Okay, I've updated the on call notes.";

/// Which notes a submission refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotesKind {
    OnCall,
    Prep,
}

pub struct NotesHandler {
    bot: Arc<dyn Bot>,
    source: Arc<dyn GenerationSource>,
    aggregator: StreamingResponseAggregator,
    store: ConversationStore,
    responses: Arc<ResponseTables>,
    cards: CardTemplates,
    variant: BotVariant,
    system_prompt: Option<String>,
    max_output_tokens: u32,
    stream_timeout: Option<Duration>,
}

impl NotesHandler {
    /// Fails only when the variant's card templates cannot be parsed.
    pub fn new(
        bot: Arc<dyn Bot>,
        source: Arc<dyn GenerationSource>,
        variant: BotVariant,
        responses: Arc<ResponseTables>,
    ) -> AnyResult<Self> {
        let cards = CardTemplates::for_variant(variant)?;
        Ok(Self {
            bot,
            source,
            aggregator: StreamingResponseAggregator::default(),
            store: ConversationStore::new(),
            responses,
            cards,
            variant,
            system_prompt: None,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            stream_timeout: None,
        })
    }

    pub fn with_aggregator(mut self, aggregator: StreamingResponseAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_store(mut self, store: ConversationStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.system_prompt = system_prompt;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Cancels a summary that runs longer than `timeout`. `None` never cancels.
    pub fn with_stream_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stream_timeout = timeout;
        self
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn variant(&self) -> BotVariant {
        self.variant
    }

    /// Logs error and its cause chain. First item with `first_msg`, rest with "Caused by".
    fn log_error_chain(e: &(dyn std::error::Error + 'static), first_msg: &str) {
        error!(cause = %e, "{}", first_msg);
        let mut source = e.source();
        while let Some(cause) = source {
            error!(cause = %cause, "Caused by");
            source = cause.source();
        }
    }

    async fn reply(&self, message: &Message, text: impl Into<String>) -> Result<HandlerResponse> {
        let text = text.into();
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    /// Sends a fallback message; a failure here is only logged.
    async fn send_fallback_and_stop(&self, message: &Message, text: &str) -> Result<HandlerResponse> {
        if let Err(e) = self.bot.send_message(&message.chat, text).await {
            error!(error = %e, chat_id = message.chat.id, "Failed to send fallback message");
        }
        Ok(HandlerResponse::Stop)
    }

    fn help_text(&self) -> String {
        let mut lines = vec![
            "/callnotes - show the on call notes card".to_string(),
            "/summarize <notes> - summarize on call notes".to_string(),
        ];
        if self.variant.has_prep_notes() {
            lines.push("/confirm <notes> - replace the on call notes".to_string());
            lines.push("/prepnotes - show the prep notes card".to_string());
            lines.push("/save <notes> - save prep notes".to_string());
            lines.push("/summarizeprep <notes> - summarize prep notes".to_string());
        }
        format!("I can help with your call notes.\n\n{}", lines.join("\n"))
    }

    /// Submitted input, else what the chat has stored, else the initial value.
    fn resolve_notes(&self, chat_id: i64, kind: NotesKind, input: Option<&str>) -> String {
        if let Some(input) = input {
            return input.to_string();
        }
        let state = self.store.get(chat_id);
        match kind {
            NotesKind::OnCall => state
                .on_call_notes
                .unwrap_or_else(|| self.responses.initial_call_notes()),
            NotesKind::Prep => state
                .prep_notes
                .unwrap_or_else(|| self.responses.initial_prep_notes()),
        }
    }

    fn remember(&self, chat_id: i64, kind: NotesKind, notes: &str) {
        if !self.variant.remembers_notes() {
            return;
        }
        match kind {
            NotesKind::OnCall => self.store.set_on_call_notes(chat_id, notes),
            NotesKind::Prep => self.store.set_prep_notes(chat_id, notes),
        }
    }

    async fn send_notes_card(&self, message: &Message, kind: NotesKind) -> Result<HandlerResponse> {
        let notes = self.resolve_notes(message.chat.id, kind, None);
        let card = match kind {
            NotesKind::OnCall => self.cards.call_notes_card(&notes)?,
            NotesKind::Prep => self.cards.prep_notes_card(&notes)?,
        };
        self.bot.send_card(&message.chat, &card).await?;
        info!(chat_id = message.chat.id, kind = ?kind, "Sent notes card");
        Ok(HandlerResponse::Reply(card.text()))
    }

    async fn handle_submission(
        &self,
        message: &Message,
        submission: &Submission,
    ) -> Result<HandlerResponse> {
        if !self.variant.supports_verb(&submission.verb) {
            info!(chat_id = message.chat.id, verb = %submission.verb, "Unsupported card verb");
            return self.reply(message, MSG_UNSUPPORTED_VERB).await;
        }

        let chat_id = message.chat.id;
        let input = submission.input.as_deref();
        match submission.verb.as_str() {
            VERB_CONFIRM => {
                let notes = self.resolve_notes(chat_id, NotesKind::OnCall, input);
                self.remember(chat_id, NotesKind::OnCall, &notes);
                self.reply(message, MSG_CONFIRMED).await
            }
            VERB_SAVE => {
                let notes = self.resolve_notes(chat_id, NotesKind::Prep, input);
                self.remember(chat_id, NotesKind::Prep, &notes);
                self.reply(message, MSG_SAVED).await
            }
            VERB_AI_CARD => {
                let notes = self.resolve_notes(chat_id, NotesKind::OnCall, input);
                self.remember(chat_id, NotesKind::OnCall, &notes);
                self.stream_summary(message, &notes).await
            }
            VERB_AI_SUMMARIZE_PREP => {
                let notes = self.resolve_notes(chat_id, NotesKind::Prep, input);
                self.remember(chat_id, NotesKind::Prep, &notes);
                self.stream_summary(message, &notes).await
            }
            _ => self.reply(message, MSG_UNSUPPORTED_VERB).await,
        }
    }

    /// Streams a summary of `notes` as one message edited in batches.
    async fn stream_summary(&self, message: &Message, notes: &str) -> Result<HandlerResponse> {
        let messages = prompt::build_messages(
            self.variant.prompt_style(),
            self.system_prompt.as_deref(),
            notes,
        );
        let request =
            GenerationRequest::new(messages).with_max_output_tokens(self.max_output_tokens);
        info!(
            chat_id = message.chat.id,
            notes_len = notes.len(),
            max_output_tokens = self.max_output_tokens,
            "Submitting to LLM (streaming)"
        );

        let source = VisibleTextSource::new(self.source.clone());
        let sink = ChatSink::new(self.bot.clone(), message.chat.clone());
        let cancel = CancellationToken::new();
        let timer = self.stream_timeout.map(|timeout| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                cancel.cancel();
            })
        });

        let result = self
            .aggregator
            .run_request(&source, request, &sink, &cancel)
            .await;
        if let Some(timer) = timer {
            timer.abort();
        }

        match result {
            Ok(AggregationOutcome::Completed { text, updates, .. }) => {
                debug!(chat_id = message.chat.id, updates = updates, "Summary streamed");
                Ok(HandlerResponse::Reply(text))
            }
            Ok(AggregationOutcome::Empty) => {
                info!(chat_id = message.chat.id, "LLM returned no content");
                self.reply(message, MSG_EMPTY_SUMMARY).await
            }
            Ok(AggregationOutcome::Cancelled { message_id, text }) => {
                warn!(chat_id = message.chat.id, partial_len = text.len(), "Summary timed out");
                self.finish_with_note(
                    message,
                    message_id.as_deref(),
                    &text,
                    MSG_TIMED_OUT,
                    MSG_TIMED_OUT,
                )
                .await
            }
            Err(e) => {
                Self::log_error_chain(&e, "LLM stream response failed");
                match &e {
                    AggregateError::GenerationStream { .. } => {
                        self.finish_with_note(
                            message,
                            e.message_id(),
                            e.partial_text(),
                            MSG_STREAM_FAILED,
                            MSG_REQUEST_FAILED,
                        )
                        .await
                    }
                    AggregateError::SinkWrite { .. } => {
                        self.send_fallback_and_stop(message, MSG_SEND_FAILED).await
                    }
                }
            }
        }
    }

    /// With a created message, rewrites it as the partial text plus `note`; otherwise sends
    /// `fallback` as a new message.
    async fn finish_with_note(
        &self,
        message: &Message,
        message_id: Option<&str>,
        partial_text: &str,
        note: &str,
        fallback: &str,
    ) -> Result<HandlerResponse> {
        let Some(message_id) = message_id else {
            return self.send_fallback_and_stop(message, fallback).await;
        };
        let text = if partial_text.is_empty() {
            note.to_string()
        } else {
            format!("{}\n\n{}", partial_text, note)
        };
        if let Err(e) = self.bot.edit_message(&message.chat, message_id, &text).await {
            warn!(error = %e, chat_id = message.chat.id, message_id = %message_id, "Failed to flush partial reply");
        }
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for NotesHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(action) = Action::parse(message) else {
            debug!("Nothing to act on");
            return Ok(HandlerResponse::Continue);
        };
        info!(action = ?action, variant = ?self.variant, "step: NotesHandler handle");

        match action {
            Action::Help => self.reply(message, self.help_text()).await,
            Action::GetCallNotes => self.send_notes_card(message, NotesKind::OnCall).await,
            Action::GetPrepNotes if self.variant.has_prep_notes() => {
                self.send_notes_card(message, NotesKind::Prep).await
            }
            Action::GetPrepNotes => {
                let text = self.responses.unknown_action("prepnotes");
                self.reply(message, text).await
            }
            Action::Submit(submission) => self.handle_submission(message, &submission).await,
            Action::Unknown(command) => {
                let text = self.responses.unknown_action(&command);
                self.reply(message, text).await
            }
            Action::Chat(_) => {
                let text = self.responses.off_topic();
                self.reply(message, text).await
            }
        }
    }
}
