//! The dialog engine: one finite-state flow per session.
//!
//! Consumes inbound activities from the channel adapter, walks the
//! session through welcome → details form → contact number → document
//! upload, and on a recognized document exports the collected record.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{error, info};

use ekyc_channels::cards::{details_form_card, welcome_card};
use ekyc_channels::{image_url_from_text, Activity, ActivitySink};
use ekyc_extraction::classify;
use ekyc_vision::TokenSource;

use crate::localize::OptionMatcher;
use crate::session::{DialogStep, SessionKey, SessionState, SessionStore};

pub const MAIN_OPTION_FILL_FORM: &str = "Fill Form";
pub const MAIN_OPTION_EXIT: &str = "Exit";

const PROMPT_PHONE: &str = "Please provide your contact number";
const PROMPT_PHONE_AGAIN: &str = "Enter/Say a correct number";
const PROMPT_EKYC_START: &str = "Starting the EKYC process...";
const PROMPT_UPLOAD: &str = "Please upload a valid pan/aadhar card";
const PROMPT_NOT_AN_IMAGE: &str =
    "Did you upload an image? I'm more of a visual person. Try sending me an image or an image URL";
const REPLY_SAVED: &str = "Details saved.Thanks for the time!";
const REPLY_BYE: &str = "Bye!";
const CLIENT_ERROR_MESSAGE: &str = "Oops! Something went wrong. Try again later.";

static EXIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Exit$").unwrap());
static RESTART_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^restart$").unwrap());
static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Concatenation of every digit run in a free-text reply.
fn digits_of(text: &str) -> String {
    DIGIT_RUN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Contact numbers are accepted at 10 or 11 digits, ignoring
/// separators the user typed.
fn is_valid_contact_number(text: &str) -> bool {
    let digits = digits_of(text);
    digits.len() == 10 || digits.len() == 11
}

pub struct DialogEngine {
    sink: Arc<dyn ActivitySink>,
    ocr: Arc<dyn TokenSource>,
    sessions: SessionStore,
    options: OptionMatcher,
    export_path: PathBuf,
}

impl DialogEngine {
    pub fn new(
        sink: Arc<dyn ActivitySink>,
        ocr: Arc<dyn TokenSource>,
        export_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sink,
            ocr,
            sessions: SessionStore::new(),
            options: OptionMatcher::new(),
            export_path: export_path.into(),
        }
    }

    /// Consume inbound activities until the channel closes.
    ///
    /// Activities are processed one at a time, which also serializes
    /// turns within any single session.
    pub async fn run(self, mut rx: mpsc::Receiver<Activity>) {
        while let Some(activity) = rx.recv().await {
            if let Err(err) = self.handle_activity(&activity).await {
                error!(error = %err, "dialog turn failed");
            }
        }
        info!("inbound channel closed; dialog engine stopping");
    }

    pub async fn handle_activity(&self, activity: &Activity) -> Result<()> {
        if activity.is_conversation_update() {
            return self.handle_conversation_update(activity).await;
        }
        if activity.is_message() {
            return self.handle_message(activity).await;
        }
        Ok(())
    }

    /// Greet when the bot itself is added to the conversation.
    async fn handle_conversation_update(&self, activity: &Activity) -> Result<()> {
        let bot_id = activity.recipient.as_ref().and_then(|r| r.id.as_deref());
        let bot_added = bot_id.is_some()
            && activity
                .members_added
                .iter()
                .any(|m| m.id.as_deref() == bot_id);
        if bot_added {
            self.send_welcome(activity).await?;
        }
        Ok(())
    }

    async fn handle_message(&self, activity: &Activity) -> Result<()> {
        let key = SessionKey::from_activity(activity);
        let mut session = self.sessions.load(&key).await;
        let text = activity.text.as_deref().unwrap_or("").trim();

        // Global triggers run before state dispatch, like the card
        // buttons they back.
        if EXIT_RE.is_match(text) {
            self.sink.send_text(activity, REPLY_BYE).await?;
            self.sessions.remove(&key).await;
            return Ok(());
        }
        if RESTART_RE.is_match(text) {
            session.step = DialogStep::DetailsForm;
            self.sink.send_card(activity, details_form_card()).await?;
            self.sessions.save(key, session).await;
            return Ok(());
        }

        match session.step {
            DialogStep::Welcome => self.step_welcome(activity, &mut session, text).await?,
            DialogStep::DetailsForm => self.step_details(activity, &mut session).await?,
            DialogStep::PhonePrompt => self.step_phone(activity, &mut session, text).await?,
            DialogStep::AwaitDocument => self.step_document(activity, &mut session, text).await?,
            DialogStep::Done => {
                // Flow finished; a new message starts over.
                session = SessionState::new();
                self.send_welcome(activity).await?;
            }
        }

        self.sessions.save(key, session).await;
        Ok(())
    }

    async fn send_welcome(&self, activity: &Activity) -> Result<()> {
        self.sink
            .send_card(activity, welcome_card(MAIN_OPTION_FILL_FORM, MAIN_OPTION_EXIT))
            .await?;
        Ok(())
    }

    async fn step_welcome(
        &self,
        activity: &Activity,
        session: &mut SessionState,
        text: &str,
    ) -> Result<()> {
        let locale = activity.locale.as_deref().unwrap_or("en-US");
        if self.options.matches(locale, &[MAIN_OPTION_FILL_FORM], text) {
            session.step = DialogStep::DetailsForm;
            self.sink.send_card(activity, details_form_card()).await?;
        } else {
            self.send_welcome(activity).await?;
        }
        Ok(())
    }

    async fn step_details(&self, activity: &Activity, session: &mut SessionState) -> Result<()> {
        let Some(submitted) = activity.value.as_ref().and_then(Value::as_object) else {
            // No submit payload yet; show the form (again).
            self.sink.send_card(activity, details_form_card()).await?;
            return Ok(());
        };

        for (name, value) in submitted {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            session.details.set(name.clone(), value);
        }
        info!(fields = session.details.len(), "details form submitted");

        session.step = DialogStep::PhonePrompt;
        self.sink.send_text(activity, PROMPT_PHONE).await?;
        Ok(())
    }

    async fn step_phone(
        &self,
        activity: &Activity,
        session: &mut SessionState,
        text: &str,
    ) -> Result<()> {
        if !is_valid_contact_number(text) {
            session.phone_reprompt = true;
            self.sink.send_text(activity, PROMPT_PHONE_AGAIN).await?;
            return Ok(());
        }

        // The raw reply is stored, not the normalized digits.
        session.details.set("Contact No", text);
        session.phone_reprompt = false;
        session.step = DialogStep::AwaitDocument;
        self.sink.send_text(activity, PROMPT_EKYC_START).await?;
        self.sink.send_text(activity, PROMPT_UPLOAD).await?;
        Ok(())
    }

    async fn step_document(
        &self,
        activity: &Activity,
        session: &mut SessionState,
        text: &str,
    ) -> Result<()> {
        let outcome = if let Some(attachment) = activity.first_image_attachment() {
            match self.sink.fetch_attachment(activity, attachment).await {
                Ok((bytes, content_type)) => {
                    self.ocr.recognize_bytes(bytes, &content_type).await
                }
                Err(err) => Err(err),
            }
        } else if let Some(url) = image_url_from_text(text) {
            self.ocr.recognize_url(&url).await
        } else {
            self.sink.send_text(activity, PROMPT_NOT_AN_IMAGE).await?;
            return Ok(());
        };

        let tokens = match outcome {
            Ok(tokens) => tokens,
            Err(err) => {
                error!(error = %err, "vision request failed");
                let mut message = CLIENT_ERROR_MESSAGE.to_string();
                if err.is_access_denied() {
                    message.push('\n');
                    message.push_str(&err.to_string());
                }
                self.sink.send_text(activity, &message).await?;
                return Ok(());
            }
        };

        let document = classify(&tokens);
        let Some(announcement) = document.announcement() else {
            // Nothing recognized: ask for the document again.
            self.sink.send_text(activity, PROMPT_UPLOAD).await?;
            return Ok(());
        };

        self.sink.send_text(activity, &announcement).await?;
        session.details.record_document(&document);

        if let Err(err) = ekyc_export::write_record(&self.export_path, &session.details) {
            error!(error = %err, "failed to export field record");
            self.sink.send_text(activity, CLIENT_ERROR_MESSAGE).await?;
            return Ok(());
        }

        self.sink.send_text(activity, REPLY_SAVED).await?;
        session.step = DialogStep::Done;
        Ok(())
    }
}
