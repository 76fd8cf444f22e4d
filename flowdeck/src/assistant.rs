//! Assistant collaborator boundary
//!
//! The chat/speech assistant is an external collaborator; only its
//! request/response contract lives here. It receives a read-only view
//! of the systems list and has no write path back into the sync
//! controller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::System;
use thiserror::Error;

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Grounding source attached to an assistant reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub uri: String,
}

/// One message in the conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Base64-encoded audio, when speech synthesis produced any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_data: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
}

/// Assistant reply payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant request failed: {0}")]
    Request(String),
}

/// Contract for the generative assistant backing the chat panel.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Produce a reply to `prompt` given the conversation history and
    /// the current systems snapshot. `deep_mode` requests a slower,
    /// search-grounded answer.
    async fn respond(
        &self,
        prompt: &str,
        history: &[ChatMessage],
        systems: &[System],
        deep_mode: bool,
    ) -> Result<AssistantReply, AssistantError>;

    /// Synthesize speech for `text`. Returns base64-encoded audio, or
    /// an empty string when synthesis is unavailable.
    async fn synthesize_speech(&self, text: &str) -> Result<String, AssistantError>;
}

/// Decode a base64 audio payload for playback.
pub fn decode_audio(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    use base64::Engine as _;
    base64::engine::general_purpose::STANDARD.decode(encoded)
}
