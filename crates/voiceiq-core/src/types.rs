//! Core data types for the `VoiceIQ` web tier
//!
//! Everything here is a transported representation: the entities are owned
//! and mutated by the backend, this tier only decodes, displays, and relays
//! them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated user as reported by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Login email
    pub email: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Processing status of an uploaded call
///
/// The vocabulary is fixed and advanced only by the backend; the client
/// merely polls while a call is in one of the in-progress states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Recording received, nothing derived yet
    Uploaded,
    /// Speech-to-text in progress
    Transcribing,
    /// Transcript ready, scoring not started
    Transcribed,
    /// Scoring and summarization in progress
    Processing,
    /// All analysis artifacts ready
    Completed,
    /// Backend processing failed
    Failed,
}

impl CallStatus {
    /// Whether the backend is still working on this call
    ///
    /// This is the polling predicate: detail pages keep refreshing while it
    /// holds and stop once the status leaves the in-progress set.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::Transcribing | Self::Processing)
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uploaded => write!(f, "uploaded"),
            Self::Transcribing => write!(f, "transcribing"),
            Self::Transcribed => write!(f, "transcribed"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// One uploaded recording and its derived analysis artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    /// Unique call identifier
    pub id: Uuid,

    /// Stored filename
    #[serde(default)]
    pub filename: Option<String>,

    /// Filename as uploaded by the user
    #[serde(default)]
    pub original_filename: Option<String>,

    /// Size of the uploaded file in bytes
    #[serde(default)]
    pub file_size: Option<i64>,

    /// Current processing status
    pub status: CallStatus,

    /// Transcript text, present once transcription finished
    #[serde(default)]
    pub transcript: Option<String>,

    /// Summary payload; either a JSON object or a JSON-encoded string
    #[serde(default)]
    pub summary: Option<serde_json::Value>,

    /// When the call was created on the backend
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Number of rubric scores produced for this call
    #[serde(default)]
    pub score_count: Option<i64>,
}

impl Call {
    /// Name shown for this call: the uploaded filename when known
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.original_filename
            .as_deref()
            .or(self.filename.as_deref())
            .unwrap_or("Untitled")
    }

    /// Decode the opaque summary payload into its structured form
    ///
    /// The backend stores the summary either as a JSON object or as a
    /// JSON-encoded string; both decode here. Absent or undecodable
    /// summaries yield `None`.
    #[must_use]
    pub fn summary_outline(&self) -> Option<SummaryOutline> {
        match self.summary.as_ref()? {
            serde_json::Value::String(raw) => serde_json::from_str(raw).ok(),
            value @ serde_json::Value::Object(_) => {
                serde_json::from_value(value.clone()).ok()
            }
            _ => None,
        }
    }

    /// Whether a decodable summary is present
    #[must_use]
    pub fn has_summary(&self) -> bool {
        self.summary_outline().is_some()
    }
}

/// Structured synopsis of a call
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryOutline {
    /// Meeting agenda, when identified
    pub agenda: Option<String>,

    /// Main topics discussed
    pub key_topics: Vec<String>,

    /// Action items agreed on the call
    pub action_items: Vec<String>,

    /// Planned next steps
    pub next_steps: Vec<String>,
}

/// One rubric question's evaluated outcome for a call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    /// Unique score identifier
    pub id: Uuid,

    /// Call this score belongs to
    #[serde(default)]
    pub call_id: Option<Uuid>,

    /// The rubric question that was evaluated
    pub question_text: String,

    /// Rubric category
    #[serde(default)]
    pub category: Option<String>,

    /// Free-text outcome, commonly yes/no
    #[serde(default)]
    pub score_value: Option<String>,

    /// Rationale for the outcome
    #[serde(default)]
    pub reason: Option<String>,
}

/// Classified outcome of a score value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreVerdict {
    /// Affirmative outcome
    Yes,
    /// Negative outcome
    No,
    /// Anything else (scales, free text, missing)
    Other,
}

impl Score {
    /// Classify the free-text score value
    #[must_use]
    pub fn verdict(&self) -> ScoreVerdict {
        match self.score_value.as_deref() {
            Some(v) if v.eq_ignore_ascii_case("yes") => ScoreVerdict::Yes,
            Some(v) if v.eq_ignore_ascii_case("no") => ScoreVerdict::No,
            _ => ScoreVerdict::Other,
        }
    }
}

/// Which detail tab a call page opens on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DetailTab {
    /// Structured summary tab
    Summary,
    /// Rubric scores tab
    Scores,
}

impl DetailTab {
    /// Pick the default tab for a call detail view
    ///
    /// Summary is preferred whenever one is present; a call with scores but
    /// no summary opens on the scores tab.
    #[must_use]
    pub const fn pick(has_summary: bool, score_count: usize) -> Self {
        if has_summary {
            Self::Summary
        } else if score_count > 0 {
            Self::Scores
        } else {
            Self::Summary
        }
    }
}

/// Response to signup and login requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user
    pub user: User,

    /// Bearer token to attach to subsequent requests
    pub token: String,
}

/// Response wrapping the current user lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    /// The authenticated user
    pub user: User,
}

/// Response to the call listing request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallListResponse {
    /// All calls visible to the user
    #[serde(default)]
    pub calls: Vec<Call>,
}

/// Response to the single-call request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallDetailResponse {
    /// The requested call
    pub call: Call,

    /// Scores produced for the call so far
    #[serde(default)]
    pub scores: Vec<Score>,
}

/// Response to an upload request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Whether the backend accepted the upload
    #[serde(default)]
    pub success: bool,

    /// Identifier of the created call
    #[serde(default, rename = "callId")]
    pub call_id: Option<Uuid>,
}

impl UploadResponse {
    /// Whether the response signals acceptance in either contract form
    #[must_use]
    pub const fn accepted(&self) -> bool {
        self.success || self.call_id.is_some()
    }
}

/// Generic acknowledgment from the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    /// Whether the operation succeeded
    #[serde(default)]
    pub success: bool,

    /// Optional human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body shape used by the backend on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Short error text
    #[serde(default)]
    pub error: Option<String>,

    /// Longer human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// The message to surface, preferring the longer form
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
