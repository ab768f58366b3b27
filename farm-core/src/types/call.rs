//! Communication call log types
//!
//! One append-only row per interaction, whatever the channel. Status
//! moves forward only: initiated -> in_progress -> completed | failed,
//! with initiated -> failed allowed for calls that never connect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{CallId, FarmerId};

/// Interaction channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallChannel {
    /// Traditional telephony menu interaction
    Ivr,
    Sms,
    WhatsApp,
    /// Conversational voice agent
    VoiceAi,
}

impl CallChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ivr => "ivr",
            Self::Sms => "sms",
            Self::WhatsApp => "whatsapp",
            Self::VoiceAi => "voice_ai",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ivr" => Some(Self::Ivr),
            "sms" => Some(Self::Sms),
            "whatsapp" => Some(Self::WhatsApp),
            "voice_ai" => Some(Self::VoiceAi),
            _ => None,
        }
    }
}

/// Call direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallDirection {
    Inbound,
    Outbound,
}

impl CallDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }
}

/// Call status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Initiated,
    InProgress,
    Completed,
    Failed,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initiated => "initiated",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "initiated" => Some(Self::Initiated),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Forward-only transition check
    pub fn can_transition_to(&self, next: CallStatus) -> bool {
        matches!(
            (self, next),
            (Self::Initiated, Self::InProgress)
                | (Self::Initiated, Self::Failed)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Failed)
        )
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// One logged interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub call_id: CallId,
    pub farmer_id: FarmerId,
    pub channel: CallChannel,
    pub direction: CallDirection,
    pub status: CallStatus,
    /// Vendor-side message or call identifier
    pub vendor_ref: Option<String>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub duration_secs: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            CallStatus::Initiated,
            CallStatus::InProgress,
            CallStatus::Completed,
            CallStatus::Failed,
        ] {
            assert_eq!(CallStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CallStatus::parse("ringing"), None);
    }

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(CallStatus::Initiated.can_transition_to(CallStatus::InProgress));
        assert!(CallStatus::Initiated.can_transition_to(CallStatus::Failed));
        assert!(CallStatus::InProgress.can_transition_to(CallStatus::Completed));
        assert!(CallStatus::InProgress.can_transition_to(CallStatus::Failed));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!CallStatus::Completed.can_transition_to(CallStatus::InProgress));
        assert!(!CallStatus::Failed.can_transition_to(CallStatus::Initiated));
        assert!(!CallStatus::InProgress.can_transition_to(CallStatus::Initiated));
        assert!(!CallStatus::Initiated.can_transition_to(CallStatus::Completed));
    }

    #[test]
    fn test_terminal_states() {
        assert!(CallStatus::Completed.is_terminal());
        assert!(CallStatus::Failed.is_terminal());
        assert!(!CallStatus::Initiated.is_terminal());
    }
}
