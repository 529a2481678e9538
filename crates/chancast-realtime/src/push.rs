//! Push kinds, recipient audiences, and the wire envelope.

use serde::Serialize;

use chancast_core::result::AppResult;
use chancast_core::types::message::ChannelMessage;
use chancast_core::types::privilege::{Privilege, PrivilegeSet};

/// Heartbeat payload written on connect and at every heartbeat interval.
pub const HEARTBEAT_PAYLOAD: &str = r#"{"type": "heartbeat"}"#;

/// Classification of a push event, selecting both the wire label and the
/// recipient audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushKind {
    /// A message was published live.
    NewMessage,
    /// A message was edited.
    EditMessage,
    /// A message was deleted.
    DeleteMessage,
    /// Reactions on a message changed.
    Reaction,
    /// A scheduled message was created (preview for authors).
    MessageBeforeScheduling,
    /// A scheduled message was promoted into the live stream.
    MessageAfterScheduling,
}

impl PushKind {
    /// Stable wire label for the envelope `type` field.
    ///
    /// Both scheduling kinds map to `"new-message"`: subscribers cannot
    /// distinguish a live post from a promoted scheduled post.
    pub fn wire_label(&self) -> &'static str {
        match self {
            Self::NewMessage | Self::MessageBeforeScheduling | Self::MessageAfterScheduling => {
                "new-message"
            }
            Self::EditMessage => "edit-message",
            Self::DeleteMessage => "delete-message",
            Self::Reaction => "reaction",
        }
    }

    /// The recipient audience for this kind.
    pub fn audience(&self) -> Audience {
        match self {
            Self::NewMessage | Self::EditMessage | Self::DeleteMessage | Self::Reaction => {
                Audience::Everyone
            }
            Self::MessageBeforeScheduling => Audience::Writers,
            Self::MessageAfterScheduling => Audience::NonWriters,
        }
    }
}

/// Recipient filter applied per listener during fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// All active listeners.
    Everyone,
    /// Listeners whose privilege snapshot includes Writer.
    Writers,
    /// Listeners whose privilege snapshot does not include Writer.
    NonWriters,
}

impl Audience {
    /// Whether a listener with the given privilege snapshot is included.
    pub fn includes(&self, privileges: PrivilegeSet) -> bool {
        match self {
            Self::Everyone => true,
            Self::Writers => privileges.contains(Privilege::Writer),
            Self::NonWriters => !privileges.contains(Privilege::Writer),
        }
    }
}

/// The wire envelope written to every recipient of one fan-out pass.
#[derive(Debug, Serialize)]
pub struct PushEnvelope<'a> {
    /// Wire label of the push kind.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The message payload.
    pub message: &'a ChannelMessage,
}

impl<'a> PushEnvelope<'a> {
    /// Build the envelope for one fan-out pass.
    pub fn new(kind: PushKind, message: &'a ChannelMessage) -> Self {
        Self {
            kind: kind.wire_label(),
            message,
        }
    }

    /// Serialize the envelope once for all recipients.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
