use crate::shared::entity::{Entity, ID};
use std::fmt::Display;

/// What a `ReminderEntry` points the user at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderTarget {
    Video(String),
    /// The playlist id may be empty, in which case links go to the playlists root
    Playlist(String),
}

impl ReminderTarget {
    /// Builds the target from the two mutually exclusive queue columns.
    /// A non-empty `video_id` always wins, everything else is a playlist reminder.
    pub fn from_columns(video_id: Option<String>, playlist_id: Option<String>) -> Self {
        match video_id {
            Some(video_id) if !video_id.is_empty() => Self::Video(video_id),
            _ => Self::Playlist(playlist_id.unwrap_or_default()),
        }
    }

    pub fn video_id(&self) -> Option<&str> {
        match self {
            Self::Video(id) => Some(id),
            Self::Playlist(_) => None,
        }
    }

    pub fn playlist_id(&self) -> Option<&str> {
        match self {
            Self::Video(_) => None,
            Self::Playlist(id) => Some(id),
        }
    }
}

/// Why a `ReminderEntry` was enqueued. Selects the message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderReason {
    /// The user asked to be reminded
    UserScheduled,
    /// Enqueued by the incomplete playlist aggregation
    IncompletePlaylist,
    Other(String),
}

impl ReminderReason {
    pub fn parse(reason: &str) -> Self {
        match reason.trim().replace('-', "_").as_str() {
            "user_scheduled" => Self::UserScheduled,
            "incomplete_playlist" => Self::IncompletePlaylist,
            _ => Self::Other(reason.to_string()),
        }
    }

    /// The tag as it is stored in the queue
    pub fn as_str(&self) -> &str {
        match self {
            Self::UserScheduled => "user_scheduled",
            Self::IncompletePlaylist => "incomplete_playlist",
            Self::Other(reason) => reason,
        }
    }
}

impl Display for ReminderReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `ReminderEntry` is a row in the notification queue representing the intent
/// to notify a user at or after `scheduled_for`.
///
/// Entries are never deleted. `sent_at` is written once, by the dispatcher,
/// after the first successful delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEntry {
    pub id: ID,
    /// The user that should receive the email
    pub user_id: ID,
    pub target: ReminderTarget,
    pub reason: ReminderReason,
    /// Timestamp in millis from which the entry is eligible for delivery
    pub scheduled_for: i64,
    /// Timestamp in millis of the first successful delivery
    pub sent_at: Option<i64>,
}

impl ReminderEntry {
    pub fn new(
        user_id: ID,
        target: ReminderTarget,
        reason: ReminderReason,
        scheduled_for: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            target,
            reason,
            scheduled_for,
            sent_at: None,
        }
    }

    pub fn is_sent(&self) -> bool {
        self.sent_at.is_some()
    }

    /// Sets `sent_at` unless it was already set. Returns whether it was changed.
    pub fn mark_sent(&mut self, sent_at: i64) -> bool {
        if self.is_sent() {
            return false;
        }
        self.sent_at = Some(sent_at);
        true
    }
}

impl Entity for ReminderEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A due `ReminderEntry` together with the resolved email address of its owner
#[derive(Debug, Clone, PartialEq)]
pub struct DueReminder {
    pub entry: ReminderEntry,
    /// `None` when the user has no address, which is a valid state
    pub recipient_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_id_takes_precedence_over_playlist() {
        assert_eq!(
            ReminderTarget::from_columns(Some("v1".into()), Some("p1".into())),
            ReminderTarget::Video("v1".into())
        );
        assert_eq!(
            ReminderTarget::from_columns(Some("".into()), Some("p1".into())),
            ReminderTarget::Playlist("p1".into())
        );
        assert_eq!(
            ReminderTarget::from_columns(None, None),
            ReminderTarget::Playlist("".into())
        );
    }

    #[test]
    fn parses_reasons_with_either_separator() {
        assert_eq!(
            ReminderReason::parse("incomplete_playlist"),
            ReminderReason::IncompletePlaylist
        );
        assert_eq!(
            ReminderReason::parse("incomplete-playlist"),
            ReminderReason::IncompletePlaylist
        );
        assert_eq!(
            ReminderReason::parse("user-scheduled"),
            ReminderReason::UserScheduled
        );
        assert_eq!(
            ReminderReason::parse("birthday"),
            ReminderReason::Other("birthday".into())
        );
        assert_eq!(ReminderReason::parse("birthday").as_str(), "birthday");
    }

    #[test]
    fn sent_at_is_write_once() {
        let mut entry = ReminderEntry::new(
            Default::default(),
            ReminderTarget::Video("v1".into()),
            ReminderReason::UserScheduled,
            100,
        );
        assert!(entry.mark_sent(200));
        assert!(!entry.mark_sent(300));
        assert_eq!(entry.sent_at, Some(200));
    }
}
