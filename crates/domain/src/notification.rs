use crate::reminder::{ReminderEntry, ReminderReason, ReminderTarget};

/// The rendered email for a `ReminderEntry`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub html: String,
    /// The page in the hub the email links to
    pub target_url: String,
}

impl Notification {
    /// Renders the subject and body of a reminder email. Never fails.
    pub fn render(entry: &ReminderEntry, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let target_url = match &entry.target {
            ReminderTarget::Video(video_id) => format!("{}/watch/{}", base_url, video_id),
            ReminderTarget::Playlist(playlist_id) => {
                format!("{}/playlists/{}", base_url, playlist_id)
            }
        };

        let subject = match (&entry.reason, &entry.target) {
            (ReminderReason::IncompletePlaylist, _) => "Keep watching your playlist",
            (_, ReminderTarget::Video(_)) => "Video reminder",
            (_, ReminderTarget::Playlist(_)) => "Video hub reminder",
        };

        let html = match &entry.target {
            ReminderTarget::Video(_) => format!(
                "<p>Hi, you scheduled a reminder to watch a video.</p><p><a href=\"{}\">Open the video</a></p>",
                target_url
            ),
            ReminderTarget::Playlist(_) => format!(
                "<p>Hi, you have videos waiting in your playlist.</p><p><a href=\"{}\">Continue watching</a></p>",
                target_url
            ),
        };

        Self {
            subject: subject.to_string(),
            html,
            target_url,
        }
    }
}
