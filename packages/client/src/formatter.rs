//! Message formatting for the terminal.

use chrono::DateTime;
use relay_server::domain::NewMessagePayload;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a broadcast chat message as `[HH:MM:SS] from: message`.
    ///
    /// The time is shown in the offset the server stamped it with. An
    /// unparseable `sent` is shown verbatim.
    pub fn format_new_message(payload: &NewMessagePayload) -> String {
        let time = DateTime::parse_from_rfc3339(&payload.sent)
            .map(|sent| sent.format("%H:%M:%S").to_string())
            .unwrap_or_else(|_| payload.sent.clone());
        format!("[{}] {}: {}", time, payload.from, payload.message)
    }

    /// Format a frame the client does not understand.
    pub fn format_raw_message(text: &str) -> String {
        format!("<- {}", text)
    }

    pub fn format_room_changed(room: &str) -> String {
        format!("* now in room '{}'", room)
    }
}
