//! Parsing of lines typed at the prompt.

/// What a line of input asks the client to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// `/join <room>`
    Join(String),
    /// `/quit`
    Quit,
    /// Any other non-empty line.
    Say(String),
}

impl ClientCommand {
    /// Parse a line. Blank lines and `/join` without a room yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if line == "/quit" {
            return Some(Self::Quit);
        }

        if let Some(rest) = line.strip_prefix("/join") {
            // "/joinx" is an ordinary message
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                let room = rest.trim();
                return (!room.is_empty()).then(|| Self::Join(room.to_string()));
            }
        }

        Some(Self::Say(line.to_string()))
    }
}
