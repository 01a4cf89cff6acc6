//! Client request encoding.
//!
//! Requests are single lines: a numeric opcode followed by space-separated
//! arguments. The send-phrase command additionally carries a two-digit
//! length prefix that the server uses to bound its read.

use crate::{MAX_PHRASE_LEN, errors::ProtocolError};

/// Request opcodes.
mod opcode {
    pub const CREATE_LOBBY: &str = "100";
    pub const JOIN_LOBBY: &str = "101";
    pub const LIST_LOBBIES: &str = "102";
    pub const LEAVE_LOBBY: &str = "103";
    pub const START_MATCH: &str = "110";
    pub const SEND_PHRASE: &str = "111";
    pub const SIGNUP: &str = "201";
    pub const LOGIN: &str = "202";
}

/// A client-to-server request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `201 <language> <username> <password>`: register a new account.
    Signup {
        /// Preferred language tag (e.g. `en`, `it`).
        language: String,
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },
    /// `202 <username> <password>`: authenticate.
    Login {
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },
    /// `100`: create a lobby, becoming its host.
    CreateLobby,
    /// `101 <lobby_id>`: join an existing lobby.
    JoinLobby {
        /// 36-character lobby UUID.
        lobby_id: String,
    },
    /// `103`: leave the current lobby or queue.
    LeaveLobby,
    /// `102`: request the lobby listing.
    ListLobbies,
    /// `110 <0|1>`: start the match (host only); the bit picks the turn
    /// direction (`1` = clockwise).
    StartMatch {
        /// Turn direction bit.
        clockwise: bool,
    },
    /// `111 <len> <text>`: submit the next phrase during this turn.
    SendPhrase {
        /// Phrase text, at most [`MAX_PHRASE_LEN`] characters.
        text: String,
    },
}

impl Command {
    /// Encode into one newline-terminated wire line.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::PhraseTooLong`] when a phrase exceeds
    /// [`MAX_PHRASE_LEN`] characters.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        let line = match self {
            Command::Signup { language, username, password } => {
                format!("{} {language} {username} {password}", opcode::SIGNUP)
            },
            Command::Login { username, password } => {
                format!("{} {username} {password}", opcode::LOGIN)
            },
            Command::CreateLobby => opcode::CREATE_LOBBY.to_string(),
            Command::JoinLobby { lobby_id } => format!("{} {lobby_id}", opcode::JOIN_LOBBY),
            Command::LeaveLobby => opcode::LEAVE_LOBBY.to_string(),
            Command::ListLobbies => opcode::LIST_LOBBIES.to_string(),
            Command::StartMatch { clockwise } => {
                format!("{} {}", opcode::START_MATCH, u8::from(*clockwise))
            },
            Command::SendPhrase { text } => {
                let len = text.chars().count();
                if len > MAX_PHRASE_LEN {
                    return Err(ProtocolError::PhraseTooLong { len });
                }
                format!("{} {len:02} {text}", opcode::SEND_PHRASE)
            },
        };
        Ok(format!("{line}\n"))
    }

    /// Parse a wire line back into a command.
    ///
    /// The client never receives commands; this is the inverse of
    /// [`Command::encode`] for round-trip tests and debugging tools.
    pub fn parse(line: &str) -> Result<Command, ProtocolError> {
        let line = line.trim_end_matches('\n');
        let (op, rest) = match line.split_once(' ') {
            Some((op, rest)) => (op, rest),
            None => (line, ""),
        };

        let invalid = || ProtocolError::InvalidCommand { line: line.to_string() };

        match op {
            opcode::CREATE_LOBBY if rest.is_empty() => Ok(Command::CreateLobby),
            opcode::LIST_LOBBIES if rest.is_empty() => Ok(Command::ListLobbies),
            opcode::LEAVE_LOBBY if rest.is_empty() => Ok(Command::LeaveLobby),
            opcode::JOIN_LOBBY if !rest.is_empty() => {
                Ok(Command::JoinLobby { lobby_id: rest.to_string() })
            },
            opcode::START_MATCH => match rest {
                "0" => Ok(Command::StartMatch { clockwise: false }),
                "1" => Ok(Command::StartMatch { clockwise: true }),
                _ => Err(invalid()),
            },
            opcode::SEND_PHRASE => {
                let (len, text) = rest.split_once(' ').ok_or_else(invalid)?;
                let len: usize = len.parse().map_err(|_| invalid())?;
                if len != text.chars().count() || len > MAX_PHRASE_LEN {
                    return Err(invalid());
                }
                Ok(Command::SendPhrase { text: text.to_string() })
            },
            opcode::SIGNUP => {
                let mut parts = rest.splitn(3, ' ');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(language), Some(username), Some(password))
                        if !language.is_empty() && !username.is_empty() && !password.is_empty() =>
                    {
                        Ok(Command::Signup {
                            language: language.to_string(),
                            username: username.to_string(),
                            password: password.to_string(),
                        })
                    },
                    _ => Err(invalid()),
                }
            },
            opcode::LOGIN => match rest.split_once(' ') {
                Some((username, password)) if !username.is_empty() && !password.is_empty() => {
                    Ok(Command::Login {
                        username: username.to_string(),
                        password: password.to_string(),
                    })
                },
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Command;
    use crate::errors::ProtocolError;

    #[test]
    fn bare_commands_encode_as_opcode_only() {
        assert_eq!(Command::CreateLobby.encode().unwrap(), "100\n");
        assert_eq!(Command::ListLobbies.encode().unwrap(), "102\n");
        assert_eq!(Command::LeaveLobby.encode().unwrap(), "103\n");
    }

    #[test]
    fn send_phrase_carries_length_prefix() {
        let cmd = Command::SendPhrase { text: "a red fox".into() };
        assert_eq!(cmd.encode().unwrap(), "111 09 a red fox\n");
    }

    #[test]
    fn send_phrase_rejects_oversized_text() {
        let cmd = Command::SendPhrase { text: "x".repeat(31) };
        assert!(matches!(cmd.encode(), Err(ProtocolError::PhraseTooLong { len: 31 })));
    }

    #[test]
    fn start_match_encodes_direction_bit() {
        assert_eq!(Command::StartMatch { clockwise: true }.encode().unwrap(), "110 1\n");
        assert_eq!(Command::StartMatch { clockwise: false }.encode().unwrap(), "110 0\n");
    }

    #[test]
    fn join_lobby_round_trips_a_full_uuid() {
        let id = "9f3c2d1e-5a4b-4c3d-8e7f-0a1b2c3d4e5f";
        assert_eq!(id.len(), 36);

        let encoded = Command::JoinLobby { lobby_id: id.into() }.encode().unwrap();
        let decoded = Command::parse(&encoded).unwrap();

        assert_eq!(decoded, Command::JoinLobby { lobby_id: id.into() });
    }

    #[test]
    fn login_and_signup_round_trip() {
        for cmd in [
            Command::Login { username: "alice".into(), password: "hunter2".into() },
            Command::Signup {
                language: "it".into(),
                username: "bob".into(),
                password: "pw".into(),
            },
        ] {
            let encoded = cmd.encode().unwrap();
            assert_eq!(Command::parse(&encoded).unwrap(), cmd);
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        for line in ["999", "101", "110 2", "111 05 abc", ""] {
            assert!(Command::parse(line).is_err(), "accepted {line:?}");
        }
    }
}
