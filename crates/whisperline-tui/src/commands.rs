//! Slash-command parsing.
//!
//! Input lines starting with `/` are commands; anything else is spoken as
//! the next phrase of the story. Parsing is presentation-free: the runtime
//! decides what each parsed command does.

use whisperline_client::Intent;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// A session intent to forward to the bridge.
    Intent(Intent),
    /// Reconnect to the server (no-op while connected).
    Connect,
    /// Quit the application.
    Quit,
    /// Show the command summary.
    Help,
    /// Unrecognized command name.
    Unknown {
        /// What the user typed.
        input: String,
    },
    /// Known command, unusable arguments.
    InvalidArgs {
        /// Command name without the slash.
        command: &'static str,
        /// What is wrong or expected.
        error: &'static str,
    },
}

/// One-line usage summary, rendered by `/help` and on the login screen.
pub const HELP: &[&str] = &[
    "/signup <language> <user> <password>  register an account",
    "/login <user> <password>              log in",
    "/lobbies                              refresh the lobby list",
    "/create                               host a new lobby",
    "/join <lobby-id>                      join a lobby",
    "/start <0|1>                          start the match (host; 1 = clockwise)",
    "/say <text>                           speak the next phrase",
    "/leave                                leave lobby or match",
    "/connect                              reconnect after a disconnect",
    "/quit                                 exit",
    "anything else                         speak it as your phrase",
];

/// Parse one submitted input line.
pub fn parse(line: &str) -> UserCommand {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return UserCommand::Intent(Intent::SendPhrase { text: line.to_string() });
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name {
        "login" => {
            let mut parts = args.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(username), Some(password), None) => UserCommand::Intent(Intent::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                }),
                _ => UserCommand::InvalidArgs {
                    command: "login",
                    error: "expected <user> <password>",
                },
            }
        },
        "signup" => {
            let mut parts = args.split_whitespace();
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(language), Some(username), Some(password), None) => {
                    UserCommand::Intent(Intent::Signup {
                        language: language.to_string(),
                        username: username.to_string(),
                        password: password.to_string(),
                    })
                },
                _ => UserCommand::InvalidArgs {
                    command: "signup",
                    error: "expected <language> <user> <password>",
                },
            }
        },
        "create" if args.is_empty() => UserCommand::Intent(Intent::CreateLobby),
        "join" => {
            if args.is_empty() || args.contains(char::is_whitespace) {
                UserCommand::InvalidArgs { command: "join", error: "expected <lobby-id>" }
            } else {
                UserCommand::Intent(Intent::JoinLobby { lobby_id: args.to_string() })
            }
        },
        "lobbies" if args.is_empty() => UserCommand::Intent(Intent::ListLobbies),
        "start" => match args {
            "0" => UserCommand::Intent(Intent::StartMatch { clockwise: false }),
            "1" => UserCommand::Intent(Intent::StartMatch { clockwise: true }),
            _ => UserCommand::InvalidArgs { command: "start", error: "expected 0 or 1" },
        },
        "say" if !args.is_empty() => {
            UserCommand::Intent(Intent::SendPhrase { text: args.to_string() })
        },
        "leave" if args.is_empty() => UserCommand::Intent(Intent::Leave),
        "connect" if args.is_empty() => UserCommand::Connect,
        "quit" | "exit" if args.is_empty() => UserCommand::Quit,
        "help" => UserCommand::Help,
        _ => UserCommand::Unknown { input: line.to_string() },
    }
}
