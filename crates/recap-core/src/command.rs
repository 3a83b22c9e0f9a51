//! Slash-command parsing.

use recap_shared::error::{RecapError, Result};

/// Commands the bot understands, with their arguments already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Clear,
    /// `/global_replacement <target> <replacement...>`. The replacement may
    /// be empty or contain spaces.
    GlobalReplacement { target: String, replacement: String },
    ListGlobal,
    /// `/remove_replacement <index>`, 1-based against the current listing.
    RemoveReplacement { index: usize },
}

impl Command {
    /// Parse a message that starts with `/`.
    ///
    /// A `@botname` suffix on the command word is stripped, as the platform
    /// appends one in group chats.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (head, rest) = match text.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (text, ""),
        };

        let name = head.strip_prefix('/').unwrap_or(head);
        let name = name.split('@').next().unwrap_or(name);

        match name {
            "start" => Ok(Command::Start),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "list_global" => Ok(Command::ListGlobal),
            "global_replacement" => {
                let (target, replacement) = match rest.split_once(' ') {
                    Some((target, replacement)) => (target, replacement),
                    None => (rest, ""),
                };
                if target.is_empty() {
                    return Err(RecapError::InvalidArgument(
                        "Usage: /global_replacement <target> <replacement>".to_string(),
                    ));
                }
                Ok(Command::GlobalReplacement {
                    target: target.to_string(),
                    replacement: replacement.to_string(),
                })
            }
            "remove_replacement" => {
                let index = rest.parse::<usize>().map_err(|_| {
                    RecapError::InvalidArgument(
                        "Usage: /remove_replacement <index> (see /list_global)".to_string(),
                    )
                })?;
                Ok(Command::RemoveReplacement { index })
            }
            other => Err(RecapError::InvalidArgument(format!(
                "Unknown command /{other}. Send /help for the command list."
            ))),
        }
    }
}
