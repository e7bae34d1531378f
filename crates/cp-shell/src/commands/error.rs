use std::fmt::Display;

/// Centralized error mapping for commands.
///
/// Errors cross the command boundary as their display message.
pub fn map_err(err: impl Display) -> String {
    err.to_string()
}
