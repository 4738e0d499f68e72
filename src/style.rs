/*!
 * Terminal colouring for user-facing messages
 */

use console::style;

/// Colour role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Completed work
    Success,
    /// Notices such as dry runs
    Warning,
    /// Fatal errors
    Failure,
    /// No styling
    Plain,
}

/// Style `text` for `tone`; styling is dropped when colours are disabled
pub fn paint(text: &str, tone: Tone) -> String {
    match tone {
        Tone::Success => style(text).green().to_string(),
        Tone::Warning => style(text).yellow().to_string(),
        Tone::Failure => style(text).red().bold().to_string(),
        Tone::Plain => text.to_string(),
    }
}
