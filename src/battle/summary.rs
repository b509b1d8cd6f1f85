use serde::{Deserialize, Serialize};

/// Ordered, human-readable messages describing what an action did.
///
/// These strings are the battle's output: a front end prints them as-is.
///
/// ## Usage Examples
///
/// ```rust,ignore
/// let mut summary = ActionSummary::with_message("Pikachu used Thunderbolt.");
/// summary.add_message("Onix has fainted.");
/// summary.combine(&other_summary);                 // Append another summary's messages
///
/// summary.print_debug();                           // Just print messages
/// summary.print_debug_with_message("Turn 1:");     // With header message
/// println!("{}", summary);                         // Using Display
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSummary {
    messages: Vec<String>,
}

impl ActionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Append every message of `other`, leaving `other` untouched.
    pub fn combine(&mut self, other: &ActionSummary) {
        self.messages.extend(other.messages.iter().cloned());
    }

    /// Print all messages with indentation.
    pub fn print_debug(&self) {
        for message in &self.messages {
            println!("  {}", message);
        }
    }

    /// Print all messages with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl std::fmt::Display for ActionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for message in &self.messages {
            writeln!(f, "{}", message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_combine_appends_after_existing_messages() {
        let mut summary = ActionSummary::with_message("Pikachu used Tackle.");
        let mut other = ActionSummary::new();
        other.add_message("Eevee has fainted.");
        other.add_message("Pikachu gained 28 exp.");

        summary.combine(&other);

        assert_eq!(
            summary.messages(),
            &["Pikachu used Tackle.", "Eevee has fainted.", "Pikachu gained 28 exp."]
        );
        assert_eq!(other.len(), 2);
        assert_eq!(summary.to_string(), "Pikachu used Tackle.\nEevee has fainted.\nPikachu gained 28 exp.\n");
    }

    #[test]
    fn test_new_summary_is_empty() {
        assert!(ActionSummary::new().is_empty());
        assert_eq!(ActionSummary::with_message("Got away safely!").len(), 1);
    }
}
