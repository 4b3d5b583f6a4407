//! Key edge detection for console bindings
//!
//! Hosts report raw key transitions (including OS key repeat). Each binding
//! produces at most one [`ConsoleEvent`] per press.

use hashbrown::HashSet;

use crate::config::ConsoleSettings;
use crate::session::ConsoleEvent;

/// Normalize a key name for comparison (case-insensitive, "Esc" == "Escape")
pub fn normalize_key_name(name: &str) -> String {
    match name.trim().to_uppercase().as_str() {
        "ESC" => "ESCAPE".to_string(),
        "RETURN" => "ENTER".to_string(),
        other => other.to_string(),
    }
}

/// Maps configured console keys to rising-edge events
#[derive(Debug, Clone)]
pub struct ConsoleKeys {
    toggle_console: String,
    toggle_help: String,
    commit: String,
    held: HashSet<String>,
}

impl ConsoleKeys {
    pub fn new(settings: &ConsoleSettings) -> Self {
        Self {
            toggle_console: normalize_key_name(&settings.toggle_console_key),
            toggle_help: normalize_key_name(&settings.toggle_help_key),
            commit: normalize_key_name(&settings.commit_key),
            held: HashSet::new(),
        }
    }

    /// Feed one key transition
    ///
    /// Returns an event only when a bound key goes from released to pressed.
    pub fn key_event(&mut self, key: &str, pressed: bool) -> Option<ConsoleEvent> {
        let key = normalize_key_name(key);

        if !pressed {
            self.held.remove(&key);
            return None;
        }

        if !self.held.insert(key.clone()) {
            // Still held from a previous press
            return None;
        }

        if key == self.commit {
            Some(ConsoleEvent::Commit)
        } else if key == self.toggle_console {
            Some(ConsoleEvent::ToggleConsole)
        } else if key == self.toggle_help {
            Some(ConsoleEvent::ToggleHelp)
        } else {
            None
        }
    }

    /// Forget all held keys (e.g., on focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key_name() {
        assert_eq!(normalize_key_name("tab"), "TAB");
        assert_eq!(normalize_key_name(" F1 "), "F1");
        assert_eq!(normalize_key_name("Esc"), "ESCAPE");
        assert_eq!(normalize_key_name("Return"), "ENTER");
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut keys = ConsoleKeys::new(&ConsoleSettings::default());

        assert_eq!(keys.key_event("Enter", true), Some(ConsoleEvent::Commit));
        // OS key repeat while held
        assert_eq!(keys.key_event("Enter", true), None);
        assert_eq!(keys.key_event("Enter", true), None);
        assert_eq!(keys.key_event("Enter", false), None);
        assert_eq!(keys.key_event("Enter", true), Some(ConsoleEvent::Commit));
    }

    #[test]
    fn test_bindings_from_settings() {
        let settings = ConsoleSettings {
            toggle_console_key: "F12".to_string(),
            toggle_help_key: "h".to_string(),
            ..ConsoleSettings::default()
        };
        let mut keys = ConsoleKeys::new(&settings);

        assert_eq!(keys.key_event("Tab", true), None);
        assert_eq!(keys.key_event("f12", true), Some(ConsoleEvent::ToggleConsole));
        assert_eq!(keys.key_event("H", true), Some(ConsoleEvent::ToggleHelp));
        assert_eq!(keys.key_event("Return", true), Some(ConsoleEvent::Commit));
    }

    #[test]
    fn test_release_all() {
        let mut keys = ConsoleKeys::new(&ConsoleSettings::default());
        assert_eq!(keys.key_event("Tab", true), Some(ConsoleEvent::ToggleConsole));
        keys.release_all();
        assert_eq!(keys.key_event("Tab", true), Some(ConsoleEvent::ToggleConsole));
    }
}
