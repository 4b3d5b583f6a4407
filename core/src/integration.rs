//! Integration tests for the console core
//!
//! Drives a session the way an overlay does: config text in, key and text
//! events through the edge detector, commands out to the host.

#[cfg(test)]
mod tests {
    use crate::config::ConsoleConfig;
    use crate::error::ConsoleError;
    use crate::host::HostNamespace;
    use crate::input::ConsoleKeys;
    use crate::session::{CommitOutcome, ConsoleEvent, ConsoleSession};
    use crate::test_utils::{TestClass, calls, test_host};

    const CONFIG: &str = r#"
        [console]
        toggle_console_key = "Tab"

        [[commands]]
        id = "show"
        format = "show"
        description = "Log from the test object"
        target = "TestClass.Show"

        [[commands]]
        id = "setval"
        format = "setval <int>"
        description = "Set the test value"
        target = "TestClass.SetValue"

        [[commands]]
        id = "help"
        format = "help"
        description = "Toggle command help"
        target = "DebugConsole.ToggleHelp"
    "#;

    /// Press and release a key, forwarding the resulting event
    fn tap<H: HostNamespace>(
        keys: &mut ConsoleKeys,
        session: &mut ConsoleSession,
        host: &mut H,
        key: &str,
    ) -> Result<Option<CommitOutcome>, ConsoleError> {
        let event = keys.key_event(key, true);
        keys.key_event(key, false);
        match event {
            Some(event) => session.handle_event(event, host),
            None => Ok(None),
        }
    }

    fn type_text<H: HostNamespace>(session: &mut ConsoleSession, host: &mut H, text: &str) {
        session
            .handle_event(ConsoleEvent::TextChanged(text.to_string()), host)
            .unwrap();
    }

    #[test]
    fn test_full_console_flow() {
        let config = ConsoleConfig::from_toml_str(CONFIG).unwrap();
        let mut session = ConsoleSession::from_config(&config).unwrap();
        let mut keys = ConsoleKeys::new(&config.console);
        let (mut host, log) = test_host();

        // Open the console
        tap(&mut keys, &mut session, &mut host, "Tab").unwrap();
        assert!(session.is_console_visible());

        // show -> live TestClass created, Show() invoked, input cleared
        type_text(&mut session, &mut host, "show");
        let outcome = tap(&mut keys, &mut session, &mut host, "Enter").unwrap();
        assert_eq!(
            outcome,
            Some(CommitOutcome::Executed {
                id: "show".to_string()
            })
        );
        assert_eq!(session.input(), "");

        // setval 42 -> same instance, parsed inside the method
        type_text(&mut session, &mut host, "setval 42");
        tap(&mut keys, &mut session, &mut host, "Enter").unwrap();

        assert_eq!(host.live_count("TestClass"), 1);
        let ty = host.lookup_type("TestClass").unwrap();
        let id = host.find_live_instance(ty).unwrap();
        assert_eq!(host.get::<TestClass>(id).and_then(|t| t.value), Some(42));
        assert_eq!(calls(&log), vec!["Show triggered (1)", "42 has been set"]);

        // bogus -> UnknownCommand, nothing invoked, input kept
        type_text(&mut session, &mut host, "bogus");
        let err = tap(&mut keys, &mut session, &mut host, "Enter").unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownCommand { .. }));
        assert_eq!(session.input(), "bogus");
        assert_eq!(calls(&log).len(), 2);

        // help through the typed command, then suggestions for a fragment
        type_text(&mut session, &mut host, "help");
        tap(&mut keys, &mut session, &mut host, "Enter").unwrap();
        type_text(&mut session, &mut host, "se");
        let view = session.view();
        assert!(view.help_visible);
        assert_eq!(view.help.len(), 3);
        assert_eq!(view.suggestions.len(), 1);
        assert_eq!(view.suggestions[0].format, "setval <int>");

        // Close the console; commits are ignored while hidden
        tap(&mut keys, &mut session, &mut host, "Tab").unwrap();
        type_text(&mut session, &mut host, "show");
        assert_eq!(tap(&mut keys, &mut session, &mut host, "Enter").unwrap(), None);
        assert_eq!(calls(&log).len(), 2);
    }

    #[test]
    fn test_held_enter_dispatches_once() {
        let config = ConsoleConfig::from_toml_str(CONFIG).unwrap();
        let mut session = ConsoleSession::from_config(&config).unwrap();
        let mut keys = ConsoleKeys::new(&config.console);
        let (mut host, log) = test_host();

        session.on_toggle_console();
        session.on_text_changed("show");

        // Key repeat delivers several presses before the release
        for _ in 0..5 {
            if let Some(event) = keys.key_event("Enter", true) {
                session.handle_event(event, &mut host).unwrap();
            }
            // Re-type so a second dispatch would be observable
            session.on_text_changed("show");
        }

        assert_eq!(calls(&log), vec!["Show triggered (1)"]);
    }
}
