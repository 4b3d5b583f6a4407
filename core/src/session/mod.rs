//! Console session
//!
//! Owns the input line and visibility flags, and turns a commit into a
//! resolved, invoked command. Dispatch is synchronous: a commit runs to
//! completion before the next event is handled.

mod tokenize;

pub use tokenize::{Args, CommandLine, tokenize};

use glam::Vec2;

use crate::config::{ConfigError, ConsoleConfig, ConsoleSettings, UnknownCommandPolicy};
use crate::error::ConsoleError;
use crate::host::HostNamespace;
use crate::invoker::invoke;
use crate::registry::{CommandDescriptor, CommandRegistry, info_line};
use crate::resolver::{parse_target, resolve};

/// Type name the console itself answers to in target references
pub const CONSOLE_TYPE_NAME: &str = "DebugConsole";

/// Input events delivered by the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// Input field contents changed
    TextChanged(String),
    /// Submit the current input (one per confirm press)
    Commit,
    ToggleConsole,
    ToggleHelp,
}

/// Result of a commit that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Input was empty; nothing happened
    Empty,
    /// Command was resolved and invoked
    Executed { id: String },
}

/// One line of the help or suggestion list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    pub format: String,
    pub description: String,
}

impl HelpLine {
    pub fn info(&self) -> String {
        info_line(&self.format, &self.description)
    }
}

impl From<&CommandDescriptor> for HelpLine {
    fn from(command: &CommandDescriptor) -> Self {
        Self {
            format: command.format.clone(),
            description: command.description.clone(),
        }
    }
}

/// Everything the overlay needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleView {
    pub input: String,
    pub console_visible: bool,
    pub help_visible: bool,
    /// All commands, present only while help is visible
    pub help: Vec<HelpLine>,
    /// Commands matching the input, present only while input is non-empty
    pub suggestions: Vec<HelpLine>,
    /// Shared by the help and suggestion lists
    pub scroll_position: Vec2,
}

/// Console commands handled without going through the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    ToggleHelp,
}

impl Builtin {
    fn from_method(method: &str) -> Option<Self> {
        match method {
            "ToggleHelp" => Some(Self::ToggleHelp),
            _ => None,
        }
    }
}

/// Debug console state and dispatcher
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    registry: CommandRegistry,
    unknown_command: UnknownCommandPolicy,
    input: String,
    console_visible: bool,
    help_visible: bool,
    scroll_position: Vec2,
}

impl ConsoleSession {
    pub fn new(registry: CommandRegistry, settings: &ConsoleSettings) -> Self {
        Self {
            registry,
            unknown_command: settings.unknown_command,
            input: String::new(),
            console_visible: settings.start_visible,
            help_visible: false,
            scroll_position: Vec2::ZERO,
        }
    }

    /// Build a session from a loaded configuration
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.registry()?, &config.console))
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_console_visible(&self) -> bool {
        self.console_visible
    }

    pub fn is_help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn scroll_position(&self) -> Vec2 {
        self.scroll_position
    }

    pub fn set_scroll_position(&mut self, position: Vec2) {
        self.scroll_position = position;
    }

    // =========================================================================
    // Input events
    // =========================================================================

    /// Route one input event
    ///
    /// While the console is hidden only `ToggleConsole` is processed. Returns
    /// `Some` for commits that went through the dispatcher.
    pub fn handle_event<H: HostNamespace>(
        &mut self,
        event: ConsoleEvent,
        host: &mut H,
    ) -> Result<Option<CommitOutcome>, ConsoleError> {
        if !self.console_visible && event != ConsoleEvent::ToggleConsole {
            tracing::trace!("console hidden, ignoring {:?}", event);
            return Ok(None);
        }

        match event {
            ConsoleEvent::TextChanged(text) => self.on_text_changed(text),
            ConsoleEvent::Commit => return self.on_commit(host).map(Some),
            ConsoleEvent::ToggleConsole => self.on_toggle_console(),
            ConsoleEvent::ToggleHelp => self.on_toggle_help(),
        }
        Ok(None)
    }

    pub fn on_text_changed(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn on_toggle_console(&mut self) {
        self.console_visible = !self.console_visible;
    }

    pub fn on_toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Execute the current input line
    ///
    /// The input is cleared whenever a registered command was attempted,
    /// whether or not it resolved and ran.
    pub fn on_commit<H: HostNamespace>(
        &mut self,
        host: &mut H,
    ) -> Result<CommitOutcome, ConsoleError> {
        if self.input.is_empty() {
            tracing::trace!("commit with empty input ignored");
            return Ok(CommitOutcome::Empty);
        }

        let raw = self.input.clone();
        let line = tokenize(&raw);
        tracing::debug!(id = %line.id, args = ?line.args, "console commit");

        let Some(command) = self.registry.find_by_id(&line.id) else {
            if self.unknown_command == UnknownCommandPolicy::ClearInput {
                self.input.clear();
            }
            let err = ConsoleError::UnknownCommand { id: line.id };
            log_failure(&raw, &err);
            return Err(err);
        };
        let target = command.target.clone();

        self.input.clear();

        match self.execute(host, &target, &line.args) {
            Ok(()) => {
                tracing::info!(input = %raw, "executed {}", target);
                Ok(CommitOutcome::Executed { id: line.id })
            }
            Err(err) => {
                log_failure(&raw, &err);
                Err(err)
            }
        }
    }

    fn execute<H: HostNamespace>(
        &mut self,
        host: &mut H,
        target: &str,
        args: &[String],
    ) -> Result<(), ConsoleError> {
        let (type_name, method_name) = parse_target(target)?;

        if type_name == CONSOLE_TYPE_NAME {
            return match Builtin::from_method(method_name) {
                Some(Builtin::ToggleHelp) => {
                    self.on_toggle_help();
                    Ok(())
                }
                None => Err(ConsoleError::MethodNotFound {
                    type_name: type_name.to_string(),
                    method: method_name.to_string(),
                    arg_count: args.len(),
                }),
            };
        }

        let resolved = resolve(host, target, args.len())?;
        invoke(host, resolved, args)
    }

    // =========================================================================
    // Suggestions and rendering
    // =========================================================================

    /// Commands whose id contains the current input
    ///
    /// Empty while the input is empty.
    pub fn suggestions(&self) -> Vec<&CommandDescriptor> {
        if self.input.is_empty() {
            return Vec::new();
        }
        self.registry.find_by_substring(&self.input)
    }

    /// Replace the input with the format string of the `index`-th suggestion
    ///
    /// Does not execute anything. Returns false if there is no such suggestion.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(format) = self.suggestions().get(index).map(|c| c.format.clone()) else {
            return false;
        };
        self.input = format;
        true
    }

    /// Snapshot of the render surface
    pub fn view(&self) -> ConsoleView {
        let help = if self.help_visible {
            self.registry.iter().map(HelpLine::from).collect()
        } else {
            Vec::new()
        };

        ConsoleView {
            input: self.input.clone(),
            console_visible: self.console_visible,
            help_visible: self.help_visible,
            help,
            suggestions: self.suggestions().into_iter().map(HelpLine::from).collect(),
            scroll_position: self.scroll_position,
        }
    }
}

fn log_failure(raw: &str, err: &ConsoleError) {
    tracing::warn!(input = %raw, kind = err.kind(), "{}", err.report());
}
