//! Line-driven console front end
//!
//! Each input line is either a console command, typed and committed in one
//! step, or a `:`-prefixed directive standing in for the overlay's keys and
//! widgets.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use nethercore_devconsole::{CommitOutcome, ConsoleEvent, ConsoleSession, HostNamespace};

/// What the driver should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Feeds lines from a reader into a console session
pub struct Driver<H, R, W> {
    session: ConsoleSession,
    host: H,
    input: R,
    output: W,
    prompt: bool,
}

impl<H: HostNamespace, R: BufRead, W: Write> Driver<H, R, W> {
    pub fn new(session: ConsoleSession, host: H, input: R, output: W) -> Self {
        Self {
            session,
            host,
            input,
            output,
            prompt: false,
        }
    }

    /// Print a prompt before each line (interactive use)
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    #[cfg(test)]
    pub fn session(&self) -> &ConsoleSession {
        &self.session
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Process lines until end of input or `:quit`
    pub fn run(&mut self) -> Result<()> {
        if !self.session.is_console_visible() {
            self.session.on_toggle_console();
        }

        let mut line = String::new();
        loop {
            if self.prompt {
                write!(self.output, "> ")?;
                self.output.flush()?;
            }

            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read console input")?;
            if read == 0 {
                break;
            }

            let text = line.trim_end_matches(['\r', '\n']);
            if self.handle_line(text)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let Some(directive) = line.strip_prefix(':') else {
            self.send(ConsoleEvent::TextChanged(line.to_string()))?;
            self.send(ConsoleEvent::Commit)?;
            return Ok(Flow::Continue);
        };

        let (name, rest) = directive.split_once(' ').unwrap_or((directive, ""));
        match name {
            "quit" | "q" => return Ok(Flow::Quit),
            "toggle" => {
                self.send(ConsoleEvent::ToggleConsole)?;
                let state = if self.session.is_console_visible() {
                    "shown"
                } else {
                    "hidden"
                };
                writeln!(self.output, "console {}", state)?;
            }
            "help" => {
                self.send(ConsoleEvent::ToggleHelp)?;
                self.print_view()?;
            }
            "type" => {
                self.send(ConsoleEvent::TextChanged(rest.to_string()))?;
                self.print_view()?;
            }
            "suggest" => match rest.trim().parse::<usize>() {
                Ok(index) if self.session.select_suggestion(index) => {
                    writeln!(self.output, "input: {}", self.session.input())?;
                }
                Ok(index) => writeln!(self.output, "no suggestion {}", index)?,
                Err(_) => writeln!(self.output, "usage: :suggest <index>")?,
            },
            "view" => self.print_view()?,
            other => writeln!(self.output, "unknown directive ':{}'", other)?,
        }
        Ok(Flow::Continue)
    }

    fn send(&mut self, event: ConsoleEvent) -> Result<()> {
        match self.session.handle_event(event, &mut self.host) {
            Ok(Some(CommitOutcome::Executed { id })) => writeln!(self.output, "ok: {}", id)?,
            Ok(_) => {}
            Err(err) => writeln!(self.output, "error: {}", err.report())?,
        }
        Ok(())
    }

    fn print_view(&mut self) -> Result<()> {
        let view = self.session.view();
        if view.help_visible {
            writeln!(self.output, "commands:")?;
            for line in &view.help {
                writeln!(self.output, "  {}", line.info())?;
            }
        }
        if !view.input.is_empty() {
            writeln!(self.output, "input: {}", view.input)?;
            for (index, line) in view.suggestions.iter().enumerate() {
                writeln!(self.output, "  [{}] {}", index, line.info())?;
            }
        }
        Ok(())
    }
}
