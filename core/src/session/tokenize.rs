//! Command line tokenizer

use smallvec::SmallVec;

/// Positional arguments of a command line
pub type Args = SmallVec<[String; 4]>;

/// A command line split into id and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub id: String,
    pub args: Args,
}

/// Split on single spaces: first token is the command id, the rest are arguments
///
/// Consecutive spaces yield empty arguments; nothing is trimmed or unquoted.
pub fn tokenize(input: &str) -> CommandLine {
    let mut parts = input.split(' ');
    let id = parts.next().unwrap_or_default().to_string();
    CommandLine {
        id,
        args: parts.map(str::to_string).collect(),
    }
}
