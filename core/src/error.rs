//! Error types for command resolution and dispatch
//!
//! Every variant is non-fatal: the session logs it and returns to idle.

/// Failure of a single console command
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Target reference is not of the form `Type.Method`
    #[error("malformed target '{target}' (expected 'Type.Method')")]
    MalformedTarget { target: String },

    /// No type with this name is registered with the host
    #[error("{type_name} type not found")]
    TypeNotFound { type_name: String },

    /// Plain type has no zero-argument constructor
    #[error("could not find default constructor on type {type_name}")]
    NoDefaultConstructor { type_name: String },

    /// No method with this name accepts the given argument count
    #[error("method {type_name}.{method} taking {arg_count} argument(s) not found")]
    MethodNotFound {
        type_name: String,
        method: String,
        arg_count: usize,
    },

    /// Typed command id is not in the registry
    #[error("command with id '{id}' not found")]
    UnknownCommand { id: String },

    /// The invoked method raised an error
    #[error("invocation of {target} failed")]
    InvocationFailed {
        target: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ConsoleError {
    /// Short machine-friendly name of the error kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedTarget { .. } => "malformed_target",
            Self::TypeNotFound { .. } => "type_not_found",
            Self::NoDefaultConstructor { .. } => "no_default_constructor",
            Self::MethodNotFound { .. } => "method_not_found",
            Self::UnknownCommand { .. } => "unknown_command",
            Self::InvocationFailed { .. } => "invocation_failed",
        }
    }

    /// Message including every underlying cause, for log output
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        message
    }
}

/// Error building a command registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two descriptors share an id
    #[error("duplicate command id '{0}'")]
    DuplicateId(String),
}
