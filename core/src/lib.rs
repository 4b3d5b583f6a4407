//! Nethercore Dev Console - in-game debug command console
//!
//! This crate provides the dispatch core of the debug console overlay: a
//! typed command line is looked up in a [`CommandRegistry`], its
//! `Type.Method` target is resolved against the host's types and live
//! objects, and the method is invoked with the remaining tokens as string
//! arguments.
//!
//! # Architecture
//!
//! - [`CommandRegistry`] - Ordered command descriptors loaded from config
//! - [`resolve`] - Type lookup, instance find-or-create, overload selection
//! - [`invoke`] - Argument pass-through and call
//! - [`ConsoleSession`] - Input line, visibility flags, commit dispatch
//! - [`HostNamespace`] - The host's view of types and objects; [`ObjectHost`]
//!   is a registration-table implementation
//!
//! Rendering the overlay is left to the host: it feeds [`ConsoleEvent`]s in
//! and draws [`ConsoleView`] snapshots.

pub mod config;
pub mod error;
pub mod host;
pub mod input;
#[cfg(test)]
mod integration;
pub mod invoker;
pub mod registry;
pub mod resolver;
pub mod session;
#[cfg(test)]
pub mod test_utils;

pub use config::{ConfigError, ConsoleConfig, ConsoleSettings, UnknownCommandPolicy};
pub use error::{ConsoleError, RegistryError};
pub use host::{
    HostNamespace, MethodHandle, ObjectHost, ObjectId, ObjectRef, TypeDef, TypeHandle, TypeKind,
};
pub use input::ConsoleKeys;
pub use invoker::invoke;
pub use registry::{CommandDescriptor, CommandRegistry};
pub use resolver::{ResolvedTarget, resolve};
pub use session::{CommitOutcome, ConsoleEvent, ConsoleSession, ConsoleView, HelpLine};
