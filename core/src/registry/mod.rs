//! Command registry
//!
//! Ordered list of command descriptors loaded at startup. Insertion order is
//! the order shown in help and suggestion lists.


use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// A command the console knows how to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Token typed by the user (e.g., "setval")
    pub id: String,
    /// Display template, also inserted when a suggestion is picked (e.g., "setval <int>")
    pub format: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Target reference in `Type.Method` form
    pub target: String,
}

impl CommandDescriptor {
    pub fn new(
        id: impl Into<String>,
        format: impl Into<String>,
        description: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            format: format.into(),
            description: description.into(),
            target: target.into(),
        }
    }

    /// Line shown in help and suggestion lists
    pub fn info(&self) -> String {
        info_line(&self.format, &self.description)
    }
}

/// `"format - description"`, shared by every help and suggestion line
pub(crate) fn info_line(format: &str, description: &str) -> String {
    format!("{} - {}", format, description)
}

/// Ordered collection of command descriptors with unique ids
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an ordered list, rejecting duplicate ids
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = CommandDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.push(descriptor)?;
        }
        Ok(registry)
    }

    /// Append a descriptor at the end of the list
    pub fn push(&mut self, descriptor: CommandDescriptor) -> Result<(), RegistryError> {
        if self.find_by_id(&descriptor.id).is_some() {
            return Err(RegistryError::DuplicateId(descriptor.id));
        }
        tracing::debug!(id = %descriptor.id, target = %descriptor.target, "registered command");
        self.commands.push(descriptor);
        Ok(())
    }

    /// Exact id lookup
    pub fn find_by_id(&self, id: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// All commands in registration order
    pub fn all(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// Commands whose id contains `fragment` (case-sensitive), in registration order
    pub fn find_by_substring(&self, fragment: &str) -> Vec<&CommandDescriptor> {
        self.commands
            .iter()
            .filter(|c| c.id.contains(fragment))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
