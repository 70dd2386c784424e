//! Lifecycle commands accepted by [`apply`](super::apply::apply).

use crate::model::SemanticSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum VersionCommand {
    /// Store `snapshot` as the draft, replacing the current draft's snapshot
    /// if one exists
    CreateDraft { snapshot: SemanticSnapshot },

    /// Freeze a draft and make it the active version
    Publish {
        version_id: String,
        change_summary: String,
    },

    /// Retire an inactive published version
    Deprecate { version_id: String },

    /// Make a published version the active one
    SetActive { version_id: String },

    /// Discard any draft and start a new one from a copy of a stored version
    Rollback { version_id: String },
}

impl VersionCommand {
    /// Operation name used in logs and error context
    pub fn op_name(&self) -> &'static str {
        match self {
            VersionCommand::CreateDraft { .. } => "create_draft",
            VersionCommand::Publish { .. } => "publish",
            VersionCommand::Deprecate { .. } => "deprecate",
            VersionCommand::SetActive { .. } => "set_active",
            VersionCommand::Rollback { .. } => "rollback",
        }
    }

    /// Target version, if the command addresses one
    pub fn version_id(&self) -> Option<&str> {
        match self {
            VersionCommand::CreateDraft { .. } => None,
            VersionCommand::Publish { version_id, .. }
            | VersionCommand::Deprecate { version_id }
            | VersionCommand::SetActive { version_id }
            | VersionCommand::Rollback { version_id } => Some(version_id),
        }
    }
}
