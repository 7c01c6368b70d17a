//! Loading state of the hosted payment integration.
//!
//! Mirrors the provider's script loader: options are reset once the client
//! id is known, the loader goes pending while the integration initializes,
//! and then resolves or rejects.

/// Options the integration is loaded with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptOptions {
    pub client_id: String,
    pub currency: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ScriptStatus {
    #[default]
    Initial,
    Pending,
    Resolved,
    Rejected(String),
}

impl ScriptStatus {
    /// Whether the buttons should still show the loading line.
    pub fn is_pending(&self) -> bool {
        matches!(self, ScriptStatus::Initial | ScriptStatus::Pending)
    }

    /// Whether a load is underway or already done for the current options.
    pub fn is_loaded_or_loading(&self) -> bool {
        matches!(self, ScriptStatus::Pending | ScriptStatus::Resolved)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptState {
    pub options: Option<ScriptOptions>,
    pub status: ScriptStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptAction {
    /// Replace the options; the loader starts over.
    ResetOptions(ScriptOptions),
    SetLoadingStatus(ScriptStatus),
}

impl ScriptState {
    pub fn reduce(self, action: ScriptAction) -> Self {
        match action {
            ScriptAction::ResetOptions(options) => Self {
                options: Some(options),
                status: ScriptStatus::Initial,
            },
            ScriptAction::SetLoadingStatus(status) => Self { status, ..self },
        }
    }
}
