//! UI intents and error modeling for the desktop GUI controller.

use shared::domain::ViewId;

/// Requests raised by widgets. Applied by the controller at the start of the
/// next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiIntent {
    EnterPlatform,
    AbortLoading,
    SelectView(ViewId),
    ToggleNav,
    CloseNav,
    TriggerEvolution,
}

impl UiIntent {
    pub fn name(self) -> &'static str {
        match self {
            Self::EnterPlatform => "enter_platform",
            Self::AbortLoading => "abort_loading",
            Self::SelectView(_) => "select_view",
            Self::ToggleNav => "toggle_nav",
            Self::CloseNav => "close_nav",
            Self::TriggerEvolution => "trigger_evolution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    IntentQueue,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
