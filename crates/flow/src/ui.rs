#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// CSS modifier used by the status element (`status info`, ...).
    pub fn class_name(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// View state owned by the flow controller.
///
/// Surfaces receive full snapshots, never deltas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowUiState {
    pub button_enabled: bool,
    pub button_label: String,
    /// Drives the `loading` class on the trigger control.
    pub button_loading: bool,
    pub status: Option<StatusMessage>,
    pub debug_payload: Option<String>,
    pub map_rendered: bool,
}

impl FlowUiState {
    pub fn idle(label: impl Into<String>) -> Self {
        Self {
            button_enabled: true,
            button_label: label.into(),
            button_loading: false,
            status: None,
            debug_payload: None,
            map_rendered: false,
        }
    }

    /// Locks the control and clears everything from the last attempt.
    pub(crate) fn begin(&mut self, busy_label: &str) {
        self.button_enabled = false;
        self.button_loading = true;
        self.button_label = busy_label.to_string();
        self.status = None;
        self.debug_payload = None;
        self.map_rendered = false;
    }

    /// Unlocks the control. Status and debug output stay visible.
    pub(crate) fn end(&mut self, idle_label: &str) {
        self.button_enabled = true;
        self.button_loading = false;
        self.button_label = idle_label.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_clears_previous_attempt() {
        let mut ui = FlowUiState::idle("open");
        ui.status = Some(StatusMessage::new("old", Severity::Error));
        ui.debug_payload = Some("raw".into());
        ui.map_rendered = true;

        ui.begin("busy");
        assert!(!ui.button_enabled);
        assert!(ui.button_loading);
        assert_eq!(ui.button_label, "busy");
        assert_eq!(ui.status, None);
        assert_eq!(ui.debug_payload, None);
        assert!(!ui.map_rendered);
    }

    #[test]
    fn end_restores_control_but_keeps_diagnostics() {
        let mut ui = FlowUiState::idle("open");
        ui.begin("busy");
        ui.status = Some(StatusMessage::new("failed", Severity::Warning));
        ui.end("open");
        assert_eq!(
            ui,
            FlowUiState {
                status: Some(StatusMessage::new("failed", Severity::Warning)),
                ..FlowUiState::idle("open")
            }
        );
    }
}
