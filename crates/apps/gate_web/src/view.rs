use flow::{FlowUiState, Severity, UiSurface};
use web_sys::{HtmlButtonElement, HtmlElement};

pub fn status_class(severity: Severity) -> String {
    format!("status {}", severity.class_name())
}

fn set_visible(el: &HtmlElement, visible: bool) {
    let display = if visible { "block" } else { "none" };
    let _ = el.style().set_property("display", display);
}

/// Writes flow snapshots into the trigger button and the status/debug panels.
pub struct DomSurface {
    pub button: HtmlButtonElement,
    pub status: HtmlElement,
    pub debug: HtmlElement,
}

impl UiSurface for DomSurface {
    fn apply(&mut self, state: &FlowUiState) {
        self.button.set_disabled(!state.button_enabled);
        let _ = self
            .button
            .class_list()
            .toggle_with_force("loading", state.button_loading);
        self.button.set_text_content(Some(&state.button_label));

        match &state.status {
            Some(msg) => {
                self.status.set_text_content(Some(&msg.text));
                self.status.set_class_name(&status_class(msg.severity));
                set_visible(&self.status, true);
            }
            None => set_visible(&self.status, false),
        }

        match &state.debug_payload {
            Some(text) => {
                self.debug.set_text_content(Some(text));
                set_visible(&self.debug, true);
            }
            None => set_visible(&self.debug, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::status_class;
    use flow::Severity;

    #[test]
    fn status_classes() {
        assert_eq!(status_class(Severity::Info), "status info");
        assert_eq!(status_class(Severity::Warning), "status warning");
    }
}
