/// Position of the flow in its state machine.
///
/// ```text
/// Idle -> Locating -> LocationFailed -> Idle
///                  -> LocationOk -> Verifying -> VerifyFailed -> Idle
///                                             -> Unlocking -> WaitingForPopupClose -> Navigated
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FlowPhase {
    #[default]
    Idle,
    Locating,
    LocationFailed,
    LocationOk,
    Verifying,
    VerifyFailed,
    Unlocking,
    WaitingForPopupClose,
    /// Terminal: the page has been sent to the confirmation destination.
    Navigated,
}

impl FlowPhase {
    pub fn can_transition_to(self, next: FlowPhase) -> bool {
        use FlowPhase::*;
        matches!(
            (self, next),
            (Idle, Locating)
                | (Locating, LocationFailed)
                | (Locating, LocationOk)
                | (LocationFailed, Idle)
                | (LocationOk, Verifying)
                | (Verifying, VerifyFailed)
                | (Verifying, Unlocking)
                // A blocked popup aborts the unlock.
                | (Unlocking, VerifyFailed)
                | (VerifyFailed, Idle)
                | (Unlocking, WaitingForPopupClose)
                | (WaitingForPopupClose, Navigated)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == FlowPhase::Navigated
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlowPhase::Idle => "idle",
            FlowPhase::Locating => "locating",
            FlowPhase::LocationFailed => "location-failed",
            FlowPhase::LocationOk => "location-ok",
            FlowPhase::Verifying => "verifying",
            FlowPhase::VerifyFailed => "verify-failed",
            FlowPhase::Unlocking => "unlocking",
            FlowPhase::WaitingForPopupClose => "waiting-for-popup-close",
            FlowPhase::Navigated => "navigated",
        }
    }
}
