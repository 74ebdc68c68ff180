use crate::phase::FlowPhase;

/// One recorded phase change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Transition {
    /// 1-based attempt counter.
    pub attempt: u64,
    pub from: FlowPhase,
    pub to: FlowPhase,
}

/// Append-only record of phase changes across attempts.
#[derive(Debug, Default)]
pub struct TransitionLog {
    transitions: Vec<Transition>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    pub fn record(&mut self, attempt: u64, from: FlowPhase, to: FlowPhase) {
        self.transitions.push(Transition { attempt, from, to });
    }

    /// Phases entered during `attempt`, in order.
    pub fn path(&self, attempt: u64) -> Vec<FlowPhase> {
        self.transitions
            .iter()
            .filter(|t| t.attempt == attempt)
            .map(|t| t.to)
            .collect()
    }
}
