//! Máquina de estados de un despacho.
//!
//! ParametersResolved -> Executing(0) -> StepComplete(0) -> Executing(1) ...
//! -> Complete. Cualquier estado no terminal puede pasar a Failed; los
//! terminales no transicionan.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Pending,
    ParametersResolved,
    Executing(usize),
    StepComplete(usize),
    Complete,
    Failed,
}

impl DispatchState {
    pub fn is_terminal(&self) -> bool { matches!(self, DispatchState::Complete | DispatchState::Failed) }

    /// Valida una transición para un plan de `stages` etapas.
    pub fn can_transition_to(&self, next: DispatchState, stages: usize) -> bool {
        use DispatchState::*;
        match (*self, next) {
            (s, Failed) => !s.is_terminal(),
            (Pending, ParametersResolved) => true,
            (ParametersResolved, Executing(0)) => stages > 0,
            (Executing(i), StepComplete(j)) => i == j,
            (StepComplete(i), Executing(j)) => j == i + 1 && j < stages,
            (StepComplete(i), Complete) => i + 1 == stages,
            _ => false,
        }
    }
}
