use keepsake_engine::{EngineContext, InputEvent};

use crate::sequencer::StageId;

/// What a view reports after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSignal {
    Running,
    /// Hand control back to the sequencer. Only the first one counts.
    Complete,
}

/// One screen of the show.
///
/// A view owns all of its state (timers, counters, tweens). The show calls
/// `enter` once, `update` every fixed step until it reports `Complete`, then
/// `exit` once before dropping it.
pub trait StageView {
    fn stage(&self) -> StageId;

    /// Spawn the screen's entities and start its timers.
    fn enter(&mut self, _ctx: &mut EngineContext) {}

    fn update(&mut self, ctx: &mut EngineContext, input: &[InputEvent]) -> StageSignal;

    /// Release anything the host holds on the view's behalf (audio, microphone, scripts).
    fn exit(&mut self, _ctx: &mut EngineContext) {}
}
