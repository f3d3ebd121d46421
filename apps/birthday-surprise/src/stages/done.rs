use keepsake_engine::{EngineContext, InputEvent, TweenState};

use crate::content::ScreenCopy;
use crate::decor::{self, sprites};
use crate::sequencer::StageId;
use crate::stage::{StageSignal, StageView};

/// The closing thank-you. Stays on screen for good.
pub struct DoneView {
    copy: ScreenCopy,
    tweens: TweenState,
}

impl DoneView {
    pub fn new(copy: ScreenCopy) -> Self {
        Self {
            copy,
            tweens: TweenState::new(),
        }
    }
}

impl StageView for DoneView {
    fn stage(&self) -> StageId {
        StageId::Done
    }

    fn enter(&mut self, ctx: &mut EngineContext) {
        decor::spawn_backdrop(ctx, 1.0);
        decor::scatter_floaters(ctx, &mut self.tweens, sprites::HEART, 24, "hearts");
        decor::scatter_floaters(ctx, &mut self.tweens, sprites::SPARKLE, 12, "sparkles");
        super::spawn_copy(ctx, &self.copy, 300.0, "heading");
    }

    fn update(&mut self, ctx: &mut EngineContext, _input: &[InputEvent]) -> StageSignal {
        self.tweens.tick(ctx.dt(), &mut ctx.scene);
        StageSignal::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::input;
    use crate::stages::test_support::{run_for, send};

    #[test]
    fn never_completes() {
        let mut ctx = EngineContext::new();
        let mut view = DoneView::new(ScreenCopy::default());
        view.enter(&mut ctx);
        assert_eq!(ctx.scene.count_tagged("hearts"), 24);
        send(&mut view, &mut ctx, &[InputEvent::custom(input::CONTINUE)]);
        assert_eq!(run_for(&mut view, &mut ctx, 30.0), None);
    }
}
