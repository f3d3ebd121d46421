use keepsake_engine::{error, EngineContext, HostEvent, InputQueue, Show, ShowConfig};

use crate::config::CelebrationConfig;
use crate::content::Content;
use crate::error::ConfigError;
use crate::events::host;
use crate::sequencer::{Sequencer, StageId};
use crate::stage::{StageSignal, StageView};
use crate::stages::build_view;

/// The birthday show: walks the stages in order, one live view at a time.
pub struct BirthdaySurprise {
    config: CelebrationConfig,
    content: Content,
    sequencer: Sequencer,
    view: Option<Box<dyn StageView>>,
}

impl BirthdaySurprise {
    pub fn new() -> Self {
        Self {
            config: CelebrationConfig::default(),
            content: Content::embedded(),
            sequencer: Sequencer::new(),
            view: None,
        }
    }

    pub fn current_stage(&self) -> StageId {
        self.sequencer.current()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn settings(&self) -> &CelebrationConfig {
        &self.config
    }

    fn enter_current(&mut self, ctx: &mut EngineContext) {
        let stage = self.sequencer.current();
        let mut view = build_view(stage, &self.config, &self.content);
        view.enter(ctx);
        self.view = Some(view);
        ctx.emit_event(HostEvent::new(host::STAGE_CHANGED, stage.index() as f32, 0.0, 0.0));
    }

    /// Tear down the finished view and bring up the next one.
    fn hand_off(&mut self, ctx: &mut EngineContext) {
        let finished = self.sequencer.current();
        if finished.is_terminal() {
            return;
        }
        if let Some(mut view) = self.view.take() {
            view.exit(ctx);
        }
        ctx.reset_stage();

        if let Some(next) = self.sequencer.advance() {
            log::info!("stage {} -> {}", finished, next);
            self.enter_current(ctx);
        }
    }
}

impl Default for BirthdaySurprise {
    fn default() -> Self {
        Self::new()
    }
}

impl Show for BirthdaySurprise {
    fn config(&self) -> ShowConfig {
        ShowConfig {
            max_instances: 4096,
            max_effects_vertices: 32768,
            seed: 1112,
            ..ShowConfig::default()
        }
    }

    fn configure(&mut self, json: &str) -> error::Result<()> {
        let config = CelebrationConfig::from_json(json)?;
        config.validate().map_err(|err: ConfigError| {
            log::warn!("settings rejected: {}", err);
            err
        })?;
        log::info!("settings updated, applied from the next stage");
        self.config = config;
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!("show starts at {}", self.sequencer.current());
        self.enter_current(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        if view.update(ctx, input.as_slice()) == StageSignal::Complete {
            self.hand_off(ctx);
        }
    }

    fn stage_index(&self) -> u32 {
        self.sequencer.current().index()
    }
}
