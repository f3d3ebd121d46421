use keepsake_engine::bridge::protocol::{
    self, ProtocolLayout, HEADER_FLOATS,
};
use keepsake_engine::systems::render::build_render_buffer;
use keepsake_engine::{
    tick_emitters, EngineContext, EngineError, FixedTimestep, HostEvent, InputEvent, InputQueue,
    RenderBuffer, Show, ShowConfig,
};

/// Generic show runner that wires up the engine loop.
///
/// Each concrete show keeps a `thread_local!` ShowRunner and exports free
/// functions via `#[wasm_bindgen]` (see [`export_show!`](crate::export_show)),
/// because wasm-bindgen cannot export generic structs directly.
pub struct ShowRunner<S: Show> {
    show: S,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: ShowConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame_counter: u32,
    header: [f32; HEADER_FLOATS],
    /// Sound ids packed as floats for shared-buffer reads.
    sound_buffer: Vec<f32>,
}

impl<S: Show> ShowRunner<S> {
    pub fn new(show: S) -> Self {
        let config = show.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            timestep: FixedTimestep::new(config.fixed_dt),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            header: [0.0; HEADER_FLOATS],
            frame_counter: 0,
            initialized: false,
            show,
            layout,
            config,
        }
    }

    /// Initialize the show. Call once after construction.
    pub fn init(&mut self) {
        self.show.init(&mut self.ctx);
        self.initialized = true;
        self.publish_frame();
    }

    /// Forward settings JSON to the show.
    pub fn configure(&mut self, json: &str) -> Result<(), EngineError> {
        self.show.configure(json)
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed-step updates, effects, render buffers.
    ///
    /// `local_ms` is the host's wall clock shifted into local time. Input
    /// queued since the last frame is seen by the first fixed step only.
    pub fn tick(&mut self, dt: f32, local_ms: f64) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.ctx.clock.set_local_ms(local_ms);

        let step_dt = self.timestep.dt();
        let steps = self.timestep.accumulate(dt);
        let mut pending = InputQueue::from_iter(self.input.drain());
        for _ in 0..steps {
            self.ctx.clock.advance();
            self.show.update(&mut self.ctx, &pending);
            if !pending.is_empty() {
                pending = InputQueue::new();
            }
            tick_emitters(&mut self.ctx.scene, &mut self.ctx.effects, step_dt);
            self.ctx.effects.tick(step_dt);
        }
        if steps == 0 && !pending.is_empty() {
            // Not enough time for a step; keep the input for the next frame.
            for event in pending.drain() {
                self.input.push(event);
            }
        }

        self.publish_frame();
    }

    fn publish_frame(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);

        self.ctx.effects.rebuild_effects_buffer();

        if self.ctx.sounds.len() > self.config.max_sounds {
            log::warn!("dropping {} sound events", self.ctx.sounds.len() - self.config.max_sounds);
        }
        self.sound_buffer.clear();
        self.sound_buffer.extend(
            self.ctx.sounds.iter().take(self.config.max_sounds).map(|s| s.0 as f32),
        );

        if self.ctx.events.len() > self.config.max_events {
            log::warn!("dropping {} host events", self.ctx.events.len() - self.config.max_events);
            self.ctx.events.truncate(self.config.max_events);
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.write_header();
    }

    fn write_header(&mut self) {
        let h = &mut self.header;
        h[protocol::HEADER_LOCK] = 0.0;
        h[protocol::HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        h[protocol::HEADER_MAX_INSTANCES] = self.layout.instances.capacity as f32;
        h[protocol::HEADER_INSTANCE_COUNT] = self.render_buffer.instance_count() as f32;
        h[protocol::HEADER_ATLAS_SPLIT] = self.render_buffer.atlas_split() as f32;
        h[protocol::HEADER_MAX_EFFECTS_VERTICES] = self.layout.effects.capacity as f32;
        h[protocol::HEADER_EFFECTS_VERTEX_COUNT] = self.ctx.effects.effects_vertex_count() as f32;
        h[protocol::HEADER_WORLD_WIDTH] = self.config.world_width;
        h[protocol::HEADER_WORLD_HEIGHT] = self.config.world_height;
        h[protocol::HEADER_MAX_SOUNDS] = self.layout.sounds.capacity as f32;
        h[protocol::HEADER_SOUND_COUNT] = self.sound_buffer.len() as f32;
        h[protocol::HEADER_MAX_EVENTS] = self.layout.events.capacity as f32;
        h[protocol::HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        h[protocol::HEADER_PROTOCOL_VERSION] = protocol::PROTOCOL_VERSION;
        h[protocol::HEADER_STAGE_INDEX] = self.show.stage_index() as f32;
        h[protocol::HEADER_ELAPSED] = self.ctx.clock.elapsed() as f32;
    }

    pub fn show(&self) -> &S {
        &self.show
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Host events published by the last frame.
    pub fn host_events(&self) -> &[HostEvent] {
        &self.ctx.events
    }

    /// Sound ids published by the last frame.
    pub fn sounds(&self) -> &[f32] {
        &self.sound_buffer
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn effects_ptr(&self) -> *const f32 {
        self.ctx.effects.effects_buffer_ptr()
    }

    pub fn effects_vertex_count(&self) -> u32 {
        self.ctx.effects.effects_vertex_count() as u32
    }

    pub fn sound_events_ptr(&self) -> *const f32 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn host_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn host_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn atlas_split(&self) -> u32 {
        self.render_buffer.atlas_split()
    }

    pub fn stage_index(&self) -> u32 {
        self.show.stage_index()
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.instances.capacity as u32
    }

    pub fn max_effects_vertices(&self) -> u32 {
        self.layout.effects.capacity as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.sounds.capacity as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.events.capacity as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.total_floats() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_engine::{Entity, SoundEvent, SpriteComponent};

    /// Counts steps and the input each step saw.
    #[derive(Default)]
    struct Probe {
        steps: u32,
        inputs_seen: Vec<usize>,
        configured: Option<String>,
    }

    impl Show for Probe {
        fn configure(&mut self, json: &str) -> keepsake_engine::error::Result<()> {
            if json.trim().is_empty() {
                return Err(EngineError::InvalidSettings("empty".into()));
            }
            self.configured = Some(json.to_string());
            Ok(())
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.scene.spawn(Entity::new(id).with_sprite(SpriteComponent::default()));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.steps += 1;
            self.inputs_seen.push(input.len());
            if !input.is_empty() {
                ctx.emit_event(HostEvent::signal(5));
                ctx.emit_sound(SoundEvent(3));
            }
        }

        fn stage_index(&self) -> u32 {
            self.steps
        }
    }

    fn runner() -> ShowRunner<Probe> {
        let mut runner = ShowRunner::new(Probe::default());
        runner.init();
        runner
    }

    #[test]
    fn input_reaches_first_step_only() {
        let mut r = runner();
        r.push_input(InputEvent::key(13));
        r.push_input(InputEvent::custom(1));
        r.tick(3.0 / 60.0 + 0.001, 0.0);

        assert_eq!(r.show().inputs_seen, vec![2, 0, 0]);
        assert_eq!(r.host_events().len(), 1);
        assert_eq!(r.sounds(), &[3.0]);
    }

    #[test]
    fn input_waits_for_a_step() {
        let mut r = runner();
        r.push_input(InputEvent::custom(1));
        r.tick(0.001, 0.0);
        assert_eq!(r.show().steps, 0);

        r.tick(1.0 / 60.0, 0.0);
        assert_eq!(r.show().inputs_seen, vec![1]);
    }

    #[test]
    fn frame_data_is_cleared_between_frames() {
        let mut r = runner();
        r.push_input(InputEvent::custom(1));
        r.tick(1.0 / 60.0 + 0.001, 0.0);
        assert_eq!(r.host_events_len(), 1);

        r.tick(1.0 / 60.0, 0.0);
        assert_eq!(r.host_events_len(), 0);
        assert_eq!(r.sound_events_len(), 0);
    }

    #[test]
    fn header_describes_the_frame() {
        let mut r = runner();
        r.tick(2.0 / 60.0 + 0.001, 1_700_000_000_000.0);

        let h = r.header();
        assert_eq!(h[protocol::HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(h[protocol::HEADER_STAGE_INDEX], 2.0);
        assert_eq!(h[protocol::HEADER_MAX_INSTANCES], 512.0);
        assert_eq!(h[protocol::HEADER_PROTOCOL_VERSION], protocol::PROTOCOL_VERSION);
        assert!((h[protocol::HEADER_ELAPSED] - 2.0 / 60.0).abs() < 1e-4);
        assert_eq!(r.context().clock.local_ms(), 1_700_000_000_000.0);
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut r = ShowRunner::new(Probe::default());
        r.tick(1.0, 0.0);
        assert_eq!(r.show().steps, 0);
    }

    #[test]
    fn configure_forwards_errors() {
        let mut r = runner();
        assert!(r.configure("").is_err());
        assert!(r.configure("{}").is_ok());
        assert_eq!(r.show().configured.as_deref(), Some("{}"));
    }
}
