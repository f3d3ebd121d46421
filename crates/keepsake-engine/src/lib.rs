//! Headless engine for staged browser presentations.
//!
//! A [`Show`] drives a sequence of stages at a fixed timestep. It never
//! touches the DOM: everything the host should draw, play or reveal is
//! published through flat float buffers described in [`bridge::protocol`].

pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;
pub mod error;

pub use api::show::{Show, ShowConfig, EngineContext};
pub use api::types::{EntityId, SoundEvent, HostEvent};
pub use components::{
    emitter::{EmitterComponent, EmissionMode, ParticleColorMode},
    entity::Entity,
    layer::RenderLayer,
    sprite::{SpriteComponent, AtlasId, BlendMode},
};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, Clock, Timers};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue, keys};
pub use bridge::protocol::ProtocolLayout;
pub use systems::effects::{EffectsState, Particle, Shell, Hue, Rng};
pub use systems::emitter::tick_emitters;
pub use systems::text::{FontConfig, build_text_entities, build_centered_text};
pub use error::EngineError;
pub use extensions::{
    Easing, lerp, lerp_vec2, ease, ease_vec2,
    TweenState, Tween, TweenTarget, TweenLoop,
};
