pub mod emitter;
pub mod entity;
pub mod layer;
pub mod sprite;
