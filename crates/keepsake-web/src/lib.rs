pub mod runner;

pub use runner::ShowRunner;

#[doc(hidden)]
pub use keepsake_engine;

/// Wall-clock milliseconds since the epoch, shifted so that reading them as
/// UTC gives the viewer's local time. Countdown targets are local dates.
pub fn local_now_ms() -> f64 {
    let now = js_sys::Date::new_0();
    now.get_time() - now.get_timezone_offset() * 60_000.0
}

/// Emits the `#[wasm_bindgen]` surface for one show type.
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// keepsake_web::export_show!(BirthdaySurprise, "birthday-surprise");
/// ```
///
/// The expansion owns the show's `ShowRunner` in a `thread_local!` and
/// defines a private `with_runner` the calling crate can reuse for its own
/// exports. The show type needs a `new()` constructor, and the calling crate
/// must depend on `wasm-bindgen`, `log`, `console_log` and
/// `console_error_panic_hook`.
#[macro_export]
macro_rules! export_show {
    ($show_type:ty, $show_name:literal) => {
        thread_local! {
            static RUNNER: ::std::cell::RefCell<Option<$crate::ShowRunner<$show_type>>> =
                ::std::cell::RefCell::new(None);
        }

        /// None (with an error log) until `game_init` has run.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::ShowRunner<$show_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => Some(f(runner)),
                None => {
                    log::error!("{}: game_init() has not been called", $show_name);
                    None
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::ShowRunner::new(<$show_type>::new());
            runner.init();
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("{}: ready", $show_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            let now = $crate::local_now_ms();
            with_runner(|r| r.tick(dt, now));
        }

        /// Rejected settings keep the current ones and surface as a JS error.
        #[wasm_bindgen]
        pub fn game_configure(json: &str) -> Result<(), JsValue> {
            match with_runner(|r| r.configure(json)) {
                Some(Ok(())) => Ok(()),
                Some(Err(err)) => {
                    log::warn!("{}: {}", $show_name, err);
                    Err(JsValue::from_str(&err.to_string()))
                }
                None => Err(JsValue::from_str("not initialized")),
            }
        }

        /// `0xRRGGBB` per effect hue, in palette-texture row order.
        #[wasm_bindgen]
        pub fn get_effect_palette() -> Vec<u32> {
            $crate::keepsake_engine::Hue::ALL.iter().map(|hue| hue.rgb()).collect()
        }

        $crate::__input_exports! {
            game_pointer_down(x: f32, y: f32) => PointerDown { x, y },
            game_pointer_up(x: f32, y: f32) => PointerUp { x, y },
            game_pointer_move(x: f32, y: f32) => PointerMove { x, y },
            game_key_down(key_code: u32) => KeyDown { key_code },
            game_key_up(key_code: u32) => KeyUp { key_code },
            game_custom_event(kind: u32, a: f32, b: f32, c: f32) => Custom { kind, a, b, c },
        }

        $crate::__runner_getters! {
            get_header_ptr => header_ptr: *const f32 = ::std::ptr::null(),
            get_instances_ptr => instances_ptr: *const f32 = ::std::ptr::null(),
            get_instance_count => instance_count: u32 = 0,
            get_atlas_split => atlas_split: u32 = 0,
            get_effects_ptr => effects_ptr: *const f32 = ::std::ptr::null(),
            get_effects_vertex_count => effects_vertex_count: u32 = 0,
            get_sound_events_ptr => sound_events_ptr: *const f32 = ::std::ptr::null(),
            get_sound_events_len => sound_events_len: u32 = 0,
            get_host_events_ptr => host_events_ptr: *const f32 = ::std::ptr::null(),
            get_host_events_len => host_events_len: u32 = 0,
            get_world_width => world_width: f32 = 0.0,
            get_world_height => world_height: f32 = 0.0,
            get_stage_index => stage_index: u32 = 0,
            get_max_instances => max_instances: u32 = 0,
            get_max_effects_vertices => max_effects_vertices: u32 = 0,
            get_max_sounds => max_sounds: u32 = 0,
            get_max_events => max_events: u32 = 0,
            get_buffer_total_floats => buffer_total_floats: u32 = 0,
        }
    };
}

/// One export per host input callback, each queueing an `InputEvent`.
#[doc(hidden)]
#[macro_export]
macro_rules! __input_exports {
    ($( $name:ident ( $($arg:ident : $ty:ty),* ) => $variant:ident { $($field:ident),* } ),* $(,)?) => {
        $(
            #[wasm_bindgen]
            pub fn $name($($arg: $ty),*) {
                with_runner(|r| {
                    r.push_input($crate::keepsake_engine::InputEvent::$variant { $($field),* })
                });
            }
        )*
    };
}

/// Read-only runner accessors, answering `fallback` before `game_init`.
#[doc(hidden)]
#[macro_export]
macro_rules! __runner_getters {
    ($( $name:ident => $method:ident : $ty:ty = $fallback:expr ),* $(,)?) => {
        $(
            #[wasm_bindgen]
            pub fn $name() -> $ty {
                with_runner(|r| r.$method()).unwrap_or($fallback)
            }
        )*
    };
}
