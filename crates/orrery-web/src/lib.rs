pub mod runner;
pub mod substrate;

pub use runner::SceneRunner;
pub use substrate::BufferSubstrate;

/// Generate all `#[wasm_bindgen]` exports for a scene.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (scene_init, scene_tick, input handlers,
///   host lifecycle, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod game;
/// use game::SolarSystem;
///
/// orrery_web::export_game!(SolarSystem, "solar-system");
/// ```
///
/// The calling crate must depend on `wasm-bindgen`, `js-sys`, `web-sys`
/// (with the `Window` feature), `log`, `console_log` and
/// `console_error_panic_hook`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner<$game_type, $crate::BufferSubstrate>>> =
                RefCell::new(None);
        }

        /// Runs `f` against the runner; `None` before `scene_init`.
        fn with_runner<R>(
            f: impl FnOnce(&mut $crate::SceneRunner<$game_type, $crate::BufferSubstrate>) -> R,
        ) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: call scene_init() first", $game_name);
                        None
                    }
                }
            })
        }

        #[wasm_bindgen]
        pub fn scene_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let mut runner = $crate::SceneRunner::new(game, $crate::BufferSubstrate::new());
            if let Err(e) = runner.init() {
                log::error!("{}: scene composition failed: {}", $game_name, e);
                return;
            }

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn scene_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn scene_pointer_down(x: f32, y: f32, button: u8) {
            let time_ms = js_sys::Date::now();
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, button, time_ms }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_up(x: f32, y: f32) {
            let time_ms = js_sys::Date::now();
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y, time_ms }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_cancel() {
            with_runner(|r| r.push_input(InputEvent::PointerCancel));
        }

        #[wasm_bindgen]
        pub fn scene_wheel(delta: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
        }

        #[wasm_bindgen]
        pub fn scene_select(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::Select { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Host lifecycle ----

        #[wasm_bindgen]
        pub fn scene_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn scene_context_lost() {
            with_runner(|r| r.context_lost());
        }

        #[wasm_bindgen]
        pub fn scene_context_restored() {
            with_runner(|r| r.context_restored());
        }

        #[wasm_bindgen]
        pub fn scene_graphics_unavailable() {
            with_runner(|r| r.graphics_unavailable());
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message("WebGL is not available; the solar system cannot be shown.");
            }
        }

        #[wasm_bindgen]
        pub fn scene_texture_resolved(url: &str, loaded: bool) {
            with_runner(|r| r.texture_resolved(url, loaded));
        }

        /// URLs to fetch, newest requests since the previous call.
        #[wasm_bindgen]
        pub fn scene_take_texture_requests() -> js_sys::Array {
            let urls = with_runner(|r| r.take_texture_requests()).unwrap_or_default();
            urls.into_iter().map(|u| wasm_bindgen::JsValue::from_str(&u)).collect()
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_vertices_ptr() -> *const f32 {
            with_runner(|r| r.vertices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_vertex_count() -> u32 {
            with_runner(|r| r.vertex_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_uniforms_ptr() -> *const f32 {
            with_runner(|r| r.uniforms_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_uniform_count() -> u32 {
            with_runner(|r| r.uniform_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_field_count() -> u32 {
            with_runner(|r| r.field_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_field_ptr(index: u32) -> *const f32 {
            with_runner(|r| r.field_ptr(index)).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_field_len(index: u32) -> u32 {
            with_runner(|r| r.field_len(index)).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_loading_ring_ptr() -> *const f32 {
            with_runner(|r| r.loading_ring_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_loading_ptr() -> *const f32 {
            with_runner(|r| r.substrate().loading_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.substrate().camera_ptr()).unwrap_or(std::ptr::null())
        }

        // ---- Lighting accessors ----

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.substrate().lights_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.substrate().light_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_ambient_r() -> f32 {
            with_runner(|r| r.substrate().ambient()[0]).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_ambient_g() -> f32 {
            with_runner(|r| r.substrate().ambient()[1]).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_ambient_b() -> f32 {
            with_runner(|r| r.substrate().ambient()[2]).unwrap_or(0.0)
        }

        // ---- Selection ----

        #[wasm_bindgen]
        pub fn get_selected_identifier() -> Option<String> {
            with_runner(|r| r.selected_identifier()).flatten()
        }
    };
}
