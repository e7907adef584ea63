//! `wasm-bindgen` exports driving the shadow engine from a JavaScript host.
//!
//! One `ShadowRunner` lives in a `thread_local!`; every export borrows it.
//! Subject ids, node ids and event ids cross the boundary as plain `u32`.

pub mod runner;

pub use runner::{ShadowRunner, SubjectState};

use std::cell::RefCell;
use umbra_engine::api::types::{EventId, ShadowContext, SubjectId};
use umbra_engine::components::transform::FrameRect;
use umbra_engine::{SubjectKind, VehicleKind};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<ShadowRunner> = RefCell::new(ShadowRunner::new());
}

fn with_runner<R>(f: impl FnOnce(&mut ShadowRunner) -> R) -> R {
    RUNNER.with(|cell| f(&mut cell.borrow_mut()))
}

#[wasm_bindgen]
pub fn shadow_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("umbra: initialized");
}

#[wasm_bindgen]
pub fn shadow_load_config(json: &str) -> bool {
    with_runner(|r| match r.load_config(json) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("{}", e);
            false
        }
    })
}

/// `battle` selects battle defaults; `map_note` may carry a `<shadow:...>` tag.
#[wasm_bindgen]
pub fn shadow_enter_scene(battle: bool, map_note: &str) {
    let context = if battle { ShadowContext::Battle } else { ShadowContext::Map };
    with_runner(|r| r.enter_scene(context, map_note));
}

#[wasm_bindgen]
pub fn shadow_teardown() {
    with_runner(|r| r.teardown());
}

#[wasm_bindgen]
pub fn shadow_set_layer_ready(ready: bool) {
    with_runner(|r| r.set_layer_ready(ready));
}

#[wasm_bindgen]
pub fn shadow_load_sheet(name: &str, width: u32, height: u32, rgba: Vec<u8>) -> bool {
    with_runner(|r| r.load_sheet(name, width, height, rgba))
}

// ---- Subjects ----

#[wasm_bindgen]
pub fn shadow_spawn_player(image: &str, note: &str) -> u32 {
    with_runner(|r| r.spawn(SubjectKind::Player, "", image, note).0)
}

#[wasm_bindgen]
pub fn shadow_spawn_follower(member_index: u32, image: &str, note: &str) -> u32 {
    let kind = SubjectKind::Follower { member_index: member_index as usize };
    with_runner(|r| r.spawn(kind, "", image, note).0)
}

#[wasm_bindgen]
pub fn shadow_spawn_event(event_id: u32, tile: bool, name: &str, image: &str, note: &str) -> u32 {
    let kind = SubjectKind::Event { event_id: EventId(event_id), tile };
    with_runner(|r| r.spawn(kind, name, image, note).0)
}

/// `kind`: 0 boat, 1 ship, anything else airship.
#[wasm_bindgen]
pub fn shadow_spawn_vehicle(kind: u8, image: &str) -> u32 {
    let vehicle = match kind {
        0 => VehicleKind::Boat,
        1 => VehicleKind::Ship,
        _ => VehicleKind::Airship,
    };
    with_runner(|r| r.spawn(SubjectKind::Vehicle(vehicle), "", image, "").0)
}

#[wasm_bindgen]
pub fn shadow_spawn_actor(actor_id: u32, image: &str, note: &str) -> u32 {
    with_runner(|r| r.spawn(SubjectKind::Actor { actor_id }, "", image, note).0)
}

#[wasm_bindgen]
pub fn shadow_spawn_enemy(enemy_id: u32, index: u32, image: &str, note: &str) -> u32 {
    let kind = SubjectKind::Enemy { enemy_id, index: index as usize };
    with_runner(|r| r.spawn(kind, "", image, note).0)
}

#[wasm_bindgen]
pub fn shadow_despawn(id: u32) -> bool {
    with_runner(|r| r.despawn(SubjectId(id)))
}

#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn shadow_update_subject(
    id: u32,
    x: f32,
    y: f32,
    scale_x: f32,
    scale_y: f32,
    rotation: f32,
    opacity: u8,
    visible: bool,
    direction: u8,
    jump_height: f32,
    bush_depth: f32,
    dead: bool,
) -> bool {
    let state = SubjectState {
        x,
        y,
        scale_x,
        scale_y,
        rotation,
        opacity,
        visible,
        direction,
        jump_height,
        bush_depth,
        dead,
    };
    with_runner(|r| r.update_subject(SubjectId(id), state))
}

#[wasm_bindgen]
pub fn shadow_set_frame(id: u32, x: f32, y: f32, width: f32, height: f32) -> bool {
    with_runner(|r| r.set_frame(SubjectId(id), FrameRect::new(x, y, width, height)))
}

#[wasm_bindgen]
pub fn shadow_set_image(id: u32, image: &str) -> bool {
    with_runner(|r| r.set_image(SubjectId(id), image))
}

#[wasm_bindgen]
pub fn shadow_set_side_view(id: u32, side_view: bool) -> bool {
    with_runner(|r| r.set_side_view(SubjectId(id), side_view))
}

#[wasm_bindgen]
pub fn shadow_host_shadow_visible(id: u32) -> bool {
    with_runner(|r| r.host_shadow_visible(SubjectId(id)))
}

// ---- Commands & frame ----

/// Run a `shadow ...` command line. `invoker` is the running event id, 0 for none.
/// Returns the number of subjects changed, or -1 when the line was rejected.
#[wasm_bindgen]
pub fn shadow_command(line: &str, invoker: u32) -> i32 {
    let invoker = (invoker > 0).then_some(EventId(invoker));
    with_runner(|r| match r.command(line, invoker) {
        Ok(n) => n as i32,
        Err(e) => {
            log::warn!("{}", e);
            -1
        }
    })
}

#[wasm_bindgen]
pub fn shadow_tick() {
    with_runner(|r| r.tick());
}

// ---- Data accessors ----

/// 32-byte records: seven `f32` fields, then the `u32` node id.
#[wasm_bindgen]
pub fn get_shadow_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_shadow_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

/// Node ids attached since the last call; upload their bitmaps.
#[wasm_bindgen]
pub fn take_attached_nodes() -> js_sys::Uint32Array {
    let ids = with_runner(|r| r.take_attached());
    js_sys::Uint32Array::from(ids.as_slice())
}

/// Node ids detached since the last call; drop their textures.
#[wasm_bindgen]
pub fn take_detached_nodes() -> js_sys::Uint32Array {
    let ids = with_runner(|r| r.take_detached());
    js_sys::Uint32Array::from(ids.as_slice())
}

/// `[width, height]` of a node's bitmap, empty if the node is gone.
#[wasm_bindgen]
pub fn get_bitmap_size(node: u32) -> js_sys::Uint32Array {
    let size = with_runner(|r| r.bitmap(node).map(|b| [b.width(), b.height()]));
    match size {
        Some(dims) => js_sys::Uint32Array::from(&dims[..]),
        None => js_sys::Uint32Array::new_with_length(0),
    }
}

/// RGBA pixels of a node's bitmap, empty if the node is gone.
#[wasm_bindgen]
pub fn get_bitmap_rgba(node: u32) -> js_sys::Uint8ClampedArray {
    with_runner(|r| match r.bitmap(node) {
        Some(bitmap) => js_sys::Uint8ClampedArray::from(bitmap.as_raw().as_slice()),
        None => js_sys::Uint8ClampedArray::new_with_length(0),
    })
}
