use glam::Vec2;
use umbra_engine::api::types::{EventId, NodeId, ShadowContext, SubjectId};
use umbra_engine::components::transform::{Facing, FrameRect};
use umbra_engine::{
    GlobalShadowConfig, ShadowBitmap, ShadowBuffer, ShadowCommand, ShadowError, ShadowScene,
    SheetRegistry, Subject, SubjectKind,
};

/// Per-frame state pushed by the host for one subject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectState {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: f32,
    pub opacity: u8,
    pub visible: bool,
    /// Numpad direction (2, 4, 6, 8).
    pub direction: u8,
    pub jump_height: f32,
    pub bush_depth: f32,
    pub dead: bool,
}

/// Owns the shadow scene, sheets and instance buffer behind the wasm exports.
///
/// The host pushes subject state, calls `tick` once per frame, then reads
/// packed instances and uploads bitmaps for newly attached nodes.
pub struct ShadowRunner {
    scene: ShadowScene,
    sheets: SheetRegistry,
    buffer: ShadowBuffer,
    config: GlobalShadowConfig,
}

impl ShadowRunner {
    pub fn new() -> Self {
        Self {
            scene: ShadowScene::new(ShadowContext::Map),
            sheets: SheetRegistry::new(),
            buffer: ShadowBuffer::new(),
            config: GlobalShadowConfig::default(),
        }
    }

    pub fn load_config(&mut self, json: &str) -> Result<(), ShadowError> {
        self.config = GlobalShadowConfig::from_json(json)?;
        Ok(())
    }

    /// Tear the current scene down and start a new one.
    pub fn enter_scene(&mut self, context: ShadowContext, map_note: &str) {
        self.scene.teardown(&mut self.buffer);
        self.scene = ShadowScene::new(context);
        self.scene.load_map_note(map_note);
        self.buffer.pack();
    }

    pub fn set_layer_ready(&mut self, ready: bool) {
        self.buffer.set_ready(ready);
    }

    pub fn load_sheet(&mut self, name: &str, width: u32, height: u32, rgba: Vec<u8>) -> bool {
        self.sheets.insert_rgba(name, width, height, rgba)
    }

    pub fn spawn(&mut self, kind: SubjectKind, name: &str, image: &str, note: &str) -> SubjectId {
        let id = self.scene.next_id();
        self.scene.spawn(Subject::new(id, kind).with_name(name).with_image(image).with_note(note))
    }

    pub fn despawn(&mut self, id: SubjectId) -> bool {
        self.scene.despawn(id, &mut self.buffer).is_some()
    }

    pub fn update_subject(&mut self, id: SubjectId, state: SubjectState) -> bool {
        let Some(subject) = self.scene.get_mut(id) else {
            return false;
        };
        let t = &mut subject.transform;
        t.screen_pos = Vec2::new(state.x, state.y);
        t.scale = Vec2::new(state.scale_x, state.scale_y);
        t.rotation = state.rotation;
        t.opacity = state.opacity;
        t.visible = state.visible;
        if let Some(facing) = Facing::from_numpad(state.direction) {
            t.facing = facing;
        }
        t.jump_height = state.jump_height;
        t.bush_depth = state.bush_depth;
        t.dead = state.dead;
        true
    }

    pub fn set_frame(&mut self, id: SubjectId, frame: FrameRect) -> bool {
        self.scene.get_mut(id).map(|s| s.transform.frame = frame).is_some()
    }

    pub fn set_image(&mut self, id: SubjectId, image: &str) -> bool {
        self.scene.get_mut(id).map(|s| s.image_name = image.to_string()).is_some()
    }

    pub fn set_side_view(&mut self, id: SubjectId, side_view: bool) -> bool {
        self.scene.get_mut(id).map(|s| s.transform.side_view = side_view).is_some()
    }

    /// Parse and run a command line. `invoker` is the running event, if any.
    pub fn command(&mut self, line: &str, invoker: Option<EventId>) -> Result<usize, ShadowError> {
        let command = ShadowCommand::parse(line)?;
        Ok(self.scene.execute(&command, invoker, &self.config))
    }

    pub fn tick(&mut self) {
        self.scene.tick(&self.sheets, &mut self.buffer, &self.config);
        self.buffer.pack();
    }

    pub fn teardown(&mut self) {
        self.scene.teardown(&mut self.buffer);
        self.buffer.pack();
    }

    pub fn host_shadow_visible(&self, id: SubjectId) -> bool {
        self.scene.host_shadow_visible(id)
    }

    // ---- Buffer accessors ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.buffer.instance_count()
    }

    pub fn take_attached(&mut self) -> Vec<u32> {
        self.buffer.take_attached().into_iter().map(|n| n.0).collect()
    }

    pub fn take_detached(&mut self) -> Vec<u32> {
        self.buffer.take_detached().into_iter().map(|n| n.0).collect()
    }

    pub fn bitmap(&self, node: u32) -> Option<&ShadowBitmap> {
        self.buffer.bitmap(NodeId(node))
    }
}

impl Default for ShadowRunner {
    fn default() -> Self {
        Self::new()
    }
}
