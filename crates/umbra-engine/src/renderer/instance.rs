use bytemuck::{Pod, Zeroable};
use crate::api::types::NodeId;
use crate::components::layer::RenderLayer;
use crate::systems::bitmap::ShadowBitmap;
use crate::systems::geometry::ShadowSprite;
use super::traits::ShadowLayer;

/// Per-shadow render data read by the JS renderer.
/// Must match the JS protocol: 8 words = 32 bytes stride. The first seven
/// are `f32`; `node` is a `u32`, read through a `Uint32Array` view.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShadowInstance {
    /// Screen X of the sprite centre.
    pub x: f32,
    /// Screen Y of the sprite centre.
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// 1.0 when drawn, 0.0 when hidden.
    pub visible: f32,
    /// Node id, to look up the bitmap texture.
    pub node: u32,
}

impl ShadowInstance {
    pub const WORDS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::WORDS * 4;

    pub fn from_sprite(node: NodeId, sprite: &ShadowSprite) -> Self {
        Self {
            x: sprite.position.x,
            y: sprite.position.y,
            scale_x: sprite.scale.x,
            scale_y: sprite.scale.y,
            rotation: sprite.rotation,
            alpha: sprite.opacity as f32 / 255.0,
            visible: if sprite.visible { 1.0 } else { 0.0 },
            node: node.0,
        }
    }
}

struct ShadowNode {
    id: NodeId,
    layer: RenderLayer,
    bitmap: ShadowBitmap,
    instance: ShadowInstance,
}

/// Flat node store implementing `ShadowLayer` for a JS-side renderer.
///
/// The host uploads bitmaps for ids returned by `take_attached` and drops
/// textures for ids returned by `take_detached`; `pack` then lays out one
/// instance per node, ordered by layer.
pub struct ShadowBuffer {
    ready: bool,
    nodes: Vec<ShadowNode>,
    next_id: u32,
    attached: Vec<NodeId>,
    detached: Vec<NodeId>,
    instances: Vec<ShadowInstance>,
}

impl ShadowBuffer {
    pub fn new() -> Self {
        Self {
            ready: false,
            nodes: Vec::with_capacity(64),
            next_id: 1,
            attached: Vec::new(),
            detached: Vec::new(),
            instances: Vec::with_capacity(64),
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn bitmap(&self, node: NodeId) -> Option<&ShadowBitmap> {
        self.find(node).map(|n| &n.bitmap)
    }

    pub fn instance(&self, node: NodeId) -> Option<&ShadowInstance> {
        self.find(node).map(|n| &n.instance)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes attached since the last call.
    pub fn take_attached(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.attached)
    }

    /// Nodes detached since the last call.
    pub fn take_detached(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.detached)
    }

    /// Rebuild the packed instance array, back layers first.
    pub fn pack(&mut self) {
        self.nodes.sort_by_key(|n| (n.layer.as_u8(), n.id));
        self.instances.clear();
        self.instances.extend(self.nodes.iter().map(|n| n.instance));
    }

    pub fn instances(&self) -> &[ShadowInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to packed instance data for the JS side.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    fn find(&self, node: NodeId) -> Option<&ShadowNode> {
        self.nodes.iter().find(|n| n.id == node)
    }
}

impl Default for ShadowBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowLayer for ShadowBuffer {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn attach(&mut self, bitmap: ShadowBitmap, layer: RenderLayer) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(ShadowNode {
            id,
            layer,
            bitmap,
            instance: ShadowInstance { node: id.0, ..Default::default() },
        });
        self.attached.push(id);
        id
    }

    fn detach(&mut self, node: NodeId) -> bool {
        match self.nodes.iter().position(|n| n.id == node) {
            Some(idx) => {
                self.nodes.swap_remove(idx);
                self.attached.retain(|&id| id != node);
                self.detached.push(node);
                true
            }
            None => false,
        }
    }

    fn update(&mut self, node: NodeId, sprite: &ShadowSprite) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == node) {
            n.instance = ShadowInstance::from_sprite(node, sprite);
        }
    }
}
