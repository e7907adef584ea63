//! Render-side contract for shadow nodes.
//!
//! The engine never draws. It attaches a bitmap once per shadow, pushes a
//! transform every frame, and detaches when the shadow goes away. Hosts
//! implement this over their own scene graph; `ShadowBuffer` implements it
//! over a flat instance buffer for the JS renderer.

use crate::api::types::NodeId;
use crate::components::layer::RenderLayer;
use crate::systems::bitmap::ShadowBitmap;
use crate::systems::geometry::ShadowSprite;

pub trait ShadowLayer {
    /// Whether nodes can be attached yet (the host's layer may be created
    /// after the subjects).
    fn is_ready(&self) -> bool;

    /// Attach a new node drawing `bitmap` on `layer`.
    fn attach(&mut self, bitmap: ShadowBitmap, layer: RenderLayer) -> NodeId;

    /// Remove a node. Returns false if it was not attached.
    fn detach(&mut self, node: NodeId) -> bool;

    /// Apply this frame's transform to a node.
    fn update(&mut self, node: NodeId, sprite: &ShadowSprite);
}
