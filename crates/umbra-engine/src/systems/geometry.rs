//! Per-frame shadow geometry.
//!
//! Derives the shadow sprite transform from a resolved profile and the
//! subject's current transform snapshot.

use glam::Vec2;
use crate::assets::config::GlobalShadowConfig;
use crate::components::profile::{ShadowCategory, ShadowProfile, ShadowShape};
use crate::components::transform::SubjectTransform;
use crate::core::toggles::ShadowToggles;

/// Transform of one shadow sprite for the current frame.
///
/// The sprite is anchored at its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSprite {
    /// Screen position.
    pub position: Vec2,
    pub scale: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Opacity (0-255).
    pub opacity: u8,
    pub visible: bool,
    pub shape: ShadowShape,
    /// Horizontal offset was mirrored this frame.
    pub mirrored: bool,
}

impl ShadowSprite {
    /// An invisible sprite, used while the subject has nothing to measure.
    pub fn hidden(shape: ShadowShape) -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ZERO,
            rotation: 0.0,
            opacity: 0,
            visible: false,
            shape,
            mirrored: false,
        }
    }
}

/// Sign applied to the horizontal offset: product of the four mirror
/// conditions, so an odd number of active conditions mirrors the shadow.
pub fn mirror_sign(
    profile: &ShadowProfile,
    subject: &SubjectTransform,
    toggles: &ShadowToggles,
    config: &GlobalShadowConfig,
) -> f32 {
    let flips = [
        config.mirror_by_facing && subject.facing.mirrors_shadow(),
        subject.bitmap.is_some_and(|b| b.scaled.x < 0.0),
        subject.side_view && profile.category == ShadowCategory::Enemy,
        toggles.mirror_x,
    ];
    flips.iter().fold(1.0, |sign, &flip| if flip { -sign } else { sign })
}

/// Shrink factor for a subject lifted `jump_height` pixels off the ground.
///
/// 1.0 on the ground; falls linearly with height in tiles and is floored at
/// `min_jump_scale` so very high jumps never invert the shadow.
pub fn jump_shrink(jump_height: f32, config: &GlobalShadowConfig) -> f32 {
    if jump_height <= 0.0 {
        return 1.0;
    }
    let tiles = jump_height / config.tile_size[1];
    (1.0 - tiles / config.jump_shrink_divisor).max(config.min_jump_scale)
}

/// Normalize degrees into [0, 360).
pub fn normalize_degrees(degrees: f32) -> f32 {
    let d = degrees.rem_euclid(360.0);
    if d >= 360.0 { 0.0 } else { d }
}

/// Shadow opacity for a subject drawn at `subject_opacity`.
pub fn shadow_opacity(profile: &ShadowProfile, subject: &SubjectTransform, config: &GlobalShadowConfig) -> u8 {
    if subject.dead && config.hides_on_death(profile.category) {
        return 0;
    }
    let base = profile.opacity_base as f32;
    let scaled = subject.opacity as f32 * base / 255.0;
    scaled.min(base).round() as u8
}

/// Compute the shadow sprite for this frame.
///
/// Returns None when the profile casts nothing or the subject has no
/// measurable bitmap (unmeasured, or zero width/height).
pub fn compute_transform(
    profile: &ShadowProfile,
    subject: &SubjectTransform,
    toggles: &ShadowToggles,
    config: &GlobalShadowConfig,
) -> Option<ShadowSprite> {
    if !profile.casts_shadow() {
        return None;
    }
    let size = subject.bitmap.filter(|b| !b.is_empty())?;

    let sign_x = mirror_sign(profile, subject, toggles, config);
    let sign_y = if toggles.mirror_y { -1.0 } else { 1.0 };

    let offset = Vec2::new(
        profile.offset.x * sign_x * size.scaled.x.abs(),
        profile.offset.y * sign_y * size.scaled.y.abs(),
    );
    let position = subject.ground_anchor() + offset;

    let shrink = jump_shrink(subject.jump_height, config);
    let scale = subject.scale * shrink * profile.scale * Vec2::new(1.0, sign_y);

    let degrees = normalize_degrees(subject.rotation.to_degrees()) + profile.rotation;

    Some(ShadowSprite {
        position,
        scale,
        rotation: degrees.to_radians(),
        opacity: shadow_opacity(profile, subject, config),
        visible: subject.visible && !toggles.hidden,
        shape: profile.shape,
        mirrored: sign_x < 0.0,
    })
}
