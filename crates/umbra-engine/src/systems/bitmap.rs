//! Shadow bitmap construction.
//!
//! Bitmaps are built once per shadow (re)creation, not per frame. The canvas
//! is three times the subject's frame size with the shape centred, leaving
//! room for blur and for scales above 1.
//!
//! Blur is a Gaussian with sigma = radius / 2, matching canvas `shadowBlur`.
//! Some host renderers cannot draw blurred silhouettes; that is a host
//! limitation, keep the silhouette blur at 0 for those.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use crate::components::profile::{ShadowProfile, ShadowShape};
use crate::components::transform::{BitmapSize, FrameRect};

pub type ShadowBitmap = RgbaImage;

/// Canvas size relative to the frame size.
pub const CANVAS_FACTOR: u32 = 3;
/// Largest frame side, in pixels, a bitmap is built for.
pub const MAX_FRAME_SIDE: u32 = 2048;
/// Ellipse alpha at the centre and at the rim.
const ELLIPSE_ALPHA_CENTER: f32 = 1.0;
const ELLIPSE_ALPHA_RIM: f32 = 0.5;

/// Source pixels for a silhouette: the subject's sheet and current frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSource<'a> {
    pub sheet: &'a RgbaImage,
    pub frame: FrameRect,
    pub bush_depth: f32,
}

/// Build the bitmap for a profile. Returns None when there is nothing to
/// draw yet (no shape, no usable size, or the silhouette source is missing).
pub fn build_bitmap(profile: &ShadowProfile, size: BitmapSize, source: Option<FrameSource>) -> Option<ShadowBitmap> {
    let width = frame_side(size.original.x)?;
    let height = frame_side(size.original.y)?;

    let canvas = match profile.shape {
        ShadowShape::None => return None,
        ShadowShape::Silhouette => silhouette(width, height, source?)?,
        ShadowShape::Ellipse => ellipse(width, height)?,
    };

    if profile.blur_radius > 0.0 {
        Some(imageops::blur(&canvas, profile.blur_radius / 2.0))
    } else {
        Some(canvas)
    }
}

/// Rounded pixel length of a frame side; None when zero, non-finite or
/// above `MAX_FRAME_SIDE`.
fn frame_side(len: f32) -> Option<u32> {
    let len = len.abs().round();
    if !len.is_finite() || len < 1.0 || len > MAX_FRAME_SIDE as f32 {
        return None;
    }
    Some(len as u32)
}

fn silhouette(width: u32, height: u32, source: FrameSource) -> Option<ShadowBitmap> {
    let (sheet_w, sheet_h) = source.sheet.dimensions();
    let frame = source.frame;
    let x = (frame.x.max(0.0) as u32).min(sheet_w);
    let y = (frame.y.max(0.0) as u32).min(sheet_h);
    let bush = source.bush_depth.max(0.0) as u32;
    let fw = (frame.width.max(0.0) as u32).min(sheet_w - x);
    let fh = (frame.height.max(0.0) as u32).min(sheet_h - y).saturating_sub(bush);
    let target_h = height.saturating_sub(bush);
    if fw == 0 || fh == 0 || target_h == 0 {
        return None;
    }

    let mut cell = imageops::crop_imm(source.sheet, x, y, fw, fh).to_image();
    if (fw, fh) != (width, target_h) {
        cell = imageops::resize(&cell, width, target_h, FilterType::Nearest);
    }
    for px in cell.pixels_mut() {
        px.0[0] = 0;
        px.0[1] = 0;
        px.0[2] = 0;
    }

    let mut canvas = RgbaImage::new(width.checked_mul(CANVAS_FACTOR)?, height.checked_mul(CANVAS_FACTOR)?);
    let left = (canvas.width() - width) / 2;
    let top = (canvas.height() - target_h) / 2;
    imageops::overlay(&mut canvas, &cell, left as i64, top as i64);
    Some(canvas)
}

/// Filled disc, diameter = frame width, radial alpha gradient.
/// The profile scale turns it into the final oval.
fn ellipse(width: u32, height: u32) -> Option<ShadowBitmap> {
    let cw = width.checked_mul(CANVAS_FACTOR)?;
    let ch = height.checked_mul(CANVAS_FACTOR)?;
    let cx = cw as f32 / 2.0;
    let cy = ch as f32 / 2.0;
    let radius = width as f32 / 2.0;

    Some(RgbaImage::from_fn(cw, ch, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let t = (dx * dx + dy * dy).sqrt() / radius;
        if t > 1.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let alpha = ELLIPSE_ALPHA_CENTER + (ELLIPSE_ALPHA_RIM - ELLIPSE_ALPHA_CENTER) * t;
        Rgba([0, 0, 0, (alpha * 255.0).round() as u8])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use crate::components::profile::ShadowCategory;

    fn profile(shape: ShadowShape, blur_radius: f32) -> ShadowProfile {
        ShadowProfile {
            category: ShadowCategory::Character,
            shape,
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            opacity_base: 128,
            blur_radius,
            solid: blur_radius == 0.0,
        }
    }

    fn size(w: f32, h: f32) -> BitmapSize {
        BitmapSize::new(Vec2::new(w, h), Vec2::ONE)
    }

    /// 4×4 sheet: left half opaque red, right half transparent.
    fn sheet() -> RgbaImage {
        RgbaImage::from_fn(4, 4, |x, _| {
            if x < 2 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 0, 0]) }
        })
    }

    #[test]
    fn silhouette_is_blackened_frame() {
        let sheet = sheet();
        let source = FrameSource { sheet: &sheet, frame: FrameRect::new(0.0, 0.0, 4.0, 4.0), bush_depth: 0.0 };
        let bmp = build_bitmap(&profile(ShadowShape::Silhouette, 0.0), size(4.0, 4.0), Some(source)).unwrap();

        assert_eq!(bmp.dimensions(), (12, 12));
        // Frame is centred at (4, 4).
        assert_eq!(*bmp.get_pixel(4, 4), Rgba([0, 0, 0, 255]));
        assert_eq!(bmp.get_pixel(6, 4).0[3], 0);
        assert_eq!(bmp.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn silhouette_needs_source() {
        assert!(build_bitmap(&profile(ShadowShape::Silhouette, 0.0), size(4.0, 4.0), None).is_none());
    }

    #[test]
    fn bush_depth_crops_bottom() {
        let sheet = sheet();
        let source = FrameSource { sheet: &sheet, frame: FrameRect::new(0.0, 0.0, 4.0, 4.0), bush_depth: 2.0 };
        let bmp = build_bitmap(&profile(ShadowShape::Silhouette, 0.0), size(4.0, 4.0), Some(source)).unwrap();
        let opaque = bmp.pixels().filter(|p| p.0[3] > 0).count();
        assert_eq!(opaque, 4);
    }

    #[test]
    fn ellipse_is_centered_disc() {
        let bmp = build_bitmap(&profile(ShadowShape::Ellipse, 0.0), size(10.0, 20.0), None).unwrap();
        assert_eq!(bmp.dimensions(), (30, 60));
        let centre = bmp.get_pixel(15, 30).0[3];
        assert!(centre > 230, "centre alpha was {}", centre);
        assert_eq!(bmp.get_pixel(0, 0).0[3], 0);
        // Outside the radius horizontally.
        assert_eq!(bmp.get_pixel(21, 30).0[3], 0);
        let near_rim = bmp.get_pixel(19, 30).0[3];
        assert!(near_rim < centre);
    }

    #[test]
    fn blur_spreads_alpha() {
        let sharp = build_bitmap(&profile(ShadowShape::Ellipse, 0.0), size(10.0, 10.0), None).unwrap();
        let blurred = build_bitmap(&profile(ShadowShape::Ellipse, 6.0), size(10.0, 10.0), None).unwrap();
        assert_eq!(sharp.dimensions(), blurred.dimensions());
        assert_eq!(sharp.get_pixel(21, 15).0[3], 0);
        assert!(blurred.get_pixel(21, 15).0[3] > 0);
    }

    #[test]
    fn nothing_to_draw() {
        assert!(build_bitmap(&profile(ShadowShape::None, 0.0), size(4.0, 4.0), None).is_none());
        assert!(build_bitmap(&profile(ShadowShape::Ellipse, 0.0), size(0.0, 4.0), None).is_none());
    }

    #[test]
    fn unusable_sizes_build_nothing() {
        let ellipse = profile(ShadowShape::Ellipse, 0.0);
        assert!(build_bitmap(&ellipse, size(f32::INFINITY, 48.0), None).is_none());
        assert!(build_bitmap(&ellipse, size(48.0, f32::NAN), None).is_none());
        assert!(build_bitmap(&ellipse, size(1.0e9, 48.0), None).is_none());
        assert!(build_bitmap(&ellipse, size(0.4, 48.0), None).is_none());

        let bmp = build_bitmap(&ellipse, size(-48.0, 48.0), None).unwrap();
        assert_eq!(bmp.dimensions(), (144, 144));
    }
}
