//! Sheet layout conventions: how many animation frames a sheet holds,
//! which determines the pixel size of a single frame.

use glam::Vec2;
use crate::components::subject::{Subject, SubjectKind};
use crate::components::transform::BitmapSize;

/// Prefix marking a sheet that holds one single frame.
pub const SINGLE_FRAME_PREFIX: &str = "k1_";
/// Prefix marking an object character (drawn without the usual offset).
pub const OBJECT_PREFIX: char = '!';
/// Prefix marking a sheet that holds a single character (3×4 frames).
pub const BIG_CHARACTER_PREFIX: char = '$';

/// Frame grid of a sheet: columns × rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub cols: u32,
    pub rows: u32,
}

impl SheetLayout {
    pub const SINGLE: Self = Self { cols: 1, rows: 1 };
    /// Eight characters, 3 patterns × 4 directions each.
    pub const CHARACTER_SET: Self = Self { cols: 12, rows: 8 };
    /// One character, 3 patterns × 4 directions.
    pub const BIG_CHARACTER: Self = Self { cols: 3, rows: 4 };
    /// Side-view battler motions.
    pub const SIDE_VIEW_BATTLER: Self = Self { cols: 9, rows: 6 };

    /// Pick the layout from the subject kind and its sheet name.
    pub fn detect(kind: &SubjectKind, image_name: &str) -> Self {
        match kind {
            SubjectKind::Enemy { .. } => Self::SINGLE,
            SubjectKind::Actor { .. } => {
                if image_name.starts_with(SINGLE_FRAME_PREFIX) {
                    Self::SINGLE
                } else {
                    Self::SIDE_VIEW_BATTLER
                }
            }
            _ => {
                let name = image_name.strip_prefix(OBJECT_PREFIX).unwrap_or(image_name);
                if name.starts_with(SINGLE_FRAME_PREFIX) {
                    Self::SINGLE
                } else if name.starts_with(BIG_CHARACTER_PREFIX) {
                    Self::BIG_CHARACTER
                } else {
                    Self::CHARACTER_SET
                }
            }
        }
    }

    /// Size of one frame of a sheet with the given pixel dimensions.
    pub fn frame_size(self, sheet_width: u32, sheet_height: u32) -> Vec2 {
        Vec2::new(
            sheet_width as f32 / self.cols as f32,
            sheet_height as f32 / self.rows as f32,
        )
    }
}

/// Measure a subject's single-frame bitmap size.
///
/// `sheet_dims` is `None` while the host has not delivered the sheet yet.
/// Tileset events use their frame rectangle directly; a non-finite one is
/// not measured.
pub fn measure_bitmap(subject: &Subject, sheet_dims: Option<(u32, u32)>) -> Option<BitmapSize> {
    let scale = subject.transform.scale;
    if let SubjectKind::Event { tile: true, .. } = subject.kind {
        let frame = subject.transform.frame;
        let size = Vec2::new(frame.width, frame.height);
        return size.is_finite().then(|| BitmapSize::new(size, scale));
    }

    let (w, h) = sheet_dims?;
    let layout = SheetLayout::detect(&subject.kind, &subject.image_name);
    Some(BitmapSize::new(layout.frame_size(w, h), scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{EventId, SubjectId};
    use crate::components::transform::FrameRect;

    fn event(image: &str) -> Subject {
        Subject::new(SubjectId(1), SubjectKind::Event { event_id: EventId(1), tile: false }).with_image(image)
    }

    #[test]
    fn character_sheet_conventions() {
        let kind = SubjectKind::Player;
        assert_eq!(SheetLayout::detect(&kind, "Actor1"), SheetLayout::CHARACTER_SET);
        assert_eq!(SheetLayout::detect(&kind, "$BigMonster"), SheetLayout::BIG_CHARACTER);
        assert_eq!(SheetLayout::detect(&kind, "!$Door"), SheetLayout::BIG_CHARACTER);
        assert_eq!(SheetLayout::detect(&kind, "k1_Statue"), SheetLayout::SINGLE);
        assert_eq!(SheetLayout::detect(&kind, "!k1_Chest"), SheetLayout::SINGLE);
    }

    #[test]
    fn battler_conventions() {
        let actor = SubjectKind::Actor { actor_id: 1 };
        let enemy = SubjectKind::Enemy { enemy_id: 1, index: 0 };
        assert_eq!(SheetLayout::detect(&actor, "Actor1_1"), SheetLayout::SIDE_VIEW_BATTLER);
        assert_eq!(SheetLayout::detect(&actor, "k1_Pose"), SheetLayout::SINGLE);
        assert_eq!(SheetLayout::detect(&enemy, "Slime"), SheetLayout::SINGLE);
    }

    #[test]
    fn measures_one_frame() {
        let subject = event("People1").with_scale(Vec2::new(2.0, 1.0));
        let size = measure_bitmap(&subject, Some((576, 384))).unwrap();
        assert_eq!(size.original, Vec2::new(48.0, 48.0));
        assert_eq!(size.scaled, Vec2::new(96.0, 48.0));
    }

    #[test]
    fn missing_sheet_is_not_measured() {
        assert!(measure_bitmap(&event("People1"), None).is_none());
    }

    #[test]
    fn tile_events_use_frame_rect() {
        let subject = Subject::new(SubjectId(1), SubjectKind::Event { event_id: EventId(2), tile: true })
            .with_frame(FrameRect::new(96.0, 0.0, 48.0, 48.0));
        let size = measure_bitmap(&subject, None).unwrap();
        assert_eq!(size.original, Vec2::new(48.0, 48.0));
    }

    #[test]
    fn non_finite_tile_frames_are_not_measured() {
        let kind = SubjectKind::Event { event_id: EventId(2), tile: true };
        let inf = Subject::new(SubjectId(1), kind.clone()).with_frame(FrameRect::new(0.0, 0.0, f32::INFINITY, 48.0));
        let nan = Subject::new(SubjectId(2), kind).with_frame(FrameRect::new(0.0, 0.0, 48.0, f32::NAN));
        assert!(measure_bitmap(&inf, None).is_none());
        assert!(measure_bitmap(&nan, None).is_none());
    }
}
