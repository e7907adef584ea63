use glam::Vec2;

/// Direction a map character faces (numpad convention of the host: 2/4/6/8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Facing {
    /// Convert from the host's numpad direction code.
    pub fn from_numpad(dir: u8) -> Option<Self> {
        match dir {
            2 => Some(Self::Down),
            4 => Some(Self::Left),
            6 => Some(Self::Right),
            8 => Some(Self::Up),
            _ => None,
        }
    }

    /// Whether facing-based mirroring flips the shadow for this direction.
    pub fn mirrors_shadow(self) -> bool {
        matches!(self, Self::Right | Self::Up)
    }
}

/// Source rectangle of the current animation frame, in sheet pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FrameRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Measured pixel size of one frame of the subject's art.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BitmapSize {
    /// Frame size on the sheet, before render scale.
    pub original: Vec2,
    /// Frame size after render scale. Negative when the art is mirrored.
    pub scaled: Vec2,
}

impl BitmapSize {
    pub fn new(original: Vec2, render_scale: Vec2) -> Self {
        Self {
            original,
            scaled: original * render_scale,
        }
    }

    /// True when the subject has nothing measurable to cast a shadow from.
    pub fn is_empty(&self) -> bool {
        self.scaled.x == 0.0 || self.scaled.y == 0.0
    }
}

/// Per-frame snapshot of everything the geometry engine reads from a subject.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectTransform {
    /// Screen position of the sprite anchor (bottom-centre), jump lift included.
    pub screen_pos: Vec2,
    /// Current render scale. Negative x means the art is drawn mirrored.
    pub scale: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Render opacity (0-255).
    pub opacity: u8,
    pub visible: bool,
    pub facing: Facing,
    /// How far the subject is lifted off the ground, in pixels.
    pub jump_height: f32,
    /// Current animation frame on the sheet.
    pub frame: FrameRect,
    /// Pixels hidden at the bottom by bushes / tall grass.
    pub bush_depth: f32,
    /// Battler is defeated.
    pub dead: bool,
    /// Battle is laid out side-view.
    pub side_view: bool,
    /// Filled by the measurement step each tick.
    pub bitmap: Option<BitmapSize>,
}

impl Default for SubjectTransform {
    fn default() -> Self {
        Self {
            screen_pos: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            opacity: 255,
            visible: true,
            facing: Facing::Down,
            jump_height: 0.0,
            frame: FrameRect::default(),
            bush_depth: 0.0,
            dead: false,
            side_view: false,
            bitmap: None,
        }
    }
}

impl SubjectTransform {
    /// Point on the ground beneath the subject, ignoring any jump lift.
    pub fn ground_anchor(&self) -> Vec2 {
        self.screen_pos + Vec2::new(0.0, self.jump_height.max(0.0))
    }
}
