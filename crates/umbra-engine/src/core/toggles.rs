/// Scene-wide switches flipped by runtime commands and read by every
/// subject's geometry pass.
///
/// Owned by the scene: created at scene load, reset at teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowToggles {
    /// All shadows hidden.
    pub hidden: bool,
    /// Horizontal offsets mirrored.
    pub mirror_x: bool,
    /// Vertical offsets (and shape) mirrored.
    pub mirror_y: bool,
}

/// Apply a command switch: `None` toggles, `Some(v)` sets.
fn switch(flag: &mut bool, value: Option<bool>) {
    *flag = value.unwrap_or(!*flag);
}

impl ShadowToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Some(true)` shows shadows, `Some(false)` hides them, `None` toggles.
    pub fn set_visible(&mut self, visible: Option<bool>) {
        let mut shown = !self.hidden;
        switch(&mut shown, visible);
        self.hidden = !shown;
    }

    pub fn set_mirror_x(&mut self, mirrored: Option<bool>) {
        switch(&mut self.mirror_x, mirrored);
    }

    pub fn set_mirror_y(&mut self, mirrored: Option<bool>) {
        switch(&mut self.mirror_y, mirrored);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_toggle_twice_is_identity() {
        let mut toggles = ShadowToggles::new();
        let before = toggles;
        toggles.set_visible(None);
        assert!(toggles.hidden);
        toggles.set_visible(None);
        assert_eq!(toggles, before);
    }

    #[test]
    fn explicit_values_set() {
        let mut toggles = ShadowToggles::new();
        toggles.set_visible(Some(false));
        assert!(toggles.hidden);
        toggles.set_visible(Some(false));
        assert!(toggles.hidden);
        toggles.set_visible(Some(true));
        assert!(!toggles.hidden);

        toggles.set_mirror_x(Some(true));
        toggles.set_mirror_y(None);
        assert!(toggles.mirror_x && toggles.mirror_y);
        toggles.set_mirror_x(None);
        assert!(!toggles.mirror_x);
    }

    #[test]
    fn reset_clears_everything() {
        let mut toggles = ShadowToggles { hidden: true, mirror_x: true, mirror_y: true };
        toggles.reset();
        assert_eq!(toggles, ShadowToggles::default());
    }
}
