/// Render layer. Controls draw order of nodes in the host scene.
///
/// Layers are drawn back-to-front. Shadows sit just above the background
/// (ground tiles / battle backdrop) and below the characters that cast them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Background = 0,
    Shadows = 1,
    #[default]
    Characters = 2,
    Foreground = 3,
}

impl RenderLayer {
    /// Total number of render layers.
    pub const COUNT: usize = 4;

    /// Convert from a u8 value. Returns None if out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Background),
            1 => Some(Self::Shadows),
            2 => Some(Self::Characters),
            3 => Some(Self::Foreground),
            _ => None,
        }
    }

    /// Convert to u8 for the instance wire format.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadows_between_background_and_characters() {
        assert!(RenderLayer::Background < RenderLayer::Shadows);
        assert!(RenderLayer::Shadows < RenderLayer::Characters);
        assert!(RenderLayer::Characters < RenderLayer::Foreground);
    }

    #[test]
    fn u8_conversion() {
        for val in 0..RenderLayer::COUNT as u8 {
            let layer = RenderLayer::from_u8(val).unwrap();
            assert_eq!(layer.as_u8(), val);
        }
        assert!(RenderLayer::from_u8(4).is_none());
    }
}
