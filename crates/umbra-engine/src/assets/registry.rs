use std::collections::HashMap;
use image::RgbaImage;

/// Registry of decoded sprite sheets, keyed by sheet name.
///
/// The host decodes images and hands the pixels over; a subject whose sheet
/// is not registered yet simply has no measurable bitmap this tick.
pub struct SheetRegistry {
    sheets: HashMap<String, RgbaImage>,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self {
            sheets: HashMap::new(),
        }
    }

    /// Register (or replace) a sheet.
    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.sheets.insert(name.into(), image);
    }

    /// Register a sheet from raw RGBA8 bytes. Returns false when the byte
    /// count does not match the dimensions.
    pub fn insert_rgba(&mut self, name: impl Into<String>, width: u32, height: u32, rgba: Vec<u8>) -> bool {
        match RgbaImage::from_raw(width, height, rgba) {
            Some(image) => {
                self.insert(name, image);
                true
            }
            None => false,
        }
    }

    /// Look up a sheet by name. Returns None if not loaded.
    pub fn get(&self, name: &str) -> Option<&RgbaImage> {
        self.sheets.get(name)
    }

    /// Pixel dimensions of a loaded sheet.
    pub fn dimensions(&self, name: &str) -> Option<(u32, u32)> {
        self.sheets.get(name).map(|img| img.dimensions())
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl Default for SheetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut reg = SheetRegistry::new();
        reg.insert("People1", RgbaImage::new(576, 384));
        assert_eq!(reg.dimensions("People1"), Some((576, 384)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn raw_bytes_must_match_dimensions() {
        let mut reg = SheetRegistry::new();
        assert!(reg.insert_rgba("ok", 2, 2, vec![0; 16]));
        assert!(!reg.insert_rgba("short", 2, 2, vec![0; 15]));
        assert!(reg.get("short").is_none());
    }

    #[test]
    fn unknown_returns_none() {
        let reg = SheetRegistry::new();
        assert!(reg.get("nonexistent").is_none());
        assert!(reg.is_empty());
    }
}
