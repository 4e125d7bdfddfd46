use serde::{Deserialize, Serialize};

/// RGBA color with components in `[0, 1]`
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Build a color from 8-bit channels
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(
            bytes[0] as f32 / 255.0,
            bytes[1] as f32 / 255.0,
            bytes[2] as f32 / 255.0,
            bytes[3] as f32 / 255.0,
        )
    }

    /// Convert to 8-bit channels, clamping out-of-range components
    pub fn to_bytes(&self) -> [u8; 4] {
        [
            float_to_byte(self.red),
            float_to_byte(self.green),
            float_to_byte(self.blue),
            float_to_byte(self.alpha),
        ]
    }

    /// Read a color from a packed `[r, g, b, a]` slice starting at `start`.
    /// Missing trailing components default to 0 (alpha to 1).
    pub fn unpack(array: &[f32], start: usize) -> Self {
        let get = |i: usize, default: f32| array.get(start + i).copied().unwrap_or(default);
        Self::new(get(0, 0.0), get(1, 0.0), get(2, 0.0), get(3, 1.0))
    }

    pub fn pack(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn float_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_round_trip() {
        let bytes = [255, 0, 0, 255];
        assert_eq!(Color::from_bytes(bytes).to_bytes(), bytes);
        assert_eq!(Color::from_bytes(bytes), Color::RED);
    }

    #[test]
    fn test_to_bytes_clamps() {
        let color = Color::new(255.0, -1.0, 0.5, 1.0);
        assert_eq!(color.to_bytes(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_unpack_with_offset() {
        let packed = [9.0, 0.0, 1.0, 0.0, 0.5];
        let color = Color::unpack(&packed, 1);
        assert_eq!(color, Color::new(0.0, 1.0, 0.0, 0.5));
    }

    #[test]
    fn test_unpack_short_slice_defaults_alpha() {
        let color = Color::unpack(&[0.25, 0.5], 0);
        assert_eq!(color.pack(), [0.25, 0.5, 0.0, 1.0]);
    }
}
