#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Icon width in pixels
pub const ICON_WIDTH: usize = 32;

/// Icon height in pixels
pub const ICON_HEIGHT: usize = 32;

/// Number of pixels in one icon (32×32)
pub const PIXEL_COUNT: usize = ICON_WIDTH * ICON_HEIGHT;

/// RGB565 packs one pixel into two bytes
pub const BYTES_PER_PIXEL: usize = 2;

/// Size of the emitted array in program memory
pub const ICON_BYTES: usize = PIXEL_COUNT * BYTES_PER_PIXEL;

/// Hex literals per line in the generated header
pub const VALUES_PER_LINE: usize = 8;

/// Pixels with alpha below this value are emitted as black
pub const ALPHA_THRESHOLD: u8 = 128;

/// Suffix appended to the symbol base for the array name and file name
pub const ARRAY_SUFFIX: &str = "_32x32";

/// Extension of the generated header file
pub const HEADER_EXTENSION: &str = "h";

const LINE_COUNT: usize = PIXEL_COUNT / VALUES_PER_LINE;

/// Convert RGB888 to RGB565 (5 bits red, 6 bits green, 5 bits blue)
pub fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Convert an RGBA pixel, treating mostly transparent pixels as black
pub fn rgba_to_rgb565(r: u8, g: u8, b: u8, a: u8) -> u16 {
    if a < ALPHA_THRESHOLD {
        return rgb888_to_rgb565(0, 0, 0);
    }
    rgb888_to_rgb565(r, g, b)
}

/// Errors raised while building icon data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// RGBA input does not hold exactly one 32×32 icon
    ByteLength { expected: usize, actual: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::ByteLength { expected, actual } => write!(
                f,
                "expected {} bytes of RGBA data, got {}",
                expected, actual
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}

/// The 1024 RGB565 values of one icon, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBuffer {
    values: [u16; PIXEL_COUNT],
}

impl ColorBuffer {
    /// Wrap already packed values
    pub fn from_values(values: [u16; PIXEL_COUNT]) -> Self {
        Self { values }
    }

    /// Pack a 32×32 RGBA8 pixel grid
    pub fn from_rgba(rgba: &[u8]) -> Result<Self, FormatError> {
        if rgba.len() != PIXEL_COUNT * 4 {
            return Err(FormatError::ByteLength {
                expected: PIXEL_COUNT * 4,
                actual: rgba.len(),
            });
        }

        let mut values = [0u16; PIXEL_COUNT];
        for (value, px) in values.iter_mut().zip(rgba.chunks_exact(4)) {
            *value = rgba_to_rgb565(px[0], px[1], px[2], px[3]);
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= ICON_WIDTH || y >= ICON_HEIGHT {
            return None;
        }
        Some(self.values[y * ICON_WIDTH + x])
    }

    /// One row of 32 values
    pub fn row(&self, y: usize) -> Option<&[u16]> {
        if y >= ICON_HEIGHT {
            return None;
        }
        Some(&self.values[y * ICON_WIDTH..(y + 1) * ICON_WIDTH])
    }

    /// Little-endian bytes as the array is laid out in program memory
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(ICON_BYTES);
        for value in self.values.iter() {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }
}

/// Derive a C identifier base from a file stem: `My Icon-2` becomes `my_icon_2`
pub fn symbol_base(file_stem: &str) -> String {
    file_stem.to_lowercase().replace([' ', '-'], "_")
}

/// A C header holding one `PROGMEM` RGB565 icon array
#[derive(Debug, Clone)]
pub struct HeaderDocument {
    symbol: String,
    original_width: u32,
    original_height: u32,
    colors: ColorBuffer,
}

impl HeaderDocument {
    pub fn new(
        symbol: impl Into<String>,
        original_width: u32,
        original_height: u32,
        colors: ColorBuffer,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            original_width,
            original_height,
            colors,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn colors(&self) -> &ColorBuffer {
        &self.colors
    }

    /// Include guard, e.g. `MY_ICON_32X32_H`
    pub fn guard(&self) -> String {
        format!("{}{}_H", self.symbol.to_uppercase(), ARRAY_SUFFIX.to_uppercase())
    }

    /// Array identifier, e.g. `my_icon_32x32`
    pub fn array_name(&self) -> String {
        format!("{}{}", self.symbol, ARRAY_SUFFIX)
    }

    /// Default file name, e.g. `my_icon_32x32.h`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.array_name(), HEADER_EXTENSION)
    }

    /// Render the complete header text
    pub fn render(&self) -> String {
        let guard = self.guard();
        let mut out = String::with_capacity(ICON_BYTES * 4);

        out.push_str(&format!("#ifndef {}\n#define {}\n\n", guard, guard));
        out.push_str("#include <stdint.h>\n\n");
        out.push_str(&format!(
            "// {}x{} pixel {} color icon (RGB565, {} bytes)\n",
            ICON_WIDTH, ICON_HEIGHT, self.symbol, ICON_BYTES
        ));
        out.push_str(&format!(
            "// original size: {}x{}\n",
            self.original_width, self.original_height
        ));
        out.push_str(&format!(
            "static const uint16_t PROGMEM {}[] = {{\n",
            self.array_name()
        ));

        for (line, chunk) in self.colors.values().chunks(VALUES_PER_LINE).enumerate() {
            let literals: Vec<String> = chunk.iter().map(|v| format!("0x{:04X}", v)).collect();
            out.push_str("    ");
            out.push_str(&literals.join(", "));

            let first = line * VALUES_PER_LINE;
            if line == LINE_COUNT - 1 {
                out.push_str(&format!("   // Row {}\n", ICON_HEIGHT - 1));
            } else if first % ICON_WIDTH == 0 {
                // First line of a row carries the row label
                out.push_str(&format!(",  // Row {}\n", first / ICON_WIDTH));
            } else {
                out.push_str(",\n");
            }
        }

        out.push_str(&format!("}};\n\n#endif // {}\n", guard));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(r: u8, g: u8, b: u8, a: u8) -> Vec<u8> {
        [r, g, b, a].repeat(PIXEL_COUNT)
    }

    /// Count `0xHHHH` literals with upper-case hex digits
    fn count_hex_literals(lines: &[&str]) -> usize {
        lines
            .iter()
            .flat_map(|l| l.split(|c: char| c == ',' || c == ' '))
            .filter(|tok| {
                tok.len() == 6
                    && tok.starts_with("0x")
                    && tok[2..]
                        .chars()
                        .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
            })
            .count()
    }

    #[test]
    fn test_rgb565_bit_layout() {
        for r in 0..=255u8 {
            for g in (0..=255u8).step_by(3) {
                for b in (0..=255u8).step_by(7) {
                    let v = rgb888_to_rgb565(r, g, b);
                    assert_eq!(v >> 11, (r >> 3) as u16);
                    assert_eq!((v >> 5) & 0x3F, (g >> 2) as u16);
                    assert_eq!(v & 0x1F, (b >> 3) as u16);
                }
            }
        }
    }

    #[test]
    fn test_primary_colors() {
        assert_eq!(rgba_to_rgb565(255, 0, 0, 255), 0xF800);
        assert_eq!(rgba_to_rgb565(0, 255, 0, 255), 0x07E0);
        assert_eq!(rgba_to_rgb565(0, 0, 255, 255), 0x001F);
        assert_eq!(rgba_to_rgb565(255, 255, 255, 255), 0xFFFF);
    }

    #[test]
    fn test_transparent_pixels_are_black() {
        assert_eq!(rgba_to_rgb565(255, 0, 0, 50), 0x0000);
        assert_eq!(rgba_to_rgb565(255, 255, 255, 127), 0x0000);
        assert_eq!(rgba_to_rgb565(255, 255, 255, 128), 0xFFFF);
    }

    #[test]
    fn test_color_buffer_from_rgba() {
        let buffer = ColorBuffer::from_rgba(&solid(0, 255, 0, 255)).unwrap();
        assert_eq!(buffer.len(), PIXEL_COUNT);
        assert!(buffer.values().iter().all(|&v| v == 0x07E0));
        assert_eq!(buffer.get(31, 31), Some(0x07E0));
        assert_eq!(buffer.get(32, 0), None);
        assert_eq!(buffer.row(5).map(|r| r.len()), Some(ICON_WIDTH));
        assert!(buffer.row(32).is_none());
    }

    #[test]
    fn test_color_buffer_rejects_wrong_size() {
        let err = ColorBuffer::from_rgba(&[0u8; 16]).unwrap_err();
        assert_eq!(
            err,
            FormatError::ByteLength {
                expected: PIXEL_COUNT * 4,
                actual: 16
            }
        );
    }

    #[test]
    fn test_le_bytes() {
        let buffer = ColorBuffer::from_rgba(&solid(255, 0, 0, 255)).unwrap();
        let bytes = buffer.to_le_bytes();
        assert_eq!(bytes.len(), ICON_BYTES);
        assert_eq!(&bytes[..2], &[0x00, 0xF8]);
    }

    #[test]
    fn test_symbol_base() {
        assert_eq!(symbol_base("My Icon-2"), "my_icon_2");
        assert_eq!(symbol_base("battery"), "battery");
        assert_eq!(symbol_base("WIFI-Strong Signal"), "wifi_strong_signal");
    }

    #[test]
    fn test_header_names() {
        let mut values = [0u16; PIXEL_COUNT];
        values[0] = 0xF800;
        let doc = HeaderDocument::new("my_icon", 64, 48, ColorBuffer::from_values(values));
        assert_eq!(doc.guard(), "MY_ICON_32X32_H");
        assert_eq!(doc.array_name(), "my_icon_32x32");
        assert_eq!(doc.file_name(), "my_icon_32x32.h");
    }

    #[test]
    fn test_header_render() {
        let mut values = [0u16; PIXEL_COUNT];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as u16;
        }
        let doc = HeaderDocument::new("wifi", 200, 137, ColorBuffer::from_values(values));
        let text = doc.render();

        assert!(text.starts_with("#ifndef WIFI_32X32_H\n#define WIFI_32X32_H\n\n#include <stdint.h>\n"));
        assert!(text.contains("// 32x32 pixel wifi color icon (RGB565, 2048 bytes)\n"));
        assert!(text.contains("// original size: 200x137\n"));
        assert!(text.contains("static const uint16_t PROGMEM wifi_32x32[] = {\n"));
        assert!(text.ends_with("};\n\n#endif // WIFI_32X32_H\n"));

        let lines: Vec<&str> = text.lines().collect();
        let open = lines.iter().position(|l| l.ends_with("= {")).unwrap();
        let close = lines.iter().position(|&l| l == "};").unwrap();
        let body = &lines[open + 1..close];
        assert_eq!(body.len(), LINE_COUNT);
        assert_eq!(count_hex_literals(body), PIXEL_COUNT);
        // The size comment "200x137" holds a stray "0x" outside the array
        assert_eq!(count_hex_literals(&lines[..open]), 0);
        assert_eq!(
            body[0],
            "    0x0000, 0x0001, 0x0002, 0x0003, 0x0004, 0x0005, 0x0006, 0x0007,  // Row 0"
        );
        assert_eq!(
            body[1],
            "    0x0008, 0x0009, 0x000A, 0x000B, 0x000C, 0x000D, 0x000E, 0x000F,"
        );
        assert!(body[4].ends_with(",  // Row 1"));
        assert!(body[124].ends_with(",  // Row 31"));
        assert_eq!(
            body[127],
            "    0x03F8, 0x03F9, 0x03FA, 0x03FB, 0x03FC, 0x03FD, 0x03FE, 0x03FF   // Row 31"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let buffer = ColorBuffer::from_rgba(&solid(12, 200, 99, 255)).unwrap();
        let a = HeaderDocument::new("icon", 32, 32, buffer.clone()).render();
        let b = HeaderDocument::new("icon", 32, 32, buffer).render();
        assert_eq!(a, b);
    }
}
