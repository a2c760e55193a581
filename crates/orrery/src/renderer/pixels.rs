use bytemuck::{Pod, Zeroable};

/// One 8-bit RGBA pixel, laid out the way `ImageData` expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Source-over blend of `src` (straight alpha) onto `self`.
    pub fn blend(self, src: Rgba8) -> Rgba8 {
        let sa = src.a as u32;
        if sa == 255 {
            return src;
        }
        if sa == 0 {
            return self;
        }
        let da = self.a as u32;
        let inv = 255 - sa;
        let out_a = sa + da * inv / 255;
        if out_a == 0 {
            return Rgba8::TRANSPARENT;
        }
        let ch = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da * inv / 255) / out_a) as u8;
        Rgba8::new(ch(src.r, self.r), ch(src.g, self.g), ch(src.b, self.b), out_a as u8)
    }
}

/// Row-major RGBA pixel buffer.
///
/// Used both for procedural equirectangular textures and for the rasterized
/// sphere view handed to the browser as `ImageData`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, fill: Rgba8) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Write a pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Rgba8) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    /// Alpha-blend a pixel over what is already there. Out-of-bounds is ignored.
    pub fn blend(&mut self, x: u32, y: u32, color: Rgba8) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = self.pixels[i].blend(color);
        }
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Flat RGBA bytes (4 per pixel).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_rgba_row_major() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set(1, 0, Rgba8::new(1, 2, 3, 4));
        assert_eq!(buf.as_bytes().len(), 16);
        assert_eq!(&buf.as_bytes()[4..8], &[1, 2, 3, 4]);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set(5, 5, Rgba8::new(9, 9, 9, 255));
        assert!(buf.get(5, 5).is_none());
        assert!(buf.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn blend_opaque_replaces_and_transparent_keeps() {
        let base = Rgba8::new(10, 20, 30, 255);
        assert_eq!(base.blend(Rgba8::new(200, 0, 0, 255)), Rgba8::new(200, 0, 0, 255));
        assert_eq!(base.blend(Rgba8::new(200, 0, 0, 0)), base);
    }

    #[test]
    fn blend_half_alpha_over_opaque_is_midpoint() {
        let out = Rgba8::new(0, 0, 0, 255).blend(Rgba8::new(255, 255, 255, 128));
        assert_eq!(out.a, 255);
        assert!((out.r as i32 - 128).abs() <= 1);
    }
}
