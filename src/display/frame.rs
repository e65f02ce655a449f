/*
 *  display/frame.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Runtime-sized framebuffer the layout engine composes into.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::{Gray4, GrayColor, PixelColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Collapses a `Result` whose error is uninhabited. Draw calls against
/// [`FrameBuf`] cannot fail; this keeps that fact in the type system
/// instead of behind an `unwrap`.
pub fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// A heap-backed framebuffer for `embedded-graphics`, sized at runtime
/// from the presentation surface's capabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuf<C: PixelColor> {
    buf: Vec<C>,
    w: usize,
    h: usize,
}

impl<C: PixelColor> FrameBuf<C> {
    pub fn new(width: u32, height: u32, fill: C) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![fill; w * h], w, h }
    }

    pub fn width(&self) -> u32 { self.w as u32 }
    pub fn height(&self) -> u32 { self.h as u32 }

    pub fn as_slice(&self) -> &[C] { &self.buf }

    /// Pixel at (x,y); `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<C> {
        if (x as usize) < self.w && (y as usize) < self.h {
            Some(self.buf[y as usize * self.w + x as usize])
        } else {
            None
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl FrameBuf<Gray4> {
    /// Pixels differing from `background`, for test assertions.
    pub fn ink_count(&self, background: Gray4) -> usize {
        self.buf.iter().filter(|&&p| p != background).count()
    }

    /// Binary PGM (P5) encoding of the frame, 4-bit luma widened to 8.
    pub fn to_pgm(&self) -> Vec<u8> {
        let mut out = format!("P5\n{} {}\n255\n", self.w, self.h).into_bytes();
        out.extend(self.buf.iter().map(|p| p.luma() * 17));
        out
    }
}

impl<C: PixelColor> OriginDimensions for FrameBuf<C> {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl<C: PixelColor> DrawTarget for FrameBuf<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(color);
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // fast path for the rectangular fills the primitives use
        let Size { width, height } = area.size;
        if width == 0 || height == 0 {
            return Ok(());
        }
        let (x0, y0) = (area.top_left.x.max(0) as usize, area.top_left.y.max(0) as usize);
        let mut it = colors.into_iter();
        for row in 0..height as usize {
            let base = (y0 + row) * self.w + x0;
            for col in 0..width as usize {
                match it.next() {
                    Some(c) => {
                        let i = base + col;
                        if i < self.buf.len() {
                            self.buf[i] = c;
                        }
                    }
                    None => return Ok(()),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn starts_filled_with_background() {
        let fb = FrameBuf::new(8, 4, Gray4::WHITE);
        assert_eq!(fb.ink_count(Gray4::WHITE), 0);
        assert_eq!(fb.pixel(7, 3), Some(Gray4::WHITE));
        assert_eq!(fb.pixel(8, 0), None);
    }

    #[test]
    fn rectangles_fill_their_area() {
        let mut fb = FrameBuf::new(16, 16, Gray4::WHITE);
        infallible(
            Rectangle::new(Point::new(2, 3), Size::new(4, 2))
                .into_styled(PrimitiveStyle::with_fill(Gray4::BLACK))
                .draw(&mut fb),
        );
        assert_eq!(fb.ink_count(Gray4::WHITE), 8);
        assert_eq!(fb.pixel(2, 3), Some(Gray4::BLACK));
        assert_eq!(fb.pixel(5, 4), Some(Gray4::BLACK));
        assert_eq!(fb.pixel(6, 4), Some(Gray4::WHITE));
    }

    #[test]
    fn out_of_bounds_draws_are_clipped_not_fatal() {
        let mut fb = FrameBuf::new(8, 8, Gray4::WHITE);
        infallible(fb.draw_iter([
            Pixel(Point::new(-1, 0), Gray4::BLACK),
            Pixel(Point::new(0, 100), Gray4::BLACK),
            Pixel(Point::new(3, 3), Gray4::BLACK),
        ]));
        assert_eq!(fb.ink_count(Gray4::WHITE), 1);
    }

    #[test]
    fn pgm_header_and_payload_size() {
        let fb = FrameBuf::new(4, 2, Gray4::WHITE);
        let pgm = fb.to_pgm();
        assert!(pgm.starts_with(b"P5\n4 2\n255\n"));
        assert_eq!(pgm.len(), b"P5\n4 2\n255\n".len() + 8);
        assert_eq!(*pgm.last().unwrap(), 255); // Gray4 luma 15 -> 255
    }
}
