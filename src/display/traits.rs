/*
 *  display/traits.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Capability trait for the presentation surface.
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

use embedded_graphics::pixelcolor::Gray4;

use crate::display::error::SurfaceError;
use crate::display::frame::FrameBuf;

/// Color depth of a presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    /// 1-bit panels; Gray4 frames are thresholded on the way out.
    Monochrome,

    /// 4-bit grayscale (16 levels), the native e-paper depth here.
    Gray4,
}

/// Static description of a surface.
#[derive(Debug, Clone)]
pub struct SurfaceCapabilities {
    pub width: u32,
    pub height: u32,
    pub color_depth: ColorDepth,

    /// Nominal full-refresh time. E-paper is slow; callers pace retries
    /// off this rather than hammering a busy panel.
    pub refresh_millis: u64,
}

/// Capability seam for whatever accepts a composed frame - a physical
/// panel, an image file, or a test recorder. One full-canvas present per
/// wake cycle; there is no partial update in this contract.
pub trait PresentationSurface: Send {
    fn capabilities(&self) -> &SurfaceCapabilities;

    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Prepare the surface for a present. Idempotent.
    fn init(&mut self) -> Result<(), SurfaceError>;

    /// Push a composed frame. `SurfaceError::Busy` means try again
    /// shortly; the cycle controller owns that retry.
    fn present(&mut self, frame: &FrameBuf<Gray4>) -> Result<(), SurfaceError>;
}
