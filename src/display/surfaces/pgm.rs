/*
 *  display/surfaces/pgm.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Software presentation surface: frames land in a PGM file.
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

use std::path::PathBuf;

use embedded_graphics::pixelcolor::Gray4;
use log::info;

use crate::display::error::SurfaceError;
use crate::display::frame::FrameBuf;
use crate::display::traits::{ColorDepth, PresentationSurface, SurfaceCapabilities};

/// The desktop stand-in for the panel: each present overwrites one
/// grayscale PGM image, which any viewer can sit on to watch cycles.
#[derive(Debug, Clone)]
pub struct PgmSurface {
    capabilities: SurfaceCapabilities,
    path: PathBuf,
}

impl PgmSurface {
    pub fn new(width: u32, height: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            capabilities: SurfaceCapabilities {
                width,
                height,
                color_depth: ColorDepth::Gray4,
                refresh_millis: 0,
            },
            path: path.into(),
        }
    }
}

impl PresentationSurface for PgmSurface {
    fn capabilities(&self) -> &SurfaceCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), SurfaceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn present(&mut self, frame: &FrameBuf<Gray4>) -> Result<(), SurfaceError> {
        if frame.width() != self.capabilities.width || frame.height() != self.capabilities.height {
            return Err(SurfaceError::SizeMismatch {
                expected_w: self.capabilities.width,
                expected_h: self.capabilities.height,
                actual_w: frame.width(),
                actual_h: frame.height(),
            });
        }
        std::fs::write(&self.path, frame.to_pgm())?;
        info!("frame written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::{Gray4, GrayColor};

    #[test]
    fn writes_a_parseable_pgm() {
        let path = std::env::temp_dir().join("inkcast_pgm_surface_test.pgm");
        let mut surface = PgmSurface::new(16, 8, &path);
        surface.init().unwrap();
        surface.present(&FrameBuf::new(16, 8, Gray4::WHITE)).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"P5\n16 8\n255\n"));
        let _ = std::fs::remove_file(&path);
    }
}
