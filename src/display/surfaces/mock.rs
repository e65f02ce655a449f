/*
 *  display/surfaces/mock.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Mock presentation surface for testing without a panel.
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

use std::sync::{Arc, Mutex};

use embedded_graphics::pixelcolor::Gray4;

use crate::display::error::SurfaceError;
use crate::display::frame::FrameBuf;
use crate::display::traits::{ColorDepth, PresentationSurface, SurfaceCapabilities};

/// Records every operation and keeps the last presented frame so tests
/// can assert on pixels. State sits behind an `Arc` because the cycle
/// controller owns the surface while the test still wants to look inside.
#[derive(Debug, Clone)]
pub struct MockSurface {
    capabilities: SurfaceCapabilities,
    state: Arc<Mutex<MockSurfaceState>>,
}

#[derive(Debug, Default)]
pub struct MockSurfaceState {
    pub init_count: usize,
    pub present_count: usize,
    /// Failed present attempts, busy ones included.
    pub rejected_count: usize,
    pub last_frame: Option<FrameBuf<Gray4>>,

    /// Next N presents report `Busy` before one succeeds.
    pub busy_presents: usize,
    pub fail_init: bool,
}

impl MockSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            capabilities: SurfaceCapabilities {
                width,
                height,
                color_depth: ColorDepth::Gray4,
                refresh_millis: 0,
            },
            state: Arc::new(Mutex::new(MockSurfaceState::default())),
        }
    }

    pub fn state(&self) -> Arc<Mutex<MockSurfaceState>> {
        Arc::clone(&self.state)
    }
}

impl PresentationSurface for MockSurface {
    fn capabilities(&self) -> &SurfaceCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), SurfaceError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_init {
            return Err(SurfaceError::InitializationFailed("simulated".to_string()));
        }
        state.init_count += 1;
        Ok(())
    }

    fn present(&mut self, frame: &FrameBuf<Gray4>) -> Result<(), SurfaceError> {
        let mut state = self.state.lock().unwrap();

        if frame.width() != self.capabilities.width || frame.height() != self.capabilities.height {
            state.rejected_count += 1;
            return Err(SurfaceError::SizeMismatch {
                expected_w: self.capabilities.width,
                expected_h: self.capabilities.height,
                actual_w: frame.width(),
                actual_h: frame.height(),
            });
        }

        if state.busy_presents > 0 {
            state.busy_presents -= 1;
            state.rejected_count += 1;
            return Err(SurfaceError::Busy);
        }

        state.present_count += 1;
        state.last_frame = Some(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::{Gray4, GrayColor};

    #[test]
    fn records_presents_and_keeps_the_frame() {
        let mut surface = MockSurface::new(8, 4);
        surface.init().unwrap();
        surface.present(&FrameBuf::new(8, 4, Gray4::WHITE)).unwrap();

        let state = surface.state();
        let state = state.lock().unwrap();
        assert_eq!(state.init_count, 1);
        assert_eq!(state.present_count, 1);
        assert!(state.last_frame.is_some());
    }

    #[test]
    fn busy_presents_drain_then_succeed() {
        let mut surface = MockSurface::new(8, 4);
        surface.state().lock().unwrap().busy_presents = 2;
        let frame = FrameBuf::new(8, 4, Gray4::WHITE);

        assert!(matches!(surface.present(&frame), Err(SurfaceError::Busy)));
        assert!(matches!(surface.present(&frame), Err(SurfaceError::Busy)));
        assert!(surface.present(&frame).is_ok());
        assert_eq!(surface.state().lock().unwrap().rejected_count, 2);
    }

    #[test]
    fn wrong_frame_size_is_rejected() {
        let mut surface = MockSurface::new(8, 4);
        let frame = FrameBuf::new(4, 4, Gray4::WHITE);
        assert!(matches!(
            surface.present(&frame),
            Err(SurfaceError::SizeMismatch { .. })
        ));
    }
}
