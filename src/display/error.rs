/*
 *  display/error.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Error types for the presentation subsystem.
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

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Panel refresh in progress; the caller may retry shortly.
    #[error("presentation surface busy")]
    Busy,

    #[error("surface initialization failed: {0}")]
    InitializationFailed(String),

    /// Frame dimensions do not match the surface.
    #[error("frame size mismatch: surface is {expected_w}x{expected_h}, frame is {actual_w}x{actual_h}")]
    SizeMismatch {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },

    #[error("surface I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl SurfaceError {
    /// Transient conditions are worth a bounded retry; everything else
    /// is presented best-effort and the cycle proceeds to sleep.
    pub fn is_transient(&self) -> bool {
        matches!(self, SurfaceError::Busy)
    }
}
