/*
 *  display/mod.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Display subsystem: framebuffer, layout engine, surface abstraction.
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

pub mod error;
pub mod frame;
pub mod layout;
pub mod surfaces;
pub mod traits;

pub use error::SurfaceError;
pub use frame::FrameBuf;
pub use layout::{CANVAS_HEIGHT, CANVAS_WIDTH, Layout, RenderSession};
pub use surfaces::{MockSurface, PgmSurface};
pub use traits::{ColorDepth, PresentationSurface, SurfaceCapabilities};
