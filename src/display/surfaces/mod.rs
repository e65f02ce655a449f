/*
 *  display/surfaces/mod.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Presentation surface implementations. The physical e-paper driver
 *  lives out of tree; these are the software and test surfaces.
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

pub mod mock;
pub mod pgm;

pub use mock::MockSurface;
pub use pgm::PgmSurface;
