/*
 *  lib.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Fetch a forecast, render a dashboard, push it to an e-paper panel,
 *  sleep, repeat. The pipeline is pure; hardware hides behind the
 *  capability traits in net, power, assets, and display::traits.
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

pub mod assets;
pub mod classify;
pub mod client;
pub mod config;
pub mod cycle;
pub mod display;
pub mod forecast;
pub mod model;
pub mod net;
pub mod power;
pub mod series;
pub mod timeutil;
