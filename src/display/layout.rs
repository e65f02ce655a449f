/*
 *  display/layout.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Deterministic composition of a DisplayModel onto the 296x128 canvas.
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

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10, FONT_9X18_BOLD};
use embedded_graphics::mono_font::iso_8859_1::FONT_10X20;
use embedded_graphics::pixelcolor::{Gray4, Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_text::TextBox;
use embedded_text::alignment::{HorizontalAlignment, VerticalAlignment};
use embedded_text::style::TextBoxStyleBuilder;
use log::warn;
use tinybmp::Bmp;

use crate::assets::AssetStore;
use crate::display::frame::{FrameBuf, infallible};
use crate::model::{DisplayModel, ScreenContent};
use crate::series::{BarScale, HourlyBar};

pub const CANVAS_WIDTH: u32 = 296;
pub const CANVAS_HEIGHT: u32 = 128;

const WHITE: Gray4 = Gray4::WHITE;
const BLACK: Gray4 = Gray4::BLACK;
/// Min temperature and the small corner annotations.
const DARK_GREY: Gray4 = Gray4::new(4);
/// Histogram temperature bars.
const MID_GREY: Gray4 = Gray4::new(8);

/// Pixel contract for the dashboard. Offsets are fixed per element; the
/// relative placement (date upper-left, temperatures upper-right,
/// details lower-middle, battery bottom-left, timestamp bottom-right,
/// histogram under the icon) is the part that must not drift.
#[derive(Debug, Clone)]
pub struct Layout {
    width: u32,
    height: u32,
    icon_origin: Point,
    icon_fallback_origin: Point,
    date_origin: Point,
    date_pitch: i32,
    max_temp_origin: Point,
    min_temp_origin: Point,
    current_temp_origin: Point,
    wind_origin: Point,
    humidity_origin: Point,
    pressure_origin: Point,
    updated_origin: Point,
    battery_icon_origin: Point,
    battery_text_origin: Point,
    strip: Rectangle,
}

impl Layout {
    pub fn new(width: u32, height: u32) -> Self {
        let h = height as i32;
        let w = width as i32;
        Self {
            width,
            height,
            // 64px icon, top edge bleeds off-canvas like the original art
            icon_origin: Point::new(50, -8),
            icon_fallback_origin: Point::new(50, 30),
            date_origin: Point::new(5, 24),
            date_pitch: 24,
            max_temp_origin: Point::new(175, 40),
            min_temp_origin: Point::new(175, 90),
            current_temp_origin: Point::new(118, 76),
            wind_origin: Point::new(118, 100),
            humidity_origin: Point::new(118, 110),
            pressure_origin: Point::new(205, 100),
            updated_origin: Point::new(w - 90, h - 8),
            battery_icon_origin: Point::new(2, h - 16),
            battery_text_origin: Point::new(26, h - 6),
            strip: Rectangle::new(Point::new(50, h - 12), Size::new(128, 12)),
        }
    }

    /// Composes one screen. The canvas is always cleared to the solid
    /// background first; the notice path draws its message and returns
    /// early. Secondary elements (icons, histogram) degrade locally and
    /// never abort the remaining elements.
    pub fn compose<D>(
        &self,
        target: &mut D,
        content: &ScreenContent,
        assets: &dyn AssetStore,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        target.clear(WHITE)?;

        match content {
            ScreenContent::Notice(notice) => self.draw_notice(target, notice.lines()),
            ScreenContent::Dashboard(model) => self.draw_dashboard(target, model, assets),
        }
    }

    fn draw_notice<D>(&self, target: &mut D, lines: &str) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        let char_style = MonoTextStyle::new(&FONT_9X18_BOLD, BLACK);
        let box_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Center)
            .vertical_alignment(VerticalAlignment::Middle)
            .build();
        let bounds = Rectangle::new(Point::zero(), Size::new(self.width, self.height));
        TextBox::with_textbox_style(lines, bounds, char_style, box_style).draw(target)?;
        Ok(())
    }

    fn draw_dashboard<D>(
        &self,
        target: &mut D,
        model: &DisplayModel,
        assets: &dyn AssetStore,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        let small = MonoTextStyle::new(&FONT_5X8, BLACK);
        let small_grey = MonoTextStyle::new(&FONT_5X8, DARK_GREY);
        let medium = MonoTextStyle::new(&FONT_9X18_BOLD, BLACK);
        let big = MonoTextStyle::new(&FONT_10X20, BLACK);
        let big_grey = MonoTextStyle::new(&FONT_10X20, DARK_GREY);

        self.draw_condition_icon(target, model, assets)?;

        for (i, line) in model.date_lines.iter().enumerate() {
            Text::new(
                line,
                self.date_origin + Point::new(0, i as i32 * self.date_pitch),
                medium,
            )
            .draw(target)?;
        }

        Text::new(&model.max_text, self.max_temp_origin, big).draw(target)?;
        Text::new(&model.min_text, self.min_temp_origin, big_grey).draw(target)?;
        Text::new(&model.temperature_text, self.current_temp_origin, medium).draw(target)?;

        Text::new(&model.wind_text, self.wind_origin, small).draw(target)?;
        Text::new(&model.humidity_text, self.humidity_origin, small).draw(target)?;
        Text::new(&model.pressure_text, self.pressure_origin, small).draw(target)?;

        Text::new(&model.updated_text, self.updated_origin, small_grey).draw(target)?;

        self.draw_battery(target, model, assets)?;
        Text::new(&model.battery_text, self.battery_text_origin, small_grey).draw(target)?;

        self.draw_histogram(target, &model.bars)?;

        Ok(())
    }

    /// Condition icon, or the truncated raw symbol code in its place
    /// when the asset is missing or undecodable.
    fn draw_condition_icon<D>(
        &self,
        target: &mut D,
        model: &DisplayModel,
        assets: &dyn AssetStore,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        match assets.load(&model.icon_name) {
            Ok(data) => match Bmp::<Rgb888>::from_slice(&data) {
                Ok(bmp) => return blit(target, self.icon_origin, &bmp),
                Err(e) => warn!("icon {:?} undecodable: {:?}", model.icon_name, e),
            },
            Err(e) => warn!("icon {:?} unavailable: {}", model.icon_name, e),
        }
        let style = MonoTextStyle::new(&FONT_6X10, BLACK);
        Text::new(&model.symbol_fallback, self.icon_fallback_origin, style).draw(target)?;
        Ok(())
    }

    /// Battery icon is decorative: a missing asset just leaves the
    /// voltage text on its own.
    fn draw_battery<D>(
        &self,
        target: &mut D,
        model: &DisplayModel,
        assets: &dyn AssetStore,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        let name = model.battery_icon.asset_name();
        match assets.load(name) {
            Ok(data) => match Bmp::<Rgb888>::from_slice(&data) {
                Ok(bmp) => blit(target, self.battery_icon_origin, &bmp)?,
                Err(e) => warn!("battery icon {:?} undecodable: {:?}", name, e),
            },
            Err(e) => warn!("battery icon {:?} unavailable: {}", name, e),
        }
        Ok(())
    }

    fn draw_histogram<D>(&self, target: &mut D, bars: &[HourlyBar]) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        let Some(scale) = BarScale::for_bars(bars) else {
            return Ok(());
        };

        let strip_h = self.strip.size.height;
        let half = strip_h / 2;
        let mid_y = self.strip.top_left.y + half as i32;
        let bottom_y = self.strip.top_left.y + strip_h as i32;
        let column_w = self.strip.size.width / crate::series::HISTOGRAM_WINDOW as u32;

        let temp_style = PrimitiveStyle::with_fill(MID_GREY);
        let precip_style = PrimitiveStyle::with_fill(BLACK);

        for (i, bar) in bars.iter().enumerate() {
            let x = self.strip.top_left.x + (i as u32 * column_w) as i32;

            // temperature: muted bar from the midline, up when warmer
            // than the window midpoint, down when cooler
            let offset = scale
                .temperature_offset(bar.temperature, half)
                .clamp(-(half as i32), half as i32);
            if offset > 0 {
                Rectangle::new(
                    Point::new(x, mid_y - offset),
                    Size::new(column_w - 1, offset as u32),
                )
                .into_styled(temp_style)
                .draw(target)?;
            } else if offset < 0 {
                Rectangle::new(Point::new(x, mid_y), Size::new(column_w - 1, (-offset) as u32))
                    .into_styled(temp_style)
                    .draw(target)?;
            }

            // precipitation: narrow full-contrast column off the bottom
            let precip_h = scale.precipitation_height(bar.precipitation, strip_h);
            if precip_h > 0 {
                Rectangle::new(
                    Point::new(x, bottom_y - precip_h as i32),
                    Size::new(column_w / 2, precip_h),
                )
                .into_styled(precip_style)
                .draw(target)?;
            }
        }

        Ok(())
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

fn blit<D>(target: &mut D, origin: Point, bmp: &Bmp<'_, Rgb888>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    target.draw_iter(
        bmp.pixels()
            .map(|Pixel(p, c)| Pixel(origin + p, rgb_to_gray4(c))),
    )
}

fn rgb_to_gray4(c: Rgb888) -> Gray4 {
    let luma = (c.r() as u16 * 77 + c.g() as u16 * 151 + c.b() as u16 * 28) >> 8;
    Gray4::new((luma >> 4) as u8)
}

/// One wake cycle's render state: a fresh canvas plus the asset store,
/// owned by the cycle controller for the duration of the cycle.
pub struct RenderSession<'a> {
    layout: Layout,
    frame: FrameBuf<Gray4>,
    assets: &'a dyn AssetStore,
}

impl<'a> RenderSession<'a> {
    pub fn new(width: u32, height: u32, assets: &'a dyn AssetStore) -> Self {
        Self {
            layout: Layout::new(width, height),
            frame: FrameBuf::new(width, height, WHITE),
            assets,
        }
    }

    pub fn compose(&mut self, content: &ScreenContent) {
        infallible(self.layout.compose(&mut self.frame, content, self.assets));
    }

    pub fn frame(&self) -> &FrameBuf<Gray4> {
        &self.frame
    }

    pub fn into_frame(self) -> FrameBuf<Gray4> {
        self.frame
    }
}
