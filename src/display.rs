//! Rendering surface contract and the text helpers shared by the menu and
//! its items. All text uses the 6x10 monospace font, so one line of text
//! fills exactly one 10 px menu row.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

/// Monochrome surface the menu renders into: any embedded-graphics draw
/// target that can also push the finished frame out to the device.
///
/// Every redraw writes the whole viewport, so the implementation only has to
/// buffer pixels and transfer them on [`flush`](Surface::flush).
pub trait Surface: DrawTarget<Color = BinaryColor> {
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Text buffer for one formatted row value; wide enough for any `f32`
/// printed with two decimals, so formatting into it cannot fail.
pub type RowText = String<48>;

pub fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_6X10, BinaryColor::On)
}

/// Rendered pixel width of `text` in the row font.
fn text_width(text: &str) -> i32 {
    text_style()
        .measure_string(text, Point::zero(), Baseline::Top)
        .bounding_box
        .size
        .width as i32
}

pub fn draw_string<D>(target: &mut D, text: &str, x: i32, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline(text, Point::new(x, y), text_style(), Baseline::Top).draw(target)?;
    Ok(())
}

/// Draws `text` ending flush against `bound`.
pub fn draw_right_aligned<D>(target: &mut D, text: &str, bound: i32, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_string(target, text, bound - text_width(text), y)
}

/// Draws `text` centred within `[0, bound]`.
pub fn draw_centred<D>(target: &mut D, text: &str, bound: i32, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_string(target, text, (bound - text_width(text)) / 2, y)
}

/// Fixed two-decimal float text, minimum width 4.
pub fn fmt_float(value: f32) -> RowText {
    let mut text = RowText::new();
    write!(text, "{:4.2}", value).ok();
    text
}

/// Decimal integer text, minimum width 4.
pub fn fmt_int(value: i32) -> RowText {
    let mut text = RowText::new();
    write!(text, "{:4}", value).ok();
    text
}

pub fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
impl Surface for embedded_graphics::mock_display::MockDisplay<BinaryColor> {
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
