//! The menu container: a fixed-capacity list of items, the hover/selection
//! state machine, and the scroll placement that keeps the hovered row on
//! screen.

use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use heapless::{String, Vec};

use crate::display::{draw_centred, draw_string, Surface};
use crate::item::Item;
use crate::time::{MilliSeconds, Time};

/// Every row occupies one 10 px band of the viewport.
pub const ROW_HEIGHT: i32 = 10;
/// The title (and the hover readout) occupy the topmost band.
pub const TITLE_HEIGHT: i32 = 10;

/// Rejected caller input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// `add_item` on a menu already holding its capacity.
    MenuFull,
    /// Item index outside `0..item_count`.
    IndexOutOfRange,
}

/// A vertical menu of up to `N` owned items rendered into a `width` x
/// `height` viewport. One item is hovered; the hovered item may also be
/// selected, in which case its callback runs every tick.
///
/// All operations are synchronous and must be serialized by the host's
/// control loop.
pub struct Menu<'a, C, const N: usize> {
    items: Vec<Item<'a, C>, N>,
    hovered: usize,
    selected: bool,
    /// Title text, centred in the top band.
    pub label: &'a str,
    width: i32,
    height: i32,
}

impl<'a, C, const N: usize> Menu<'a, C, N> {
    pub fn new(label: &'a str, width: i32, height: i32) -> Self {
        Menu {
            items: Vec::new(),
            hovered: 0,
            selected: false,
            label,
            width,
            height,
        }
    }

    /// Appends an item. A menu already at capacity reports
    /// [`Error::MenuFull`] and leaves the item list untouched.
    pub fn add_item(&mut self, item: Item<'a, C>) -> Result<(), Error> {
        self.items.push(item).map_err(|_| Error::MenuFull)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, index: usize) -> Option<&Item<'a, C>> {
        self.items.get(index)
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item<'a, C>> {
        self.items.get_mut(index)
    }

    pub fn hovered(&self) -> usize {
        self.hovered
    }

    /// Moves the cursor. A no-op when `index` is already hovered; any
    /// actual move leaves edit mode.
    pub fn set_hovered(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfRange);
        }
        if index != self.hovered {
            self.hovered = index;
            self.selected = false;
        }
        Ok(())
    }

    /// Enters or leaves edit mode for the hovered item.
    pub fn select(&mut self, select: bool) {
        self.selected = select;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Exchanges two item slots in place. The cursor is not adjusted: a
    /// swap involving the hovered slot changes which item is hovered.
    pub fn swap(&mut self, first: usize, second: usize) -> Result<(), Error> {
        if first >= self.items.len() || second >= self.items.len() {
            return Err(Error::IndexOutOfRange);
        }
        self.items.swap(first, second);
        Ok(())
    }

    /// Drops every item and resets the cursor, leaving the menu as freshly
    /// constructed: hover back at 0, selection off.
    pub fn clear(&mut self) {
        self.items.clear();
        self.hovered = 0;
        self.selected = false;
    }

    /// Per-tick entry point: runs the selected item's callback, then
    /// redraws the whole viewport, so the recomputed value is what this
    /// frame shows.
    pub fn update<D: Surface>(
        &mut self,
        display: &mut D,
        now: Time<MilliSeconds>,
    ) -> Result<(), D::Error> {
        if self.selected {
            if let Some(item) = self.items.get_mut(self.hovered) {
                item.update();
            }
        }
        self.redraw(display, now)
    }

    /// Vertical offset applied to row 0 so the hovered row sits fully
    /// inside the viewport. A pure function of the hover position and the
    /// viewport height, recomputed from scratch every redraw; there is no
    /// scroll history.
    fn initial_offset(&self) -> i32 {
        let hovered_y = TITLE_HEIGHT + self.hovered as i32 * ROW_HEIGHT;

        if hovered_y + ROW_HEIGHT > self.height {
            // walk back one row at a time until the hovered row's bottom
            // edge fits; give up at the first row and keep the default
            let mut shift = 0;
            for _ in 1..self.hovered {
                shift -= ROW_HEIGHT;
                if hovered_y + ROW_HEIGHT + shift <= self.height {
                    return shift + ROW_HEIGHT;
                }
            }
        }

        ROW_HEIGHT
    }

    fn redraw<D: Surface>(
        &mut self,
        display: &mut D,
        now: Time<MilliSeconds>,
    ) -> Result<(), D::Error> {
        display.clear(BinaryColor::Off)?;

        let mut readout: String<20> = String::new();
        write!(readout, "{}", self.hovered).ok();
        draw_string(display, &readout, 0, 0)?;
        draw_centred(display, self.label, self.width, 0)?;

        let mut offset = self.initial_offset();
        let hovered = self.hovered;
        let selected = self.selected;
        let width = self.width;
        let height = self.height;

        for (index, item) in self.items.iter_mut().enumerate() {
            if offset >= TITLE_HEIGHT {
                Line::new(Point::new(0, offset - 2), Point::new(width - 1, offset - 2))
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                    .draw(display)?;
            }

            if offset + ROW_HEIGHT <= height && offset >= TITLE_HEIGHT {
                item.draw(
                    display,
                    hovered == index && selected,
                    hovered == index,
                    offset,
                    width,
                    now,
                )?;
            } else if offset > height {
                // rows only ever move downward from here
                break;
            }

            offset += ROW_HEIGHT;
        }

        display.flush()
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use crate::item::Value;
    use crate::time::Duration;

    use super::*;

    fn nudge(value: f32, _: Option<&mut ()>) -> f32 {
        value + 0.01
    }

    fn flip(value: bool, _: Option<&mut ()>) -> bool {
        !value
    }

    fn keep(value: i32, _: Option<&mut ()>) -> i32 {
        value
    }

    fn filled_menu<const N: usize>(count: usize, height: i32) -> Menu<'static, (), N> {
        let mut menu = Menu::new("config", 64, height);
        for _ in 0..count {
            menu.add_item(Item::int(keep, 0, "n")).unwrap();
        }
        menu
    }

    fn fresh_display() -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn set_hovered_is_idempotent() {
        let mut menu = filled_menu::<4>(4, 64);
        menu.set_hovered(2).unwrap();
        menu.select(true);
        menu.set_hovered(2).unwrap();
        assert!(menu.is_selected());
        assert_eq!(menu.hovered(), 2);
    }

    #[test]
    fn moving_the_cursor_deselects() {
        let mut menu = filled_menu::<4>(4, 64);
        menu.select(true);
        menu.set_hovered(1).unwrap();
        assert!(!menu.is_selected());
        assert_eq!(menu.hovered(), 1);
    }

    #[test]
    fn set_hovered_rejects_out_of_range() {
        let mut menu = filled_menu::<4>(2, 64);
        assert_eq!(menu.set_hovered(2), Err(Error::IndexOutOfRange));
        assert_eq!(menu.hovered(), 0);
    }

    #[test]
    fn add_item_rejects_overflow() {
        let mut menu = filled_menu::<2>(2, 64);
        assert_eq!(
            menu.add_item(Item::int(keep, 0, "n")),
            Err(Error::MenuFull)
        );
        assert_eq!(menu.item_count(), 2);
    }

    #[test]
    fn swap_is_bounds_checked_and_keeps_the_cursor() {
        let mut menu: Menu<(), 4> = Menu::new("config", 64, 64);
        menu.add_item(Item::int(keep, 1, "a")).unwrap();
        menu.add_item(Item::int(keep, 2, "b")).unwrap();
        menu.set_hovered(1).unwrap();

        menu.swap(0, 1).unwrap();
        assert_eq!(menu.item(0).unwrap().value(), Value::Int(2));
        assert_eq!(menu.item(1).unwrap().value(), Value::Int(1));
        assert_eq!(menu.hovered(), 1);

        assert_eq!(menu.swap(0, 2), Err(Error::IndexOutOfRange));
    }

    #[test]
    fn clear_drops_items_and_resets_the_cursor() {
        let mut menu = filled_menu::<8>(5, 64);
        menu.set_hovered(3).unwrap();
        menu.select(true);

        menu.clear();
        assert_eq!(menu.item_count(), 0);
        assert_eq!(menu.hovered(), 0);
        assert!(!menu.is_selected());
    }

    #[test]
    fn offset_is_a_pure_function_of_hover_and_height() {
        let mut menu = filled_menu::<8>(8, 40);
        menu.set_hovered(5).unwrap();
        assert_eq!(menu.initial_offset(), menu.initial_offset());
    }

    #[test]
    fn default_offset_when_the_hovered_row_already_fits() {
        let menu = filled_menu::<8>(8, 64);
        assert_eq!(menu.initial_offset(), ROW_HEIGHT);
    }

    #[test]
    fn scrolls_back_just_enough_for_the_hovered_row() {
        // three rows, but only two fit below the title
        let mut menu = filled_menu::<3>(3, 30);
        menu.set_hovered(2).unwrap();
        assert_eq!(menu.initial_offset(), 0);
    }

    #[test]
    fn falls_back_to_the_default_when_no_shift_suffices() {
        // a single row band below the title can never show row 1
        let mut menu = filled_menu::<4>(2, 20);
        menu.set_hovered(1).unwrap();
        assert_eq!(menu.initial_offset(), ROW_HEIGHT);
    }

    #[test]
    fn hovered_row_stays_inside_every_feasible_viewport() {
        for height in (30..=64).step_by(2) {
            for hovered in 0..6 {
                let mut menu = filled_menu::<6>(6, height);
                menu.set_hovered(hovered).unwrap();
                let y = menu.initial_offset() + hovered as i32 * ROW_HEIGHT;
                assert!(
                    y >= TITLE_HEIGHT && y + ROW_HEIGHT <= height,
                    "row {} escaped a {} px viewport (y = {})",
                    hovered,
                    height,
                    y
                );
            }
        }
    }

    #[test]
    fn update_runs_the_selected_callback_before_rendering() {
        let mut menu: Menu<(), 4> = Menu::new("pump", 64, 64);
        menu.add_item(Item::boolean(flip, false, "on")).unwrap();
        menu.select(true);

        let mut display = fresh_display();
        menu.update(&mut display, Time::from(0)).unwrap();
        assert_eq!(menu.item(0).unwrap().value(), Value::Bool(true));
    }

    #[test]
    fn unselected_update_leaves_values_alone() {
        let mut menu: Menu<(), 4> = Menu::new("pump", 64, 64);
        menu.add_item(Item::float(nudge, 1.0, "t")).unwrap();

        let mut display = fresh_display();
        menu.update(&mut display, Time::from(0)).unwrap();
        assert_eq!(menu.item(0).unwrap().value(), Value::Float(1.0));
    }

    #[test]
    fn update_on_an_empty_selected_menu_is_harmless() {
        let mut menu: Menu<(), 4> = Menu::new("pump", 64, 64);
        menu.select(true);
        let mut display = fresh_display();
        menu.update(&mut display, Time::from(0)).unwrap();
    }

    #[test]
    fn redraw_places_the_marker_on_the_hovered_row() {
        let mut menu = filled_menu::<4>(3, 64);
        menu.set_hovered(1).unwrap();

        let mut display = fresh_display();
        menu.update(&mut display, Time::from(0)).unwrap();
        // row 1 sits at y = 10 + 1 * 10; marker pixel at (2, y + 4)
        assert_eq!(
            display.get_pixel(Point::new(2, 24)),
            Some(BinaryColor::On)
        );
    }

    #[test]
    fn scrolled_menu_shows_the_hovered_row_and_hides_row_zero() {
        // untitled so the top band stays empty except for the readout
        let mut menu: Menu<(), 3> = Menu::new("", 64, 30);
        for _ in 0..3 {
            menu.add_item(Item::int(keep, 0, "n")).unwrap();
        }
        menu.set_hovered(2).unwrap();

        let mut display = fresh_display();
        menu.update(&mut display, Time::from(0)).unwrap();
        // offset 0 puts row 2 at y = 20, inside the 30 px viewport
        assert_eq!(
            display.get_pixel(Point::new(2, 24)),
            Some(BinaryColor::On)
        );
        // row 0 lands in the title band and is skipped entirely: the area
        // its right-aligned value would occupy stays dark (the readout only
        // touches the far left)
        for x in 40..64 {
            for y in 0..8 {
                assert_ne!(display.get_pixel(Point::new(x, y)), Some(BinaryColor::On));
            }
        }
    }

    #[test]
    fn blink_goes_dark_only_in_edit_mode() {
        let mut menu = filled_menu::<4>(2, 64);
        let after_delay = Time::from(0) + Duration::ms(650);

        let mut display = fresh_display();
        menu.update(&mut display, after_delay).unwrap();
        assert_eq!(display.get_pixel(Point::new(2, 14)), Some(BinaryColor::On));

        menu.select(true);
        let mut display = fresh_display();
        menu.update(&mut display, after_delay).unwrap();
        assert_eq!(display.get_pixel(Point::new(2, 14)), Some(BinaryColor::Off));
    }
}
