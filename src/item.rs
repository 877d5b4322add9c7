//! One interactive menu row: a typed value, the callback that recomputes it,
//! and the row's rendering.

use core::cell::RefCell;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::display::{self, bool_text, fmt_float, fmt_int};
use crate::time::{Duration, MilliSeconds, Time};

/// Hover marker position within a row.
const MARKER_X: i32 = 2;
const MARKER_Y: i32 = 4;
/// x where row text starts.
const TEXT_X: i32 = 5;

/// Marker lit / dark spans of the selection blink, per cycle.
const BLINK_DELAY_MS: u32 = 650;
const BLINK_DURATION_MS: u32 = 700;

/// Update callback of a value item: receives the current value and the
/// capture context, returns the value to store. Runs once per tick while
/// the item is hovered and selected, so it must tolerate being called
/// repeatedly.
pub type Update<T, C> = fn(T, Option<&mut C>) -> T;

/// Button press callback; side effect only.
pub type Press<C> = fn(Option<&mut C>);

/// Item discriminant, fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Button,
    Float,
    Bool,
    Int,
    Text,
}

/// Self-describing snapshot of an item's current value. A button reports
/// its caption.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value<'a> {
    Float(f32),
    Bool(bool),
    Int(i32),
    Text(&'a str),
}

/// The value and its callback live in one variant, so the stored kind and
/// the invoked signature can never disagree.
enum Content<'a, C> {
    Button { caption: &'a str, press: Press<C> },
    Float { value: f32, update: Update<f32, C> },
    Bool { value: bool, update: Update<bool, C> },
    Int { value: i32, update: Update<i32, C> },
    Text { value: &'a str, update: Update<&'a str, C> },
}

impl<'a, C> Clone for Content<'a, C> {
    fn clone(&self) -> Self {
        match *self {
            Content::Button { caption, press } => Content::Button { caption, press },
            Content::Float { value, update } => Content::Float { value, update },
            Content::Bool { value, update } => Content::Bool { value, update },
            Content::Int { value, update } => Content::Int { value, update },
            Content::Text { value, update } => Content::Text { value, update },
        }
    }
}

/// One menu row. `C` is the host-owned capture context made visible to the
/// callback on every invocation; items hold only a shared reference to it.
///
/// Cloning is shallow: the clone invokes the same callback and shares the
/// same capture reference and text.
pub struct Item<'a, C> {
    content: Content<'a, C>,
    label: &'a str,
    capture: Option<&'a RefCell<C>>,
    /// How long the selection marker stays lit within one blink cycle.
    pub blink_delay: Duration<MilliSeconds>,
    /// How long it stays dark before the cycle restarts.
    pub blink_duration: Duration<MilliSeconds>,
    last_blink: Time<MilliSeconds>,
}

impl<'a, C> Clone for Item<'a, C> {
    fn clone(&self) -> Self {
        Item {
            content: self.content.clone(),
            label: self.label,
            capture: self.capture,
            blink_delay: self.blink_delay,
            blink_duration: self.blink_duration,
            last_blink: self.last_blink,
        }
    }
}

impl<'a, C> Item<'a, C> {
    pub fn float(update: Update<f32, C>, value: f32, label: &'a str) -> Self {
        Self::with_content(Content::Float { value, update }, label)
    }

    pub fn int(update: Update<i32, C>, value: i32, label: &'a str) -> Self {
        Self::with_content(Content::Int { value, update }, label)
    }

    pub fn boolean(update: Update<bool, C>, value: bool, label: &'a str) -> Self {
        Self::with_content(Content::Bool { value, update }, label)
    }

    pub fn text(update: Update<&'a str, C>, value: &'a str, label: &'a str) -> Self {
        Self::with_content(Content::Text { value, update }, label)
    }

    /// An action row; the caption doubles as the row's only text.
    pub fn button(press: Press<C>, caption: &'a str) -> Self {
        Self::with_content(Content::Button { caption, press }, "")
    }

    fn with_content(content: Content<'a, C>, label: &'a str) -> Self {
        Item {
            content,
            label,
            capture: None,
            blink_delay: Duration::ms(BLINK_DELAY_MS),
            blink_duration: Duration::ms(BLINK_DURATION_MS),
            last_blink: Time::from(0),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self.content {
            Content::Button { .. } => ItemKind::Button,
            Content::Float { .. } => ItemKind::Float,
            Content::Bool { .. } => ItemKind::Bool,
            Content::Int { .. } => ItemKind::Int,
            Content::Text { .. } => ItemKind::Text,
        }
    }

    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn value(&self) -> Value<'a> {
        match self.content {
            Content::Button { caption, .. } => Value::Text(caption),
            Content::Float { value, .. } => Value::Float(value),
            Content::Bool { value, .. } => Value::Bool(value),
            Content::Int { value, .. } => Value::Int(value),
            Content::Text { value, .. } => Value::Text(value),
        }
    }

    /// Replaces the capture reference handed to the callback. Takes effect
    /// on the next [`update`](Item::update).
    pub fn set_capture(&mut self, capture: Option<&'a RefCell<C>>) {
        self.capture = capture;
    }

    /// Runs the callback and stores its result (buttons run for their side
    /// effect only). The capture context is borrowed for the duration of
    /// the call; the host must not hold its own borrow across a tick.
    pub fn update(&mut self) {
        match self.capture {
            Some(cell) => {
                let mut context = cell.borrow_mut();
                self.run_update(Some(&mut context));
            }
            None => self.run_update(None),
        }
    }

    fn run_update(&mut self, context: Option<&mut C>) {
        match &mut self.content {
            Content::Button { press, .. } => press(context),
            Content::Float { value, update } => *value = update(*value, context),
            Content::Bool { value, update } => *value = update(*value, context),
            Content::Int { value, update } => *value = update(*value, context),
            Content::Text { value, update } => *value = update(*value, context),
        }
    }

    /// Renders the row at `y`. A hovered row carries the focus marker; a
    /// hovered and selected row blinks it against the injected clock:
    /// lit for `blink_delay`, dark for `blink_duration`, each cycle.
    pub fn draw<D>(
        &mut self,
        target: &mut D,
        selected: bool,
        hovered: bool,
        y: i32,
        width: i32,
        now: Time<MilliSeconds>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let marker = Point::new(MARKER_X, y + MARKER_Y);

        if hovered {
            Pixel(marker, BinaryColor::On).draw(target)?;
        }

        if selected && hovered && now - self.last_blink >= self.blink_delay {
            Pixel(marker, BinaryColor::Off).draw(target)?;
            if now - self.last_blink > self.blink_delay + self.blink_duration {
                self.last_blink = now;
            }
        }

        if self.kind() != ItemKind::Button {
            display::draw_string(target, self.label, TEXT_X, y)?;
        }

        match &self.content {
            Content::Button { caption, .. } => display::draw_string(target, caption, TEXT_X, y)?,
            Content::Float { value, .. } => {
                display::draw_right_aligned(target, &fmt_float(*value), width, y)?
            }
            Content::Bool { value, .. } => {
                display::draw_right_aligned(target, bool_text(*value), width, y)?
            }
            Content::Int { value, .. } => {
                display::draw_right_aligned(target, &fmt_int(*value), width, y)?
            }
            Content::Text { value, .. } => {
                display::draw_right_aligned(target, value, width, y)?
            }
        }

        Ok(())
    }
}
