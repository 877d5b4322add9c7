//! In-place navigable item menu for small monochrome displays.
//!
//! The host defines typed, interactive rows (numeric, boolean, text and
//! button items), each bound to an update callback, and drives the menu
//! from its control loop: navigation calls in response to input events,
//! then one [`Menu::update`](menu::Menu::update) per tick with the current
//! millisecond instant and the render surface.

#![deny(unsafe_code)]
#![no_std]

pub mod display;
pub mod item;
pub mod menu;
pub mod time;

pub use crate::display::{draw_centred, draw_right_aligned, Surface};
pub use crate::item::{Item, ItemKind, Press, Update, Value};
pub use crate::menu::{Error, Menu, ROW_HEIGHT, TITLE_HEIGHT};
pub use crate::time::{Duration, MilliSeconds, Time};
