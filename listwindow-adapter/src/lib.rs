//! Host bindings for the `listwindow` engine.
//!
//! `listwindow` only knows about numbers: scroll positions, extents, heights. This crate connects
//! it to a scrollable container owned by a UI layer:
//!
//! - [`ScrollElement`] describes what the engine needs to read from that container;
//! - [`Controller`] resolves the element lazily, syncs on attach, and turns scroll/resize
//!   notifications into engine updates;
//! - [`Subscription`] scopes notifications to one attach/detach cycle, so a late notification
//!   from a torn-down container cannot touch the engine.
//!
//! No framework bindings live here; a DOM, egui, or terminal layer implements [`ScrollElement`]
//! for its own handle.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod element;
mod subscription;


pub use controller::{Controller, ScrollElementGetter};
pub use element::ScrollElement;
pub use subscription::{Delivery, Subscription};
