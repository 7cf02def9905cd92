// SPDX-License-Identifier: MPL-2.0
//! `gallery_lens` is the headless core of an interactive media gallery.
//!
//! It loads a store's gallery with bounded retries, filters it by category and
//! tags, and drives a full-screen viewer with paged navigation, pinch/pan/
//! double-tap transforms, neighbor prefetching and once-per-session view
//! counting. Rendering, networking and platform surfaces are supplied by the
//! host through the traits in [`application::port`].

#![doc(html_root_url = "https://docs.rs/gallery_lens/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
