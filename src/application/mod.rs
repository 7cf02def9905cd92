// SPDX-License-Identifier: MPL-2.0
//! Application layer: gallery use cases.
//!
//! - [`port`]: traits the host implements (data service, analytics, share, cache)
//! - [`section`]: gallery loading, filtering and viewer entry
//! - [`viewer`]: the full-screen viewer state machine
//! - [`retry`]: bounded backoff for critical loads
//! - [`collaborators`]: the bundle of port implementations handed to both
//!
//! Nothing here renders or performs I/O directly. Every side effect goes
//! through a port, and asynchronous results come back as messages.
//!
//! ```ignore
//! use gallery_lens::application::{Collaborators, GallerySection};
//!
//! let mut section = GallerySection::new(store_id, collaborators, &config);
//! section.load().await?;
//! section.select_category("food");
//! let mut viewer = section.open_viewer(0)?;
//! viewer.next();
//! ```

pub mod collaborators;
pub mod port;
pub mod retry;
pub mod section;
pub mod viewer;

pub use collaborators::Collaborators;
pub use retry::{fetch_with_retry, RetryExhausted, RetryPolicy};
pub use section::{GallerySection, LoadState};
