//! # Receipt Core
//!
//! Document model for thermal-printer receipts: a fixed-width vertical
//! sequence of text runs, images, spacers and rules, each carrying the
//! style captured when it was appended.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               receipt-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Receipt         │  Items                   │
//! │  - fixed width   │  - Text / Image          │
//! │  - style scratch │  - BlankSpace / Rule     │
//! │  - item sequence │  - style snapshots       │
//! ├─────────────────────────────────────────────┤
//! │  Style           │  Primitives              │
//! │  - size, colors  │  - Color, Margins        │
//! │  - font, align   │  - Align, Bitmap         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Rasterization lives in the `receipt-renderer` crate; this crate holds
//! only the document and its invariants (append order is paint order,
//! snapshots are value copies).

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bitmap;
pub mod color;
pub mod error;
pub mod item;
pub mod receipt;
pub mod style;

pub use bitmap::Bitmap;
pub use color::Color;
pub use error::{ReceiptError, ReceiptResult};
pub use item::{BlankSpaceItem, ImageItem, ReceiptItem, RuleItem, TextItem};
pub use receipt::Receipt;
pub use style::{Align, FontId, Margins, Style};

/// Receipt core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
