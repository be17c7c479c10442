//! # Receipt Renderer
//!
//! CPU rasterizer for receipt documents: fonts, pixel surface, the
//! two-pass layout engine and export encoders.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Receipt (model)                │
//! ├─────────────────────────────────────────────┤
//! │ measure pass │ Σ band heights → total size  │
//! │ paint pass   │ items → content surface      │
//! │ composite    │ content → full-width canvas  │
//! ├──────────────┬───────────────┬──────────────┤
//! │ FontStore    │ Pixmap        │ Export       │
//! │ (TTF + ROM)  │ (RGBA + clip) │ (PNG, 1-bit) │
//! └──────────────┴───────────────┴──────────────┘
//! ```
//!
//! ```
//! use receipt_core::{Align, Receipt};
//! use receipt_renderer::Rasterizer;
//!
//! let receipt = Receipt::new(384)
//!     .with_text_size(24.0)
//!     .with_align(Align::Center)
//!     .add_text("TOTAL  12.80");
//! let canvas = Rasterizer::new().render(&receipt).expect("render");
//! assert_eq!(canvas.width(), 384);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod draw;
pub mod error;
pub mod export;
pub mod font;
pub mod image;
pub mod pixmap;
pub mod render;

pub use draw::{Band, Drawable, RenderContext};
pub use error::{RenderError, RenderResult};
pub use export::{
    to_thermal_raster, DitherMode, ExportConfig, ExportFormat, PixmapExporter, ThermalRaster,
};
pub use font::{FontStore, Metrics};
pub use pixmap::Pixmap;
pub use render::{Rasterizer, CANVAS_PADDING};

/// Receipt renderer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
