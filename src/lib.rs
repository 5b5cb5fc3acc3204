//! # imginline
//!
//! Turn an HTML document with local image references into a single portable
//! file by embedding each image as a base64 `data:` URI.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = imginline::convert_file(Path::new("page.html"), Path::new("out.html")).unwrap();
//! println!("{} images inlined", report.inlined);
//! ```
//!
//! ## How it works
//!
//! The input is parsed with html5ever into an arena tree ([`dom::ArenaDom`]),
//! which repairs malformed markup the way browsers do. A depth-first walk
//! ([`inline_images`]) visits every `img` element:
//!
//! - `http://` and `https://` sources are left alone
//! - other sources are resolved against the input file's directory, read,
//!   and replaced with `data:image/png;base64,...`
//! - unreadable files are logged and keep their original `src`
//!
//! The tree is then serialized back to HTML. Nothing else in the document
//! changes apart from the normalization the parser applies.

pub mod convert;
pub mod dom;
pub mod error;
pub mod inline;
pub(crate) mod util;

pub use convert::{base_dir, convert_file, inline_html};
pub use error::{Error, Result};
pub use inline::{InlineFailure, InlineReport, inline_images};
