//! Image inlining: find local `img` sources and embed them as data URIs.

mod encode;
mod report;
mod walker;

pub use encode::{DATA_URI_PREFIX, data_uri, encode_bytes, encode_file};
pub use report::{InlineFailure, InlineReport};
pub use walker::{inline_images, is_remote, resolve_src};
