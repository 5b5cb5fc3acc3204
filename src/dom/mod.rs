//! HTML document tree: parsing, traversal and serialization.
//!
//! # Example
//!
//! ```
//! use imginline::dom::{parse_html, to_html_string};
//!
//! let dom = parse_html("<p>Hello").unwrap();
//! let elements = dom
//!     .descendants(dom.document())
//!     .filter(|&id| dom.is_element(id))
//!     .count();
//! assert_eq!(elements, 4);
//! assert_eq!(
//!     to_html_string(&dom).unwrap(),
//!     "<html><head></head><body><p>Hello</p></body></html>"
//! );
//! ```

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{
    ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ChildrenIter, Descendants,
};
pub use serialize::{SerializableNode, to_html_string, write_html};
pub use tree_sink::{ArenaSink, NodeHandle};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;

use crate::error::{Error, Result};

/// Parse an HTML document into an [`ArenaDom`].
///
/// Malformed markup is repaired the way browsers do it. The only failure is a
/// tree without a root element, which the stock tree builder never produces.
pub fn parse_html(html: &str) -> Result<ArenaDom> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let sink = parse_document(ArenaSink::new(), opts)
        .from_utf8()
        .one(html.as_bytes());

    let errors = sink.parse_errors();
    if errors > 0 {
        log::debug!("recovered from {errors} HTML parse errors");
    }

    let dom = sink.into_dom();
    if !dom.children(dom.document()).any(|id| dom.is_element(id)) {
        return Err(Error::Parse("document has no root element".to_string()));
    }
    Ok(dom)
}
