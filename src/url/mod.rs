//! Segment-based URL/path/query manipulation.
//!
//! A URL string is split into scheme/netloc/path/query/fragment. The path is
//! modeled as a list of decoded segments, the query as an insertion-ordered
//! multi-valued parameter store; both serialize back through `Display` so an
//! unmutated URL round-trips to an equivalent string.

mod codec;
mod error;
mod model;
mod omdict;
mod path;
mod query;
mod segments;
mod split;

pub use codec::{percent_decode, percent_decode_plus, percent_encode, percent_encode_plus};
pub use error::UrlError;
pub use model::{default_port, Url};
pub use omdict::OrderedMultiDict;
pub use path::Path;
pub use query::{Query, QueryItems, SAFE_KEY_CHARS, SAFE_VALUE_CHARS};
pub use segments::{join_path_segments, normalize_path, remove_path_segments};
pub use split::{split_url, unsplit_url, SplitUrl};
