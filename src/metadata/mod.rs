//! Page metadata: tag extraction, alias resolution, decoding and card dispatch.

pub mod aliases;
pub mod decode;
pub mod dispatch;
pub mod tags;

use std::collections::HashMap;

pub use aliases::AliasTable;
pub use decode::{decode, Decode, DecodeError};
pub use dispatch::card_from_tags;
pub use tags::{extract_tags, TagVocabulary};

/// Metadata key → value, built fresh for every fetched page.
pub type TagMap = HashMap<String, String>;
