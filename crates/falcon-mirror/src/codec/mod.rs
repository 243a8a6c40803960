//! Value codecs shared by the field mapper.

pub mod date;
pub mod duration;
pub mod location;
pub mod tags;

pub use duration::Frequency;
pub use location::LocationKind;
pub use tags::{decode_tags, decode_user_tags, encode_tags, Tag};
