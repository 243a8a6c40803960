//! Lossless conversion between entity XML and an in-memory element tree.

pub mod codec;
pub mod element;

pub use codec::{parse, to_xml_string, XML_DECLARATION};
pub use element::{XmlElement, XmlNode};
