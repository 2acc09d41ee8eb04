//! Foundation types for the game definition loader (GDL).
//!
//! This crate provides the document model and the short identifier types
//! used throughout GDL. Every other GDL crate depends on `gdl-types`.
//!
//! # Key Types
//!
//! - [`Document`]: Owned XML element tree handed from sources to decoders
//! - [`Element`]: A single element with attributes, children and text
//! - [`ObjectType`]: 16-bit object/item type code (`0x0a00`)
//! - [`TileType`]: 16-bit ground tile type code
//! - [`PacketId`]: 8-bit network packet identifier

pub mod code;
pub mod document;
pub mod error;

pub use code::{parse_type_code, ObjectType, PacketId, TileType};
pub use document::{Document, Element};
pub use error::TypeError;
