//! Record types and decoders for the game definition datasets.
//!
//! Each dataset record implements [`Record`](gdl_store::Record) (key + name)
//! and [`Decode`] (document → records in document order). Decoders are pure:
//! they never touch the filesystem or network.
//!
//! | record         | key           | source root     |
//! |----------------|---------------|-----------------|
//! | [`Item`]       | `ObjectType`  | `<Objects>`     |
//! | [`GameObject`] | `ObjectType`  | `<Objects>`     |
//! | [`Tile`]       | `TileType`    | `<GroundTypes>` |
//! | [`PacketDef`]  | `PacketId`    | `<Packets>`     |
//! | [`ServerInfo`] | server name   | `<Chars>`       |

pub mod decode;
pub mod error;
mod fields;
pub mod item;
pub mod object;
pub mod packet;
pub mod server;
pub mod tile;

pub use decode::Decode;
pub use error::{DecodeError, DecodeResult};
pub use item::Item;
pub use object::GameObject;
pub use packet::PacketDef;
pub use server::ServerInfo;
pub use tile::Tile;
