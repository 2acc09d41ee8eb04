use serde::Serialize;

use gdl_store::Record;
use gdl_types::{Document, Element, TileType};

use crate::decode::{expect_root, Decode};
use crate::error::DecodeResult;
use crate::fields::{required_attr, Fields};

/// A ground tile definition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tile {
    pub tile_type: TileType,
    pub name: String,
    pub no_walk: bool,
    /// Movement speed multiplier; 1.0 when unspecified.
    pub speed: f32,
    pub min_damage: u32,
    pub max_damage: u32,
    pub sink: bool,
}

impl Tile {
    const RECORD: &'static str = "Ground";

    fn from_element(el: &Element, index: usize) -> DecodeResult<Self> {
        let raw_type = required_attr(el, Self::RECORD, index, "type")?;
        let name = required_attr(el, Self::RECORD, index, "id")?;
        let f = Fields::new(Self::RECORD, name, el);

        let min_damage: u32 = f.optional("MinDamage")?.unwrap_or(0);
        Ok(Self {
            tile_type: f.code(raw_type)?,
            name: name.to_string(),
            no_walk: f.flag("NoWalk")?,
            speed: f.optional("Speed")?.unwrap_or(1.0),
            min_damage,
            max_damage: f.optional("MaxDamage")?.unwrap_or(min_damage),
            sink: f.flag("Sink")?,
        })
    }

    /// Whether standing on this tile hurts.
    pub fn is_damaging(&self) -> bool {
        self.max_damage > 0
    }
}

impl Record for Tile {
    type Key = TileType;

    fn key(&self) -> &TileType {
        &self.tile_type
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Decode for Tile {
    const ROOT: &'static str = "GroundTypes";

    fn decode(doc: &Document) -> DecodeResult<Vec<Self>> {
        expect_root(doc, Self::ROOT)?;
        doc.root()
            .children_named(Self::RECORD)
            .enumerate()
            .map(|(i, el)| Self::from_element(el, i))
            .collect()
    }
}
