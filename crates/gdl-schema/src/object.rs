use serde::Serialize;

use gdl_store::Record;
use gdl_types::{Document, Element, ObjectType};

use crate::decode::{expect_root, Decode};
use crate::error::DecodeResult;
use crate::fields::{required_attr, Fields};

/// Any entity definition from the objects document. Players, enemies,
/// containers and equipment all decode to this.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameObject {
    pub object_type: ObjectType,
    pub name: String,
    pub class: String,
    pub display_id: Option<String>,
    pub enemy: bool,
    pub max_hit_points: Option<u32>,
    pub defense: u32,
    pub size: u32,
}

impl GameObject {
    const RECORD: &'static str = "Object";

    pub(crate) fn from_element(el: &Element, index: usize) -> DecodeResult<Self> {
        let raw_type = required_attr(el, Self::RECORD, index, "type")?;
        let name = required_attr(el, Self::RECORD, index, "id")?;
        let f = Fields::new(Self::RECORD, name, el);

        Ok(Self {
            object_type: f.code(raw_type)?,
            name: name.to_string(),
            class: f.required_text("Class")?.to_string(),
            display_id: f.text("DisplayId").map(str::to_string),
            enemy: f.flag("Enemy")?,
            max_hit_points: f.optional("MaxHitPoints")?,
            defense: f.optional("Defense")?.unwrap_or(0),
            size: f.optional("Size")?.unwrap_or(100),
        })
    }

    /// The name shown in game: `DisplayId` when set, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.display_id.as_deref().unwrap_or(&self.name)
    }
}

impl Record for GameObject {
    type Key = ObjectType;

    fn key(&self) -> &ObjectType {
        &self.object_type
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Decode for GameObject {
    const ROOT: &'static str = "Objects";

    fn decode(doc: &Document) -> DecodeResult<Vec<Self>> {
        expect_root(doc, Self::ROOT)?;
        doc.root()
            .children_named(Self::RECORD)
            .enumerate()
            .map(|(i, el)| Self::from_element(el, i))
            .collect()
    }
}
