use serde::Serialize;

use gdl_store::Record;
use gdl_types::{Document, Element, ObjectType};

use crate::decode::{expect_root, Decode};
use crate::error::DecodeResult;
use crate::fields::{required_attr, Fields};

/// An equippable item.
///
/// Items share the objects document: every `<Object>` whose `<Class>` is
/// `Equipment` is an item, keyed by the same object type code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    pub object_type: ObjectType,
    pub name: String,
    pub slot_type: u8,
    /// `None` for untiered items.
    pub tier: Option<u8>,
    pub bag_type: u8,
    pub soulbound: bool,
    pub description: String,
}

impl Item {
    const RECORD: &'static str = "Item";
    const CLASS: &'static str = "Equipment";

    fn from_element(el: &Element, index: usize) -> DecodeResult<Self> {
        let raw_type = required_attr(el, Self::RECORD, index, "type")?;
        let name = required_attr(el, Self::RECORD, index, "id")?;
        let f = Fields::new(Self::RECORD, name, el);

        Ok(Self {
            object_type: f.code(raw_type)?,
            name: name.to_string(),
            slot_type: f.required("SlotType")?,
            tier: f.optional("Tier")?,
            bag_type: f.optional("BagType")?.unwrap_or(0),
            soulbound: f.flag("Soulbound")?,
            description: f.text("Description").unwrap_or_default().to_string(),
        })
    }
}

impl Record for Item {
    type Key = ObjectType;

    fn key(&self) -> &ObjectType {
        &self.object_type
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Decode for Item {
    const ROOT: &'static str = "Objects";

    fn decode(doc: &Document) -> DecodeResult<Vec<Self>> {
        expect_root(doc, Self::ROOT)?;
        doc.root()
            .children_named("Object")
            .enumerate()
            .filter(|(_, el)| el.child_text("Class") == Some(Self::CLASS))
            .map(|(i, el)| Self::from_element(el, i))
            .collect()
    }
}
