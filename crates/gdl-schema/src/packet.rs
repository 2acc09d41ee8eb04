use serde::Serialize;

use gdl_store::Record;
use gdl_types::{Document, Element, PacketId};

use crate::decode::{expect_root, Decode};
use crate::error::{DecodeError, DecodeResult};
use crate::fields::Fields;

/// Mapping between a packet's wire id and its name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PacketDef {
    pub id: PacketId,
    pub name: String,
}

impl PacketDef {
    const RECORD: &'static str = "Packet";

    fn from_element(el: &Element, index: usize) -> DecodeResult<Self> {
        let name = el
            .child_text("PacketName")
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DecodeError::MissingField {
                record: Self::RECORD,
                name: format!("#{index}"),
                field: "PacketName",
            })?;
        let f = Fields::new(Self::RECORD, name, el);
        Ok(Self {
            id: f.code(f.required_text("PacketID")?)?,
            name: name.to_string(),
        })
    }
}

impl Record for PacketDef {
    type Key = PacketId;

    fn key(&self) -> &PacketId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Decode for PacketDef {
    const ROOT: &'static str = "Packets";

    fn decode(doc: &Document) -> DecodeResult<Vec<Self>> {
        expect_root(doc, Self::ROOT)?;
        doc.root()
            .children_named(Self::RECORD)
            .enumerate()
            .map(|(i, el)| Self::from_element(el, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_packets() {
        let doc = Document::parse(
            "<Packets>
               <Packet><PacketName>Failure</PacketName><PacketID>0</PacketID></Packet>
               <Packet><PacketName>Hello</PacketName><PacketID>0x01</PacketID></Packet>
             </Packets>",
        )
        .unwrap();
        let packets = PacketDef::decode(&doc).unwrap();
        assert_eq!(
            packets,
            vec![
                PacketDef { id: PacketId(0), name: "Failure".into() },
                PacketDef { id: PacketId(1), name: "Hello".into() },
            ]
        );
    }

    #[test]
    fn missing_name_reports_position() {
        let doc = Document::parse(
            "<Packets><Packet><PacketName>A</PacketName><PacketID>1</PacketID></Packet><Packet><PacketID>2</PacketID></Packet></Packets>",
        )
        .unwrap();
        assert_eq!(
            PacketDef::decode(&doc).unwrap_err(),
            DecodeError::MissingField {
                record: "Packet",
                name: "#1".into(),
                field: "PacketName",
            }
        );
    }

    #[test]
    fn out_of_range_id_rejected() {
        let doc = Document::parse(
            "<Packets><Packet><PacketName>Big</PacketName><PacketID>300</PacketID></Packet></Packets>",
        )
        .unwrap();
        assert!(matches!(
            PacketDef::decode(&doc),
            Err(DecodeError::InvalidCode { .. })
        ));
    }
}
