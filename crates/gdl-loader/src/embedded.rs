//! Game data compiled into the binary, used when no local file is present.

use gdl_source::Strategy;

pub const OBJECTS: &str = include_str!("../assets/Objects.xml");
pub const TILES: &str = include_str!("../assets/Tiles.xml");
pub const PACKETS: &str = include_str!("../assets/Packets.xml");

pub fn objects() -> Strategy {
    Strategy::Embedded {
        label: "Objects.xml",
        payload: OBJECTS,
    }
}

pub fn tiles() -> Strategy {
    Strategy::Embedded {
        label: "Tiles.xml",
        payload: TILES,
    }
}

pub fn packets() -> Strategy {
    Strategy::Embedded {
        label: "Packets.xml",
        payload: PACKETS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdl_schema::{Decode, GameObject, Item, PacketDef, Tile};
    use gdl_store::KeyedStore;
    use gdl_types::Document;

    fn store<V: Decode>(payload: &str) -> KeyedStore<V::Key, V> {
        let doc = Document::parse(payload).unwrap();
        KeyedStore::build(V::decode(&doc).unwrap()).unwrap()
    }

    #[test]
    fn objects_payload_builds() {
        let objects = store::<GameObject>(OBJECTS);
        assert!(!objects.is_empty());
        assert_eq!(objects.by_name("Medusa").unwrap().display_name(), "Medusa of the Wastes");
    }

    #[test]
    fn items_are_the_equipment_subset() {
        let objects = store::<GameObject>(OBJECTS);
        let items = store::<Item>(OBJECTS);
        let equipment = objects.iter().filter(|o| o.class == "Equipment").count();
        assert_eq!(items.len(), equipment);
        assert!(items.len() < objects.len());
        assert!(items.by_name("Short Sword").is_ok());
        assert!(items.by_name("Wizard").is_err());
    }

    #[test]
    fn tiles_payload_builds() {
        let tiles = store::<Tile>(TILES);
        assert!(tiles.by_name("Lava").unwrap().is_damaging());
        assert!(!tiles.by_name("Grass").unwrap().is_damaging());
    }

    #[test]
    fn packets_payload_builds() {
        let packets = store::<PacketDef>(PACKETS);
        assert_eq!(packets.by_name("Hello").unwrap().id.code(), 16);
    }
}
