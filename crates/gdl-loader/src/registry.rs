use std::sync::{Arc, RwLock};

use gdl_schema::{GameObject, Item, PacketDef, ServerInfo, Tile};
use gdl_store::KeyedStore;
use gdl_types::{ObjectType, PacketId, TileType};

use crate::dataset::DatasetName;

pub type ItemStore = KeyedStore<ObjectType, Item>;
pub type TileStore = KeyedStore<TileType, Tile>;
pub type ObjectStore = KeyedStore<ObjectType, GameObject>;
pub type PacketStore = KeyedStore<PacketId, PacketDef>;
pub type ServerStore = KeyedStore<String, ServerInfo>;

/// One published store, or nothing.
pub(crate) struct Slot<K, V> {
    inner: RwLock<Option<Arc<KeyedStore<K, V>>>>,
}

impl<K, V> Slot<K, V> {
    fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    fn get(&self) -> Option<Arc<KeyedStore<K, V>>> {
        self.inner.read().expect("registry lock poisoned").clone()
    }

    fn is_populated(&self) -> bool {
        self.inner.read().expect("registry lock poisoned").is_some()
    }

    pub(crate) fn publish(&self, store: Arc<KeyedStore<K, V>>) {
        *self.inner.write().expect("registry lock poisoned") = Some(store);
    }

    pub(crate) fn clear(&self) {
        *self.inner.write().expect("registry lock poisoned") = None;
    }
}

/// The published datasets.
///
/// A registry is created empty and filled by
/// [`DataLoader::load`](crate::DataLoader::load). Readers get an `Arc` to an
/// immutable store, so a later reload never invalidates a store already
/// handed out.
pub struct Registry {
    items: Slot<ObjectType, Item>,
    tiles: Slot<TileType, Tile>,
    objects: Slot<ObjectType, GameObject>,
    packets: Slot<PacketId, PacketDef>,
    servers: Slot<String, ServerInfo>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            items: Slot::new(),
            tiles: Slot::new(),
            objects: Slot::new(),
            packets: Slot::new(),
            servers: Slot::new(),
        }
    }

    pub fn items(&self) -> Option<Arc<ItemStore>> {
        self.items.get()
    }

    pub fn tiles(&self) -> Option<Arc<TileStore>> {
        self.tiles.get()
    }

    pub fn objects(&self) -> Option<Arc<ObjectStore>> {
        self.objects.get()
    }

    pub fn packets(&self) -> Option<Arc<PacketStore>> {
        self.packets.get()
    }

    pub fn servers(&self) -> Option<Arc<ServerStore>> {
        self.servers.get()
    }

    pub fn is_populated(&self, dataset: DatasetName) -> bool {
        match dataset {
            DatasetName::Items => self.items.is_populated(),
            DatasetName::Tiles => self.tiles.is_populated(),
            DatasetName::Objects => self.objects.is_populated(),
            DatasetName::Packets => self.packets.is_populated(),
            DatasetName::Servers => self.servers.is_populated(),
        }
    }

    /// Populated datasets, in declaration order.
    pub fn populated(&self) -> Vec<DatasetName> {
        DatasetName::ALL
            .into_iter()
            .filter(|&d| self.is_populated(d))
            .collect()
    }

    pub(crate) fn clear(&self, dataset: DatasetName) {
        match dataset {
            DatasetName::Items => self.items.clear(),
            DatasetName::Tiles => self.tiles.clear(),
            DatasetName::Objects => self.objects.clear(),
            DatasetName::Packets => self.packets.clear(),
            DatasetName::Servers => self.servers.clear(),
        }
    }

    pub(crate) fn items_slot(&self) -> &Slot<ObjectType, Item> {
        &self.items
    }

    pub(crate) fn tiles_slot(&self) -> &Slot<TileType, Tile> {
        &self.tiles
    }

    pub(crate) fn objects_slot(&self) -> &Slot<ObjectType, GameObject> {
        &self.objects
    }

    pub(crate) fn packets_slot(&self) -> &Slot<PacketId, PacketDef> {
        &self.packets
    }

    pub(crate) fn servers_slot(&self) -> &Slot<String, ServerInfo> {
        &self.servers
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("populated", &self.populated())
            .finish()
    }
}
