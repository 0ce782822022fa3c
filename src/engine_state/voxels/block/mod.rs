//! # Block Module
//!
//! This module provides the block catalog: the static table that maps a block
//! identifier to its physical properties and per-face atlas textures.
//!
//! Block identifiers are plain `u8` indices into the catalog. The catalog is
//! loaded once at startup and is read-only afterwards.

use log::warn;
use serde::Deserialize;

use crate::error::VoxelError;
use block_face::BlockFace;

pub mod block_face;

/// The underlying integer type used to represent block types in memory.
pub type BlockId = u8;

/// Block id used whenever a configuration lookup fails.
pub const FALLBACK_BLOCK_ID: BlockId = 0;

/// Texture id returned for a face index outside `0..6`.
pub const SENTINEL_TEXTURE_ID: u8 = 9;

/// The largest number of entries a catalog can address with a [`BlockId`].
pub const MAX_CATALOG_LEN: usize = BlockId::MAX as usize + 1;

const DEFAULT_CATALOG_JSON: &str = include_str!("../../../../assets/blocks.json");

/// Physical and visual properties of one block type.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BlockDescriptor {
    /// Human readable name, used for lookups by the terrain generator.
    pub name: String,
    /// Whether the block occupies its voxel for meshing and collision.
    pub solid: bool,
    /// Whether faces behind this block stay visible.
    pub transparent: bool,
    /// Atlas texture ids, one per face in [`BlockFace`] order.
    pub face_textures: [u8; 6],
}

impl BlockDescriptor {
    /// Returns the atlas texture id for a face.
    pub fn texture_id(&self, face: BlockFace) -> u8 {
        self.face_textures[face as usize]
    }

    /// Returns the atlas texture id for a raw face index.
    ///
    /// Indices outside `0..6` are a configuration error: a warning is logged and
    /// [`SENTINEL_TEXTURE_ID`] is returned.
    pub fn texture_id_for_index(&self, face_index: u8) -> u8 {
        match BlockFace::from_index(face_index) {
            Some(face) => self.texture_id(face),
            None => {
                warn!(
                    "Texture id for {} requested with face index {} which is out of range",
                    self.name, face_index
                );
                SENTINEL_TEXTURE_ID
            }
        }
    }
}

/// The ordered, index-addressed table of block descriptors.
///
/// A block's id is its position in the catalog.
#[derive(Clone, Debug)]
pub struct BlockCatalog {
    blocks: Vec<BlockDescriptor>,
}

impl BlockCatalog {
    /// Builds a catalog from descriptors, validating it against the atlas size.
    ///
    /// Nothing here is fatal. Entries past [`MAX_CATALOG_LEN`] are dropped and
    /// texture ids outside the atlas are reported, both with a warning.
    pub fn new(mut blocks: Vec<BlockDescriptor>, atlas_size_in_blocks: u32) -> Self {
        if blocks.len() > MAX_CATALOG_LEN {
            warn!(
                "Block catalog has {} entries, only the first {} are addressable",
                blocks.len(),
                MAX_CATALOG_LEN
            );
            blocks.truncate(MAX_CATALOG_LEN);
        }

        let atlas_tiles = atlas_size_in_blocks * atlas_size_in_blocks;
        for block in &blocks {
            for (face, texture) in block.face_textures.iter().enumerate() {
                if u32::from(*texture) >= atlas_tiles {
                    warn!(
                        "Block {} face {} uses texture {} outside the {}x{} atlas",
                        block.name, face, texture, atlas_size_in_blocks, atlas_size_in_blocks
                    );
                }
            }
        }

        if blocks.is_empty() {
            warn!("Block catalog is empty");
        } else if !blocks[0].transparent || blocks[0].solid {
            warn!(
                "Block {} at id 0 is used as air but is not an empty, transparent block",
                blocks[0].name
            );
        }

        BlockCatalog { blocks }
    }

    /// Parses a catalog from a JSON array of descriptors.
    pub fn from_json(json: &str, atlas_size_in_blocks: u32) -> Result<Self, VoxelError> {
        let blocks: Vec<BlockDescriptor> = serde_json::from_str(json)?;
        Ok(Self::new(blocks, atlas_size_in_blocks))
    }

    /// The catalog bundled with the crate.
    pub fn default_catalog(atlas_size_in_blocks: u32) -> Result<Self, VoxelError> {
        Self::from_json(DEFAULT_CATALOG_JSON, atlas_size_in_blocks)
    }

    /// Number of block types in the catalog.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whether `id` addresses an entry of this catalog.
    pub fn contains(&self, id: BlockId) -> bool {
        (id as usize) < self.blocks.len()
    }

    /// Looks up a block descriptor by id.
    pub fn get(&self, id: BlockId) -> Option<&BlockDescriptor> {
        self.blocks.get(id as usize)
    }

    /// Looks up a block descriptor by id, falling back to id 0 for unknown ids.
    ///
    /// # Panics
    /// Panics if the catalog is empty.
    pub fn descriptor(&self, id: BlockId) -> &BlockDescriptor {
        self.blocks
            .get(id as usize)
            .unwrap_or(&self.blocks[FALLBACK_BLOCK_ID as usize])
    }

    /// Whether the block is solid. Unknown ids are not solid.
    pub fn is_solid(&self, id: BlockId) -> bool {
        self.get(id).map(|block| block.solid).unwrap_or(false)
    }

    /// Whether the block is transparent. Unknown ids are transparent, like air.
    pub fn is_transparent(&self, id: BlockId) -> bool {
        self.get(id).map(|block| block.transparent).unwrap_or(true)
    }

    /// Finds a block id by name.
    ///
    /// A miss is a configuration error: it is logged and [`FALLBACK_BLOCK_ID`] is
    /// returned so that generation can continue.
    pub fn id_by_name(&self, name: &str) -> BlockId {
        match self.blocks.iter().position(|block| block.name == name) {
            Some(index) => index as BlockId,
            None => {
                warn!("Block {} not found in the catalog, using id {}", name, FALLBACK_BLOCK_ID);
                FALLBACK_BLOCK_ID
            }
        }
    }

    /// Iterates over `(id, descriptor)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BlockDescriptor)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(index, block)| (index as BlockId, block))
    }
}
