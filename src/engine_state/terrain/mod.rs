//! # Terrain Generation
//!
//! Builds the initial block set of a world from a seeded random source.
//!
//! ## Pipeline
//!
//! 1. **Heightmap**: a damped random walk. Each column perturbs the previous
//!    surface by a uniform delta scaled by `roughness`, clamps it to the
//!    allowed band, blends toward it by `smoothness` and snaps to the grid.
//! 2. **Biomes**: runs of columns share a biome; every column has a fixed
//!    chance of switching to a new random one, so run lengths are geometric.
//! 3. **Columns**: each column is filled from its surface down to the world
//!    floor with the biome's surface block, then its underground block. Rows
//!    deeper than `bedrock_depth`, or inside the floor band, are always stone
//!    so every biome shares the same bedrock.
//! 4. **Trees**: grown on the surface tiles collected in step 3.
//!
//! Generation is pure apart from the injected random source, so the same
//! seed always yields the same world.

use log::info;

use super::blocks::{block_type::BlockType, Block};
use super::config::EngineConfig;
use super::geometry::{snap_to_grid, snap_up_to_grid};
use biome::Biome;

pub mod biome;
pub mod trees;

/// The universal base material below every biome.
pub const BASE_TYPE: BlockType = BlockType::Stone;

/// The top block of a generated column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceTile {
    pub x: f32,
    pub y: f32,
    pub biome: Biome,
}

/// Output of a generation run.
#[derive(Clone, Debug)]
pub struct Terrain {
    /// Surface y of each column
    pub heights: Vec<f32>,
    /// Biome of each column
    pub biomes: Vec<Biome>,
    /// Top tile of each column
    pub surface: Vec<SurfaceTile>,
    /// Every generated block, trees included
    pub blocks: Vec<Block>,
}

/// Generates terrain as configured by `config`.
pub fn generate(config: &EngineConfig, rng: &mut fastrand::Rng) -> Terrain {
    let heights = heightmap(config, rng);
    let biomes = assign_biomes(config.terrain.columns, config.terrain.biome_switch_chance, rng);

    let mut blocks = Vec::new();
    let mut surface = Vec::with_capacity(heights.len());
    for (column, (top, biome)) in heights.iter().zip(&biomes).enumerate() {
        let x = column as f32 * config.tile_size;
        surface.push(SurfaceTile {
            x,
            y: *top,
            biome: *biome,
        });
        fill_column(x, *top, *biome, config, &mut blocks);
    }

    let column_blocks = blocks.len();
    blocks.extend(trees::grow_trees(
        &surface,
        &config.terrain.trees,
        config.tile_size,
        rng,
    ));
    info!(
        "Generated {} columns: {} terrain blocks, {} tree blocks",
        heights.len(),
        column_blocks,
        blocks.len() - column_blocks
    );

    Terrain {
        heights,
        biomes,
        surface,
        blocks,
    }
}

/// The grid-aligned band surface heights are kept in.
///
/// `min_height` is rounded up and `max_height` down, so every snapped height
/// stays inside the configured range.
pub fn height_band(config: &EngineConfig) -> (f32, f32) {
    (
        snap_up_to_grid(config.terrain.min_height, config.tile_size),
        snap_to_grid(config.terrain.max_height, config.tile_size),
    )
}

/// Produces one surface height per column by a damped random walk.
pub fn heightmap(config: &EngineConfig, rng: &mut fastrand::Rng) -> Vec<f32> {
    let terrain = &config.terrain;
    let tile = config.tile_size;
    let (lowest, highest) = height_band(config);

    let start = terrain.min_height + rng.f32() * (terrain.max_height - terrain.min_height);
    let mut last = snap_to_grid(start, tile).clamp(lowest, highest);

    (0..terrain.columns)
        .map(|_| {
            let change = (rng.f32() - 0.5) * tile * terrain.roughness;
            let target = (last + change).clamp(terrain.min_height, terrain.max_height);
            let blended = last * (1.0 - terrain.smoothness) + target * terrain.smoothness;
            last = snap_to_grid(blended, tile).clamp(lowest, highest);
            last
        })
        .collect()
}

/// Assigns a biome to each column in geometrically distributed runs.
pub fn assign_biomes(columns: usize, switch_chance: f64, rng: &mut fastrand::Rng) -> Vec<Biome> {
    let mut current = Biome::random(rng);
    (0..columns)
        .map(|_| {
            let biome = current;
            if rng.f64() < switch_chance {
                current = Biome::random(rng);
            }
            biome
        })
        .collect()
}

/// Material of the row at `y` in a column whose surface is at `top`.
pub fn row_type(y: f32, top: f32, biome: Biome, config: &EngineConfig) -> BlockType {
    let tile = config.tile_size;
    let depth = ((y - top) / tile).round() as u32;
    let floor_band = config.world_height - config.terrain.floor_rows as f32 * tile;

    if y > floor_band || depth > config.terrain.bedrock_depth {
        BASE_TYPE
    } else if depth == 0 {
        biome.materials().surface
    } else {
        biome.materials().underground
    }
}

fn fill_column(x: f32, top: f32, biome: Biome, config: &EngineConfig, blocks: &mut Vec<Block>) {
    let mut y = top;
    while y < config.world_height {
        blocks.push(Block::new(
            row_type(y, top, biome, config),
            x,
            y,
            config.tile_size,
        ));
        y += config.tile_size;
    }
}
