use rstest::{fixture, rstest};

use platformer_engine::application_state::input_state::{InputCommand, InputIntent};
use platformer_engine::engine_state::blocks::block_type::BlockType;
use platformer_engine::engine_state::config::EngineConfig;
use platformer_engine::engine_state::persistence::store::{FileStore, MemoryStore};
use platformer_engine::engine_state::EngineState;
use platformer_engine::error::ImportError;

#[fixture]
fn config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.terrain.columns = 20;
    config.autosave.interval_ms = 0;
    config.seed = 99;
    config
}

/// Block geometry and type, ignoring velocity, which is never persisted.
fn layout(engine: &EngineState) -> Vec<(f32, f32, f32, f32, BlockType)> {
    engine
        .world
        .live_blocks()
        .map(|b| (b.aabb.x, b.aabb.y, b.aabb.width, b.aabb.height, b.block_type))
        .collect()
}

fn walk_right() -> InputIntent {
    InputIntent {
        move_right: true,
        ..InputIntent::default()
    }
}

#[rstest]
fn autosaved_world_is_restored_on_restart(config: EngineConfig) {
    let dir = tempfile::tempdir().unwrap();

    let mut first = EngineState::new(config.clone(), Box::new(FileStore::open(dir.path()).unwrap())).unwrap();
    for _ in 0..30 {
        first.tick(&walk_right()).unwrap();
    }
    first.world.player.score = 3;
    first.world.player.gems = 1;
    let report = first.tick(&InputIntent::default()).unwrap();
    assert!(report.autosaved);
    assert!(!first.flush_autosave().unwrap());

    let second = EngineState::new(config, Box::new(FileStore::open(dir.path()).unwrap())).unwrap();
    assert_eq!(layout(&second), layout(&first));
    assert_eq!(second.world.creatures.len(), first.world.live_creatures().count());
    assert_eq!(second.world.player.aabb().x, first.world.player.aabb().x);
    assert_eq!(second.world.player.aabb().y, first.world.player.aabb().y);
    assert_eq!(second.world.player.score, 3);
    assert_eq!(second.world.player.gems, 1);
    assert_eq!(second.world.player.inventory, first.world.player.inventory);
}

#[rstest]
fn export_then_import_reproduces_the_world(config: EngineConfig) {
    let mut source = EngineState::new(config.clone(), Box::new(MemoryStore::new())).unwrap();
    for _ in 0..10 {
        source.tick(&walk_right()).unwrap();
    }
    let text = source.export_world().unwrap();

    let mut other_config = config;
    other_config.seed = 5;
    let mut target = EngineState::new(other_config, Box::new(MemoryStore::new())).unwrap();
    let pending = target.parse_import(&text, "copy.world").unwrap();
    assert_eq!(pending.summary.blocks, source.world.blocks.len());
    target.apply_import(pending);

    assert_eq!(layout(&target), layout(&source));
    assert_eq!(target.world.creatures.len(), source.world.creatures.len());
    assert_eq!(target.world.player.aabb().x, source.world.player.aabb().x);
    assert_eq!(target.world.player.inventory, source.world.player.inventory);
}

#[rstest]
fn minimal_import_yields_an_empty_world(config: EngineConfig) {
    let mut engine = EngineState::new(config, Box::new(MemoryStore::new())).unwrap();
    let pending = engine
        .parse_import(r#"{"blocks": [], "player": {"pos": {"x": 10, "y": 20}}}"#, "tiny")
        .unwrap();
    engine.apply_import(pending);

    assert_eq!(engine.world.blocks.len(), 0);
    assert_eq!(engine.world.creatures.len(), 0);
    assert_eq!(engine.world.player.aabb().x, 10.0);
    assert_eq!(engine.world.player.aabb().y, 20.0);
    assert!(engine.world.player.inventory.iter().all(|(_, count)| count == 0));
    assert_eq!(engine.world.player.inventory.selected(), BlockType::Dirt);
}

#[rstest]
fn rejected_import_leaves_the_world_alone(config: EngineConfig) {
    let engine = EngineState::new(config, Box::new(MemoryStore::new())).unwrap();
    let before = layout(&engine);
    let player_before = *engine.world.player.aabb();

    let error = engine
        .parse_import(r#"{"player": {"pos": {"x": 1, "y": 2}}}"#, "broken")
        .unwrap_err();

    assert!(matches!(error, ImportError::MissingBlocks));
    assert_eq!(layout(&engine), before);
    assert_eq!(*engine.world.player.aabb(), player_before);
}

#[rstest]
fn export_is_written_with_a_timestamped_name(config: EngineConfig) {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = EngineState::new(config, Box::new(MemoryStore::new())).unwrap();
    let path = engine.export_to_dir(dir.path()).unwrap();

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("world-") && name.ends_with(".world"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(engine.parse_import(&text, name).is_ok());
}

#[rstest]
fn reset_command_discards_the_saved_world(config: EngineConfig) {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = EngineState::new(config.clone(), Box::new(FileStore::open(dir.path()).unwrap())).unwrap();
    engine.world.player.score = 8;
    engine.tick(&InputIntent::default()).unwrap();

    engine.queue_command(InputCommand::ResetWorld);
    engine.tick(&InputIntent::default()).unwrap();
    assert_eq!(engine.world.player.score, 0);

    let restarted = EngineState::new(config, Box::new(FileStore::open(dir.path()).unwrap())).unwrap();
    assert_eq!(restarted.world.player.score, 0);
}

const FAR_RIGHT_WORLD: &str = r##"{
    "blocks": [
        {"x": 3008, "y": 640, "width": 32, "height": 32, "type": "stone"},
        {"x": 3040, "y": 640, "width": 32, "height": 32, "type": "stone"},
        {"x": 3008, "y": 600, "width": 32, "height": 32, "type": "coin"}
    ],
    "player": {"pos": {"x": 3008, "y": 552}}
}"##;

#[rstest]
fn imported_player_far_from_the_origin_is_in_view(config: EngineConfig) {
    let mut engine = EngineState::new(config.clone(), Box::new(MemoryStore::new())).unwrap();
    let pending = engine.parse_import(FAR_RIGHT_WORLD, "far.world").unwrap();
    engine.apply_import(pending);

    let player = *engine.world.player.aabb();
    assert!(engine
        .world
        .scroll
        .is_horizontally_visible(&player, config.viewport_width));

    for _ in 0..10 {
        engine.tick(&InputIntent::default()).unwrap();
    }
    assert_eq!(engine.world.player.score, 1);
    assert_eq!(engine.render_snapshot().blocks.len(), 2);
}

#[rstest]
fn restored_player_far_from_the_origin_is_in_view(config: EngineConfig) {
    let dir = tempfile::tempdir().unwrap();
    let mut first = EngineState::new(config.clone(), Box::new(FileStore::open(dir.path()).unwrap())).unwrap();
    let pending = first.parse_import(FAR_RIGHT_WORLD, "far.world").unwrap();
    first.apply_import(pending);
    assert!(first.flush_autosave().unwrap());

    let second = EngineState::new(config.clone(), Box::new(FileStore::open(dir.path()).unwrap())).unwrap();
    let player = *second.world.player.aabb();
    assert_eq!(player.x, 3008.0);
    assert!(second
        .world
        .scroll
        .is_horizontally_visible(&player, config.viewport_width));
}
