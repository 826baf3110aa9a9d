//! Sprite manager demo entry point.
//!
//! Loads the sprites listed in the configured manifest, lays them out in a
//! row and tiles the first one along the bottom of the window.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config config.ini
//! cargo run -- --headless --frames 3
//! cargo run -- --headless --write-manifest out.json
//! ```
//!
//! `--headless` swaps the raylib texture backend for the recording one, so
//! the whole pipeline (decoding, registry, render system) runs without a
//! window.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use raylib::prelude::*;

use spritemanager::backend::headless::RecordingBackend;
use spritemanager::backend::raylib::{RaylibBackend, RaylibBitmapLoader};
use spritemanager::backend::{BitmapLoader, TextureBackend, TextureId};
use spritemanager::components::spriteplacement::SpritePlacement;
use spritemanager::components::tiledline::TiledLine;
use spritemanager::components::tint::Tint;
use spritemanager::components::zindex::ZIndex;
use spritemanager::error::Result;
use spritemanager::math::vec2;
use spritemanager::resources::renderstats::RenderStats;
use spritemanager::resources::spriteconfig::SpriteConfig;
use spritemanager::resources::spriteregistry::SpriteRegistry;
use spritemanager::systems::render::render_sprites;

const MARGIN: f32 = 16.0;

/// Sprite manager demo
#[derive(Parser)]
#[command(version, about = "Loads a sprite manifest and draws every sprite in it.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Record draw calls instead of opening a window.
    #[arg(long)]
    headless: bool,

    /// Number of frames to render in headless mode.
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Write the descriptors of all loaded sprites as a JSON manifest and exit.
    #[arg(long, value_name = "PATH")]
    write_manifest: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SpriteConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using defaults");
    }

    let result = if cli.headless {
        run_headless(&cli, &config)
    } else {
        run_window(&cli, &config)
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run_headless(cli: &Cli, config: &SpriteConfig) -> Result<()> {
    let registry = SpriteRegistry::new(
        RecordingBackend::new(),
        RaylibBitmapLoader,
        config.asset_directory.clone(),
    );
    let mut world = build_world(registry, config)?;
    if let Some(path) = &cli.write_manifest {
        return write_descriptors::<RecordingBackend, RaylibBitmapLoader>(&mut world, path);
    }

    let mut schedule = Schedule::default();
    schedule.add_systems(render_sprites::<RecordingBackend, RaylibBitmapLoader>);
    let mut total_calls = 0;
    for _ in 0..cli.frames {
        schedule.run(&mut world);
        let stats = *world.resource::<RenderStats>();
        let mut registry =
            world.non_send_resource_mut::<SpriteRegistry<RecordingBackend, RaylibBitmapLoader>>();
        let calls = registry.backend().calls().len();
        info!(
            "Frame {}: {} quads, {} failed requests, {} backend calls",
            stats.frames, stats.draws, stats.failures, calls
        );
        total_calls += calls;
        registry.backend_mut().clear_calls();
    }

    let mut registry =
        world.non_send_resource_mut::<SpriteRegistry<RecordingBackend, RaylibBitmapLoader>>();
    info!("Recorded {total_calls} backend calls");
    registry.dispose_all()
}

fn run_window(cli: &Cli, config: &SpriteConfig) -> Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title("Sprite Manager")
        .build();
    rl.set_target_fps(config.target_fps);

    let registry = SpriteRegistry::new(
        RaylibBackend::new(&thread),
        RaylibBitmapLoader,
        config.asset_directory.clone(),
    );
    let mut world = build_world(registry, config)?;
    if let Some(path) = &cli.write_manifest {
        return write_descriptors::<RaylibBackend, RaylibBitmapLoader>(&mut world, path);
    }

    let mut schedule = Schedule::default();
    schedule.add_systems(render_sprites::<RaylibBackend, RaylibBitmapLoader>);

    while !rl.window_should_close() {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::RAYWHITE);
        schedule.run(&mut world);
    }

    // textures must go before the window closes
    world
        .non_send_resource_mut::<SpriteRegistry<RaylibBackend, RaylibBitmapLoader>>()
        .dispose_all()
}

/// Load the manifest into `registry` and build a world drawing its sprites.
fn build_world<B, L>(mut registry: SpriteRegistry<B, L>, config: &SpriteConfig) -> Result<World>
where
    B: TextureBackend + 'static,
    L: BitmapLoader + 'static,
{
    let ids = match registry.load_manifest(&config.manifest) {
        Ok(ids) => ids,
        Err(e) => {
            registry.dispose_all()?;
            return Err(e);
        }
    };

    let mut world = World::new();
    world.init_resource::<RenderStats>();
    spawn_scene(&mut world, &registry, &ids, config);
    world.insert_non_send_resource(registry);
    Ok(world)
}

/// One placement per sprite, left to right, plus a tiled line of the first.
fn spawn_scene<B, L>(
    world: &mut World,
    registry: &SpriteRegistry<B, L>,
    ids: &[TextureId],
    config: &SpriteConfig,
) where
    B: TextureBackend,
    L: BitmapLoader,
{
    let mut x = MARGIN;
    for (i, id) in ids.iter().enumerate() {
        let Some(sprite) = registry.find_by_id(*id) else {
            continue;
        };
        // place the sprite's top-left corner, wherever its origin is
        let position = vec2(x, MARGIN) + sprite.origin_offset();
        world.spawn((SpritePlacement::new(*id, position), ZIndex(i as i32)));
        x += sprite.size().x + MARGIN;
    }

    if let Some(first) = ids.first().and_then(|id| registry.find_by_id(*id)) {
        let y = config.window_height as f32 - first.size().y - MARGIN;
        let start = vec2(MARGIN, y) + first.origin_offset();
        let end = vec2(config.window_width as f32 - first.size().x - MARGIN, y)
            + first.origin_offset();
        world.spawn((TiledLine::new(first.id(), start, end), Tint::fade(192), ZIndex(-1)));
    }
}

fn write_descriptors<B, L>(world: &mut World, path: &Path) -> Result<()>
where
    B: TextureBackend + 'static,
    L: BitmapLoader + 'static,
{
    let mut registry = world.non_send_resource_mut::<SpriteRegistry<B, L>>();
    let saved = registry.save_manifest(path);
    // release textures even when the write failed
    let released = registry.dispose_all();
    saved?;
    released
}
