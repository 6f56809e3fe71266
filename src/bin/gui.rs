use std::path::Path;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use deepdrill::drill::Command;
use deepdrill::hud::WINDOW_TITLE;
use deepdrill::{
	Direction, Engine, GameOverScreen, Mineral, SimConfig, SimEvent, TileContent, format_hud,
	game_over_screen,
};

// ---------- Constants ----------
const TILE_SIZE: f32 = 50.0;
const CONFIG_ENV: &str = "DEEPDRILL_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "deepdrill.toml";
const DRILL_FRAME_SECS: f32 = 0.1;
const DRILL_FRAMES: u32 = 6;

// ---------- Components ----------
#[derive(Component)]
struct TilePos {
	col: i32,
	row: i32,
}

#[derive(Component)]
struct DrillSprite;

// ---------- Resources ----------
#[derive(Resource)]
struct UiState {
	paused: bool,
	facing: Direction,
	anim_timer: f32,
	game_over: Option<GameOverScreen>,
}

impl Default for UiState {
	fn default() -> Self {
		Self {
			paused: false,
			facing: Direction::Down,
			anim_timer: 0.0,
			game_over: None,
		}
	}
}

#[derive(Resource)]
struct GameEngine {
	engine: Engine,
}

// ---------- Entry ----------
fn main() -> AppExit {
	let (config, notice) = load_config(std::env::var(CONFIG_ENV).ok().as_deref());
	let side = config.grid_size.max(1) as u32 * TILE_SIZE as u32;

	let mut app = App::new();
	// LogPlugin installs the subscriber while the plugins are added, so logging works from here on
	app.add_plugins(
		DefaultPlugins
			.set(WindowPlugin {
				primary_window: Some(Window {
					title: WINDOW_TITLE.to_string(),
					resolution: (side, side).into(),
					resizable: false,
					..Default::default()
				}),
				..Default::default()
			})
			.set(LogPlugin {
				filter: config.log_filter.clone(),
				..Default::default()
			}),
	);
	if let Some(notice) = notice {
		warn!("{notice}");
	}
	let engine = match Engine::from_config(&config) {
		Ok(engine) => engine,
		Err(e) => {
			error!("cannot start a run: {e}");
			return AppExit::error();
		}
	};

	app.add_plugins(EguiPlugin::default())
		// Resources
		.insert_resource(UiState::default())
		.insert_resource(GameEngine { engine })
		// Setup
		.add_systems(Startup, (setup_camera, spawn_tiles, spawn_drill))
		// Frame systems
		.add_systems(
			Update,
			(
				handle_keyboard,
				tick_engine_when_running,
				apply_sim_events,
				animate_drill,
				place_drill,
			)
				.chain(),
		)
		.add_systems(EguiPrimaryContextPass, draw_ui);
	app.run()
}

/// Reads `path`, or `deepdrill.toml` if present. A broken file falls back to the
/// defaults; the returned notice says why, to be logged once logging is up.
fn load_config(path: Option<&str>) -> (SimConfig, Option<String>) {
	let path = match path {
		Some(p) => p,
		None if Path::new(DEFAULT_CONFIG_PATH).exists() => DEFAULT_CONFIG_PATH,
		None => return (SimConfig::default(), None),
	};
	match SimConfig::load(path) {
		Ok(cfg) => (cfg, None),
		Err(e) => (SimConfig::default(), Some(format!("{path}: {e}; falling back to defaults"))),
	}
}

// ---------- Setup ----------
fn setup_camera(mut commands: Commands, engine: Res<GameEngine>) {
	let center = engine.engine.grid().size() as f32 * TILE_SIZE * 0.5;
	commands.spawn((Camera2d, Transform::from_xyz(center, center, 1000.0)));
}

fn spawn_tiles(mut commands: Commands, engine: Res<GameEngine>) {
	let grid = engine.engine.grid();
	for (row, tiles) in (0..).zip(grid.rows()) {
		for (col, &content) in (0..).zip(tiles) {
			commands.spawn((
				Sprite::from_color(tile_color(content, row), Vec2::splat(TILE_SIZE)),
				Transform::from_translation(cell_center(grid.size(), col, row, 0.0)),
				TilePos { col, row },
			));
		}
	}
}

fn spawn_drill(mut commands: Commands, engine: Res<GameEngine>) {
	let e = &engine.engine;
	let pos = e.drill().pos;
	commands.spawn((
		Sprite::from_color(drill_color(0), Vec2::new(TILE_SIZE * 0.8, TILE_SIZE * 0.6)),
		Transform::from_translation(cell_center(e.grid().size(), pos.col, pos.row, 10.0)),
		DrillSprite,
	));
}

// ---------- Utilities ----------
fn tile_color(content: TileContent, row: i32) -> Color {
	match content {
		TileContent::Empty if row < 2 => Color::srgb(0.0, 0.75, 1.0),
		TileContent::Empty => Color::srgb(0.74, 0.56, 0.56),
		TileContent::Soil if row == 2 => Color::srgb(0.36, 0.55, 0.2),
		TileContent::Soil => Color::srgb(0.55, 0.35, 0.2),
		TileContent::Obstacle => Color::srgb(0.3, 0.3, 0.33),
		TileContent::Valuable(Mineral::Goldium) => Color::srgb(0.95, 0.8, 0.2),
		TileContent::Valuable(Mineral::Ruby) => Color::srgb(0.85, 0.1, 0.25),
		TileContent::Valuable(Mineral::Emerald) => Color::srgb(0.1, 0.8, 0.4),
		TileContent::Lava => Color::srgb(1.0, 0.35, 0.0),
	}
}

fn drill_color(frame: u32) -> Color {
	let shade = if frame % 2 == 0 { 0.85 } else { 0.7 };
	Color::srgb(shade, shade, 0.9)
}

// Row 0 is drawn at the top of the window.
fn cell_center(size: i32, col: i32, row: i32, z: f32) -> Vec3 {
	Vec3::new(
		col as f32 * TILE_SIZE + TILE_SIZE * 0.5,
		(size - 1 - row) as f32 * TILE_SIZE + TILE_SIZE * 0.5,
		z,
	)
}

fn facing_angle(dir: Direction) -> f32 {
	match dir {
		Direction::Right => 0.0,
		Direction::Up => std::f32::consts::FRAC_PI_2,
		Direction::Left => std::f32::consts::PI,
		Direction::Down => -std::f32::consts::FRAC_PI_2,
	}
}

// ---------- Systems: Input ----------
fn handle_keyboard(keys: Res<ButtonInput<KeyCode>>, mut eng: ResMut<GameEngine>, mut ui: ResMut<UiState>) {
	if keys.just_pressed(KeyCode::KeyP) {
		ui.paused = !ui.paused;
	}
	if ui.paused {
		return;
	}
	let command = if keys.just_pressed(KeyCode::ArrowLeft) {
		Command::MoveLeft
	} else if keys.just_pressed(KeyCode::ArrowRight) {
		Command::MoveRight
	} else if keys.just_pressed(KeyCode::ArrowUp) {
		Command::MoveUp
	} else if keys.just_pressed(KeyCode::ArrowDown) {
		Command::MoveDown
	} else {
		return;
	};
	eng.engine.apply(command);
}

// ---------- Systems: Engine ----------
fn tick_engine_when_running(time: Res<Time>, mut eng: ResMut<GameEngine>, ui: Res<UiState>) {
	if !ui.paused {
		eng.engine.advance(time.delta());
	}
}

fn apply_sim_events(mut eng: ResMut<GameEngine>, mut ui: ResMut<UiState>, mut tiles: Query<(&TilePos, &mut Sprite)>) {
	for event in eng.engine.drain_events() {
		match event {
			SimEvent::Moved { direction, .. } => {
				ui.facing = direction;
				ui.anim_timer = DRILL_FRAME_SECS * DRILL_FRAMES as f32;
			}
			SimEvent::TileExcavated { pos, .. } => {
				for (tile, mut sprite) in &mut tiles {
					if tile.col == pos.col && tile.row == pos.row {
						sprite.color = tile_color(TileContent::Empty, tile.row);
					}
				}
			}
			SimEvent::EconomyChanged(_) => {}
			SimEvent::SessionEnded { reason, money } => {
				ui.game_over = Some(game_over_screen(reason, money));
			}
		}
	}
}

fn animate_drill(time: Res<Time>, mut ui: ResMut<UiState>, mut q: Query<&mut Sprite, With<DrillSprite>>) {
	if ui.anim_timer <= 0.0 {
		return;
	}
	ui.anim_timer -= time.delta_secs();
	let frame = ((ui.anim_timer / DRILL_FRAME_SECS).max(0.0) as u32) % DRILL_FRAMES;
	for mut sprite in &mut q {
		sprite.color = drill_color(frame);
	}
}

fn place_drill(eng: Res<GameEngine>, ui: Res<UiState>, mut q: Query<&mut Transform, With<DrillSprite>>) {
	let e = &eng.engine;
	let pos = e.drill().pos;
	for mut transform in &mut q {
		transform.translation = cell_center(e.grid().size(), pos.col, pos.row, 10.0);
		transform.rotation = Quat::from_rotation_z(facing_angle(ui.facing));
	}
}

// ---------- Systems: UI ----------
fn draw_ui(mut egui_ctx: EguiContexts, ui: Res<UiState>, eng: Res<GameEngine>) {
	let Ok(ctx) = egui_ctx.ctx_mut() else {
		return;
	};

	if let Some(screen) = &ui.game_over {
		let [r, g, b] = screen.theme.rgb();
		egui::CentralPanel::default()
			.frame(egui::Frame::new().fill(egui::Color32::from_rgb(r, g, b)))
			.show(&*ctx, |ui_center| {
				ui_center.centered_and_justified(|ui_msg| {
					ui_msg.label(
						egui::RichText::new(&screen.message)
							.size(36.0)
							.color(egui::Color32::WHITE),
					);
				});
			});
		return;
	}

	// Top-left HUD
	egui::Area::new("hud".into()).fixed_pos(egui::pos2(10.0, 10.0)).show(&*ctx, |ui_area| {
		let hud = format_hud(eng.engine.economy());
		ui_area.label(hud.fuel);
		ui_area.label(hud.storage);
		ui_area.label(hud.money);
		if ui.paused {
			ui_area.colored_label(egui::Color32::YELLOW, "Paused");
		}
	});
}
