use std::time::Duration;

use deepdrill::*;

fn screen_for(engine: &Engine) -> GameOverScreen {
    let reason = engine.session().end_reason().expect("session has ended");
    game_over_screen(reason, engine.economy().money)
}

#[test]
fn running_dry_shows_collected_money() {
    let mut grid = Grid::from_seed(15, 21);
    grid.set_content(GridPos::new(0, 2), TileContent::Valuable(Mineral::Ruby));
    let mut engine = Engine::new(grid, &SimConfig::default()).unwrap();
    assert!(engine.move_down());
    engine.advance(Duration::from_secs(120));

    assert_eq!(engine.session(), Session::Ended(EndReason::OutOfFuel));
    let screen = screen_for(&engine);
    assert_eq!(screen.theme, GameOverTheme::Exhausted);
    assert_eq!(screen.message, "GAME OVER\nCollected Money: 20000.00");
}

#[test]
fn small_hold_fills_on_first_find() {
    let cfg = SimConfig {
        storage_capacity: 20,
        ..SimConfig::default()
    };
    let mut grid = Grid::from_seed(15, 4);
    grid.set_content(GridPos::new(1, 1), TileContent::Valuable(Mineral::Goldium));
    let mut engine = Engine::new(grid, &cfg).unwrap();
    assert!(engine.move_right());

    assert_eq!(engine.session(), Session::Ended(EndReason::StorageFull));
    let screen = screen_for(&engine);
    assert_eq!(screen.theme, GameOverTheme::Exhausted);
    assert!(screen.message.ends_with("250.00"));
    assert_eq!(format_hud(engine.economy()).storage, "Storage: 20/20");
}

#[test]
fn reason_codes_select_themes() {
    for (code, theme) in [
        ("fuel", GameOverTheme::Exhausted),
        ("storage", GameOverTheme::Exhausted),
        ("lava", GameOverTheme::Lava),
        ("", GameOverTheme::Unknown),
        ("LAVA", GameOverTheme::Unknown),
    ] {
        assert_eq!(game_over_screen_for_code(code, 0.0).theme, theme, "code {code:?}");
    }
}

#[test]
fn session_end_event_carries_final_money() {
    let mut grid = Grid::new(6, TileContent::Soil);
    grid.set_content(GridPos::new(1, 1), TileContent::Valuable(Mineral::Emerald));
    grid.set_content(GridPos::new(2, 1), TileContent::Lava);
    let mut engine = Engine::new(grid, &SimConfig::default()).unwrap();
    assert!(engine.move_right());
    assert!(!engine.move_right());

    let last = engine.drain_events().pop();
    assert_eq!(
        last,
        Some(SimEvent::SessionEnded {
            reason: EndReason::Lava,
            money: 50_000.0,
        })
    );
}
