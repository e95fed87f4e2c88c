use flappy_bird::config::Config;

#[test]
fn defaults_match_classic_board() {
    let c = Config::default();
    assert_eq!((c.field_width, c.field_height), (360, 640));
    assert_eq!((c.player_width, c.player_height), (34, 24));
    assert_eq!((c.obstacle_width, c.obstacle_height), (64, 512));
    assert_eq!(c.gravity, 1);
    assert_eq!(c.impulse_velocity, -10);
    assert_eq!(c.obstacle_velocity, 1);
    assert_eq!(c.gap_height, 160);
    assert_eq!(c.tick_period_ms, 16);
    assert_eq!(c.spawn_period_ms, 3000);
    assert!(c.validate().is_ok());
}

#[test]
fn derived_positions() {
    let c = Config::default();
    assert_eq!(c.player_start_x(), 163);
    assert_eq!(c.player_start_y(), 308);
    assert_eq!(c.floor_y(), 616);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = Config::from_json(r#"{ "gravity": 2, "spawn_period_ms": 2000 }"#).unwrap();
    assert_eq!(c.gravity, 2);
    assert_eq!(c.spawn_period_ms, 2000);
    assert_eq!(c.field_width, 360);
    assert_eq!(c.impulse_velocity, -10);
}

#[test]
fn empty_object_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn rejects_malformed_json() {
    assert!(Config::from_json("{ gravity: ").is_err());
    assert!(Config::from_json(r#"{ "gravity": "heavy" }"#).is_err());
}

#[test]
fn rejects_meaningless_values() {
    for json in [
        r#"{ "obstacle_velocity": 0 }"#,
        r#"{ "gap_height": -5 }"#,
        r#"{ "field_width": 0 }"#,
        r#"{ "player_height": 640 }"#,
        r#"{ "tick_period_ms": 0 }"#,
        r#"{ "max_pairs": 0 }"#,
        r#"{ "max_pairs": 3 }"#,
        r#"{ "spawn_period_ms": 300 }"#,
    ] {
        assert!(Config::from_json(json).is_err(), "accepted {json}");
    }
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("flappy_bird_config_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "impulse_velocity": -8 }"#).unwrap();
    let c = Config::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(c.impulse_velocity, -8);
}

#[test]
fn load_missing_file_names_path() {
    let path = std::env::temp_dir().join("flappy_bird_no_such_config.json");
    let err = Config::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("flappy_bird_no_such_config.json"));
}

#[test]
fn live_pair_bound_follows_spawn_rate() {
    let c = Config::default();
    // 425 ticks × 16 ms = 6800 ms on screen, one pair every 3000 ms
    assert_eq!(c.max_live_pairs(), 4);

    let fast = Config { spawn_period_ms: 300, ..Config::default() };
    assert_eq!(fast.max_live_pairs(), 24);
    assert!(fast.validate().is_err());

    let sized = Config { max_pairs: fast.max_live_pairs(), ..fast };
    assert!(sized.validate().is_ok());
}
