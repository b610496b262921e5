use super::*;

#[test]
fn defaults_match_the_classic_prank() {
    let cfg = PrankConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.assets, vec!["1.gif", "2.gif", "3.gif", "4.png"]);
    assert_eq!(cfg.playback.frame_rate, 60);
    assert_eq!(cfg.playback.shake().window(), Duration::from_millis(800));
    assert_eq!(cfg.playback.flash_count, 3);
    assert_eq!(cfg.playback.completion_grace(), Duration::from_millis(1200));
    assert_eq!(cfg.playback.static_timeout(), None);
    assert_eq!(cfg.playback.fit, FitMode::Contain);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: PrankConfig =
        serde_json::from_str(r#"{"playback": {"fit": "cover", "shake_magnitude": 4}}"#).unwrap();
    assert_eq!(cfg.playback.fit, FitMode::Cover);
    assert_eq!(cfg.playback.shake_magnitude, 4);
    assert_eq!(cfg.playback.frame_rate, 60);
    assert_eq!(cfg.resources_dir, "resources");
}

#[test]
fn validation_rejects_bad_values() {
    let mut cfg = PrankConfig::default();
    cfg.playback.frame_rate = 0;
    assert!(matches!(cfg.validate(), Err(JumpscareError::Validation(_))));

    let mut cfg = PrankConfig::default();
    cfg.window_scale = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = PrankConfig::default();
    cfg.preroll_min_ms = 10;
    cfg.preroll_max_ms = 5;
    assert!(cfg.validate().is_err());

    let mut cfg = PrankConfig::default();
    cfg.assets.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn load_reads_file_and_reports_parse_errors() {
    let dir = std::env::temp_dir();
    let good = dir.join(format!("jumpscare_cfg_good_{}.json", std::process::id()));
    let bad = dir.join(format!("jumpscare_cfg_bad_{}.json", std::process::id()));
    std::fs::write(&good, r#"{"post_hold_ms": 0}"#).unwrap();
    std::fs::write(&bad, "{").unwrap();

    assert_eq!(PrankConfig::load(&good).unwrap().post_hold_ms, 0);
    let err = PrankConfig::load(&bad).unwrap_err();
    assert!(err.to_string().contains("parse config JSON"));

    std::fs::remove_file(&good).ok();
    std::fs::remove_file(&bad).ok();
}
