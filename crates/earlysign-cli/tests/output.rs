use std::path::PathBuf;

use clap::Parser;
use earlysign_cli::cli::Cli;
use earlysign_cli::commands::{render_config_init, render_config_show};
use earlysign_cli::config::{ConfigSource, EarlysignConfig, LoadedConfig};

fn loaded(source: ConfigSource) -> LoadedConfig {
    LoadedConfig {
        config: EarlysignConfig::new(),
        path: PathBuf::from("/home/user/.config/earlysign/config.json"),
        source,
    }
}

#[test]
fn config_show_json_is_a_single_document() {
    let cli = Cli::parse_from([
        "earlysign",
        "--json",
        "--data-dir",
        "/srv/results",
        "config",
        "show",
    ]);
    let text = render_config_show(&loaded(ConfigSource::Defaults), &cli).unwrap();

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["path"], "/home/user/.config/earlysign/config.json");
    assert_eq!(json["source"], "defaults");
    assert_eq!(json["data_dir"], "/srv/results");
    assert_eq!(json["config"]["questionnaire"], "toddler_social");
    assert_eq!(json["config"]["config_version"], 1);
}

#[test]
fn config_show_text_reports_data_dir_override() {
    let cli = Cli::parse_from(["earlysign", "--data-dir", "/srv/results", "config", "show"]);
    let text = render_config_show(&loaded(ConfigSource::File), &cli).unwrap();

    assert!(text.starts_with("config: /home/user/.config/earlysign/config.json (on disk)\n"));
    assert!(text.contains("data dir: /srv/results\n"));
    assert!(text.contains("questionnaire: toddler_social\n"));
}

#[test]
fn config_init_json_is_parseable() {
    let path = PathBuf::from("/tmp/earlysign/config.json");
    let json: serde_json::Value =
        serde_json::from_str(&render_config_init(&path, true).unwrap()).unwrap();
    assert_eq!(json["path"], "/tmp/earlysign/config.json");
    assert_eq!(json["written"], true);

    assert_eq!(
        render_config_init(&path, false).unwrap(),
        "wrote /tmp/earlysign/config.json"
    );
}
