use super::*;
use tournament_odds::{DEFAULT_TOP_K, DEFAULT_TRIALS};

const FILE_CONFIG: &str = r#"
trials = 500
top_k = 2
seed = 9
threads = 3
tie_break = "roster-order"
display = 5
"#;

fn write_config(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tournament_odds_cli_{}_{}.toml",
        tag,
        std::process::id()
    ));
    std::fs::write(&path, FILE_CONFIG).unwrap();
    path
}

fn simulate_args(extra: &[&str]) -> SimulateArgs {
    let mut argv = vec!["tournament_odds", "simulate"];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Simulate(args) => args,
        other => panic!("expected simulate, got {other:?}"),
    }
}

#[test]
fn test_flags_override_file() {
    let path = write_config("override");
    let args = simulate_args(&[
        "--config",
        path.to_str().unwrap(),
        "--trials",
        "1234",
        "--tie-break",
        "rotating",
    ]);

    let config = args.resolve_config().unwrap();
    assert_eq!(config.trials, 1234);
    assert_eq!(config.tie_break, TieBreak::Rotating);
    // Flags left unset keep the file values
    assert_eq!(config.top_k, 2);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.threads, Some(3));
    assert_eq!(config.display, 5);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_file_values_without_flags() {
    let path = write_config("plain");
    let config = simulate_args(&["--config", path.to_str().unwrap()])
        .resolve_config()
        .unwrap();
    assert_eq!(config.trials, 500);
    assert_eq!(config.tie_break, TieBreak::RosterOrder);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_defaults_without_config_file() {
    let config = simulate_args(&["-n", "200", "-k", "1", "--seed", "4"])
        .resolve_config()
        .unwrap();
    assert_eq!(config.trials, 200);
    assert_eq!(config.top_k, 1);
    assert_eq!(config.seed, Some(4));
    assert_eq!(config.tie_break, TieBreak::default());

    let config = simulate_args(&[]).resolve_config().unwrap();
    assert_eq!(config.trials, DEFAULT_TRIALS);
    assert_eq!(config.top_k, DEFAULT_TOP_K);
}

#[test]
fn test_zero_top_k_rejected_after_merge() {
    let path = write_config("zero_k");
    let args = simulate_args(&["--config", path.to_str().unwrap(), "--top-k", "0"]);
    assert!(args.resolve_config().is_err());

    assert!(simulate_args(&["--trials", "0"]).resolve_config().is_err());

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_missing_config_file_is_error() {
    let args = simulate_args(&["--config", "/nonexistent/tournament_odds.toml"]);
    let err = args.resolve_config().unwrap_err();
    assert!(err.to_string().contains("Failed to load config"));
}

#[test]
fn test_unknown_tie_break_rejected_by_parser() {
    let result = Cli::try_parse_from(["tournament_odds", "simulate", "--tie-break", "coin-flip"]);
    assert!(result.is_err());
}
