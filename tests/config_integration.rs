use std::path::PathBuf;

use braincache::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".braincacherc");
    let content = r"
# comment
--no-presence

--title Shopping list

--debug-log=debug.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_presence);
    assert_eq!(flags.title.as_deref(), Some("Shopping list"));
    assert_eq!(flags.debug_log, Some(PathBuf::from("debug.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".braincacherc");
    let content = "--no-presence\n--title File title\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "braincache".to_string(),
        "--title".to_string(),
        "Cli title".to_string(),
        "--presence-file".to_string(),
        "presence.json".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_presence, "file flags should remain enabled");
    assert_eq!(
        effective.presence_file,
        Some(PathBuf::from("presence.json")),
        "cli flags should be applied"
    );
    assert_eq!(
        effective.title.as_deref(),
        Some("Cli title"),
        "cli should override title"
    );
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "braincache".to_string(),
        "--title=Inbox".to_string(),
        "--presence-file=presence.json".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.title.as_deref(), Some("Inbox"));
    assert_eq!(flags.presence_file, Some(PathBuf::from("presence.json")));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        no_presence: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&ConfigFlags::default());
    assert!(merged.no_presence);
    assert!(!ConfigFlags::default().union(&ConfigFlags::default()).no_presence);
}
