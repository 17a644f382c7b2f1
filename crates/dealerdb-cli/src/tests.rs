use super::*;

#[test]
fn parses_db_ping_command() {
    let cli =
        Cli::try_parse_from(["dealerdb-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["dealerdb-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn parses_db_seed_without_inventory_override() {
    let cli = Cli::try_parse_from(["dealerdb-cli", "db", "seed"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Seed { inventory: None }
        })
    ));
}

#[test]
fn parses_db_seed_with_inventory_path() {
    let cli = Cli::try_parse_from([
        "dealerdb-cli",
        "db",
        "seed",
        "--inventory",
        "fixtures/inventory.yaml",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Seed { inventory: Some(ref p) }
        }) if p == &PathBuf::from("fixtures/inventory.yaml")
    ));
}

#[test]
fn parses_classify_with_json_flag() {
    let cli = Cli::try_parse_from(["dealerdb-cli", "classify", "great service", "--json"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Classify { ref text, json: true }) if text == "great service"
    ));
}

#[test]
fn classify_requires_text() {
    assert!(Cli::try_parse_from(["dealerdb-cli", "classify"]).is_err());
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["dealerdb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}
