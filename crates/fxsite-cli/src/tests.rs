use clap::Parser;

use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("fxsite").chain(args.iter().copied()))
}

#[test]
fn headlines_takes_no_arguments() {
    assert!(matches!(parse(&["headlines"]).unwrap().command, Commands::Headlines));
    assert!(parse(&["headlines", "--bootstrap-from-html"]).is_err());
}

#[test]
fn daily_replace_flag() {
    assert!(matches!(
        parse(&["daily"]).unwrap().command,
        Commands::Daily { replace: false }
    ));
    assert!(matches!(
        parse(&["daily", "--replace"]).unwrap().command,
        Commands::Daily { replace: true }
    ));
}

#[test]
fn weekly_and_stamp_take_no_arguments() {
    assert!(matches!(parse(&["weekly"]).unwrap().command, Commands::Weekly));
    assert!(matches!(parse(&["stamp"]).unwrap().command, Commands::Stamp));
    assert!(parse(&["stamp", "--replace"]).is_err());
}

#[test]
fn reviews_subcommands() {
    assert!(matches!(
        parse(&["reviews", "normalize"]).unwrap().command,
        Commands::Reviews {
            command: ReviewsCommands::Normalize
        }
    ));
    assert!(matches!(
        parse(&["reviews", "rebuild"]).unwrap().command,
        Commands::Reviews {
            command: ReviewsCommands::Rebuild
        }
    ));
    assert!(parse(&["reviews"]).is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(parse(&[]).is_err());
    assert!(parse(&["publish"]).is_err());
}
