use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod batch;
pub mod categories;
pub mod config;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Run => crate::tui::workflow::cmd_run(&args[1..]),
        CliVerb::Batch => batch::cmd_batch(&args[1..]),
        CliVerb::Config => config::cmd_config(&args[1..]),
        CliVerb::Categories => categories::cmd_categories(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
