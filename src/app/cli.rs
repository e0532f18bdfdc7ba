#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Run,
    Batch,
    Config,
    Categories,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "run" => CliVerb::Run,
        "batch" => CliVerb::Batch,
        "config" => CliVerb::Config,
        "categories" => CliVerb::Categories,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  run [--categories <file>] [--release-date <date>] [--status <status>]".to_string(),
        "                                       Open the interactive generation workflow"
            .to_string(),
        "  batch --row <category>=<count>... [--save]".to_string(),
        "                                       Generate (and optionally save) without a terminal"
            .to_string(),
        "  categories [--categories <file>]     List the categories available for generation"
            .to_string(),
        "  config show                          Print the effective settings".to_string(),
        "  config init                          Write a default settings file".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub fn option_help_lines() -> Vec<String> {
    vec![
        "Options:".to_string(),
        "  --config <file>                      Settings file (default ~/.bulkquiz/config.yaml)"
            .to_string(),
        "  --categories <file>                  JSON array of {\"id\", \"name\"} categories"
            .to_string(),
        "  --release-date <YYYY-MM-DD>          Release date for saved quizzes (default today)"
            .to_string(),
        "  --status <draft|active>              Status for saved quizzes".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.extend(option_help_lines());
    lines.join("\n")
}
