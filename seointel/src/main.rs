use commands::command_argument_builder;
use seointel::handlers::{handle_analyze, handle_schema, handle_ui, selected_format, stdout_is_report_only};
use seointel_core::print_banner;
use std::path::PathBuf;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Piped output (schema, JSON or Markdown on stdout) never gets the banner
    let piped = match chosen_command.subcommand() {
        Some(("schema", _)) => true,
        Some(("analyze", args)) => stdout_is_report_only(
            selected_format(args),
            args.get_one::<PathBuf>("output").map(PathBuf::as_path),
        ),
        _ => false,
    };
    if !quiet && !piped {
        print_banner();
    }

    match chosen_command.subcommand() {
        None => {
            // No subcommand provided, just show the banner
        }
        Some(("analyze", primary_command)) => handle_analyze(primary_command, quiet).await,
        Some(("ui", _)) => handle_ui().await,
        Some(("schema", _)) => handle_schema(),
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
