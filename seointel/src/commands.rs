use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("seointel")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("seointel")
        .about("AI-assisted SEO audits grounded in Google Search")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("analyze")
                .about(
                    "Run a full SEO audit of a website: technical, on-page, content, backlinks, \
                competitors, keywords and a growth roadmap.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The website to audit (scheme optional)"),
                )
                .arg(
                    arg!(-l --"location" <LOCATION>)
                        .required(false)
                        .help("Target market, e.g. 'Berlin' or 'United States' (default: Global)"),
                )
                .arg(
                    arg!(-i --"industry" <INDUSTRY>)
                        .required(false)
                        .help("Business sector, e.g. 'E-commerce' (default: General)"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, markdown")
                        .value_parser(["text", "json", "markdown"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(command!("ui").about("Launch the interactive terminal dashboard"))
        .subcommand(command!("schema").about("Print the JSON response schema sent to the model"))
}
