use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;

use twingate_cli::cli_context::CliContext;
use twingate_cli::commands::auth::handle_auth;
use twingate_cli::commands::check::handle_check;
use twingate_cli::commands::run::{handle_run, id_param};
use twingate_cli::error::TwingateResult;
use twingate_cli::logging;
use twingate_cli::operations::{Operation, ResourceKind};

fn operation_command(resource: ResourceKind, operation: Operation) -> Command {
    let mut command = Command::new(operation.cli_name())
        .about(operation.about())
        .arg(
            Arg::new("id")
                .long("id")
                .value_name("ID")
                .help(format!("Sets the '{}' parameter", id_param(resource, operation))),
        )
        .arg(
            Arg::new("param")
                .short('p')
                .long("param")
                .value_name("KEY=VALUE")
                .help("Operation parameter; dotted keys nest, e.g. updateFields.name=HQ")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .value_name("FILE")
                .help("JSON file with one parameter object or an array of them"),
        )
        .arg(
            Arg::new("continue-on-fail")
                .long("continue-on-fail")
                .help("Record failed items as {\"error\": ...} and keep going")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(["simple", "table", "json"])
                .default_value("simple"),
        );

    if operation.cli_name() != operation.as_str() {
        command = command.alias(operation.as_str());
    }

    if operation == Operation::GetAll {
        command = command
            .arg(
                Arg::new("all")
                    .long("all")
                    .help("Fetch every page")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("limit")
                    .short('l')
                    .long("limit")
                    .value_name("N")
                    .help("Maximum number of results when not fetching all")
                    .value_parser(clap::value_parser!(u32).range(1..)),
            );
    }

    command
}

fn resource_command(resource: ResourceKind) -> Command {
    let mut command = Command::new(resource.cli_name())
        .about(format!("Manage {} entities", resource.display_name()))
        .subcommand_required(true)
        .arg_required_else_help(true);

    if resource.cli_name() != resource.as_str() {
        command = command.alias(resource.as_str());
    }

    for operation in resource.operations() {
        command = command.subcommand(operation_command(resource, *operation));
    }
    command
}

fn build_cli() -> Command {
    let mut app = Command::new("twingate")
        .about("Twingate CLI - Manage a Twingate network through its admin API")
        .version("1.0.0")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("auth")
                .about("Store and test Twingate credentials")
                .arg(
                    Arg::new("subdomain")
                        .long("subdomain")
                        .value_name("NAME")
                        .help("Network subdomain, as in NAME.twingate.com")
                        .requires("api-key"),
                )
                .arg(
                    Arg::new("api-key")
                        .long("api-key")
                        .value_name("KEY")
                        .help("Admin API key")
                        .requires("subdomain"),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show the stored subdomain and masked key")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("check").about("Verify that the configured credentials work"));

    for resource in ResourceKind::ALL {
        app = app.subcommand(resource_command(resource));
    }
    app
}

async fn dispatch(matches: &ArgMatches) -> TwingateResult<()> {
    match matches.subcommand() {
        Some(("auth", sub_matches)) => {
            let mut context = CliContext::load()?;
            handle_auth(sub_matches, &mut context).await
        }
        Some(("check", _)) => {
            let mut context = CliContext::load()?;
            handle_check(&mut context).await
        }
        Some((resource_name, resource_matches)) => {
            let resource: ResourceKind = resource_name.parse()?;
            let (operation_name, operation_matches) = resource_matches.subcommand().ok_or_else(|| {
                twingate_cli::twingate_error!(InvalidInput, "missing operation for '{}'", resource_name)
            })?;
            let operation: Operation = operation_name.parse()?;

            let mut context = CliContext::load()?;
            handle_run(resource, operation, operation_matches, &mut context).await
        }
        None => Err(twingate_cli::twingate_error!(
            InvalidInput,
            "Unknown command. Use 'twingate --help' for available commands."
        )),
    }
}

#[tokio::main]
async fn main() {
    // Logging is best effort; the CLI works without it
    let _ = logging::init_logging();
    std::panic::set_hook(Box::new(|info| {
        logging::log_panic_info(info);
        eprintln!("{}", info);
    }));

    let matches = build_cli().get_matches();

    if let Err(e) = dispatch(&matches).await {
        tracing::error!(error = %e, "command failed");
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(log_file) = logging::get_log_file_path() {
            eprintln!("{}", format!("Details in {}", log_file.display()).dimmed());
        }
        process::exit(1);
    }
}
