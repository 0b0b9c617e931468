use std::fs;
use std::path::Path;

use clap::ArgMatches;
use serde_json::Value;
use tracing::info;

use crate::batch::run_batch;
use crate::cli_context::CliContext;
use crate::error::{ErrorContext, TwingateResult};
use crate::formatting::{print_outputs, OutputFormat};
use crate::operations::{Operation, Params, ResourceKind};
use crate::twingate_error;

/// Values given on the command line, applied on top of every input item.
#[derive(Debug, Default)]
pub struct RunOptions {
    pub id: Option<String>,
    pub params: Vec<String>,
    pub return_all: bool,
    pub limit: Option<u32>,
}

impl RunOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            id: matches.get_one::<String>("id").cloned(),
            params: matches
                .get_many::<String>("param")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            return_all: matches.try_get_one::<bool>("all").ok().flatten().copied().unwrap_or(false),
            limit: matches.try_get_one::<u32>("limit").ok().flatten().copied(),
        }
    }
}

/// Parameter the `--id` flag fills in for this operation.
pub fn id_param(resource: ResourceKind, operation: Operation) -> &'static str {
    match operation {
        Operation::RevokeKey => "serviceKeyId",
        _ => resource.id_param(),
    }
}

/// Items from an `--input` document: an array of objects, or a single object.
pub fn parse_items(input: Value) -> TwingateResult<Vec<Params>> {
    match input {
        Value::Array(values) => values.into_iter().map(Params::from_value).collect(),
        other => Ok(vec![Params::from_value(other)?]),
    }
}

pub fn build_items(
    resource: ResourceKind,
    operation: Operation,
    input: Option<Value>,
    options: &RunOptions,
) -> TwingateResult<Vec<Params>> {
    let mut items = match input {
        Some(value) => parse_items(value)?,
        None => vec![Params::new()],
    };

    for item in &mut items {
        if let Some(id) = &options.id {
            item.set_path(id_param(resource, operation), Value::String(id.clone()))?;
        }
        for pair in &options.params {
            item.set_pair(pair)?;
        }
        if options.return_all {
            item.set_path("returnAll", Value::Bool(true))?;
        }
        if let Some(limit) = options.limit {
            item.set_path("limit", Value::from(limit))?;
        }
    }

    Ok(items)
}

fn read_input(path: &Path) -> TwingateResult<Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|e| twingate_error!(InvalidInput, "{} is not valid JSON: {}", path.display(), e))
}

pub async fn handle_run(
    resource: ResourceKind,
    operation: Operation,
    matches: &ArgMatches,
    context: &mut CliContext,
) -> TwingateResult<()> {
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(|f| f.parse())
        .transpose()?
        .unwrap_or(OutputFormat::Simple);

    let input = matches
        .get_one::<String>("input")
        .map(|path| read_input(Path::new(path)))
        .transpose()?;
    let items = build_items(resource, operation, input, &RunOptions::from_matches(matches))?;
    let continue_on_fail = matches.get_flag("continue-on-fail");

    let credentials = context.credentials()?.clone();
    let client = context.client()?;

    info!(%resource, %operation, items = items.len(), "running batch");
    let outputs = run_batch(&client, &credentials, resource, operation, &items, continue_on_fail).await?;

    print_outputs(&outputs, format)
}
