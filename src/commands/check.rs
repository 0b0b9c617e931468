use colored::*;
use tracing::info;

use crate::cli_context::CliContext;
use crate::client::{Credentials, GraphQLClient, RequestContext, Variables};
use crate::constants::CREDENTIAL_TEST_QUERY;
use crate::error::TwingateResult;

/// Run the smallest authenticated query; any failure means the credentials can't be used.
pub async fn check_credentials(client: &GraphQLClient, credentials: &Credentials) -> TwingateResult<()> {
    client
        .execute(CREDENTIAL_TEST_QUERY, &Variables::new(), RequestContext::new(credentials))
        .await?;
    info!(subdomain = %credentials.subdomain, "credentials verified");
    Ok(())
}

pub async fn handle_check(context: &mut CliContext) -> TwingateResult<()> {
    let credentials = context.credentials()?.clone();
    let client = context.client()?;

    check_credentials(&client, &credentials).await?;
    println!(
        "{} Credentials for {} are valid",
        "✅".green(),
        credentials.subdomain.bold()
    );
    Ok(())
}
