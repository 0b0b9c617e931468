use clap::ArgMatches;
use colored::*;

use super::check::check_credentials;
use crate::cli_context::CliContext;
use crate::client::Credentials;
use crate::error::TwingateResult;

pub async fn handle_auth(matches: &ArgMatches, context: &mut CliContext) -> TwingateResult<()> {
    let subdomain = matches.get_one::<String>("subdomain");
    let api_key = matches.get_one::<String>("api-key");

    if let (Some(subdomain), Some(api_key)) = (subdomain, api_key) {
        let credentials = Credentials::new(subdomain.as_str(), api_key.as_str())?;
        context.set_credentials(credentials.clone())?;
        println!("Credentials saved for {}", credentials.endpoint().cyan());

        // Test the credentials
        let client = context.client()?;
        match check_credentials(&client, &credentials).await {
            Ok(()) => println!("{} Connected to {}", "✅".green(), credentials.subdomain.bold()),
            Err(e) => println!("{} Failed to authenticate: {}", "❌".red(), e),
        }
    } else if matches.get_flag("show") {
        match context.credentials() {
            Ok(credentials) => {
                println!("Subdomain: {}", credentials.subdomain);
                println!("API Key:   {}", credentials.masked_api_key());
                println!("Timeout:   {}s", context.config().timeout_secs);
            }
            Err(_) => println!("No credentials configured"),
        }
    } else {
        println!("Usage: twingate auth --subdomain <NAME> --api-key <KEY> or twingate auth --show");
    }
    Ok(())
}
