use std::io;
use std::process::exit;

use clap::Parser;
use kb_lifecycle_aws::config::RuntimeConfig;
use kb_lifecycle_aws::context::{load_sdk_config, AwsServices};
use kb_lifecycle_aws::logging::init_tracing;
use kb_lifecycle_core::report::ConsoleReporter;
use kb_lifecycle_core::setup::run_setup;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "kb_setup",
    version,
    about = "Create the IAM role, AOSS collection and S3 bucket for a Bedrock Knowledge Base",
    long_about = "Creates bedrock-kb-role with its inline policy, the bedrock-kb-collection\n\
                  vector search collection and the bedrock-kb-documents-<account> bucket.\n\
                  Resources that already exist are reused."
)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();

    let config = match RuntimeConfig::from_env() {
        Ok(value) => value,
        Err(error) => {
            eprintln!("❌ {error}");
            exit(1);
        }
    };
    init_tracing(config.log_format);

    let sdk_config = load_sdk_config(&config).await;
    let aws = AwsServices::new(&sdk_config, &config);
    let mut reporter = ConsoleReporter::new(io::stdout());

    match run_setup(&aws.services(), &mut reporter) {
        Ok(summary) => {
            info!(
                event = "aws.setup.completed",
                summary = %serde_json::to_string(&summary).unwrap_or_default(),
            );
        }
        Err(failure) => {
            error!(
                event = "aws.setup.failed",
                error_code = failure.error_code(),
                error = %failure,
            );
            exit(failure.exit_code());
        }
    }
}
