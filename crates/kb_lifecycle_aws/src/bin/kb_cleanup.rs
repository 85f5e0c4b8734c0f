use std::io;
use std::process::exit;

use clap::Parser;
use kb_lifecycle_aws::config::RuntimeConfig;
use kb_lifecycle_aws::context::{load_sdk_config, AwsServices};
use kb_lifecycle_aws::logging::init_tracing;
use kb_lifecycle_core::cleanup::run_cleanup;
use kb_lifecycle_core::confirm::LinePrompt;
use kb_lifecycle_core::report::ConsoleReporter;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "kb_cleanup",
    version,
    about = "Delete the Bedrock Knowledge Base IAM role, AOSS collection and S3 bucket",
    long_about = "Resolves the caller's AWS account, asks for confirmation, then deletes\n\
                  bedrock-kb-role, bedrock-kb-collection and bedrock-kb-documents-<account>\n\
                  in that order. Missing resources are reported and skipped."
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

    let mut confirmer = LinePrompt::new(io::stdin().lock(), io::stdout());
    let mut reporter = ConsoleReporter::new(io::stdout());

    match run_cleanup(&aws.services(), &mut confirmer, &mut reporter) {
        Ok(report) => {
            info!(
                event = "aws.cleanup.completed",
                report = %serde_json::to_string(&report).unwrap_or_default(),
            );
        }
        Err(failure) => {
            error!(
                event = "aws.cleanup.failed",
                error_code = failure.error_code(),
                error = %failure,
            );
            exit(failure.exit_code());
        }
    }
}
