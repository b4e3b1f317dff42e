use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use intdash_webhook_notifier::config;
use intdash_webhook_notifier::intdash::SyntheticMeasurementSource;
use intdash_webhook_notifier::notify::SnsPublisher;
use intdash_webhook_notifier::Handler;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    intdash_webhook_notifier::set_up_logging();

    info!(
        "Initializing {} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let aws_config = aws_config::load_defaults(BehaviorVersion::v2023_11_09()).await;
    let mut config = config::Config::load_from_env()?;

    // if the webhook secret is an ARN, get the secret value from Secrets Manager
    if config.webhook_secret.starts_with("arn:aws:secretsmanager:") {
        config.webhook_secret = config::get_webhook_secret_from_secrets_manager(
            &aws_config,
            config.webhook_secret.clone(),
        )
        .await
        .map_err(|e| e.to_string())?;
    };

    let handler = Handler {
        source: Arc::new(SyntheticMeasurementSource::default()),
        publisher: Arc::new(SnsPublisher::new(aws_sdk_sns::Client::new(&aws_config))),
        config,
    };

    run(service_fn(|request: LambdaEvent<ApiGatewayProxyRequest>| {
        intdash_webhook_notifier::function_handler(&handler, request)
    }))
    .await
}
