use std::env;

use aws_config::SdkConfig;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;

/// Process-wide configuration, loaded once at startup and passed into the
/// handler by reference. Missing required values abort initialization.
#[derive(Debug)]
pub struct Config {
    /// Topic that receives the measurement summaries.
    pub sns_topic_arn: String,
    /// Shared secret for webhook signature verification. May be given as a
    /// Secrets Manager ARN, in which case main resolves it before the first
    /// invocation.
    pub webhook_secret: String,
}

impl Config {
    pub fn load_from_env() -> Result<Config, String> {
        let conf = Config {
            sns_topic_arn: env::var("SNS_TOPIC_ARN")
                .map_err(|e| format!("SNS_TOPIC_ARN not set - {}", e))?,
            webhook_secret: env::var("WEBHOOK_SECRET")
                .map_err(|e| format!("WEBHOOK_SECRET not set - {}", e))?,
        };

        Ok(conf)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum KeySourceError {
    #[error("Failed to access AWS Secrets Manager. Please make sure the lambda function has permissions to access the {secret_id} secret. Error: {error:?}")]
    FailedToAccessSecretsManager {
        secret_id: String,
        error: GetSecretValueError,
    },
    #[error("Didn't find the {secret_id} secret in AWS secretsmanager")]
    MissingSecret { secret_id: String },
}

pub async fn get_webhook_secret_from_secrets_manager(
    aws_config: &SdkConfig,
    secret_id: String,
) -> Result<String, KeySourceError> {
    let secretsmanager = aws_sdk_secretsmanager::Client::new(aws_config);
    let response = secretsmanager
        .get_secret_value()
        .set_secret_id(Some(secret_id.clone()))
        .send()
        .await
        .map_err(|error| KeySourceError::FailedToAccessSecretsManager {
            secret_id: secret_id.clone(),
            error: error.into_service_error(),
        })?;
    response
        .secret_string
        .ok_or(KeySourceError::MissingSecret { secret_id })
}
