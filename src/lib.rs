use std::sync::Arc;

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use lambda_runtime::{Error, LambdaEvent};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::intdash::MeasurementSource;
use crate::notify::NotificationPublisher;
use crate::signature::SIGNATURE_HEADER;
use crate::webhook::WebhookEvent;

pub mod config;
pub mod intdash;
pub mod notify;
pub mod signature;
pub mod stats;
pub mod webhook;

pub fn set_up_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
}

/// A type used to hold the collaborators and configuration required by the
/// lambda function. Both collaborators are injected behind their capability
/// traits so tests can substitute fakes.
pub struct Handler {
    pub source: Arc<dyn MeasurementSource>,
    pub publisher: Arc<dyn NotificationPublisher>,
    pub config: Config,
}

// lambda handler
pub async fn function_handler(
    handler: &Handler,
    request: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    debug!("Handling request: {:?}", request.payload);

    let body = request.payload.body.as_deref().unwrap_or_default();
    let supplied_signature = request
        .payload
        .headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    // Auth failures are logged in full server-side; the caller only ever sees
    // the generic body.
    if let Err(e) = signature::verify(
        body.as_bytes(),
        handler.config.webhook_secret.as_bytes(),
        supplied_signature,
    ) {
        warn!("Got invalid signature: {}", e);
        return Ok(response(400, "Invalid signature"));
    }

    let event = match WebhookEvent::parse(body) {
        Ok(event) => event,
        Err(e) => {
            warn!("Got invalid request body: {}", e);
            return Ok(response(400, "Invalid request body"));
        }
    };
    if !event.is_measurement_completed() {
        info!(
            "Got unsupported resource type or action: {}/{}",
            event.resource_type, event.action
        );
        return Ok(response(422, "Unsupported resource type or action"));
    }

    let data_points = match handler.source.fetch_data_points(&event.measurement_uuid).await {
        Ok(data_points) => data_points,
        Err(e) => {
            error!(
                "Failed to fetch data points for measurement {}: {}",
                event.measurement_uuid, e
            );
            return Ok(response(500, "Failed to fetch data points"));
        }
    };

    let stats = match stats::summarize(&data_points) {
        Ok(stats) => stats,
        Err(e) => {
            // An empty series means the upstream returned nothing usable.
            error!("Measurement {} has no data points: {}", event.measurement_uuid, e);
            return Ok(response(500, "Failed to fetch data points"));
        }
    };

    let message = notify::notification_body(&stats);
    match handler
        .publisher
        .publish(&handler.config.sns_topic_arn, &message)
        .await
    {
        Ok(message_id) => {
            info!("Published SNS: {}", message_id);
            Ok(response(204, ""))
        }
        Err(e) => {
            error!("Failed to publish SNS: {}", e);
            Ok(response(500, "Failed to publish SNS"))
        }
    }
}

fn response(status_code: i64, body: &str) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code,
        body: (!body.is_empty()).then(|| Body::Text(body.to_string())),
        ..Default::default()
    }
}
