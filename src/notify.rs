use async_trait::async_trait;
use aws_sdk_sns::Client as SnsClient;
use thiserror::Error;

use crate::stats::SummaryStatistics;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("SNS publish failed: {0}")]
    Sns(String),
    #[error("SNS publish returned no message id")]
    MissingMessageId,
}

/// Narrow capability interface over the notification fan-out: publish one
/// message body to a topic and return the assigned message id.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, PublishError>;
}

/// Production publisher backed by the AWS SNS client.
pub struct SnsPublisher {
    client: SnsClient,
}

impl SnsPublisher {
    pub fn new(client: SnsClient) -> Self {
        SnsPublisher { client }
    }
}

#[async_trait]
impl NotificationPublisher for SnsPublisher {
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, PublishError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| PublishError::Sns(e.into_service_error().to_string()))?;
        output.message_id.ok_or(PublishError::MissingMessageId)
    }
}

/// Formats the two-line notification body. The six-decimal fixed formatting
/// is part of the message contract with downstream subscribers.
pub fn notification_body(stats: &SummaryStatistics) -> String {
    format!(
        "Average: {:.6}\nUnbiased Variance: {:.6}\n",
        stats.average, stats.unbiased_variance
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_body_format() {
        let body = notification_body(&SummaryStatistics {
            average: 20.0,
            unbiased_variance: 100.0,
        });
        assert_eq!(body, "Average: 20.000000\nUnbiased Variance: 100.000000\n");
    }

    #[test]
    fn test_notification_body_rounds_to_six_decimals() {
        let body = notification_body(&SummaryStatistics {
            average: 1.0 / 3.0,
            unbiased_variance: 2.0 / 3.0,
        });
        assert_eq!(body, "Average: 0.333333\nUnbiased Variance: 0.666667\n");
    }
}
