use crate::config::AwsConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_organizations::Client as OrganizationsClient;
use aws_sdk_s3::Client as S3Client;
use tracing::debug;

#[derive(Clone)]
pub struct AwsClients {
    pub organizations: OrganizationsClient,
    pub s3: S3Client,
}

impl AwsClients {
    /// Resolve credentials through the default provider chain
    pub async fn new(config: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(profile) = &config.profile {
            debug!("Using AWS profile {}", profile);
            loader = loader.profile_name(profile);
        }

        let sdk_config = loader.load().await;

        Self {
            organizations: OrganizationsClient::new(&sdk_config),
            s3: S3Client::new(&sdk_config),
        }
    }
}
