use aws_config::{BehaviorVersion, Region, SdkConfig};
use kb_lifecycle_core::ports::Services;

use crate::adapters::aoss::AossCollections;
use crate::adapters::iam::IamRoles;
use crate::adapters::s3::S3Buckets;
use crate::adapters::sts::StsIdentity;
use crate::config::RuntimeConfig;

/// Loads the ambient AWS configuration once, applying the region override.
pub async fn load_sdk_config(config: &RuntimeConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    loader.load().await
}

pub struct AwsServices {
    identity: StsIdentity,
    roles: IamRoles,
    collections: AossCollections,
    buckets: S3Buckets,
}

impl AwsServices {
    pub fn new(sdk_config: &SdkConfig, config: &RuntimeConfig) -> Self {
        Self {
            identity: StsIdentity::new(aws_sdk_sts::Client::new(sdk_config)),
            roles: IamRoles::new(aws_sdk_iam::Client::new(sdk_config)),
            collections: AossCollections::new(aws_sdk_opensearchserverless::Client::new(
                sdk_config,
            )),
            buckets: S3Buckets::new(
                aws_sdk_s3::Client::new(sdk_config),
                config.bucket_location_for(sdk_config.region().map(|region| region.as_ref())),
            ),
        }
    }

    pub fn services(&self) -> Services<'_> {
        Services {
            identity: &self.identity,
            roles: &self.roles,
            collections: &self.collections,
            buckets: &self.buckets,
        }
    }
}
