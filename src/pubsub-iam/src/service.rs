// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::Result;
use crate::client_builder::ClientConfig;
use crate::stub::PolicyService;
use gax::client_builder::Result as BuilderResult;
use gax::options::RequestOptionsBuilder;
use gax::retry_policy::{Aip194Strict, RetryPolicyExt};
use google_cloud_pubsub::client::SchemaService;
use iam_v1::model::{GetPolicyOptions, Policy};
use std::time::Duration;

/// Implements [PolicyService] with the IAM methods of the Pub/Sub client.
///
/// The connection pool and the credentials belong to the Pub/Sub client, and
/// are released when the last [IamPolicy][crate::client::IamPolicy] using them
/// is dropped.
#[derive(Clone, Debug)]
pub(crate) struct DefaultService {
    inner: SchemaService,
    timeout: Option<Duration>,
}

impl DefaultService {
    pub(crate) async fn new(config: ClientConfig) -> BuilderResult<Self> {
        // Each operation is a single attempt.
        let builder = SchemaService::builder()
            .with_retry_policy(Aip194Strict.with_attempt_limit(1));
        let builder = config
            .endpoint
            .into_iter()
            .fold(builder, |b, v| b.with_endpoint(v));
        let builder = config
            .cred
            .into_iter()
            .fold(builder, |b, v| b.with_credentials(v));
        Ok(Self {
            inner: builder.build().await?,
            timeout: config.timeout,
        })
    }

    fn with_options<R: RequestOptionsBuilder>(&self, request: R) -> R {
        let request = request.with_user_agent(crate::info::user_agent());
        match self.timeout {
            Some(t) => request.with_attempt_timeout(t),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl PolicyService for DefaultService {
    async fn get_iam_policy(
        &self,
        resource: String,
        options: Option<GetPolicyOptions>,
    ) -> Result<Policy> {
        self.with_options(self.inner.get_iam_policy())
            .set_resource(resource)
            .set_or_clear_options(options)
            .send()
            .await
    }

    async fn set_iam_policy(&self, resource: String, policy: Policy) -> Result<Policy> {
        self.with_options(self.inner.set_iam_policy())
            .set_resource(resource)
            .set_policy(policy)
            .send()
            .await
    }

    async fn test_iam_permissions(
        &self,
        resource: String,
        permissions: Vec<String>,
    ) -> Result<Vec<String>> {
        let response = self
            .with_options(self.inner.test_iam_permissions())
            .set_resource(resource)
            .set_permissions(permissions)
            .send()
            .await?;
        Ok(response.permissions)
    }
}
