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

//! Traits to mock the IAM policy service.
//!
//! Application developers may need to mock the clients in this library to test
//! how their application works with different (and sometimes hard to trigger)
//! behavior from the service. Implement [PolicyService] in a test double and
//! create the client with [IamPolicy::from_stub()][crate::client::IamPolicy::from_stub].
//!
//! # Example
//! ```
//! # use google_cloud_pubsub_iam::{Result, model::*, stub::PolicyService};
//! #[derive(Debug)]
//! struct Empty;
//!
//! #[async_trait::async_trait]
//! impl PolicyService for Empty {
//!     async fn get_iam_policy(&self, _: String, _: Option<GetPolicyOptions>) -> Result<Policy> {
//!         Ok(Policy::new())
//!     }
//!     async fn set_iam_policy(&self, _: String, policy: Policy) -> Result<Policy> {
//!         Ok(policy)
//!     }
//!     async fn test_iam_permissions(&self, _: String, _: Vec<String>) -> Result<Vec<String>> {
//!         Ok(Vec::new())
//!     }
//! }
//! ```

use crate::Result;
use iam_v1::model::{GetPolicyOptions, Policy};

/// The operations of the service storing the IAM policies for Pub/Sub
/// resources.
///
/// Each method is a single request. Implementations must not retry, and must
/// return the service errors unchanged.
#[async_trait::async_trait]
pub trait PolicyService: std::fmt::Debug + Send + Sync {
    /// Returns the current policy of `resource`.
    ///
    /// # Arguments
    /// * `resource` - the full resource name, e.g. `projects/p/topics/t`
    /// * `options` - the requested policy version, if any
    async fn get_iam_policy(
        &self,
        resource: String,
        options: Option<GetPolicyOptions>,
    ) -> Result<Policy>;

    /// Replaces the policy of `resource` and returns the policy as stored by
    /// the service.
    async fn set_iam_policy(&self, resource: String, policy: Policy) -> Result<Policy>;

    /// Returns the subset of `permissions` the caller holds on `resource`.
    async fn test_iam_permissions(
        &self,
        resource: String,
        permissions: Vec<String>,
    ) -> Result<Vec<String>>;
}
