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

//! Google Cloud Client Libraries for Rust - Pub/Sub IAM policies
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases. Testing is also incomplete, we do
//! **not** recommend that you use this crate in production. We welcome feedback
//! about the APIs, documentation, missing features, bugs, etc.
//!
//! This crate contains types and functions to read and modify the [IAM]
//! policies of [Pub/Sub] topics and subscriptions, and to test which
//! permissions the caller holds on them.
//!
//! ```no_run
//! # use google_cloud_pubsub_iam::client::IamPolicy;
//! # async fn sample() -> anyhow::Result<()> {
//! let client = IamPolicy::builder().build().await?;
//! let policy = client.get_topic_policy("my-project", "my-topic").await?;
//! for binding in &policy.bindings {
//!     println!("{}: {:?}", binding.role, binding.members);
//! }
//! # Ok(()) }
//! ```
//!
//! [iam]: https://cloud.google.com/pubsub/docs/access-control
//! [pub/sub]: https://cloud.google.com/pubsub

pub(crate) mod client_builder;
pub(crate) mod iam_client;
pub(crate) mod resource;
pub(crate) mod service;

pub mod error;
pub mod stub;

pub use gax::Result;
pub use gax::error::Error;

pub mod builder {
    pub use crate::client_builder::ClientBuilder;
}

pub mod model {
    pub use crate::resource::{ResourceKind, ResourceName};
    pub use iam_v1::model::{Binding, GetPolicyOptions, Policy};
}

pub mod client {
    pub use crate::iam_client::IamPolicy;
}

/// The environment variable pointing the client at a local Pub/Sub emulator.
pub const EMULATOR_HOST_ENV: &str = "PUBSUB_EMULATOR_HOST";

mod info {
    const NAME: &str = env!("CARGO_PKG_NAME");
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub(crate) fn user_agent() -> String {
        format!("{NAME}/{VERSION}")
    }
}
