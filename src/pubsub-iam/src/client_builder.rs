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

use crate::client::IamPolicy;
use gax::client_builder::Result as BuilderResult;
use google_cloud_auth::credentials::Credentials;
use google_cloud_auth::credentials::anonymous::Builder as Anonymous;
use std::time::Duration;

/// The configuration used to create the Pub/Sub client.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClientConfig {
    pub(crate) endpoint: Option<String>,
    pub(crate) cred: Option<Credentials>,
    pub(crate) timeout: Option<Duration>,
}

impl ClientConfig {
    /// Points the configuration at the emulator in `emulator_host`, unless
    /// the application configured an endpoint.
    ///
    /// The emulator does not authenticate requests, the default credentials
    /// are replaced by anonymous credentials.
    pub(crate) fn with_emulator(mut self, emulator_host: Option<String>) -> Self {
        let host = match emulator_host.filter(|h| !h.is_empty()) {
            Some(h) if self.endpoint.is_none() => h,
            _ => return self,
        };
        tracing::debug!("using the Pub/Sub emulator at {host}");
        self.endpoint = Some(format!("http://{host}"));
        self.cred = self.cred.or_else(|| Some(Anonymous::new().build()));
        self
    }
}

/// A builder for [IamPolicy].
///
/// # Example
/// ```
/// # use google_cloud_pubsub_iam::client::IamPolicy;
/// # async fn sample() -> anyhow::Result<()> {
/// let builder = IamPolicy::builder();
/// let client = builder
///     .with_endpoint("https://pubsub.googleapis.com")
///     .build()
///     .await?;
/// # Ok(()) }
/// ```
pub struct ClientBuilder {
    pub(crate) config: ClientConfig,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Creates a new client.
    ///
    /// If the `PUBSUB_EMULATOR_HOST` environment variable is set, and no
    /// endpoint was configured, the client connects to the emulator.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_pubsub_iam::client::IamPolicy;
    /// # async fn sample() -> anyhow::Result<()> {
    /// let client = IamPolicy::builder().build().await?;
    /// # Ok(()) }
    /// ```
    pub async fn build(self) -> BuilderResult<IamPolicy> {
        let emulator_host = std::env::var(crate::EMULATOR_HOST_ENV).ok();
        IamPolicy::new(self.config.with_emulator(emulator_host)).await
    }

    /// Sets the endpoint.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_pubsub_iam::client::IamPolicy;
    /// # async fn sample() -> anyhow::Result<()> {
    /// let client = IamPolicy::builder()
    ///     .with_endpoint("https://private.googleapis.com")
    ///     .build()
    ///     .await?;
    /// # Ok(()) }
    /// ```
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.endpoint = Some(v.into());
        self
    }

    /// Configures the authentication credentials.
    ///
    /// By default the client uses [Application Default Credentials]. More
    /// information about valid credentials types can be found in the
    /// [google-cloud-auth] crate documentation.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_pubsub_iam::client::IamPolicy;
    /// # async fn sample() -> anyhow::Result<()> {
    /// use google_cloud_auth::credentials::anonymous;
    /// let client = IamPolicy::builder()
    ///     .with_credentials(anonymous::Builder::new().build())
    ///     .build()
    ///     .await?;
    /// # Ok(()) }
    /// ```
    ///
    /// [application default credentials]: https://cloud.google.com/docs/authentication#adc
    /// [google-cloud-auth]: https://docs.rs/google-cloud-auth
    pub fn with_credentials<V: Into<Credentials>>(mut self, v: V) -> Self {
        self.config.cred = Some(v.into());
        self
    }

    /// Sets the timeout for each request.
    ///
    /// By default requests have no timeout other than the one imposed by the
    /// operating system.
    pub fn with_timeout(mut self, v: Duration) -> Self {
        self.config.timeout = Some(v);
        self
    }
}
