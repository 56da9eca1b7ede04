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
use crate::client_builder::{ClientBuilder, ClientConfig};
use crate::resource::ResourceName;
use crate::service::DefaultService;
use crate::stub::PolicyService;
use gax::client_builder::Result as BuilderResult;
use iam_v1::model::{Binding, GetPolicyOptions, Policy};
use std::sync::Arc;

/// A client to read and modify the IAM policies of [Cloud Pub/Sub] topics and
/// subscriptions.
///
/// # Example
/// ```no_run
/// # use google_cloud_pubsub_iam::client::IamPolicy;
/// # use google_cloud_pubsub_iam::model::Binding;
/// # async fn sample() -> anyhow::Result<()> {
/// let client = IamPolicy::builder().build().await?;
/// let policy = client
///     .set_topic_policy(
///         "my-project",
///         "my-topic",
///         [Binding::new()
///             .set_role("roles/pubsub.viewer")
///             .set_members(["domain:example.com"])],
///     )
///     .await?;
/// println!("{policy:?}");
/// # Ok(()) }
/// ```
///
/// # Concurrent modifications
///
/// [set_policy()][IamPolicy::set_policy] reads the current policy, appends
/// the new bindings, and writes the result back in two separate requests. The
/// client does not inspect the `etag` returned by the service, it sends the
/// policy back unchanged. If another writer modified the policy in between,
/// the service may reject the write with `ABORTED`. The client returns that
/// error to the application, it does not retry.
///
/// # Configuration
///
/// To configure `IamPolicy` use the `with_*` methods in the type returned by
/// [builder()][IamPolicy::builder]. The default configuration should work for
/// most applications. Common configuration changes include:
///
/// * [with_endpoint()]: by default this client uses the global default endpoint
///   (`https://pubsub.googleapis.com`). Applications using regional endpoints
///   or running in restricted networks may want to override this default.
/// * [with_credentials()]: by default this client uses
///   [Application Default Credentials]. Applications using custom
///   authentication may need to override this default.
///
/// # Pooling and Cloning
///
/// `IamPolicy` holds a connection pool internally, it is advised to
/// create one and then reuse it.  You do not need to wrap `IamPolicy` in
/// an [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an `Arc`
/// internally.
///
/// [application default credentials]: https://cloud.google.com/docs/authentication#adc
/// [cloud pub/sub]: https://cloud.google.com/pubsub/docs/access-control
/// [with_endpoint()]: ClientBuilder::with_endpoint
/// [with_credentials()]: ClientBuilder::with_credentials
#[derive(Clone, Debug)]
pub struct IamPolicy {
    inner: Arc<dyn PolicyService>,
}

impl IamPolicy {
    /// Returns a builder for [IamPolicy].
    ///
    /// # Example
    /// ```no_run
    /// # use google_cloud_pubsub_iam::client::IamPolicy;
    /// # async fn sample() -> anyhow::Result<()> {
    /// let client = IamPolicy::builder().build().await?;
    /// # Ok(()) }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a new client from the provided stub.
    ///
    /// The most common case for calling this function is in tests mocking the
    /// client's behavior.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: PolicyService + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    pub(crate) async fn new(config: ClientConfig) -> BuilderResult<Self> {
        let service = DefaultService::new(config).await?;
        Ok(Self::from_stub(service))
    }

    /// Returns the current IAM policy of a topic or subscription.
    pub async fn get_policy(&self, name: &ResourceName) -> Result<Policy> {
        self.get_policy_with_options(name, None).await
    }

    /// Returns the current IAM policy, requesting a specific policy version.
    ///
    /// # Example
    /// ```no_run
    /// # use google_cloud_pubsub_iam::client::IamPolicy;
    /// # use google_cloud_pubsub_iam::model::{GetPolicyOptions, ResourceName};
    /// # async fn sample(client: &IamPolicy) -> anyhow::Result<()> {
    /// let name = ResourceName::topic("my-project", "my-topic")?;
    /// let options = GetPolicyOptions::new().set_requested_policy_version(3);
    /// let policy = client.get_policy_with_options(&name, Some(options)).await?;
    /// # Ok(()) }
    /// ```
    pub async fn get_policy_with_options(
        &self,
        name: &ResourceName,
        options: Option<GetPolicyOptions>,
    ) -> Result<Policy> {
        tracing::debug!(resource = %name, "getting IAM policy");
        self.inner.get_iam_policy(name.path().to_string(), options).await
    }

    /// Appends `bindings` to the IAM policy of a topic or subscription.
    ///
    /// The bindings are appended as-is: they are not merged with existing
    /// bindings for the same role, and duplicates are not removed. Returns
    /// the policy as stored by the service.
    pub async fn set_policy<I>(&self, name: &ResourceName, bindings: I) -> Result<Policy>
    where
        I: IntoIterator<Item = Binding>,
    {
        let mut policy = self.get_policy(name).await?;
        let current = policy.bindings.len();
        policy.bindings.extend(bindings);
        tracing::debug!(
            resource = %name,
            added = policy.bindings.len() - current,
            "setting IAM policy"
        );
        self.inner.set_iam_policy(name.path().to_string(), policy).await
    }

    /// Returns the subset of `permissions` the caller holds on a topic or
    /// subscription.
    ///
    /// An empty list of permissions returns an empty list without contacting
    /// the service. Permissions reported by the service that were not
    /// requested are dropped.
    pub async fn check_permissions<I, V>(
        &self,
        name: &ResourceName,
        permissions: I,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let requested: Vec<String> = permissions.into_iter().map(Into::into).collect();
        if requested.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(resource = %name, ?requested, "testing IAM permissions");
        let reported = self
            .inner
            .test_iam_permissions(name.path().to_string(), requested.clone())
            .await?;
        let (granted, unexpected): (Vec<_>, Vec<_>) =
            reported.into_iter().partition(|p| requested.contains(p));
        if !unexpected.is_empty() {
            tracing::warn!(
                resource = %name,
                ?unexpected,
                "ignoring permissions that were not requested"
            );
        }
        Ok(granted)
    }

    /// Returns the current IAM policy of `projects/{project_id}/topics/{topic_id}`.
    pub async fn get_topic_policy(&self, project_id: &str, topic_id: &str) -> Result<Policy> {
        self.get_policy(&ResourceName::topic(project_id, topic_id)?).await
    }

    /// Returns the current IAM policy of
    /// `projects/{project_id}/subscriptions/{subscription_id}`.
    pub async fn get_subscription_policy(
        &self,
        project_id: &str,
        subscription_id: &str,
    ) -> Result<Policy> {
        self.get_policy(&ResourceName::subscription(project_id, subscription_id)?)
            .await
    }

    /// Appends `bindings` to the IAM policy of a topic.
    pub async fn set_topic_policy<I>(
        &self,
        project_id: &str,
        topic_id: &str,
        bindings: I,
    ) -> Result<Policy>
    where
        I: IntoIterator<Item = Binding>,
    {
        self.set_policy(&ResourceName::topic(project_id, topic_id)?, bindings)
            .await
    }

    /// Appends `bindings` to the IAM policy of a subscription.
    pub async fn set_subscription_policy<I>(
        &self,
        project_id: &str,
        subscription_id: &str,
        bindings: I,
    ) -> Result<Policy>
    where
        I: IntoIterator<Item = Binding>,
    {
        let name = ResourceName::subscription(project_id, subscription_id)?;
        self.set_policy(&name, bindings).await
    }

    /// Returns the subset of `permissions` the caller holds on a topic.
    pub async fn check_topic_permissions<I, V>(
        &self,
        project_id: &str,
        topic_id: &str,
        permissions: I,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = ResourceName::topic(project_id, topic_id)?;
        self.check_permissions(&name, permissions).await
    }

    /// Returns the subset of `permissions` the caller holds on a subscription.
    pub async fn check_subscription_permissions<I, V>(
        &self,
        project_id: &str,
        subscription_id: &str,
        permissions: I,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = ResourceName::subscription(project_id, subscription_id)?;
        self.check_permissions(&name, permissions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::error::ErrorKind;
    use gax::error::rpc::{Code, Status};
    use std::collections::HashMap;
    use std::sync::Mutex;

    const TOPIC: &str = "projects/proj-1/topics/topic-a";
    const SUBSCRIPTION: &str = "projects/proj-1/subscriptions/sub-a";

    mockall::mock! {
        #[derive(Debug)]
        Service {}
        #[async_trait::async_trait]
        impl PolicyService for Service {
            async fn get_iam_policy(
                &self,
                resource: String,
                options: Option<GetPolicyOptions>,
            ) -> Result<Policy>;
            async fn set_iam_policy(&self, resource: String, policy: Policy) -> Result<Policy>;
            async fn test_iam_permissions(
                &self,
                resource: String,
                permissions: Vec<String>,
            ) -> Result<Vec<String>>;
        }
    }

    /// An in-memory policy service.
    ///
    /// Resources without a policy do not exist. The service records every
    /// policy submitted to it, and grants a fixed set of permissions.
    #[derive(Clone, Debug, Default)]
    struct FakeService {
        policies: Arc<Mutex<HashMap<String, Policy>>>,
        submitted: Arc<Mutex<Vec<Policy>>>,
        granted: Vec<String>,
    }

    impl FakeService {
        fn with_resource(self, resource: &str, policy: Policy) -> Self {
            self.policies
                .lock()
                .unwrap()
                .insert(resource.to_string(), policy);
            self
        }

        fn submitted(&self) -> Vec<Policy> {
            self.submitted.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PolicyService for FakeService {
        async fn get_iam_policy(
            &self,
            resource: String,
            _options: Option<GetPolicyOptions>,
        ) -> Result<Policy> {
            self.policies
                .lock()
                .unwrap()
                .get(&resource)
                .cloned()
                .ok_or_else(|| not_found(&resource))
        }

        async fn set_iam_policy(&self, resource: String, policy: Policy) -> Result<Policy> {
            let mut policies = self.policies.lock().unwrap();
            if !policies.contains_key(&resource) {
                return Err(not_found(&resource));
            }
            self.submitted.lock().unwrap().push(policy.clone());
            // Simulate the service normalizing the stored policy.
            let mut stored = policy;
            stored.version = 1;
            policies.insert(resource, stored.clone());
            Ok(stored)
        }

        async fn test_iam_permissions(
            &self,
            resource: String,
            permissions: Vec<String>,
        ) -> Result<Vec<String>> {
            if !self.policies.lock().unwrap().contains_key(&resource) {
                return Err(not_found(&resource));
            }
            Ok(permissions
                .into_iter()
                .filter(|p| self.granted.contains(p))
                .collect())
        }
    }

    fn not_found(resource: &str) -> Error {
        Error::service(
            Status::default()
                .set_code(Code::NotFound)
                .set_message(format!("Resource not found (resource={resource}).")),
        )
    }

    fn service_error(code: Code) -> Error {
        Error::service(Status::default().set_code(code).set_message("uh-oh"))
    }

    fn binding(role: &str, member: &str) -> Binding {
        Binding::new().set_role(role).set_members([member])
    }

    fn existing_policy() -> Policy {
        Policy::new().set_bindings([
            binding("roles/pubsub.viewer", "domain:google.com"),
            binding("roles/pubsub.publisher", "group:cloud-logs@google.com"),
        ])
    }

    #[tokio::test]
    async fn get_policy() -> anyhow::Result<()> {
        let fake = FakeService::default().with_resource(TOPIC, existing_policy());
        let client = IamPolicy::from_stub(fake);
        let policy = client.get_topic_policy("proj-1", "topic-a").await?;
        assert_eq!(policy, existing_policy());
        Ok(())
    }

    #[tokio::test]
    async fn get_policy_not_found() -> anyhow::Result<()> {
        let client = IamPolicy::from_stub(FakeService::default());
        let err = client
            .get_subscription_policy("proj-1", "missing")
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::from_error(&err), ErrorKind::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn get_policy_with_options() -> anyhow::Result<()> {
        let mut mock = MockService::new();
        mock.expect_get_iam_policy()
            .withf(|resource, options| {
                resource == TOPIC
                    && options
                        .as_ref()
                        .is_some_and(|o| o.requested_policy_version == 3)
            })
            .times(1)
            .returning(|_, _| Ok(Policy::new().set_version(3)));

        let client = IamPolicy::from_stub(mock);
        let name = ResourceName::topic("proj-1", "topic-a")?;
        let options = GetPolicyOptions::new().set_requested_policy_version(3);
        let policy = client.get_policy_with_options(&name, Some(options)).await?;
        assert_eq!(policy.version, 3);
        Ok(())
    }

    #[tokio::test]
    async fn set_policy_into_empty() -> anyhow::Result<()> {
        let fake = FakeService::default().with_resource(TOPIC, Policy::new());
        let client = IamPolicy::from_stub(fake.clone());
        client
            .set_topic_policy(
                "proj-1",
                "topic-a",
                [binding("roles/pubsub.viewer", "domain:google.com")],
            )
            .await?;

        let submitted = fake.submitted();
        assert_eq!(submitted.len(), 1, "{submitted:?}");
        assert_eq!(
            submitted[0].bindings,
            vec![binding("roles/pubsub.viewer", "domain:google.com")]
        );
        Ok(())
    }

    #[tokio::test]
    async fn set_policy_appends() -> anyhow::Result<()> {
        let fake = FakeService::default().with_resource(SUBSCRIPTION, existing_policy());
        let client = IamPolicy::from_stub(fake.clone());
        let added = binding("roles/pubsub.viewer", "user:alice@example.com");
        let got = client
            .set_subscription_policy("proj-1", "sub-a", [added.clone()])
            .await?;

        let mut want = existing_policy().bindings;
        want.push(added);
        assert_eq!(fake.submitted()[0].bindings, want);
        assert_eq!(got.bindings, want);
        // The client returns the policy echoed by the service.
        assert_eq!(got.version, 1);
        Ok(())
    }

    #[tokio::test]
    async fn set_policy_keeps_duplicates() -> anyhow::Result<()> {
        let fake = FakeService::default().with_resource(TOPIC, existing_policy());
        let client = IamPolicy::from_stub(fake.clone());
        let duplicate = binding("roles/pubsub.viewer", "domain:google.com");
        client
            .set_topic_policy(
                "proj-1",
                "topic-a",
                [duplicate.clone(), duplicate.clone()],
            )
            .await?;

        let bindings = &fake.submitted()[0].bindings;
        assert_eq!(bindings.len(), 4, "{bindings:?}");
        let viewers = bindings
            .iter()
            .filter(|b| b.role == "roles/pubsub.viewer")
            .count();
        assert_eq!(viewers, 3, "{bindings:?}");
        Ok(())
    }

    #[tokio::test]
    async fn set_policy_without_bindings() -> anyhow::Result<()> {
        let fake = FakeService::default().with_resource(TOPIC, existing_policy());
        let client = IamPolicy::from_stub(fake.clone());
        let before = client.get_topic_policy("proj-1", "topic-a").await?;
        let after = client
            .set_topic_policy("proj-1", "topic-a", Vec::<Binding>::new())
            .await?;
        assert_eq!(after.bindings, before.bindings);
        assert_eq!(fake.submitted(), vec![before]);
        Ok(())
    }

    #[tokio::test]
    async fn set_policy_passes_etag_through() -> anyhow::Result<()> {
        let mut mock = MockService::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_get_iam_policy()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Policy::new().set_etag(bytes_etag())));
        mock.expect_set_iam_policy()
            .withf(|resource, policy| resource == TOPIC && policy.etag == bytes_etag())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, p| Ok(p));

        let client = IamPolicy::from_stub(mock);
        let got = client
            .set_topic_policy(
                "proj-1",
                "topic-a",
                [binding("roles/editor", "group:g@example.com")],
            )
            .await?;
        assert_eq!(got.etag, bytes_etag());
        Ok(())
    }

    fn bytes_etag() -> Vec<u8> {
        b"BwWWja0YfJA=".to_vec()
    }

    #[tokio::test]
    async fn set_policy_aborted() -> anyhow::Result<()> {
        let mut mock = MockService::new();
        mock.expect_get_iam_policy()
            .times(1)
            .returning(|_, _| Ok(Policy::default()));
        mock.expect_set_iam_policy()
            .times(1)
            .returning(|_, _| Err(service_error(Code::Aborted)));

        let client = IamPolicy::from_stub(mock);
        let err = client
            .set_topic_policy(
                "proj-1",
                "topic-a",
                [binding("roles/editor", "user:a@b.com")],
            )
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::from_error(&err), ErrorKind::Aborted);
        Ok(())
    }

    #[tokio::test]
    async fn set_policy_get_fails() -> anyhow::Result<()> {
        let mut mock = MockService::new();
        mock.expect_get_iam_policy()
            .times(1)
            .returning(|_, _| Err(service_error(Code::PermissionDenied)));
        mock.expect_set_iam_policy().times(0);

        let client = IamPolicy::from_stub(mock);
        let err = client
            .set_subscription_policy("proj-1", "sub-a", Vec::<Binding>::new())
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::from_error(&err), ErrorKind::PermissionDenied);
        Ok(())
    }

    #[tokio::test]
    async fn check_permissions_subset() -> anyhow::Result<()> {
        let fake = FakeService {
            granted: vec!["pubsub.topics.publish".to_string()],
            ..FakeService::default()
        }
        .with_resource(TOPIC, Policy::new());
        let client = IamPolicy::from_stub(fake);
        let granted = client
            .check_topic_permissions(
                "proj-1",
                "topic-a",
                ["pubsub.topics.publish", "pubsub.topics.update"],
            )
            .await?;
        assert_eq!(granted, vec!["pubsub.topics.publish"]);
        Ok(())
    }

    #[tokio::test]
    async fn check_permissions_none_granted() -> anyhow::Result<()> {
        let fake = FakeService::default().with_resource(SUBSCRIPTION, Policy::new());
        let client = IamPolicy::from_stub(fake);
        let granted = client
            .check_subscription_permissions(
                "proj-1",
                "sub-a",
                ["pubsub.subscriptions.consume", "pubsub.subscriptions.update"],
            )
            .await?;
        assert!(granted.is_empty(), "{granted:?}");
        Ok(())
    }

    #[tokio::test]
    async fn check_permissions_empty_request() -> anyhow::Result<()> {
        let mut mock = MockService::new();
        mock.expect_test_iam_permissions().times(0);

        let client = IamPolicy::from_stub(mock);
        let granted = client
            .check_topic_permissions("proj-1", "topic-a", Vec::<String>::new())
            .await?;
        assert!(granted.is_empty(), "{granted:?}");
        Ok(())
    }

    #[tokio::test]
    async fn check_permissions_drops_unrequested() -> anyhow::Result<()> {
        let mut mock = MockService::new();
        mock.expect_test_iam_permissions()
            .withf(|resource, permissions| {
                resource == SUBSCRIPTION && permissions == &["pubsub.subscriptions.consume"]
            })
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    "pubsub.subscriptions.consume".to_string(),
                    "pubsub.subscriptions.delete".to_string(),
                ])
            });

        let client = IamPolicy::from_stub(mock);
        let granted = client
            .check_subscription_permissions(
                "proj-1",
                "sub-a",
                ["pubsub.subscriptions.consume"],
            )
            .await?;
        assert_eq!(granted, vec!["pubsub.subscriptions.consume"]);
        Ok(())
    }

    #[tokio::test]
    async fn check_permissions_unavailable() -> anyhow::Result<()> {
        let mut mock = MockService::new();
        mock.expect_test_iam_permissions()
            .times(1)
            .returning(|_, _| Err(service_error(Code::Unavailable)));

        let client = IamPolicy::from_stub(mock);
        let err = client
            .check_topic_permissions("proj-1", "topic-a", ["pubsub.topics.publish"])
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::from_error(&err), ErrorKind::Unavailable);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_names_do_not_call_service() -> anyhow::Result<()> {
        let mut mock = MockService::new();
        mock.expect_get_iam_policy().times(0);
        mock.expect_test_iam_permissions().times(0);

        let client = IamPolicy::from_stub(mock);
        let err = client.get_topic_policy("", "topic-a").await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        let err = client.get_topic_policy("proj-1", "a#b").await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        let err = client
            .check_subscription_permissions("proj-1", "", ["pubsub.subscriptions.consume"])
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        Ok(())
    }
}
