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

use crate::{Error, Result};
use iam_v1::model::Binding;

/// The kinds of Pub/Sub resources that carry an IAM policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A topic, the resource publishers send messages to.
    Topic,
    /// A subscription, the resource subscribers receive messages from.
    Subscription,
}

impl ResourceKind {
    /// The collection segment used in resource names.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Topic => "topics",
            Self::Subscription => "subscriptions",
        }
    }

    /// A human readable name, e.g. `topic`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Subscription => "subscription",
        }
    }

    /// The permissions checked by the `check-*-permissions` samples.
    pub fn sample_permissions(&self) -> &'static [&'static str] {
        match self {
            Self::Topic => &["pubsub.topics.publish", "pubsub.topics.update"],
            Self::Subscription => &["pubsub.subscriptions.consume", "pubsub.subscriptions.update"],
        }
    }

    /// The bindings added by the `set-*-policy` samples.
    ///
    /// Both kinds grant `roles/pubsub.viewer` to all the users in a domain.
    /// Topics grant `roles/pubsub.publisher` to a group, subscriptions grant
    /// `roles/editor` to the same group.
    pub fn sample_bindings(&self) -> Vec<Binding> {
        let group_role = match self {
            Self::Topic => "roles/pubsub.publisher",
            Self::Subscription => "roles/editor",
        };
        vec![
            Binding::new()
                .set_role("roles/pubsub.viewer")
                .set_members(["domain:google.com"]),
            Binding::new()
                .set_role(group_role)
                .set_members(["group:cloud-logs@google.com"]),
        ]
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The full name of a topic or subscription.
///
/// Resource names have the form `projects/{project}/topics/{topic}` or
/// `projects/{project}/subscriptions/{subscription}`.
///
/// # Example
/// ```
/// # use google_cloud_pubsub_iam::model::{ResourceKind, ResourceName};
/// let name = ResourceName::new(ResourceKind::Topic, "my-project", "my-topic")?;
/// assert_eq!(name.path(), "projects/my-project/topics/my-topic");
/// # Ok::<(), google_cloud_pubsub_iam::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceName {
    kind: ResourceKind,
    project: String,
    id: String,
    path: String,
}

impl ResourceName {
    /// Creates the name of the resource `id` of the given kind in `project`.
    ///
    /// Returns a binding error if either identifier does not follow the
    /// Pub/Sub naming rules. Topic and subscription ids start with a letter,
    /// contain only letters, digits, and `-_.~+`, and are 3 to 255 characters
    /// long. Project ids contain only lowercase letters, digits, `-`, `.` and
    /// `:`.
    pub fn new<P, I>(kind: ResourceKind, project: P, id: I) -> Result<Self>
    where
        P: Into<String>,
        I: Into<String>,
    {
        let project = project.into();
        let id = id.into();
        check_project(&project)?;
        check_id(kind, &id)?;
        let path = format!("projects/{project}/{}/{id}", kind.collection());
        Ok(Self {
            kind,
            project,
            id,
            path,
        })
    }

    /// Creates the name of a topic.
    pub fn topic<P: Into<String>, I: Into<String>>(project: P, topic: I) -> Result<Self> {
        Self::new(ResourceKind::Topic, project, topic)
    }

    /// Creates the name of a subscription.
    pub fn subscription<P: Into<String>, I: Into<String>>(
        project: P,
        subscription: I,
    ) -> Result<Self> {
        Self::new(ResourceKind::Subscription, project, subscription)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// The short name of the resource, e.g. `my-topic`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The full resource name, e.g. `projects/my-project/topics/my-topic`.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

const ID_LENGTH: std::ops::RangeInclusive<usize> = 3..=255;

fn check_project(project: &str) -> Result<()> {
    if project.is_empty() {
        return Err(Error::binding("the project id must not be empty"));
    }
    let valid = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || "-.:".contains(c);
    if !project.chars().all(valid) {
        return Err(Error::binding(format!(
            "the project id contains invalid characters, got {project:?}"
        )));
    }
    Ok(())
}

// Pub/Sub also accepts `%` in ids, but the ids are used verbatim in request
// paths and an escape sequence would address a different resource.
fn check_id(kind: ResourceKind, id: &str) -> Result<()> {
    if !ID_LENGTH.contains(&id.len()) {
        return Err(Error::binding(format!(
            "the {kind} id must have between {} and {} characters, got {id:?}",
            ID_LENGTH.start(),
            ID_LENGTH.end()
        )));
    }
    if !id.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(Error::binding(format!(
            "the {kind} id must start with a letter, got {id:?}"
        )));
    }
    let valid = |c: char| c.is_ascii_alphanumeric() || "-_.~+".contains(c);
    if !id.chars().all(valid) {
        return Err(Error::binding(format!(
            "the {kind} id contains invalid characters, got {id:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ResourceKind::Topic, "projects/p/topics/res")]
    #[test_case(ResourceKind::Subscription, "projects/p/subscriptions/res")]
    fn path(kind: ResourceKind, want: &str) -> anyhow::Result<()> {
        let name = ResourceName::new(kind, "p", "res")?;
        assert_eq!(name.path(), want);
        assert_eq!(name.to_string(), want);
        assert_eq!(name.kind(), kind);
        assert_eq!(name.project(), "p");
        assert_eq!(name.id(), "res");
        Ok(())
    }

    #[test]
    fn shorthands() -> anyhow::Result<()> {
        assert_eq!(
            ResourceName::topic("proj-1", "topic-a")?,
            ResourceName::new(ResourceKind::Topic, "proj-1", "topic-a")?
        );
        assert_eq!(
            ResourceName::subscription("proj-1", "sub-a")?.path(),
            "projects/proj-1/subscriptions/sub-a"
        );
        Ok(())
    }

    #[test_case("", "topic-a"; "empty project")]
    #[test_case("proj-1", ""; "empty id")]
    #[test_case("proj/1", "topic-a"; "separator in project")]
    #[test_case("proj#1", "topic-a"; "fragment in project")]
    #[test_case("proj-1", "topics/a"; "separator in id")]
    #[test_case("proj-1", "a#b"; "fragment in id")]
    #[test_case("proj-1", "abc?x=1"; "query in id")]
    #[test_case("proj-1", "abc%2Fdef"; "escaped separator in id")]
    #[test_case("proj-1", "ab"; "short id")]
    #[test_case("proj-1", "1-topic"; "id starts with a digit")]
    #[test_case("proj-1", "topic a"; "space in id")]
    fn invalid(project: &str, id: &str) {
        let err = ResourceName::topic(project, id).unwrap_err();
        assert!(err.is_binding(), "{err:?}");
    }

    #[test_case("abc")]
    #[test_case("Topic_1.a~b+c-d")]
    fn valid_ids(id: &str) -> anyhow::Result<()> {
        let name = ResourceName::subscription("example.com:proj-1", id)?;
        assert_eq!(name.id(), id);
        Ok(())
    }

    #[test]
    fn id_length() -> anyhow::Result<()> {
        let longest = format!("a{}", "b".repeat(254));
        let name = ResourceName::topic("proj-1", longest.as_str())?;
        assert_eq!(name.id().len(), 255);
        let err = ResourceName::topic("proj-1", format!("{longest}c")).unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        Ok(())
    }

    #[test]
    fn sample_permissions() {
        assert_eq!(
            ResourceKind::Topic.sample_permissions(),
            ["pubsub.topics.publish", "pubsub.topics.update"]
        );
        assert_eq!(
            ResourceKind::Subscription.sample_permissions(),
            ["pubsub.subscriptions.consume", "pubsub.subscriptions.update"]
        );
    }

    #[test_case(ResourceKind::Topic, "roles/pubsub.publisher")]
    #[test_case(ResourceKind::Subscription, "roles/editor")]
    fn sample_bindings(kind: ResourceKind, group_role: &str) {
        let got = kind.sample_bindings();
        let want = vec![
            Binding::new()
                .set_role("roles/pubsub.viewer")
                .set_members(["domain:google.com"]),
            Binding::new()
                .set_role(group_role)
                .set_members(["group:cloud-logs@google.com"]),
        ];
        assert_eq!(got, want);
    }

    #[test]
    fn kind_names() {
        assert_eq!(ResourceKind::Topic.to_string(), "topic");
        assert_eq!(ResourceKind::Subscription.to_string(), "subscription");
        assert_eq!(ResourceKind::Topic.collection(), "topics");
        assert_eq!(ResourceKind::Subscription.collection(), "subscriptions");
    }
}
