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

// [START pubsub_get_topic_policy]
use google_cloud_pubsub_iam::client::IamPolicy;
use google_cloud_pubsub_iam::model::{GetPolicyOptions, ResourceName};
use std::io::Write;

pub async fn sample<W: Write>(
    out: &mut W,
    client: &IamPolicy,
    project_id: &str,
    topic_id: &str,
    policy_version: Option<i32>,
) -> anyhow::Result<()> {
    let name = ResourceName::topic(project_id, topic_id)?;
    let options = policy_version.map(|v| GetPolicyOptions::new().set_requested_policy_version(v));
    let policy = client.get_policy_with_options(&name, options).await?;

    writeln!(out, "Policy for topic {name}:")?;
    for binding in &policy.bindings {
        writeln!(out, "Role: {}, Members: {:?}", binding.role, binding.members)?;
    }
    Ok(())
}
// [END pubsub_get_topic_policy]
