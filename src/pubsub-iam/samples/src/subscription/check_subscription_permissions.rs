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

// [START pubsub_test_subscription_permissions]
use google_cloud_pubsub_iam::client::IamPolicy;
use google_cloud_pubsub_iam::model::{ResourceKind, ResourceName};
use std::io::Write;

pub async fn sample<W: Write>(
    out: &mut W,
    client: &IamPolicy,
    project_id: &str,
    subscription_id: &str,
) -> anyhow::Result<()> {
    let name = ResourceName::new(ResourceKind::Subscription, project_id, subscription_id)?;
    let permissions = name.kind().sample_permissions().iter().copied();
    let granted = client.check_permissions(&name, permissions).await?;

    writeln!(out, "Allowed permissions for subscription {name}: {granted:?}")?;
    Ok(())
}
// [END pubsub_test_subscription_permissions]
