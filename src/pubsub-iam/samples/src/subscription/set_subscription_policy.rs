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

// [START pubsub_set_subscription_policy]
use google_cloud_pubsub_iam::client::IamPolicy;
use google_cloud_pubsub_iam::model::ResourceKind;
use std::io::Write;

pub async fn sample<W: Write>(
    out: &mut W,
    client: &IamPolicy,
    project_id: &str,
    subscription_id: &str,
) -> anyhow::Result<()> {
    let bindings = ResourceKind::Subscription.sample_bindings();
    let policy = client
        .set_subscription_policy(project_id, subscription_id, bindings)
        .await?;

    writeln!(out, "IAM policy for subscription {subscription_id} set: {policy:?}")?;
    Ok(())
}
// [END pubsub_set_subscription_policy]
