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

use clap::{Parser, Subcommand};

/// Command line options for the IAM samples.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = super::DESCRIPTION)]
pub struct Args {
    /// Your Google Cloud project ID.
    pub project_id: String,

    #[command(subcommand)]
    pub command: Command,

    /// Override the Pub/Sub endpoint.
    ///
    /// By default the program uses `https://pubsub.googleapis.com`, or the
    /// emulator in `PUBSUB_EMULATOR_HOST` when that variable is set.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// The policy version requested by the `get-*-policy` commands.
    #[arg(long, global = true)]
    pub policy_version: Option<i32>,

    /// The maximum level for log messages, written to stderr.
    #[arg(long, global = true, default_value_t = tracing::Level::WARN)]
    pub log_level: tracing::Level,
}

#[derive(Clone, Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Prints the IAM policy for the given topic.
    GetTopicPolicy { topic_id: String },
    /// Prints the IAM policy for the given subscription.
    GetSubscriptionPolicy { subscription_id: String },
    /// Adds sample bindings to the IAM policy for the given topic.
    SetTopicPolicy { topic_id: String },
    /// Adds sample bindings to the IAM policy for the given subscription.
    SetSubscriptionPolicy { subscription_id: String },
    /// Checks the publish and update permissions on the given topic.
    CheckTopicPermissions { topic_id: String },
    /// Checks the consume and update permissions on the given subscription.
    CheckSubscriptionPermissions { subscription_id: String },
}
