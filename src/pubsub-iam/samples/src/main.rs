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

//! Read and modify the IAM policies of Pub/Sub topics and subscriptions.

mod args;

use args::{Args, Command};
use clap::Parser;
use google_cloud_pubsub_iam::client::IamPolicy;
use google_cloud_pubsub_iam::error::ErrorKind;
use pubsub_iam_samples::{subscription, topic};
use std::process::ExitCode;

const DESCRIPTION: &str = concat!(
    "This program reads and modifies the IAM policies of Pub/Sub topics",
    " and subscriptions, and tests which permissions the caller holds on them.",
    " Set PUBSUB_EMULATOR_HOST to run it against the Pub/Sub emulator."
);

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", describe(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    enable_tracing(args)?;
    tracing::info!("Configuration: {args:?}");

    let builder = IamPolicy::builder();
    let builder = args
        .endpoint
        .iter()
        .fold(builder, |b, v| b.with_endpoint(v));
    let client = builder.build().await?;

    let mut out = std::io::stdout();
    let project_id = args.project_id.as_str();
    match &args.command {
        Command::GetTopicPolicy { topic_id } => {
            topic::get_topic_policy::sample(
                &mut out,
                &client,
                project_id,
                topic_id,
                args.policy_version,
            )
            .await
        }
        Command::GetSubscriptionPolicy { subscription_id } => {
            subscription::get_subscription_policy::sample(
                &mut out,
                &client,
                project_id,
                subscription_id,
                args.policy_version,
            )
            .await
        }
        Command::SetTopicPolicy { topic_id } => {
            topic::set_topic_policy::sample(&mut out, &client, project_id, topic_id).await
        }
        Command::SetSubscriptionPolicy { subscription_id } => {
            subscription::set_subscription_policy::sample(
                &mut out,
                &client,
                project_id,
                subscription_id,
            )
            .await
        }
        Command::CheckTopicPermissions { topic_id } => {
            topic::check_topic_permissions::sample(&mut out, &client, project_id, topic_id).await
        }
        Command::CheckSubscriptionPermissions { subscription_id } => {
            subscription::check_subscription_permissions::sample(
                &mut out,
                &client,
                project_id,
                subscription_id,
            )
            .await
        }
    }
}

/// Formats a failure for the terminal, prefixed by its [ErrorKind] when the
/// failure comes from the service.
fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<google_cloud_pubsub_iam::Error>() {
        Some(e) => format!("{}: {e}", ErrorKind::from_error(e)),
        None => format!("{error:#}"),
    }
}

fn enable_tracing(args: &Args) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
