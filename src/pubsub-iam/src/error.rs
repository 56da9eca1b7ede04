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

//! Classify the errors returned by the IAM policy operations.
//!
//! All the operations return [Error][crate::Error]. The clients do not retry
//! or otherwise recover from errors, applications can use [ErrorKind] to
//! decide what to do with them.
//!
//! # Example
//! ```
//! # use google_cloud_pubsub_iam::error::ErrorKind;
//! # use google_cloud_pubsub_iam::Error;
//! fn should_retry(error: &Error) -> bool {
//!     matches!(
//!         ErrorKind::from_error(error),
//!         ErrorKind::Unavailable | ErrorKind::Aborted
//!     )
//! }
//! ```

use crate::Error;
use gax::error::rpc::Code;

/// The failure modes of the IAM policy operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The topic or subscription does not exist.
    NotFound,
    /// The caller lacks the IAM permission required by the operation.
    PermissionDenied,
    /// The service or the network failed, the request may succeed if retried.
    Unavailable,
    /// The policy was modified concurrently while setting it.
    Aborted,
    /// Any other error.
    Other,
}

impl ErrorKind {
    /// Classifies `error`.
    pub fn from_error(error: &Error) -> Self {
        if let Some(status) = error.status() {
            return match status.code {
                Code::NotFound => Self::NotFound,
                Code::PermissionDenied => Self::PermissionDenied,
                Code::Unavailable => Self::Unavailable,
                Code::Aborted => Self::Aborted,
                _ => Self::Other,
            };
        }
        if error.is_timeout() || error.is_io() {
            return Self::Unavailable;
        }
        match error.http_status_code() {
            Some(404) => Self::NotFound,
            Some(403) => Self::PermissionDenied,
            Some(409) => Self::Aborted,
            Some(503) => Self::Unavailable,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NotFound => "NOT_FOUND",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::Unavailable => "UNAVAILABLE",
            Self::Aborted => "ABORTED",
            Self::Other => "OTHER",
        };
        f.write_str(name)
    }
}
