// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job requests.
//!
//! | path        | effect                                   |
//! |-------------|------------------------------------------|
//! | `/describe` | the job named by `jobid`                 |
//! | `/list`     | every job, oldest first                  |
//! | `/cancel`   | mark the job cancelled, then describe it |
//! | `/delete`   | remove the job                           |

use std::io::Write;

use modscan_core::{Error, Job, Result};
use modscan_storage::JobStore;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tokio_util::sync::CancellationToken;

/// Serve one job request, writing the response body to `out`.
///
/// Errors carry the kind the caller maps to a response status; nothing is
/// written to `out` on error.
pub async fn handle_jobs<W: Write + Send>(
    store: Option<&dyn JobStore>,
    path: &str,
    job_id: &str,
    out: &mut W,
    cancel: &CancellationToken,
) -> Result<()> {
    let Some(store) = store else {
        return Err(Error::NotImplemented("jobs store not configured".to_string()));
    };
    let require_id = || {
        if job_id.is_empty() {
            Err(Error::invalid_argument("missing jobid"))
        } else {
            Ok(job_id)
        }
    };

    match path {
        "/describe" => {
            let job = store.get_job(require_id()?, cancel).await?;
            write_json(out, &job)
        }
        "/list" => {
            let jobs = store.list_jobs(cancel).await?;
            write_json(out, &jobs)
        }
        "/cancel" => {
            let id = require_id()?;
            let cancel_job = Box::new(|j: &mut Job| {
                j.cancel();
                Ok(())
            });
            let job = store.update_job(id, cancel_job, cancel).await?;
            tracing::info!(job_id = id, status = %job.status, "job cancel requested");
            write_json(out, &job)
        }
        "/delete" => {
            let id = require_id()?;
            store.delete_job(id, cancel).await?;
            tracing::info!(job_id = id, "job deleted");
            Ok(())
        }
        _ => Err(Error::invalid_argument(format!("unknown path {path:?}"))),
    }
}

/// JSON with four-space indentation and a trailing newline.
fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    out.write_all(&buf).map_err(|e| Error::storage(format!("writing response: {e}")))
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
