// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::future::Future;

use modscan_core::{Error, Result};
use tokio_util::sync::CancellationToken;

/// Race `fut` against `cancel`, returning [`Error::Cancelled`] if the token
/// fires first. An already-cancelled token wins without polling `fut`.
pub async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = fut => result,
    }
}
