// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// The few failures a user is meant to see by name. Everything else is
/// plain `anyhow` context.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("incorrect deletion password; nothing was removed")]
    BadPassword,
    #[error("malformed dump: no 'transactions' list in payload")]
    MalformedDump,
    #[error("backup {0} not found")]
    BackupNotFound(i64),
}
