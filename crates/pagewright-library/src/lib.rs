// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagewright-library — the folder of generated PDFs.
//
// The folder itself is the database: an entry exists exactly when a `.pdf`
// file exists under the current root. There is no index or sidecar metadata.

pub mod data_dir;
pub mod store;

pub use data_dir::{data_dir, default_root};
pub use store::LibraryStore;
