// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Storage backend implementations.

pub mod file;

pub use file::FileStorage;
