// SPDX-License-Identifier: MIT OR Apache-2.0
//! Library half of the `fz` binary: config loading kept separate from
//! `main` so it can be unit-tested directly.

pub mod config;
