// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal shell for the triangular peg puzzle: configuration and text rendering.

pub mod config;
pub mod render;
