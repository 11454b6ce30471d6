// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for leadgate.
//!
//! Exposes the intake pipeline to the website's contact forms at
//! `POST /api/lead`, plus an unauthenticated `GET /health` probe.

pub mod handlers;
pub mod server;
pub mod wiring;

pub use server::{build_router, start_server, GatewayState, HealthState};
pub use wiring::build_intake;
