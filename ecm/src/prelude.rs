// ECM - ecm
// Module: Prelude
// SW-REQ-ID: REQ_COMPOSE_001
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for ecm
//!
//! Re-exports the object model prelude together with the platform limits
//! and the synchronization primitives applications reach for directly.

pub use ecm_foundation::{
    limits::{MAX_CLASSES, MAX_RECEIVERS, MAX_SLOTS},
    StaticMap, StaticVec,
};
pub use ecm_model::prelude::*;
pub use ecm_sync::{EcmMutex, EcmOnce};
