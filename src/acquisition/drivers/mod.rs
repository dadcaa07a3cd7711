// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rtdtemp project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Acquisition device drivers
//!
//! Only the mock driver ships with the crate; real vendor drivers implement
//! [`DaqDevice`](crate::acquisition::DaqDevice) out of tree.

pub mod mock;

pub use mock::MockDaq;
