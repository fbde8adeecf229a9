// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation operations.
//!
//! Every function takes an explicit connection and uses Diesel DSL.
//! Multi-statement invariants (counter bumps, cascades) are wrapped in
//! transactions here, never left to callers.

pub mod activity;
pub mod applications;
pub mod principals;
pub mod services;
pub mod sessions;
