// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only query operations.

pub mod activity;
pub mod applications;
pub mod principals;
pub mod services;
pub mod sessions;
pub mod stats;
