// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific database utilities.
//!
//! The portal runs on `SQLite` only; everything that cannot be expressed
//! in backend-agnostic Diesel DSL lives here.

pub mod sqlite;
