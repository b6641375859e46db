// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod doctor;
pub mod expenses;
pub mod goals;
pub mod health;
pub mod income;
pub mod loans;
pub mod persons;
pub mod prefs;
pub mod savings;
pub mod scenarios;
