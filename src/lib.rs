// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod db;
pub mod frequency;
pub mod goals;
pub mod health;
pub mod models;
pub mod projection;
pub mod utils;
