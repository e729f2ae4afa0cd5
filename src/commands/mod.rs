// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod activity;
pub mod booking;
pub mod budgets;
pub mod cart;
pub mod catalog;
pub mod discounts;
pub mod exporter;
pub mod orders;
pub mod profile;
pub mod reports;
pub mod transactions;
