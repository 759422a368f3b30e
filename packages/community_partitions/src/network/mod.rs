// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

pub type Edge = (String, String, f64);

pub use self::labeled_network::LabeledNetwork;
pub use self::network::Network;
pub use self::network_builder::NetworkBuilder;

mod identifier;
mod labeled_network;
mod network;
mod network_builder;
pub mod prelude;
