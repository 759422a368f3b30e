// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

pub mod clustering;
pub mod community;
pub mod config;
pub mod errors;
pub mod history;
pub mod macros;
pub mod network;
pub mod partitioners;
pub mod quality;
pub mod random_vector;
pub mod safe_vectors;

pub use self::config::PartitionConfig;
pub use self::history::PartitionResult;
pub use self::partitioners::Algorithm;
