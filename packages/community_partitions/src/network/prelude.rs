pub use super::labeled_network::LabeledNetwork;
pub use super::network::Network;
pub use super::network_builder::NetworkBuilder;
pub use super::Edge;
