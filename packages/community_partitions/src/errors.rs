// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use std::convert::From;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("edge file line is missing a column or has an unparseable weight")]
    EdgeFileFormatError,
    #[error("edge file contained no edges")]
    EmptyEdgeFileError,
    #[error("adjacency matrix must be square")]
    NonSquareMatrixError,
    #[error("adjacency matrix must be symmetric")]
    AsymmetricMatrixError,
    #[error("edge weights must be finite and non-negative")]
    InvalidWeightError,
    #[error("edge endpoint {0} is not a node of a network with {1} nodes")]
    EdgeEndpointError(usize, usize),
    #[error("io error: {0}")]
    IoError(io::Error),
}

impl From<io::Error> for NetworkError {
    fn from(err: io::Error) -> NetworkError {
        NetworkError::IoError(err)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("node index is outside of the clustering")]
    ClusterIndexingError,
    #[error("node index is outside of the network")]
    InternalNetworkIndexingError,
    #[error("parameter is outside of its allowed range")]
    ParameterRangeError,
    #[error("partitioner produced no candidate partitions")]
    EmptyHistoryError,
}
