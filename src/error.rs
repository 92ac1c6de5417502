//! Errors raised by position-based tree operations.

use thiserror::Error;

/// A contract violation by the caller of a tree operation.
///
/// Both variants describe programmer errors. Nothing in this crate retries or recovers from them;
/// the tree is left exactly as it was before the failing call.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A position is foreign to the tree, has been removed from it, or does not satisfy the
    /// operation's precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The tree is not in a state that permits the operation.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

/// A specialized `Result` type for tree operations.
pub type Result<T> = ::std::result::Result<T, Error>;
