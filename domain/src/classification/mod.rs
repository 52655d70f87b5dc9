//! Claim classification: the answer protocol codec and its result types.

pub mod codec;
pub mod parsing;
pub mod result;
