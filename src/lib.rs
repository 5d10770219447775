pub mod engine;
pub mod logging;
pub mod shared;

pub use engine::codec::{answer_projection, decode, encode, encode_many, recompress, reconstruct};
pub use engine::core::decode::{ColumnDecoder, DecodeOptions, HolePolicy};
pub use engine::core::read::projection::{
    FetchReason, ProjectionEngine, ProjectionOptions, ProjectionOutcome, project_inclusion,
};
pub use engine::errors::{CodecError, DecodeError, DecodeErrorKind, EncodeError};
pub use engine::types::{Column, ColumnSet};

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
