mod decoder;
mod node;
mod position;


pub use decoder::{ColumnDecoder, DecodeOptions};
pub use node::{ArrayNode, HolePolicy, Node, ObjectNode, SparseDocument};
pub use position::{Position, render_position};
