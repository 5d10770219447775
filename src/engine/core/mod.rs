pub mod arr_info;
pub mod column;
pub mod cursor;
pub mod decode;
pub mod read;
pub mod shape;
