// Core modules implementing version detection, record layouts, decoding, and layer assembly.
pub mod compose;
pub mod dataset;
pub mod decode;
pub mod error;
pub mod field;
pub mod index;
pub mod layer;
pub mod module_file;
pub mod options;
pub mod schema;
pub mod version;
