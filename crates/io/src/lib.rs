// Report decoding and artifact storage

pub mod pdf;
pub mod source;
pub mod store;
pub mod xlsx;

pub use source::{extract_file, read_source, Source, SourceFormat};
pub use store::{ArtifactStore, DirStore, StoreStatus};
