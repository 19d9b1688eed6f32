pub mod category;
pub mod document;
pub mod format;

pub use category::DocumentCategory;
pub use document::{CreateDocument, Document, DocumentMeta};
