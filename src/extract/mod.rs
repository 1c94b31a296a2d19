pub mod classifier;
pub mod comments;
pub mod fileset;
pub mod filter;
pub mod parser;

pub use classifier::{classify, is_exported};
pub use fileset::{FileId, FileSet, Position, SourceFile};
pub use filter::{is_package_source, package_files};
pub use parser::{ParsedFile, Parser};
