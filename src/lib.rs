pub mod config;
pub mod docs;
pub mod error;
pub mod extract;
pub mod model;
pub mod package;
pub mod render;

pub use config::{DocConfig, ExtractOptions, SortOrder};
pub use docs::{assemble, document_package, PackageDocs, TypeDocs};
pub use error::{DocError, Result, SyntaxError};
pub use extract::{classify, is_package_source, FileId, FileSet, ParsedFile, Parser};
pub use model::{DeclKind, DeclNode, FuncDecl, PackageDecls, TypeDecl, TypeRegistry, ValueGroup};
pub use package::PackageId;
pub use render::Renderer;
