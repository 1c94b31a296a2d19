//! Rendered package documentation and the extraction entry point.

pub mod assemble;

use serde::{Deserialize, Serialize};

use crate::config::ExtractOptions;
use crate::error::Result;
use crate::extract::{classify, is_package_source, FileSet, Parser};
use crate::package::PackageId;
use crate::render::Renderer;

pub use assemble::assemble;

/// Documentation of one package, ready for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDocs {
    /// Package clause name
    pub name: String,
    /// `import "<path>"`
    pub import: String,
    /// Package doc comment
    pub package: String,
    pub constants: String,
    pub variables: String,
    pub functions: String,
    pub types: Vec<TypeDocs>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDocs {
    pub name: String,
    /// `type <name>`
    pub header: String,
    pub doc: String,
    /// The type's own declaration block; empty when the type is only known
    /// through its methods
    pub declaration: String,
    pub constants: String,
    pub variables: String,
    /// Methods
    pub functions: String,
}

impl PackageDocs {
    pub fn get_type(&self, name: &str) -> Option<&TypeDocs> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// Parse, classify and render the package at `pkg.dir`.
///
/// Fails when the directory holds no eligible Go files or any of them does
/// not parse. Each call builds its own [`FileSet`], so concurrent calls share
/// nothing.
pub fn document_package(pkg: &PackageId, options: &ExtractOptions) -> Result<PackageDocs> {
    tracing::info!("Documenting {} from {}", pkg.import_path, pkg.dir.display());

    let mut fset = FileSet::new();
    let parser = match pkg.expected_package_name() {
        Some(name) => Parser::new().with_preferred_package(name),
        None => Parser::new(),
    };
    let files = parser.parse_dir(&pkg.dir, is_package_source, &mut fset)?;
    let decls = classify(&fset, &files, options);
    let renderer = Renderer::new(&fset, options.strip_bodies);
    let docs = assemble(pkg, &decls, &renderer);

    tracing::info!(
        "Documented package {}: {} files, {} types",
        docs.name,
        files.len(),
        docs.types.len()
    );
    Ok(docs)
}
