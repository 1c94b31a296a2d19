//! Declaration model produced by the classifier.

use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::extract::fileset::FileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Const,
    Var,
    Func,
    Method,
    Type,
}

/// Handle to the source text of one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclNode {
    pub file: FileId,
    pub kind: DeclKind,
    /// Byte range of the declaration in its file
    pub range: Range<usize>,
    /// Function body, if any
    pub body: Option<Range<usize>>,
    /// Keyword printed before the text, for specs lifted out of a group
    pub keyword: Option<&'static str>,
    /// Multi-line raw strings and comments, reproduced without re-indenting
    pub verbatim: Vec<Range<usize>>,
}

impl DeclNode {
    pub fn new(file: FileId, kind: DeclKind, range: Range<usize>) -> Self {
        Self {
            file,
            kind,
            range,
            body: None,
            keyword: None,
            verbatim: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Option<Range<usize>>) -> Self {
        self.body = body;
        self
    }

    pub fn with_keyword(mut self, keyword: &'static str) -> Self {
        self.keyword = Some(keyword);
        self
    }

    pub fn with_verbatim(mut self, verbatim: Vec<Range<usize>>) -> Self {
        self.verbatim = verbatim;
        self
    }

    /// Sort key reproducing declaration order across files.
    pub fn order(&self) -> (FileId, usize) {
        (self.file, self.range.start)
    }
}

/// A `const` or `var` declaration, grouped or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueGroup {
    pub names: Vec<String>,
    pub doc: String,
    /// Type shared by the group's specs, when there is a single one
    pub type_name: Option<String>,
    pub decl: DeclNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    /// Receiver type as written, e.g. `*Server`
    pub recv: Option<String>,
    /// Receiver base type name, e.g. `Server`
    pub recv_type: Option<String>,
    pub doc: String,
    pub decl: DeclNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub doc: String,
    /// `None` when only methods referred to the type
    pub decl: Option<DeclNode>,
    pub consts: Vec<ValueGroup>,
    pub vars: Vec<ValueGroup>,
    pub funcs: Vec<FuncDecl>,
}

impl TypeDecl {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            doc: String::new(),
            decl: None,
            consts: Vec::new(),
            vars: Vec::new(),
            funcs: Vec::new(),
        }
    }
}

/// Named types in first-seen order, addressable by name.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<TypeDecl>,
    index: HashMap<String, usize>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `name`, created empty on first use.
    pub fn entry(&mut self, name: &str) -> &mut TypeDecl {
        let next = self.types.len();
        let i = *self.index.entry(name.to_string()).or_insert(next);
        if i == next {
            self.types.push(TypeDecl::new(name));
        }
        &mut self.types[i]
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeDecl> {
        self.index.get(name).map(|&i| &mut self.types[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn into_types(self) -> Vec<TypeDecl> {
        self.types
    }
}

/// Everything the classifier found in one package.
#[derive(Debug, Default)]
pub struct PackageDecls {
    /// Name from the `package` clause
    pub name: String,
    pub doc: String,
    pub consts: Vec<ValueGroup>,
    pub vars: Vec<ValueGroup>,
    pub funcs: Vec<FuncDecl>,
    pub types: Vec<TypeDecl>,
}

impl PackageDecls {
    pub fn get_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }
}
