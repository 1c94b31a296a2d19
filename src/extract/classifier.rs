//! Partitions a package's top-level declarations into the declaration model.

use std::ops::Range;

use tree_sitter::Node;

use crate::config::{ExtractOptions, SortOrder};
use crate::extract::comments::{doc_comments, group_text};
use crate::extract::fileset::{FileId, FileSet};
use crate::extract::parser::ParsedFile;
use crate::model::{DeclKind, DeclNode, FuncDecl, PackageDecls, TypeDecl, TypeRegistry, ValueGroup};

/// Share of a value group's specs that must name the dominant type before the
/// group is listed under that type.
const DOMINANT_TYPE_THRESHOLD: f64 = 0.75;

pub fn classify(fset: &FileSet, files: &[ParsedFile], options: &ExtractOptions) -> PackageDecls {
    let mut classifier = Classifier::new(fset);
    for parsed in files {
        classifier.read_file(parsed);
    }
    let mut decls = classifier.finish();

    if options.exported_only {
        retain_exported(&mut decls);
    }
    if options.sort == SortOrder::Name {
        sort_by_name(&mut decls);
    }
    decls
}

pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

struct Classifier<'a> {
    fset: &'a FileSet,
    name: String,
    doc: String,
    consts: Vec<ValueGroup>,
    vars: Vec<ValueGroup>,
    funcs: Vec<FuncDecl>,
    types: TypeRegistry,
}

/// The file currently being read.
struct FileCtx<'s> {
    file: FileId,
    source: &'s str,
}

impl FileCtx<'_> {
    fn text(&self, node: Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    fn doc(&self, siblings: &[Node<'_>], index: usize) -> String {
        group_text(&doc_comments(siblings, index), self.source)
    }
}

impl<'a> Classifier<'a> {
    fn new(fset: &'a FileSet) -> Self {
        Self {
            fset,
            name: String::new(),
            doc: String::new(),
            consts: Vec::new(),
            vars: Vec::new(),
            funcs: Vec::new(),
            types: TypeRegistry::new(),
        }
    }

    fn read_file(&mut self, parsed: &ParsedFile) {
        let fset = self.fset;
        let Some(file) = fset.file(parsed.file) else {
            return;
        };
        let ctx = FileCtx {
            file: parsed.file,
            source: &file.source,
        };
        if self.name.is_empty() {
            self.name = parsed.package.clone();
        }

        let root = parsed.root_node();
        let mut cursor = root.walk();
        let nodes: Vec<Node> = root.named_children(&mut cursor).collect();

        for (i, node) in nodes.iter().enumerate() {
            match node.kind() {
                "package_clause" => {
                    let doc = ctx.doc(&nodes, i);
                    if !doc.is_empty() {
                        if !self.doc.is_empty() {
                            self.doc.push('\n');
                        }
                        self.doc.push_str(&doc);
                    }
                }
                "const_declaration" => {
                    let group = value_group(&ctx, *node, ctx.doc(&nodes, i), DeclKind::Const);
                    self.consts.push(group);
                }
                "var_declaration" => {
                    let group = value_group(&ctx, *node, ctx.doc(&nodes, i), DeclKind::Var);
                    self.vars.push(group);
                }
                "function_declaration" | "method_declaration" => {
                    if let Some(func) = func_decl(&ctx, *node, ctx.doc(&nodes, i)) {
                        self.add_func(func);
                    }
                }
                "type_declaration" => {
                    self.read_type_decl(&ctx, *node, ctx.doc(&nodes, i));
                }
                _ => {}
            }
        }
    }

    fn add_func(&mut self, func: FuncDecl) {
        match &func.recv_type {
            Some(recv) => {
                let recv = recv.clone();
                self.types.entry(&recv).funcs.push(func);
            }
            None => self.funcs.push(func),
        }
    }

    fn read_type_decl(&mut self, ctx: &FileCtx<'_>, decl: Node<'_>, decl_doc: String) {
        let mut cursor = decl.walk();
        let inner: Vec<Node> = decl.named_children(&mut cursor).collect();
        let grouped = has_child(decl, "(");
        let specs: Vec<usize> = inner
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind(), "type_spec" | "type_alias"))
            .map(|(i, _)| i)
            .collect();

        for &i in &specs {
            let spec = inner[i];
            let Some(name) = spec.child_by_field_name("name").map(|n| ctx.text(n).to_string()) else {
                continue;
            };

            let doc = if grouped {
                let own = ctx.doc(&inner, i);
                if own.is_empty() && specs.len() == 1 {
                    decl_doc.clone()
                } else {
                    own
                }
            } else {
                decl_doc.clone()
            };

            let node = if grouped {
                decl_node(ctx, spec, DeclKind::Type).with_keyword("type")
            } else {
                decl_node(ctx, decl, DeclKind::Type)
            };

            let entry = self.types.entry(&name);
            if entry.decl.is_some() {
                tracing::warn!("Type {} declared more than once; keeping the first", name);
                continue;
            }
            entry.doc = doc;
            entry.decl = Some(node);
        }
    }

    fn finish(mut self) -> PackageDecls {
        let consts = attribute_values(std::mem::take(&mut self.consts), &mut self.types, |t| {
            &mut t.consts
        });
        let vars = attribute_values(std::mem::take(&mut self.vars), &mut self.types, |t| {
            &mut t.vars
        });

        PackageDecls {
            name: self.name,
            doc: self.doc.trim().to_string(),
            consts,
            vars,
            funcs: self.funcs,
            types: self.types.into_types(),
        }
    }
}

/// Moves groups whose dominant type is a known type under that type and
/// returns the rest.
fn attribute_values<F>(groups: Vec<ValueGroup>, types: &mut TypeRegistry, field: F) -> Vec<ValueGroup>
where
    F: Fn(&mut TypeDecl) -> &mut Vec<ValueGroup>,
{
    let mut package_level = Vec::new();
    for group in groups {
        match group.type_name.as_deref().and_then(|name| types.get_mut(name)) {
            Some(owner) => field(owner).push(group),
            None => package_level.push(group),
        }
    }
    package_level
}

fn has_child(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

fn decl_node(ctx: &FileCtx<'_>, node: Node<'_>, kind: DeclKind) -> DeclNode {
    DeclNode::new(ctx.file, kind, node.byte_range()).with_verbatim(verbatim_ranges(node))
}

fn value_group(ctx: &FileCtx<'_>, decl: Node<'_>, doc: String, kind: DeclKind) -> ValueGroup {
    let specs = value_specs(decl);
    let mut names = Vec::new();
    for spec in &specs {
        let mut cursor = spec.walk();
        names.extend(
            spec.children_by_field_name("name", &mut cursor)
                .map(|n| ctx.text(n).to_string()),
        );
    }

    ValueGroup {
        names,
        doc,
        type_name: dominant_type(ctx, &specs, kind == DeclKind::Const),
        decl: decl_node(ctx, decl, kind),
    }
}

fn value_specs<'t>(decl: Node<'t>) -> Vec<Node<'t>> {
    let mut specs = Vec::new();
    let mut cursor = decl.walk();
    for child in decl.named_children(&mut cursor) {
        match child.kind() {
            "const_spec" | "var_spec" => specs.push(child),
            "var_spec_list" => {
                let mut inner = child.walk();
                specs.extend(child.named_children(&mut inner).filter(|n| n.kind() == "var_spec"));
            }
            _ => {}
        }
    }
    specs
}

/// The single named type of a value group's specs. A const spec without type
/// or values repeats the previous spec; two different names cancel out.
fn dominant_type(ctx: &FileCtx<'_>, specs: &[Node<'_>], is_const: bool) -> Option<String> {
    let mut dominant: Option<String> = None;
    let mut freq = 0usize;
    let mut prev: Option<String> = None;

    for spec in specs {
        let name = match spec.child_by_field_name("type") {
            Some(ty) => base_type_name(ctx, ty),
            None if is_const && spec.child_by_field_name("value").is_none() => prev.clone(),
            None => None,
        };

        if let Some(n) = &name {
            if dominant.as_ref().is_some_and(|d| d != n) {
                return None;
            }
            dominant = Some(n.clone());
            freq += 1;
        }
        prev = name;
    }

    let needed = (specs.len() as f64 * DOMINANT_TYPE_THRESHOLD) as usize;
    dominant.filter(|_| freq >= needed)
}

/// Local type name behind pointers, parentheses and type arguments. Types
/// from other packages yield `None`.
fn base_type_name(ctx: &FileCtx<'_>, ty: Node<'_>) -> Option<String> {
    match ty.kind() {
        "type_identifier" => Some(ctx.text(ty).to_string()),
        "pointer_type" | "parenthesized_type" => {
            let mut cursor = ty.walk();
            let inner = ty.named_children(&mut cursor).next()?;
            base_type_name(ctx, inner)
        }
        "generic_type" => base_type_name(ctx, ty.child_by_field_name("type")?),
        _ => None,
    }
}

fn func_decl(ctx: &FileCtx<'_>, node: Node<'_>, doc: String) -> Option<FuncDecl> {
    let name = ctx.text(node.child_by_field_name("name")?).to_string();
    let body = node.child_by_field_name("body").map(|b| b.byte_range());

    let (kind, recv, recv_type) = match node.child_by_field_name("receiver") {
        Some(receiver) => {
            let ty = receiver_type(receiver);
            let recv = ty.map(|t| ctx.text(t).to_string());
            let recv_type = ty.and_then(|t| base_type_name(ctx, t));
            (DeclKind::Method, recv, recv_type)
        }
        None => (DeclKind::Func, None, None),
    };

    Some(FuncDecl {
        name,
        recv,
        recv_type,
        doc,
        decl: decl_node(ctx, node, kind).with_body(body),
    })
}

fn receiver_type(receiver: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|n| n.kind() == "parameter_declaration")?;
    param.child_by_field_name("type")
}

/// Raw strings and comments inside `node` that span several lines.
fn verbatim_ranges(node: Node<'_>) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut cursor = node.walk();

    'walk: loop {
        let current = cursor.node();
        let multi_line = current.start_position().row != current.end_position().row;
        if multi_line && matches!(current.kind(), "raw_string_literal" | "comment") {
            ranges.push(current.byte_range());
        } else if cursor.goto_first_child() {
            continue;
        }

        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    ranges
}

fn retain_exported(decls: &mut PackageDecls) {
    let (kept, dropped): (Vec<TypeDecl>, Vec<TypeDecl>) = std::mem::take(&mut decls.types)
        .into_iter()
        .partition(|t| is_exported(&t.name));

    for t in dropped {
        decls.consts.extend(t.consts);
        decls.vars.extend(t.vars);
    }
    decls.consts.sort_by_key(|g| g.decl.order());
    decls.vars.sort_by_key(|g| g.decl.order());

    let exported_values = |g: &ValueGroup| g.names.iter().any(|n| is_exported(n));
    decls.consts.retain(exported_values);
    decls.vars.retain(exported_values);
    decls.funcs.retain(|f| is_exported(&f.name));

    decls.types = kept;
    for t in &mut decls.types {
        t.consts.retain(exported_values);
        t.vars.retain(exported_values);
        t.funcs.retain(|f| is_exported(&f.name));
    }
}

fn sort_by_name(decls: &mut PackageDecls) {
    decls.funcs.sort_by(|a, b| a.name.cmp(&b.name));
    decls.types.sort_by(|a, b| a.name.cmp(&b.name));
    for t in &mut decls.types {
        t.funcs.sort_by(|a, b| a.name.cmp(&b.name));
    }
}
