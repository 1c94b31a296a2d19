use crate::docs::{PackageDocs, TypeDocs};
use crate::model::{FuncDecl, PackageDecls, TypeDecl, ValueGroup};
use crate::package::PackageId;
use crate::render::Renderer;

pub fn assemble(pkg: &PackageId, decls: &PackageDecls, renderer: &Renderer<'_>) -> PackageDocs {
    PackageDocs {
        name: decls.name.clone(),
        import: pkg.import_statement(),
        package: decls.doc.clone(),
        constants: render_values(renderer, &decls.consts),
        variables: render_values(renderer, &decls.vars),
        functions: render_funcs(renderer, &decls.funcs),
        types: decls.types.iter().map(|t| type_docs(renderer, t)).collect(),
    }
}

fn type_docs(renderer: &Renderer<'_>, t: &TypeDecl) -> TypeDocs {
    TypeDocs {
        name: t.name.clone(),
        header: format!("type {}", t.name),
        doc: t.doc.clone(),
        declaration: t
            .decl
            .as_ref()
            .map(|node| renderer.render(node, &t.doc))
            .unwrap_or_default(),
        constants: render_values(renderer, &t.consts),
        variables: render_values(renderer, &t.vars),
        functions: render_funcs(renderer, &t.funcs),
    }
}

fn render_values(renderer: &Renderer<'_>, groups: &[ValueGroup]) -> String {
    join_blocks(groups.iter().map(|g| renderer.render(&g.decl, &g.doc)))
}

fn render_funcs(renderer: &Renderer<'_>, funcs: &[FuncDecl]) -> String {
    join_blocks(funcs.iter().map(|f| renderer.render(&f.decl, &f.doc)))
}

/// Blocks separated by one blank line; empty fragments are skipped.
fn join_blocks(blocks: impl Iterator<Item = String>) -> String {
    let mut out = String::new();
    for block in blocks.filter(|b| !b.is_empty()) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&block);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractOptions;
    use crate::extract::fileset::{FileId, FileSet};
    use crate::extract::{classify, Parser};
    use crate::model::{DeclKind, DeclNode};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn assemble_source(source: &str) -> PackageDocs {
        let mut fset = FileSet::new();
        let parsed = Parser::new()
            .parse_source(Path::new("demo.go"), source.to_string(), &mut fset)
            .unwrap();
        let decls = classify(&fset, &[parsed], &ExtractOptions::default());
        let renderer = Renderer::new(&fset, false);
        assemble(&PackageId::new("example.com/demo", "/src/demo"), &decls, &renderer)
    }

    #[test]
    fn test_assemble_package_fields() {
        let docs = assemble_source("// Package demo says hi.\npackage demo\n\n// Hi says hi.\nfunc Hi() {}\n");

        assert_eq!(docs.name, "demo");
        assert_eq!(docs.import, "import \"example.com/demo\"");
        assert_eq!(docs.package, "Package demo says hi.");
        assert_eq!(docs.functions, "Hi says hi.\n```\nfunc Hi() {}\n```\n");
        assert_eq!(docs.constants, "");
        assert_eq!(docs.variables, "");
        assert!(docs.types.is_empty());
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let docs = assemble_source("package demo\n\nconst A = 1\n\n// B doc.\nconst B = 2\n");

        assert_eq!(docs.constants, "```\nconst A = 1\n```\n\nB doc.\n```\nconst B = 2\n```\n");
    }

    #[test]
    fn test_type_entries() {
        let docs = assemble_source(
            r#"package demo

// Celsius is a temperature.
type Celsius float64

// Freezing point.
const Freezing Celsius = 0

// String formats c.
func (c Celsius) String() string { return "" }

type Empty struct{}
"#,
        );

        assert_eq!(docs.types.len(), 2);
        let celsius = &docs.types[0];
        assert_eq!(celsius.name, "Celsius");
        assert_eq!(celsius.header, "type Celsius");
        assert_eq!(celsius.doc, "Celsius is a temperature.");
        assert_eq!(
            celsius.declaration,
            "Celsius is a temperature.\n```\ntype Celsius float64\n```\n"
        );
        assert_eq!(celsius.constants, "Freezing point.\n```\nconst Freezing Celsius = 0\n```\n");
        assert_eq!(
            celsius.functions,
            "String formats c.\n```\nfunc (c Celsius) String() string { return \"\" }\n```\n"
        );
        assert_eq!(docs.constants, "");
        assert_eq!(docs.functions, "");

        let empty = &docs.types[1];
        assert_eq!(empty.header, "type Empty");
        assert_eq!(empty.declaration, "```\ntype Empty struct{}\n```\n");
        assert_eq!(empty.constants, "");
        assert_eq!(empty.variables, "");
        assert_eq!(empty.functions, "");
    }

    #[test]
    fn test_synthesized_type_has_empty_declaration() {
        let docs = assemble_source("package demo\n\n// M does m.\nfunc (t T) M() {}\n");

        assert_eq!(docs.functions, "");
        let t = &docs.types[0];
        assert_eq!(t.name, "T");
        assert_eq!(t.header, "type T");
        assert_eq!(t.declaration, "");
        assert_eq!(t.functions, "M does m.\n```\nfunc (t T) M() {}\n```\n");
    }

    #[test]
    fn test_join_skips_degraded_fragments() {
        let mut fset = FileSet::new();
        fset.add(Path::new("demo.go"), "package demo\n\nvar A = 1\n".to_string());
        let good = DeclNode::new(FileId(0), DeclKind::Var, 14..23);
        let bad = DeclNode::new(FileId(3), DeclKind::Var, 0..1);
        let groups: Vec<ValueGroup> = [bad, good.clone(), good]
            .into_iter()
            .map(|decl| ValueGroup {
                names: vec!["A".to_string()],
                doc: String::new(),
                type_name: None,
                decl,
            })
            .collect();

        let rendered = render_values(&Renderer::new(&fset, false), &groups);

        assert_eq!(rendered, "```\nvar A = 1\n```\n\n```\nvar A = 1\n```\n");
    }
}
