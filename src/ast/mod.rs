//! Abstract Syntax Tree (AST) representation
//!
//! Declarations own their members and nested declarations exclusively; the
//! tree has no back-references and is not mutated after parsing.

mod nodes;
mod visitor;

pub use nodes::*;
pub use visitor::*;

pub use crate::parser::span::{HasSpan, Location, Span};

use std::fmt;

/// Root of one parsed source unit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub package: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
    pub span: Span,
}

impl CompilationUnit {
    /// Find a declaration by dotted path from the top level, e.g.
    /// `"Outer.Inner"`
    pub fn find_type(&self, path: &str) -> Option<&TypeDecl> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.types.iter().find(|t| t.name() == first)?;
        for segment in segments {
            current = current.nested_types().find(|t| t.name() == segment)?;
        }
        Some(current)
    }
}

impl HasSpan for CompilationUnit {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref package) = self.package {
            writeln!(f, "{}", package)?;
        }

        for import in &self.imports {
            writeln!(f, "{}", import)?;
        }

        for type_decl in &self.types {
            writeln!(f, "{}", type_decl)?;
        }

        Ok(())
    }
}
