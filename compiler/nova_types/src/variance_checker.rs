//! Variance checker (spec §4.8): declaration-site variance of a class's
//! type parameters must be respected by every member's input/output
//! positions.

use crate::resolver::TypeResolver;
use nova_diagnostic::DiagnosticBag;
use nova_ir::ast::{Decl, DeclKind, TypeRef};
use nova_ir::{Name, Span};

#[derive(Clone, Copy, Eq, PartialEq)]
enum Position {
    Input,
    Output,
}

/// Check a single class/interface/object/enum declaration's members
/// against the variance of its own type parameters, emitting `ERROR`
/// diagnostics per violation (spec §4.4 step 6, §4.8).
#[tracing::instrument(level = "debug", skip_all, fields(class = ?decl.name()))]
pub fn check_class_variance(decl: &Decl, resolver: &TypeResolver, diagnostics: &mut DiagnosticBag) {
    let DeclKind::Class { type_params, primary_ctor, .. } = &decl.kind else {
        return;
    };
    if type_params.is_empty() {
        return;
    }

    for param in type_params {
        if param.variance == nova_ir::ast::Variance::Invariant {
            continue;
        }
        for ctor_param in primary_ctor {
            if let Some(ty) = &ctor_param.ty {
                check_position(ty, param.name, param.variance, Position::Input, resolver, diagnostics);
            }
        }
    }

    // Members carry only `DeclId`s here; the analyzer drives per-member
    // variance checks through `check_member_variance` once it resolves
    // each member's `Decl` from the arena.
}

/// Check one member's (function/property) use of a class's variant type
/// parameters.
pub fn check_member_variance(
    member: &Decl,
    class_param: Name,
    class_variance: nova_ir::ast::Variance,
    resolver: &TypeResolver,
    diagnostics: &mut DiagnosticBag,
) {
    if class_variance == nova_ir::ast::Variance::Invariant {
        return;
    }
    match &member.kind {
        DeclKind::Fun { params, return_ty, .. } => {
            for p in params {
                if let Some(ty) = &p.ty {
                    check_position(ty, class_param, class_variance, Position::Input, resolver, diagnostics);
                }
            }
            if let Some(ty) = return_ty {
                check_position(ty, class_param, class_variance, Position::Output, resolver, diagnostics);
            }
        }
        DeclKind::Property { ty, mutable, .. } => {
            if let Some(ty) = ty {
                check_position(ty, class_param, class_variance, Position::Output, resolver, diagnostics);
                if *mutable {
                    check_position(ty, class_param, class_variance, Position::Input, resolver, diagnostics);
                }
            }
        }
        _ => {}
    }
}

fn check_position(
    type_ref: &TypeRef,
    class_param: Name,
    class_variance: nova_ir::ast::Variance,
    position: Position,
    resolver: &TypeResolver,
    diagnostics: &mut DiagnosticBag,
) {
    use nova_ir::ast::TypeRefKind;

    match &type_ref.kind {
        TypeRefKind::Simple(qualified) => {
            if qualified.last() == class_param {
                report_if_violating(class_variance, position, type_ref.span, resolver, class_param, diagnostics);
            }
        }
        TypeRefKind::Nullable(inner) => {
            check_position(inner, class_param, class_variance, position, resolver, diagnostics);
        }
        TypeRefKind::Generic(qualified, args) => {
            if qualified.last() == class_param {
                report_if_violating(class_variance, position, type_ref.span, resolver, class_param, diagnostics);
            }
            for arg in args {
                let arg_position = match arg.variance {
                    nova_ir::ast::Variance::Out => position,
                    nova_ir::ast::Variance::In => flip(position),
                    nova_ir::ast::Variance::Invariant => position,
                };
                if let Some(ty) = &arg.ty {
                    check_position(ty, class_param, class_variance, arg_position, resolver, diagnostics);
                }
            }
        }
        TypeRefKind::Function { receiver, params, return_ty, .. } => {
            // Function parameters are themselves input positions, so a
            // `T` appearing there flips relative to the enclosing position.
            if let Some(r) = receiver {
                check_position(r, class_param, class_variance, flip(position), resolver, diagnostics);
            }
            for p in params {
                check_position(p, class_param, class_variance, flip(position), resolver, diagnostics);
            }
            if let Some(r) = return_ty {
                check_position(r, class_param, class_variance, position, resolver, diagnostics);
            }
        }
    }
}

fn flip(position: Position) -> Position {
    match position {
        Position::Input => Position::Output,
        Position::Output => Position::Input,
    }
}

fn report_if_violating(
    class_variance: nova_ir::ast::Variance,
    position: Position,
    span: Span,
    resolver: &TypeResolver,
    class_param: Name,
    diagnostics: &mut DiagnosticBag,
) {
    let violates = match (class_variance, position) {
        (nova_ir::ast::Variance::Out, Position::Input) => true,
        (nova_ir::ast::Variance::In, Position::Output) => true,
        _ => false,
    };
    if !violates {
        return;
    }
    let keyword = match class_variance {
        nova_ir::ast::Variance::Out => "out",
        nova_ir::ast::Variance::In => "in",
        nova_ir::ast::Variance::Invariant => unreachable!("invariant never violates"),
    };
    let name = resolver.interner().resolve(class_param);
    diagnostics.error(format!("type parameter '{name}' declared '{keyword}' used in an illegal position"), span);
}
