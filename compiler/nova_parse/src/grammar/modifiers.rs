//! Annotation and modifier collection (spec §4.2 "Modifier validation").

use crate::{ParseError, Parser};
use nova_ir::ast::{Annotation, Modifiers, Visibility};
use nova_ir::TokenKind;

impl Parser<'_> {
    pub(crate) fn parse_annotations(&mut self) -> Result<Vec<Annotation>, ParseError> {
        let mut annotations = Vec::new();
        while self.check(&TokenKind::At) {
            self.advance();
            let (name, span) = self.expect_ident()?;
            annotations.push(Annotation { name, span });
            self.skip_newlines();
        }
        Ok(annotations)
    }

    /// Collect modifiers until a declaration keyword is reached. Per
    /// spec §4.2: a duplicate modifier fails immediately, `abstract` and
    /// `final` conflict, and more than one visibility keyword conflicts.
    pub(crate) fn parse_modifiers(&mut self) -> Result<Modifiers, ParseError> {
        let mut modifiers = Modifiers::default();
        let mut visibility_set = false;

        loop {
            if !self.check_ident() {
                break;
            }
            let span = self.current_span();
            let text = self.current_text();
            let visibility = match text {
                "public" => Some(Visibility::Public),
                "private" => Some(Visibility::Private),
                "protected" => Some(Visibility::Protected),
                "internal" => Some(Visibility::Internal),
                _ => None,
            };
            if let Some(v) = visibility {
                if visibility_set {
                    return Err(ParseError::new(
                        "conflicting visibility modifiers: at most one of public/private/protected/internal is allowed",
                        span,
                        TokenKind::Identifier,
                    ));
                }
                visibility_set = true;
                modifiers.visibility = v;
                self.advance();
                continue;
            }

            let flag: Option<&mut bool> = match text {
                "open" => Some(&mut modifiers.open),
                "abstract" => Some(&mut modifiers.abstract_),
                "sealed" => Some(&mut modifiers.sealed),
                "final" => Some(&mut modifiers.final_),
                "operator" => Some(&mut modifiers.operator),
                "inline" => Some(&mut modifiers.inline),
                "suspend" => Some(&mut modifiers.suspend),
                "override" => Some(&mut modifiers.override_),
                "const" => Some(&mut modifiers.const_),
                "companion" => Some(&mut modifiers.companion),
                "vararg" => Some(&mut modifiers.vararg),
                "reified" => Some(&mut modifiers.reified),
                "crossinline" => Some(&mut modifiers.crossinline),
                "static" => Some(&mut modifiers.static_),
                _ => None,
            };
            let Some(flag) = flag else { break };
            if *flag {
                return Err(ParseError::new(format!("duplicate modifier '{text}'"), span, TokenKind::Identifier));
            }
            *flag = true;
            self.advance();
        }

        if modifiers.abstract_ && modifiers.final_ {
            return Err(ParseError::new(
                "'abstract' and 'final' modifiers are incompatible",
                self.current_span(),
                TokenKind::Identifier,
            ));
        }

        Ok(modifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_ir::StringInterner;

    fn modifiers_of(src: &str, interner: &StringInterner) -> Result<Modifiers, ParseError> {
        let (tokens, _) = nova_lexer::tokenize(src, interner);
        let mut parser = Parser::new(tokens, interner);
        parser.parse_modifiers()
    }

    #[test]
    fn collects_visibility_and_flags() {
        let interner = StringInterner::new();
        let modifiers = modifiers_of("public open class", &interner).unwrap();
        assert_eq!(modifiers.visibility, Visibility::Public);
        assert!(modifiers.open);
    }

    #[test]
    fn duplicate_modifier_is_rejected() {
        let interner = StringInterner::new();
        assert!(modifiers_of("open open class", &interner).is_err());
    }

    #[test]
    fn conflicting_visibility_is_rejected() {
        let interner = StringInterner::new();
        assert!(modifiers_of("public private class", &interner).is_err());
    }

    #[test]
    fn abstract_and_final_conflict() {
        let interner = StringInterner::new();
        assert!(modifiers_of("abstract final class", &interner).is_err());
    }
}
