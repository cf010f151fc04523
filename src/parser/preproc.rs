//! `@` directives.
//!
//! Directives are recorded in the tree as written. Conditional sections are
//! not evaluated and loaded scripts are not followed.

use log::debug;

use crate::SyntaxKind;
use crate::tokenizer::LexMode;

use super::Parser;
use super::ast::{Directive, Preproc};

impl Parser<'_> {
    /// Skip a directive the lexer did not recognise.
    ///
    /// The lexer has already reported it, so the directive alone becomes an
    /// error node and parsing resumes right after it.
    pub(super) fn skip_unknown_directive(&mut self) -> bool {
        let (kind, span) = self.ts.peek();
        if kind != SyntaxKind::T_DIRECTIVE || Directive::from_word(self.ts.slice(&span)).is_some() {
            return false;
        }
        debug!("skipping unknown directive at {span:?}");
        self.ts.bump();
        true
    }

    /// One directive with its arguments.
    pub(super) fn preproc(&mut self) -> Option<Preproc> {
        let (_, span) = self.ts.bump();
        let word = self.ts.slice(&span);
        let directive = Directive::from_word(word)?;
        Some(match directive {
            Directive::Prefixes => {
                let append = match self.ts.kind() {
                    SyntaxKind::T_EQ => false,
                    SyntaxKind::T_PLUS_EQ => true,
                    _ => {
                        self.ts
                            .error_expected(&[SyntaxKind::T_EQ, SyntaxKind::T_PLUS_EQ], "@prefixes");
                        return None;
                    }
                };
                self.ts.bump();
                Preproc::Prefixes {
                    append,
                    prefix: self.ident("@prefixes")?,
                }
            }
            Directive::If => {
                if !self.ts.expect(SyntaxKind::T_LPAREN, "@if") {
                    return None;
                }
                let cond = self.unrestricted(Self::expr)?;
                if !self.ts.expect(SyntaxKind::T_RPAREN, "@if") {
                    return None;
                }
                Preproc::If(cond)
            }
            Directive::Ifdef | Directive::Ifndef => {
                if !self.ts.expect(SyntaxKind::T_LPAREN, "@ifdef") {
                    return None;
                }
                let name = self.ident("@ifdef")?;
                if !self.ts.expect(SyntaxKind::T_RPAREN, "@ifdef") {
                    return None;
                }
                if directive == Directive::Ifdef {
                    Preproc::Ifdef(name)
                } else {
                    Preproc::Ifndef(name)
                }
            }
            Directive::Else => Preproc::Else,
            Directive::Endif => Preproc::Endif,
            Directive::Deprecated => Preproc::Deprecated(self.deprecation_message()?),
            Directive::Load | Directive::LoadSigs | Directive::LoadPlugin | Directive::Unload => {
                self.load(directive, span, word)?
            }
        })
    }

    /// The raw file name after a load directive.
    fn load(&mut self, directive: Directive, span: crate::Span, word: &str) -> Option<Preproc> {
        let kind = directive.as_load()?;
        let (found, file) = self.ts.peek_in(LexMode::FilePath);
        if found != SyntaxKind::T_FILE || file.is_empty() {
            self.ts.push_error(span, format!("{word} needs a file name"));
            return None;
        }
        self.ts.bump();
        Some(Preproc::Load {
            kind,
            file: self.ts.slice(&file).to_string(),
        })
    }

    /// `[(] ["message"] [)]` after `@deprecated`.
    fn deprecation_message(&mut self) -> Option<Option<String>> {
        let paren = self.ts.eat(SyntaxKind::T_LPAREN);
        let (kind, span) = self.ts.peek_value();
        let message = (kind == SyntaxKind::T_STRING).then(|| {
            self.ts.bump();
            let text = self.ts.slice(&span);
            let text = text.strip_prefix('"').unwrap_or(text);
            text.strip_suffix('"').unwrap_or(text).to_string()
        });
        if paren && !self.ts.expect(SyntaxKind::T_RPAREN, "@deprecated") {
            return None;
        }
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::assert_has_error;
    use crate::parse;
    use rstest::rstest;

    #[rstest]
    #[case("@load base/frameworks/notice", "(@load base/frameworks/notice)")]
    #[case("@load-sigs ./sigs.sig", "(@load-sigs ./sigs.sig)")]
    #[case("@load-plugin Zeek::AF_Packet", "(@load-plugin Zeek::AF_Packet)")]
    #[case("@unload policy/misc/loaded-scripts", "(@unload policy/misc/loaded-scripts)")]
    #[case("@prefixes += lang", "(@prefixes += lang)")]
    #[case("@if ( Version::number >= 30000 )", "(@if (>= Version::number 30000))")]
    #[case("@ifdef ( Cluster::LOG )", "(@ifdef Cluster::LOG)")]
    #[case("@ifndef ( X )", "(@ifndef X)")]
    #[case("@else", "(@else)")]
    #[case("@endif", "(@endif)")]
    #[case("@deprecated \"use other\"", "(@deprecated \"use other\")")]
    #[case("@deprecated(\"m\")", "(@deprecated \"m\")")]
    #[case("@deprecated", "(@deprecated)")]
    fn directive_forms(#[case] src: &str, #[case] expected: &str) {
        let parsed = parse(src);
        assert!(parsed.errors().is_empty(), "{src}: {:?}", parsed.errors());
        assert_eq!(parsed.ast().sexpr(), expected);
    }

    #[test]
    fn unknown_directive_is_skipped_alone() {
        let parsed = parse("@loud\nglobal x = 1;\n");
        assert_eq!(parsed.errors().len(), 1);
        assert!(parsed.errors().iter().all(|e| e.to_string() == "unknown directive"));
        assert_eq!(parsed.ast().sexpr(), "<error>\n(global x (= 1))");
    }

    #[test]
    fn directive_inside_function_body() {
        let parsed = parse("function f() {\n@if ( T )\nprint 1;\n@endif\n}");
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());
        assert_eq!(
            parsed.ast().sexpr(),
            "(function f (params) (block (@if T) (print 1) (@endif)))"
        );
    }

    #[test]
    fn load_without_file() {
        let parsed = parse("@load");
        assert_has_error(parsed.errors(), "@load needs a file name");
    }
}
