//! Separated lists.

use crate::SyntaxKind;

use super::Parser;
use super::ast::NonEmpty;

/// Whether a separator may directly precede the terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Trailing {
    Allowed,
    Rejected,
}

impl Parser<'_> {
    /// Parse `item (sep item)*`, stopping before `terminator`.
    ///
    /// With [`Trailing::Rejected`] a separator followed by the terminator is
    /// reported as a dangling separator.
    pub(super) fn list1<T>(
        &mut self,
        label: &'static str,
        seps: &[SyntaxKind],
        terminator: SyntaxKind,
        trailing: Trailing,
        mut item: impl FnMut(&mut Self) -> Option<T>,
    ) -> Option<NonEmpty<T>> {
        let mut items = NonEmpty::new(item(self)?);
        while seps.contains(&self.ts.kind()) {
            let (sep, span) = self.ts.bump();
            if self.ts.at(terminator) {
                if trailing == Trailing::Rejected {
                    self.ts
                        .push_error(span, format!("dangling {} in {label}", sep.describe()));
                    return None;
                }
                break;
            }
            items.push(item(self)?);
        }
        Some(items)
    }

    /// Comma separated expressions, possibly none, up to `terminator`.
    pub(super) fn expr_list(&mut self, terminator: SyntaxKind) -> Option<Vec<super::ast::ExprId>> {
        if self.ts.at(terminator) {
            return Some(Vec::new());
        }
        let items = self.list1(
            "expression list",
            &[SyntaxKind::T_COMMA],
            terminator,
            Trailing::Rejected,
            Self::expr,
        )?;
        Some(items.iter().copied().collect())
    }
}
