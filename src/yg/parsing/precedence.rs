//! Operator precedence table
//!
//! Higher numbers bind tighter. Every binary operator is left-associative, so
//! its right operand is parsed one level above its own precedence.
//!
//! | operator      | fixity  | precedence |
//! |---------------|---------|------------|
//! | `?` `*` `+`   | postfix | 210        |
//! | `^`           | prefix  | 200        |
//! | `~`           | infix   | 30         |
//! | `#` `!#` `_#` | tag     | 20         |
//! | `\|`          | infix   | 20         |
//! | `<-`          | infix   | 10         |

use crate::yg::lexing::TokenKind;

pub const LOWEST: u8 = 0;
pub const ARROW: u8 = 10;
pub const ALTERNATION: u8 = 20;
pub const TAG: u8 = 20;
pub const SEQUENCE: u8 = 30;
pub const PREFIX: u8 = 200;
pub const SUFFIX: u8 = 210;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Infix,
    Postfix,
    /// Attaches a name to the operand of an alternation
    Tag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub token: TokenKind,
    pub fixity: Fixity,
    pub precedence: u8,
    pub assoc: Assoc,
}

impl OperatorInfo {
    const fn new(token: TokenKind, fixity: Fixity, precedence: u8, assoc: Assoc) -> Self {
        Self {
            token,
            fixity,
            precedence,
            assoc,
        }
    }

    /// Minimum precedence for the operand on the right of this operator
    pub fn operand_precedence(&self) -> u8 {
        match self.assoc {
            Assoc::Left => self.precedence + 1,
            Assoc::Right => self.precedence,
        }
    }

    /// Whether the operator may continue an expression parsed at `min`
    pub fn binds_at(&self, min: u8) -> bool {
        self.precedence >= min
    }
}

pub const OPERATORS: &[OperatorInfo] = &[
    OperatorInfo::new(TokenKind::Question, Fixity::Postfix, SUFFIX, Assoc::Right),
    OperatorInfo::new(TokenKind::Star, Fixity::Postfix, SUFFIX, Assoc::Right),
    OperatorInfo::new(TokenKind::Plus, Fixity::Postfix, SUFFIX, Assoc::Right),
    OperatorInfo::new(TokenKind::Caret, Fixity::Prefix, PREFIX, Assoc::Right),
    OperatorInfo::new(TokenKind::Tilde, Fixity::Infix, SEQUENCE, Assoc::Left),
    OperatorInfo::new(TokenKind::Hash, Fixity::Tag, TAG, Assoc::Left),
    OperatorInfo::new(TokenKind::BangHash, Fixity::Tag, TAG, Assoc::Left),
    OperatorInfo::new(TokenKind::UnderscoreHash, Fixity::Tag, TAG, Assoc::Left),
    OperatorInfo::new(TokenKind::Pipe, Fixity::Infix, ALTERNATION, Assoc::Left),
    OperatorInfo::new(TokenKind::Arrow, Fixity::Infix, ARROW, Assoc::Left),
];

/// Look up an operator that may appear before an operand
pub fn prefix(kind: TokenKind) -> Option<&'static OperatorInfo> {
    OPERATORS
        .iter()
        .find(|op| op.token == kind && op.fixity == Fixity::Prefix)
}

/// Look up an operator that may follow a complete operand
pub fn trailing(kind: TokenKind) -> Option<&'static OperatorInfo> {
    OPERATORS
        .iter()
        .find(|op| op.token == kind && op.fixity != Fixity::Prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_binds_tighter_than_prefix() {
        let caret = prefix(TokenKind::Caret).map(|op| op.precedence);
        let star = trailing(TokenKind::Star).map(|op| op.precedence);
        assert!(star > caret);
    }

    #[test]
    fn test_ordering() {
        let prec = |kind| trailing(kind).map(|op: &OperatorInfo| op.precedence);
        assert!(prec(TokenKind::Tilde) > prec(TokenKind::Pipe));
        assert!(prec(TokenKind::Pipe) > prec(TokenKind::Arrow));
        assert_eq!(prec(TokenKind::Hash), prec(TokenKind::Pipe));
    }

    #[test]
    fn test_left_assoc_operand_is_one_higher() {
        let tilde = trailing(TokenKind::Tilde).copied();
        assert_eq!(tilde.map(|op| op.operand_precedence()), Some(SEQUENCE + 1));
        assert!(tilde.is_some_and(|op| !op.binds_at(SEQUENCE + 1)));
    }

    #[test]
    fn test_non_operators() {
        assert!(trailing(TokenKind::Ident).is_none());
        assert!(prefix(TokenKind::Tilde).is_none());
        assert!(trailing(TokenKind::Caret).is_none());
    }
}
