//! Finding the string constant behind an operand.

use crate::ir::{Operand, OperandKind};

/// How many extra wrapping layers are looked through after the
/// declaration/address-of step. With one extra layer an operand
/// resolves through at most three hops, e.g. `&decl` -> `decl` ->
/// initializer.
pub const DEFAULT_EXTRA_LAYERS: usize = 1;

/// Sees through the few indirections that commonly sit between a
/// statement and a string literal: variable initializers, `&x`, and
/// single-operand wrappers such as conversions.
///
/// This is a bounded chain of steps rather than a tree walk; shapes it
/// can't see through resolve to nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolver {
    extra_layers: usize,
}

impl Default for Resolver {
    fn default() -> Resolver {
        Resolver { extra_layers: DEFAULT_EXTRA_LAYERS }
    }
}

impl Resolver {
    pub fn new() -> Resolver {
        Resolver::default()
    }

    pub fn with_extra_layers(extra_layers: usize) -> Resolver {
        Resolver { extra_layers }
    }

    /// The bytes of the string constant `operand` denotes, if any.
    pub fn resolve<'a, N: Operand>(&self, operand: Option<&'a N>) -> Option<&'a [u8]> {
        let mut node = operand?;
        if node.kind() == OperandKind::StringConstant {
            return node.string_bytes();
        }

        match node.kind() {
            OperandKind::VarDecl => {
                node = node.initializer()?;
                if node.operand_count() > 0 {
                    node = node.nth_operand(0)?;
                }
            }
            OperandKind::AddressOf if node.operand_count() > 0 => {
                node = node.nth_operand(0)?;
            }
            _ => {}
        }

        for _ in 0..self.extra_layers {
            if node.kind() == OperandKind::StringConstant {
                break;
            }
            match child(node) {
                Some(c) => node = c,
                None => break,
            }
        }

        if node.kind() == OperandKind::StringConstant {
            node.string_bytes()
        } else {
            trace!("operand of kind {:?} did not resolve to a string", node.kind());
            None
        }
    }
}

/// The one node directly beneath `node`: a declaration's initializer,
/// or the first sub-operand of anything else.
fn child<N: Operand>(node: &N) -> Option<&N> {
    match node.kind() {
        OperandKind::VarDecl => node.initializer(),
        _ if node.operand_count() > 0 => node.nth_operand(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Node;

    fn resolve(n: &Node) -> Option<&[u8]> {
        Resolver::new().resolve(Some(n))
    }

    #[test]
    fn direct_constant() {
        assert_eq!(resolve(&Node::string("abc")), Some(&b"abc"[..]));
    }

    #[test]
    fn absent_operand() {
        assert_eq!(Resolver::new().resolve::<Node>(None), None);
    }

    #[test]
    fn declaration_initializers() {
        assert_eq!(resolve(&Node::var("s", Some(Node::string("x")))), Some(&b"x"[..]));
        assert_eq!(resolve(&Node::var("s", None)), None);

        // initializer wrapped twice: one step into the initializer's
        // operand, one extra layer.
        let n = Node::var("s", Some(Node::wrap("nop_expr", Node::wrap("convert", Node::string("y")))));
        assert_eq!(resolve(&n), Some(&b"y"[..]));
    }

    #[test]
    fn address_of() {
        assert_eq!(resolve(&Node::addr(Node::string("a"))), Some(&b"a"[..]));
        let n = Node::addr(Node::var("msg", Some(Node::string("b"))));
        assert_eq!(resolve(&n), Some(&b"b"[..]));
        assert_eq!(resolve(&Node::AddrExpr { operand: None }), None);
    }

    #[test]
    fn wrapper_depth_is_bounded() {
        let one = Node::wrap("nop_expr", Node::string("z"));
        assert_eq!(resolve(&one), Some(&b"z"[..]));

        let mut n = Node::string("z");
        for _ in 0..4 {
            n = Node::wrap("nop_expr", n);
        }
        assert_eq!(resolve(&n), None);
        assert_eq!(Resolver::with_extra_layers(4).resolve(Some(&n)), Some(&b"z"[..]));
    }

    #[test]
    fn other_shapes() {
        assert_eq!(resolve(&Node::expr("plus_expr", vec![])), None);
        assert_eq!(resolve(&Node::expr("call_expr", vec![None, Some(Node::string("q"))])), None);
    }
}
