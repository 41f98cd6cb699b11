//! The view of a compiled program that the lint needs: statements
//! carrying a source location, and operands of a handful of shapes.
//!
//! The checking code only ever talks to the `Operand` and `Statement`
//! traits; `Node` and friends are a concrete, deserializable tree used
//! by the standalone driver and the tests.

use std::fmt;

use serde::Deserialize;

/// The shapes of operand the resolver can see through.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OperandKind {
    StringConstant,
    VarDecl,
    AddressOf,
    /// A single-operand expression, e.g. a conversion.
    Wrapper,
    Other,
}

/// An IR operand, navigable only through kind-specific accessors.
pub trait Operand {
    fn kind(&self) -> OperandKind;

    /// The initial value of a variable declaration.
    fn initializer(&self) -> Option<&Self>;

    fn operand_count(&self) -> usize;

    /// The `i`th sub-operand, which may be absent even when `i` is in
    /// range.
    fn nth_operand(&self, i: usize) -> Option<&Self>;

    /// The raw bytes of a string constant. These are not necessarily
    /// NUL-terminated, and may contain NULs before the end.
    fn string_bytes(&self) -> Option<&[u8]>;
}

/// One instruction-level unit of IR.
pub trait Statement {
    type Operand: Operand;

    fn location(&self) -> Location;
    fn operand_count(&self) -> usize;
    fn operand(&self, i: usize) -> Option<&Self::Operand>;
}

/// Where a statement came from.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub file: Option<String>,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Location {
    pub fn new(file: Option<&str>, line: u32, column: u32) -> Location {
        Location { file: file.map(|f| f.to_string()), line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.file {
            Some(ref file) => write!(f, "{}:{}:{}", file, self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// The contents of a string constant: either written as text, or as
/// an array of byte values for data that isn't UTF-8.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Literal(pub Vec<u8>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLiteral {
    Text(String),
    Bytes(Vec<u8>),
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Literal, D::Error> {
        Ok(match RawLiteral::deserialize(d)? {
            RawLiteral::Text(s) => Literal(s.into_bytes()),
            RawLiteral::Bytes(b) => Literal(b),
        })
    }
}

/// A concrete operand tree.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    StringCst {
        value: Literal,
    },
    VarDecl {
        #[serde(default)]
        name: String,
        #[serde(default)]
        initializer: Option<Box<Node>>,
    },
    AddrExpr {
        #[serde(default)]
        operand: Option<Box<Node>>,
    },
    Wrapper {
        #[serde(default)]
        code: String,
        #[serde(default)]
        operand: Option<Box<Node>>,
    },
    Expr {
        #[serde(default)]
        code: String,
        #[serde(default)]
        operands: Vec<Option<Node>>,
    },
}

impl Node {
    pub fn string(s: &str) -> Node {
        Node::StringCst { value: Literal(s.as_bytes().to_vec()) }
    }

    pub fn var(name: &str, initializer: Option<Node>) -> Node {
        Node::VarDecl { name: name.to_string(), initializer: initializer.map(Box::new) }
    }

    pub fn addr(operand: Node) -> Node {
        Node::AddrExpr { operand: Some(Box::new(operand)) }
    }

    pub fn wrap(code: &str, operand: Node) -> Node {
        Node::Wrapper { code: code.to_string(), operand: Some(Box::new(operand)) }
    }

    pub fn expr(code: &str, operands: Vec<Option<Node>>) -> Node {
        Node::Expr { code: code.to_string(), operands }
    }
}

impl Operand for Node {
    fn kind(&self) -> OperandKind {
        match *self {
            Node::StringCst { .. } => OperandKind::StringConstant,
            Node::VarDecl { .. } => OperandKind::VarDecl,
            Node::AddrExpr { .. } => OperandKind::AddressOf,
            Node::Wrapper { .. } => OperandKind::Wrapper,
            Node::Expr { .. } => OperandKind::Other,
        }
    }

    fn initializer(&self) -> Option<&Node> {
        match *self {
            Node::VarDecl { ref initializer, .. } => initializer.as_deref(),
            _ => None,
        }
    }

    fn operand_count(&self) -> usize {
        match *self {
            Node::StringCst { .. } | Node::VarDecl { .. } => 0,
            // like the host's unary codes: the slot exists even if empty
            Node::AddrExpr { .. } | Node::Wrapper { .. } => 1,
            Node::Expr { ref operands, .. } => operands.len(),
        }
    }

    fn nth_operand(&self, i: usize) -> Option<&Node> {
        match *self {
            Node::AddrExpr { ref operand } | Node::Wrapper { ref operand, .. } if i == 0 => {
                operand.as_deref()
            }
            Node::Expr { ref operands, .. } => operands.get(i).and_then(|o| o.as_ref()),
            _ => None,
        }
    }

    fn string_bytes(&self) -> Option<&[u8]> {
        match *self {
            Node::StringCst { ref value } => Some(&value.0),
            _ => None,
        }
    }
}

/// A statement of the concrete IR.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Stmt {
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub operands: Vec<Option<Node>>,
}

impl Statement for Stmt {
    type Operand = Node;

    fn location(&self) -> Location {
        self.location.clone()
    }

    fn operand_count(&self) -> usize {
        self.operands.len()
    }

    fn operand(&self, i: usize) -> Option<&Node> {
        self.operands.get(i).and_then(|o| o.as_ref())
    }
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct BasicBlock {
    #[serde(default)]
    pub statements: Vec<Stmt>,
}

/// A function; `blocks` is `None` for a declaration with no body.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub blocks: Option<Vec<BasicBlock>>,
}

/// Everything the lint sees of one compilation unit.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct Unit {
    #[serde(default)]
    pub functions: Vec<Function>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        assert_eq!(Location::new(Some("a.c"), 3, 7).to_string(), "a.c:3:7");
        assert_eq!(Location::new(None, 3, 7).to_string(), "3:7");
    }

    #[test]
    fn deserialize_unit() {
        let json = r#"{
            "functions": [
                { "name": "decl_only" },
                { "name": "main", "blocks": [ { "statements": [
                    { "location": { "file": "a.c", "line": 4, "column": 5 },
                      "operands": [
                        null,
                        { "kind": "addr_expr", "operand":
                            { "kind": "var_decl", "name": "msg",
                              "initializer": { "kind": "string_cst", "value": "hi" } } },
                        { "kind": "string_cst", "value": [104, 0, 105] }
                      ] }
                ] } ] }
            ]
        }"#;
        let unit: Unit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.functions.len(), 2);
        assert!(unit.functions[0].blocks.is_none());

        let stmt = &unit.functions[1].blocks.as_ref().unwrap()[0].statements[0];
        assert_eq!(stmt.operand_count(), 3);
        assert!(stmt.operand(0).is_none());
        assert_eq!(stmt.operand(1).unwrap().kind(), OperandKind::AddressOf);
        assert_eq!(stmt.operand(2).unwrap().string_bytes(), Some(&b"h\0i"[..]));
        assert_eq!(stmt.location().to_string(), "a.c:4:5");
    }

    #[test]
    fn unary_nodes_have_one_slot() {
        let empty = Node::AddrExpr { operand: None };
        assert_eq!(empty.operand_count(), 1);
        assert!(empty.nth_operand(0).is_none());

        let w = Node::wrap("nop_expr", Node::string("x"));
        assert_eq!(w.nth_operand(0).and_then(|n| n.string_bytes()), Some(&b"x"[..]));
        assert!(w.nth_operand(1).is_none());
    }
}
