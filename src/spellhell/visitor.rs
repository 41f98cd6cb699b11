use crate::dict::Dictionary;
use crate::ir::{Function, Location, Operand, Statement, Unit};
use crate::report::Reporter;
use crate::resolve::Resolver;
use crate::words::{self, OverflowPolicy};

/// Walks the statements of a unit, spell-checking every operand that
/// resolves to a string literal. Misspellings go straight to the
/// reporter.
pub struct SpellingVisitor<'a, D: ?Sized, R: ?Sized> {
    /// The reference dictionary.
    words: &'a D,

    /// Where misspelled words are sent.
    reporter: &'a mut R,

    resolver: Resolver,
    overflow: OverflowPolicy,

    /// Number of string literals checked so far.
    pub strings_checked: usize,

    /// Number of misspelled words reported so far.
    pub misspellings: usize,
}

impl<'a, D, R> SpellingVisitor<'a, D, R>
    where D: Dictionary + ?Sized, R: Reporter + ?Sized
{
    /// Create a new Spelling Visitor.
    pub fn new(words: &'a D, reporter: &'a mut R) -> SpellingVisitor<'a, D, R> {
        SpellingVisitor {
            words,
            reporter,
            resolver: Resolver::default(),
            overflow: OverflowPolicy::default(),
            strings_checked: 0,
            misspellings: 0,
        }
    }

    pub fn resolver(mut self, resolver: Resolver) -> SpellingVisitor<'a, D, R> {
        self.resolver = resolver;
        self
    }

    pub fn overflow(mut self, overflow: OverflowPolicy) -> SpellingVisitor<'a, D, R> {
        self.overflow = overflow;
        self
    }

    /// Check one operand, if it is (or leads to) a string literal.
    pub fn check_operand<N: Operand>(&mut self, operand: Option<&N>, location: &Location) {
        if let Some(bytes) = self.resolver.resolve(operand) {
            self.strings_checked += 1;
            self.misspellings +=
                words::check(bytes, location, self.words, &mut *self.reporter, self.overflow);
        }
    }

    /// Check every operand of a statement against its location.
    pub fn check_statement<S: Statement>(&mut self, stmt: &S) {
        let location = stmt.location();
        for i in 0..stmt.operand_count() {
            self.check_operand(stmt.operand(i), &location);
        }
    }

    /// Check the body of a function; declarations have nothing to check.
    pub fn check_function(&mut self, function: &Function) {
        let blocks = match function.blocks {
            Some(ref blocks) => blocks,
            None => return,
        };
        debug!("checking `{}`", function.name);
        for stmt in blocks.iter().flat_map(|bb| bb.statements.iter()) {
            self.check_statement(stmt);
        }
    }

    /// Spell-check a whole unit.
    pub fn check_unit(&mut self, unit: &Unit) {
        for function in unit.functions.iter() {
            self.check_function(function);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::ir::{BasicBlock, Node, Stmt};
    use crate::report::Diagnostic;

    fn dict() -> HashSet<String> {
        ["hello", "world", "the"].iter().map(|s| s.to_string()).collect()
    }

    fn stmt(line: u32, operands: Vec<Option<Node>>) -> Stmt {
        Stmt { location: Location::new(Some("t.c"), line, 1), operands }
    }

    #[test]
    fn statements_and_declarations() {
        let unit = Unit {
            functions: vec![
                Function { name: "ext".to_string(), blocks: None },
                Function {
                    name: "main".to_string(),
                    blocks: Some(vec![BasicBlock {
                        statements: vec![
                            stmt(1, vec![None, Some(Node::string("hello wrold"))]),
                            stmt(2, vec![Some(Node::expr("plus_expr", vec![]))]),
                            stmt(3, vec![Some(Node::addr(Node::var("m", Some(Node::string("teh world")))))]),
                        ],
                    }]),
                },
            ],
        };

        let d = dict();
        let mut out: Vec<Diagnostic> = vec![];
        let (checked, found) = {
            let mut v = SpellingVisitor::new(&d, &mut out);
            v.check_unit(&unit);
            (v.strings_checked, v.misspellings)
        };
        assert_eq!(checked, 2);
        assert_eq!(found, 2);
        assert_eq!(out, vec![
            Diagnostic { location: Location::new(Some("t.c"), 1, 1), word: "wrold".to_string() },
            Diagnostic { location: Location::new(Some("t.c"), 3, 1), word: "teh".to_string() },
        ]);
    }

    #[test]
    fn overflow_policy_is_passed_through() {
        let long = "x".repeat(40);
        let s = stmt(1, vec![Some(Node::string(&format!("{} zzz", long)))]);
        let d = dict();

        let mut out: Vec<Diagnostic> = vec![];
        SpellingVisitor::new(&d, &mut out).check_statement(&s);
        assert!(out.is_empty());

        SpellingVisitor::new(&d, &mut out).overflow(OverflowPolicy::SkipWord).check_statement(&s);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].word, "zzz");
    }
}
