//! Arena-backed expression tree.
//!
//! Expressions are interned into a `Context` and referenced by copyable
//! `ExprId` handles, so tree nodes can be shared without reference counting
//! and traversal code stays borrow-checker friendly.

use num_bigint::BigInt;
use num_rational::BigRational;

/// Handle to an expression node stored in a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(u32);

/// Named mathematical constants recognized by the answer grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

/// An expression node. Numeric literals are exact rationals; decimals are
/// converted at parse time, so "0.125" and "1/8" are the same `Number`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(BigRational),
    Constant(Constant),
    Variable(String),
    Add(ExprId, ExprId),
    Sub(ExprId, ExprId),
    Mul(ExprId, ExprId),
    Div(ExprId, ExprId),
    Pow(ExprId, ExprId),
    Neg(ExprId),
    Function(String, Vec<ExprId>),
}

/// Owning arena for expression nodes.
#[derive(Debug, Clone, Default)]
pub struct Context {
    nodes: Vec<Expr>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a node and return its handle.
    ///
    /// `Neg(Number(n))` is canonicalized to `Number(-n)` so that sign
    /// handling never has to look through a negation of a literal.
    pub fn add(&mut self, expr: Expr) -> ExprId {
        let expr = match expr {
            Expr::Neg(inner) => {
                if let Expr::Number(n) = self.get(inner) {
                    Expr::Number(-n.clone())
                } else {
                    Expr::Neg(inner)
                }
            }
            other => other,
        };
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(expr);
        id
    }

    /// Resolve a handle. Handles are only minted by `add`, so indexing
    /// cannot fail for ids from this context.
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.nodes[id.0 as usize]
    }

    /// Intern an integer literal.
    pub fn num(&mut self, n: i64) -> ExprId {
        self.add(Expr::Number(BigRational::from_integer(BigInt::from(n))))
    }

    /// Intern an exact rational literal.
    pub fn rat(&mut self, q: BigRational) -> ExprId {
        self.add(Expr::Number(q))
    }

    /// Intern a variable by name.
    pub fn var(&mut self, name: &str) -> ExprId {
        self.add(Expr::Variable(name.to_string()))
    }

    /// Intern a function call.
    pub fn call(&mut self, name: &str, args: Vec<ExprId>) -> ExprId {
        self.add(Expr::Function(name.to_string(), args))
    }

    /// Number of interned nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
