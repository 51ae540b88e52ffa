//! Expression AST nodes
//!
//! The expression set is closed: every consumer matches it exhaustively, so a
//! new variant is a compile error everywhere it is not yet handled.

use crate::{
    BinaryOp, BoxExpr, Literal, OptBoxExpr, PathStep, PatternComprehension, Quantifier,
    RelationshipsPattern, UnaryOp,
};
use serde::{Deserialize, Serialize};

/// All Cypher expression kinds understood by the evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    // === Atoms ===
    /// Literal constant
    Literal(Literal),
    /// Variable reference
    Variable(String),
    /// `$name` parameter reference
    Parameter(String),

    // === Access ===
    /// `expr.key`
    Property(PropertyAccess),
    /// `expr[index]`
    Index(IndexExpression),
    /// `expr[from..to]`
    Slice(SliceExpression),

    // === Operators ===
    /// Binary operation
    Binary(BinaryExpression),
    /// Unary operation
    Unary(UnaryExpression),
    /// N-ary conjunction produced by the planner
    Ands(Vec<Expression>),
    /// N-ary disjunction produced by the planner
    Ors(Vec<Expression>),

    // === Invocation ===
    /// Function or procedure call
    FunctionCall(FunctionInvocation),
    /// `count(*)`
    CountStar,

    // === Constructors ===
    /// `[a, b, c]`
    List(Vec<Expression>),
    /// `{key: value, ...}`
    Map(Vec<(String, Expression)>),
    /// `var {.key, alias: expr, .*}`
    MapProjection(MapProjection),

    // === Conditionals ===
    /// `CASE ... END`
    Case(CaseExpression),

    // === Scoped list operations ===
    /// `[x IN list WHERE pred | projection]`
    ListComprehension(ListComprehension),
    /// `reduce(acc = init, x IN list | expr)`
    Reduce(ReduceExpression),
    /// `all/any/none/single(x IN list WHERE pred)`
    Quantified(QuantifiedExpression),

    // === Graph ===
    /// Pattern used as an expression; evaluates to a list of paths
    Pattern(RelationshipsPattern),
    /// `[(a)-->(b) | projection]`
    PatternComprehension(Box<PatternComprehension>),
    /// Path rebuilt from a step chain
    Path(PathStep),
}

/// Property access: `map.key`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAccess {
    pub subject: BoxExpr,
    pub key: String,
}

/// Container index: `container[index]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexExpression {
    pub container: BoxExpr,
    pub index: BoxExpr,
}

/// List slice: `list[from..to]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceExpression {
    pub list: BoxExpr,
    pub from: OptBoxExpr,
    pub to: OptBoxExpr,
}

/// Binary operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub op: BinaryOp,
    pub left: BoxExpr,
    pub right: BoxExpr,
}

/// Unary operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpression {
    pub op: UnaryOp,
    pub operand: BoxExpr,
}

/// Function invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInvocation {
    /// Function name as written; resolution is case-insensitive
    pub name: String,
    pub args: Vec<Expression>,
    /// `f(DISTINCT x)`
    pub distinct: bool,
}

/// One `WHEN ... THEN ...` branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseAlternative {
    pub when: Expression,
    pub then: Expression,
}

/// `CASE [subject] WHEN ... THEN ... [ELSE default] END`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpression {
    pub subject: OptBoxExpr,
    pub alternatives: Vec<CaseAlternative>,
    pub default: OptBoxExpr,
}

/// `[variable IN list WHERE predicate | projection]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListComprehension {
    pub variable: String,
    pub list: BoxExpr,
    pub predicate: OptBoxExpr,
    pub projection: OptBoxExpr,
}

/// `reduce(accumulator = init, variable IN list | expression)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReduceExpression {
    pub accumulator: String,
    pub init: BoxExpr,
    pub variable: String,
    pub list: BoxExpr,
    pub expression: BoxExpr,
}

/// `quantifier(variable IN list WHERE predicate)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantifiedExpression {
    pub quantifier: Quantifier,
    pub variable: String,
    pub list: BoxExpr,
    pub predicate: OptBoxExpr,
}

/// Entry of a map projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapProjectionItem {
    /// `.key`
    Property(String),
    /// `key: expr`
    Literal { key: String, value: Expression },
    /// `other` (adds `other: <value of other>`)
    Variable(String),
    /// `.*`
    AllProperties,
}

/// `variable {items}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapProjection {
    pub variable: String,
    pub items: Vec<MapProjectionItem>,
}

// ============================================================================
// Construction helpers
// ============================================================================

impl Expression {
    /// `null`
    pub fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Literal from anything convertible
    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::Literal(value.into())
    }

    /// Variable reference
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Parameter reference
    pub fn param(name: impl Into<String>) -> Self {
        Self::Parameter(name.into())
    }

    /// Binary operation
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Self::Binary(BinaryExpression {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Unary operation
    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Self::Unary(UnaryExpression {
            op,
            operand: Box::new(operand),
        })
    }

    /// `self.key`
    pub fn property(self, key: impl Into<String>) -> Self {
        Self::Property(PropertyAccess {
            subject: Box::new(self),
            key: key.into(),
        })
    }

    /// `self[index]`
    pub fn index(self, index: Expression) -> Self {
        Self::Index(IndexExpression {
            container: Box::new(self),
            index: Box::new(index),
        })
    }

    /// `self[from..to]`
    pub fn slice(self, from: Option<Expression>, to: Option<Expression>) -> Self {
        Self::Slice(SliceExpression {
            list: Box::new(self),
            from: from.map(Box::new),
            to: to.map(Box::new),
        })
    }

    /// Non-distinct function call
    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self::FunctionCall(FunctionInvocation {
            name: name.into(),
            args,
            distinct: false,
        })
    }

    /// `name(DISTINCT args...)`
    pub fn call_distinct(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self::FunctionCall(FunctionInvocation {
            name: name.into(),
            args,
            distinct: true,
        })
    }

    /// Short name of the expression kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "Literal",
            Self::Variable(_) => "Variable",
            Self::Parameter(_) => "Parameter",
            Self::Property(_) => "Property",
            Self::Index(_) => "Index",
            Self::Slice(_) => "Slice",
            Self::Binary(_) => "Binary",
            Self::Unary(_) => "Unary",
            Self::Ands(_) => "Ands",
            Self::Ors(_) => "Ors",
            Self::FunctionCall(_) => "FunctionCall",
            Self::CountStar => "CountStar",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::MapProjection(_) => "MapProjection",
            Self::Case(_) => "Case",
            Self::ListComprehension(_) => "ListComprehension",
            Self::Reduce(_) => "Reduce",
            Self::Quantified(_) => "Quantified",
            Self::Pattern(_) => "Pattern",
            Self::PatternComprehension(_) => "PatternComprehension",
            Self::Path(_) => "Path",
        }
    }
}

impl From<Literal> for Expression {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}
