//! Cypher-like rendering of expressions, used in error messages and logs

use crate::{
    Direction, Expression, MapProjectionItem, NodePattern, PathStep, RelationshipPattern,
    RelationshipsPattern, UnaryOp,
};
use std::fmt::{self, Display, Formatter, Write};

fn write_joined<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_properties(f: &mut Formatter<'_>, properties: &[(String, Expression)]) -> fmt::Result {
    if properties.is_empty() {
        return Ok(());
    }
    f.write_str(" {")?;
    for (i, (key, value)) in properties.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}: {value}")?;
    }
    f.write_char('}')
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Variable(name) => f.write_str(name),
            Self::Parameter(name) => write!(f, "${name}"),
            Self::Property(p) => write!(f, "{}.{}", p.subject, p.key),
            Self::Index(e) => write!(f, "{}[{}]", e.container, e.index),
            Self::Slice(e) => {
                write!(f, "{}[", e.list)?;
                if let Some(from) = &e.from {
                    write!(f, "{from}")?;
                }
                f.write_str("..")?;
                if let Some(to) = &e.to {
                    write!(f, "{to}")?;
                }
                f.write_char(']')
            }
            Self::Binary(e) => write!(f, "({} {} {})", e.left, e.op, e.right),
            Self::Unary(e) => match e.op {
                UnaryOp::Not => write!(f, "NOT {}", e.operand),
                UnaryOp::Negate => write!(f, "-{}", e.operand),
                UnaryOp::IsNull => write!(f, "{} IS NULL", e.operand),
                UnaryOp::IsNotNull => write!(f, "{} IS NOT NULL", e.operand),
            },
            Self::Ands(operands) => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" AND ")?;
                    }
                    write!(f, "{operand}")?;
                }
                Ok(())
            }
            Self::Ors(operands) => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" OR ")?;
                    }
                    write!(f, "{operand}")?;
                }
                Ok(())
            }
            Self::FunctionCall(call) => {
                write!(f, "{}(", call.name)?;
                if call.distinct {
                    f.write_str("DISTINCT ")?;
                }
                write_joined(f, &call.args)?;
                f.write_char(')')
            }
            Self::CountStar => f.write_str("count(*)"),
            Self::List(items) => {
                f.write_char('[')?;
                write_joined(f, items)?;
                f.write_char(']')
            }
            Self::Map(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_char('}')
            }
            Self::MapProjection(p) => {
                write!(f, "{} {{", p.variable)?;
                for (i, item) in p.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match item {
                        MapProjectionItem::Property(key) => write!(f, ".{key}")?,
                        MapProjectionItem::Literal { key, value } => write!(f, "{key}: {value}")?,
                        MapProjectionItem::Variable(name) => f.write_str(name)?,
                        MapProjectionItem::AllProperties => f.write_str(".*")?,
                    }
                }
                f.write_char('}')
            }
            Self::Case(c) => {
                f.write_str("CASE")?;
                if let Some(subject) = &c.subject {
                    write!(f, " {subject}")?;
                }
                for alt in &c.alternatives {
                    write!(f, " WHEN {} THEN {}", alt.when, alt.then)?;
                }
                if let Some(default) = &c.default {
                    write!(f, " ELSE {default}")?;
                }
                f.write_str(" END")
            }
            Self::ListComprehension(c) => {
                write!(f, "[{} IN {}", c.variable, c.list)?;
                if let Some(pred) = &c.predicate {
                    write!(f, " WHERE {pred}")?;
                }
                if let Some(proj) = &c.projection {
                    write!(f, " | {proj}")?;
                }
                f.write_char(']')
            }
            Self::Reduce(r) => write!(
                f,
                "reduce({} = {}, {} IN {} | {})",
                r.accumulator, r.init, r.variable, r.list, r.expression
            ),
            Self::Quantified(q) => {
                write!(f, "{}({} IN {}", q.quantifier, q.variable, q.list)?;
                if let Some(pred) = &q.predicate {
                    write!(f, " WHERE {pred}")?;
                }
                f.write_char(')')
            }
            Self::Pattern(p) => write!(f, "{p}"),
            Self::PatternComprehension(c) => {
                f.write_char('[')?;
                if let Some(var) = &c.path_variable {
                    write!(f, "{var} = ")?;
                }
                write!(f, "{}", c.pattern)?;
                if let Some(pred) = &c.predicate {
                    write!(f, " WHERE {pred}")?;
                }
                write!(f, " | {}]", c.projection)
            }
            Self::Path(step) => write!(f, "{step}"),
        }
    }
}

impl Display for NodePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        if let Some(var) = &self.variable {
            f.write_str(var)?;
        }
        for label in &self.labels {
            write!(f, ":{label}")?;
        }
        write_properties(f, &self.properties)?;
        f.write_char(')')
    }
}

impl Display for RelationshipPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (left, right) = match self.direction {
            Direction::Outgoing => ("-", "->"),
            Direction::Incoming => ("<-", "-"),
            Direction::Both => ("-", "-"),
        };
        write!(f, "{left}[")?;
        if let Some(var) = &self.variable {
            f.write_str(var)?;
        }
        for (i, rel_type) in self.types.iter().enumerate() {
            f.write_char(if i == 0 { ':' } else { '|' })?;
            f.write_str(rel_type)?;
        }
        if let Some(length) = &self.length {
            f.write_char('*')?;
            if let Some(min) = length.min {
                write!(f, "{min}")?;
            }
            f.write_str("..")?;
            if let Some(max) = length.max {
                write!(f, "{max}")?;
            }
        }
        write_properties(f, &self.properties)?;
        write!(f, "]{right}")
    }
}

impl Display for RelationshipsPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        for (rel, node) in &self.chain {
            write!(f, "{rel}{node}")?;
        }
        Ok(())
    }
}

impl Display for PathStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::End => Ok(()),
            Self::Node { node, next } => write!(f, "({node}){next}"),
            Self::Relationship {
                relationship,
                node,
                next,
            } => {
                write!(f, "-[{relationship}]-")?;
                match node {
                    Some(node) => write!(f, "({node})")?,
                    None => f.write_str("()")?,
                }
                write!(f, "{next}")
            }
            Self::MultiHop { relationship, next } => write!(f, "-[{relationship}*]-{next}"),
        }
    }
}
