//! Standard function library
//!
//! Registered by [`ProcedureRegistry::with_standard_library`]. Scalar
//! functions return null for a null argument unless noted; aggregates
//! receive the collected column as their first argument.

mod aggregate;
mod scalar;

use crate::error::{EvalError, EvalResult};
use crate::registry::{FunctionDefinition, ProcedureFn, ProcedureRegistry};
use cypher_types::{CypherType, CypherValue};
use std::sync::Arc;

/// The only argument of a single-argument function
fn single<'a>(name: &str, args: &'a [CypherValue]) -> EvalResult<&'a CypherValue> {
    match args {
        [value] => Ok(value),
        _ => Err(EvalError::invocation(
            name,
            format!("expected exactly 1 argument(s), got {}", args.len()),
        )),
    }
}

fn define(
    name: &str,
    return_type: CypherType,
    implementation: fn(&[CypherValue]) -> EvalResult<CypherValue>,
) -> FunctionDefinition {
    let implementation: ProcedureFn = Arc::new(implementation);
    FunctionDefinition::new(name, return_type, implementation)
}

/// Register every standard function on `registry`
pub fn register_standard_library(registry: &mut ProcedureRegistry) {
    let any_list = || CypherType::list(CypherType::Any);

    // === Lists ===
    registry.register(define("size", CypherType::Integer, scalar::size));
    registry.register(define("length", CypherType::Integer, scalar::length));
    registry.register(define("head", CypherType::Any, scalar::head));
    registry.register(define("last", CypherType::Any, scalar::last));
    registry.register(define("tail", any_list(), scalar::tail));
    registry.register(define("reverse", CypherType::Any, scalar::reverse));
    registry.register(
        define("range", CypherType::list(CypherType::Integer), scalar::range)
            .with_arity(2, Some(3)),
    );

    // === Graph entities ===
    registry.register(define("keys", CypherType::list(CypherType::String), scalar::keys));
    registry.register(define("labels", CypherType::list(CypherType::String), scalar::labels));
    registry.register(define("type", CypherType::String, scalar::rel_type));
    registry.register(define("id", CypherType::Integer, scalar::id));
    registry.register(define("properties", CypherType::Map, scalar::properties));
    registry.register(define("nodes", CypherType::list(CypherType::Node), scalar::nodes));
    registry.register(define(
        "relationships",
        CypherType::list(CypherType::Relationship),
        scalar::relationships,
    ));

    // === Null handling ===
    registry.register(define("coalesce", CypherType::Any, scalar::coalesce).with_arity(1, None));

    // === Strings and conversion ===
    registry.register(define("toUpper", CypherType::String, scalar::to_upper));
    registry.register(define("toLower", CypherType::String, scalar::to_lower));
    registry.register(define("trim", CypherType::String, scalar::trim));
    registry.register(define("toString", CypherType::String, scalar::to_string));
    registry.register(define("toInteger", CypherType::Integer, scalar::to_integer));
    registry.register(define("toFloat", CypherType::Float, scalar::to_float));

    // === Math ===
    registry.register(define("abs", CypherType::Number, scalar::abs));
    registry.register(define("sqrt", CypherType::Float, scalar::sqrt));

    // === Aggregates ===
    registry.register(define("count", CypherType::Integer, aggregate::count).aggregating());
    registry.register(define("sum", CypherType::Number, aggregate::sum).aggregating());
    registry.register(define("avg", CypherType::Float, aggregate::avg).aggregating());
    registry.register(define("min", CypherType::Any, aggregate::min).aggregating());
    registry.register(define("max", CypherType::Any, aggregate::max).aggregating());
    registry.register(define("collect", any_list(), aggregate::collect).aggregating());
}
