//! Cypher Evaluation Engine
//!
//! This module provides the main CypherEngine struct which evaluates
//! expressions against a binding context.

use crate::context::BindingContext;
use crate::error::{EvalError, EvalResult};
use crate::graph::GraphModel;
use crate::operators::string::{self, RegexCache};
use crate::operators::{arithmetic, comparison, list, logical};
use crate::options::EvaluatorOptions;
use crate::registry::ProcedureRegistry;
use cypher_ast::{
    BinaryExpression, BinaryOp, Expression, FunctionInvocation, Literal, PropertyAccess,
    SliceExpression, UnaryExpression, UnaryOp,
};
use cypher_types::{CypherValue, Properties};
use log::debug;
use std::fmt;
use std::sync::Arc;

/// The main Cypher evaluation engine
///
/// The engine is immutable once built and can be shared between threads; all
/// per-row state lives in the [`BindingContext`].
pub struct CypherEngine {
    /// Function registry
    registry: ProcedureRegistry,
    /// Graph answering pattern expressions
    graph: Option<Arc<dyn GraphModel>>,
    options: EvaluatorOptions,
    regex_cache: RegexCache,
}

impl Default for CypherEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CypherEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CypherEngine")
            .field("functions", &self.registry.len())
            .field("graph", &self.graph.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CypherEngine {
    /// Create a new engine with the standard function library
    pub fn new() -> Self {
        Self::with_registry(ProcedureRegistry::with_standard_library())
    }

    /// Create an engine with a custom registry
    pub fn with_registry(registry: ProcedureRegistry) -> Self {
        let options = EvaluatorOptions::default();
        Self {
            registry,
            graph: None,
            regex_cache: RegexCache::new(options.regex_cache_capacity),
            options,
        }
    }

    /// Attach the graph used by pattern expressions
    pub fn with_graph(mut self, graph: Arc<dyn GraphModel>) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Replace the evaluator options
    pub fn with_options(mut self, options: EvaluatorOptions) -> Self {
        self.regex_cache = RegexCache::new(options.regex_cache_capacity);
        self.options = options;
        self
    }

    pub fn registry(&self) -> &ProcedureRegistry {
        &self.registry
    }

    /// Get a mutable reference to the registry
    pub fn registry_mut(&mut self) -> &mut ProcedureRegistry {
        &mut self.registry
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    pub(crate) fn graph(&self) -> Option<&Arc<dyn GraphModel>> {
        self.graph.as_ref()
    }

    /// Evaluate an expression against one row's bindings
    pub fn evaluate(&self, expr: &Expression, ctx: &BindingContext) -> EvalResult<CypherValue> {
        self.eval(expr, ctx, 0)
    }

    /// Main expression evaluation dispatcher
    ///
    /// Errors are annotated with the innermost expression that raised them.
    pub(crate) fn eval(
        &self,
        expr: &Expression,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        if depth > self.options.max_depth {
            return Err(EvalError::RecursionLimit);
        }
        let depth = depth + 1;

        let result = match expr {
            // === Atoms ===
            Expression::Literal(lit) => Ok(literal_value(lit)),
            Expression::Variable(name) => ctx.get(name).cloned(),
            Expression::Parameter(name) => ctx.parameter(name).cloned(),

            // === Access ===
            Expression::Property(access) => self.eval_property(access, ctx, depth),
            Expression::Index(e) => {
                let container = self.eval(&e.container, ctx, depth)?;
                let index = self.eval(&e.index, ctx, depth)?;
                list::index_value(&container, &index)
            }
            Expression::Slice(e) => self.eval_slice(e, ctx, depth),

            // === Operators ===
            Expression::Binary(e) => self.eval_binary(e, ctx, depth),
            Expression::Unary(e) => self.eval_unary(e, ctx, depth),
            Expression::Ands(operands) => self.eval_ands(operands, ctx, depth),
            Expression::Ors(operands) => self.eval_ors(operands, ctx, depth),

            // === Invocation ===
            Expression::FunctionCall(call) => self.eval_function(call, ctx, depth),
            Expression::CountStar => Err(EvalError::invocation(
                "count(*)",
                "only valid as an aggregation",
            )),

            // === Constructors ===
            Expression::List(items) => items
                .iter()
                .map(|item| self.eval(item, ctx, depth))
                .collect::<EvalResult<Vec<_>>>()
                .map(CypherValue::List),
            Expression::Map(entries) => {
                let mut map = Properties::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key.clone(), self.eval(value, ctx, depth)?);
                }
                Ok(CypherValue::Map(map))
            }
            Expression::MapProjection(projection) => {
                self.eval_map_projection(projection, ctx, depth)
            }

            // === Conditionals ===
            Expression::Case(e) => self.eval_case(e, ctx, depth),

            // === Scoped list operations ===
            Expression::ListComprehension(e) => self.eval_list_comprehension(e, ctx, depth),
            Expression::Reduce(e) => self.eval_reduce(e, ctx, depth),
            Expression::Quantified(e) => self.eval_quantified(e, ctx, depth),

            // === Graph ===
            Expression::Pattern(pattern) => self.eval_pattern(pattern, ctx, depth),
            Expression::PatternComprehension(_) => {
                Err(EvalError::unsupported("pattern comprehension"))
            }
            Expression::Path(step) => self.eval_path(step, ctx, depth),
        };

        result.map_err(|e| e.at(expr))
    }

    // =========================================================================
    // Access
    // =========================================================================

    fn eval_property(
        &self,
        access: &PropertyAccess,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let subject = self.eval(&access.subject, ctx, depth)?;
        if subject.is_null() {
            return Ok(CypherValue::Null);
        }
        if !subject.has_components() {
            return Err(EvalError::type_mismatch(
                "Map, Node, Relationship or temporal value",
                subject.type_name(),
            ));
        }
        Ok(subject.component(&access.key).unwrap_or(CypherValue::Null))
    }

    fn eval_slice(
        &self,
        expr: &SliceExpression,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let list_value = self.eval(&expr.list, ctx, depth)?;
        let from = expr
            .from
            .as_deref()
            .map(|e| self.eval(e, ctx, depth))
            .transpose()?;
        let to = expr
            .to
            .as_deref()
            .map(|e| self.eval(e, ctx, depth))
            .transpose()?;
        list::slice_value(&list_value, from.as_ref(), to.as_ref())
    }

    // =========================================================================
    // Operators
    // =========================================================================

    fn eval_binary(
        &self,
        expr: &BinaryExpression,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let left = self.eval(&expr.left, ctx, depth)?;
        let right = self.eval(&expr.right, ctx, depth)?;

        match expr.op {
            // Logical
            BinaryOp::And => logical::and(&left, &right),
            BinaryOp::Or => logical::or(&left, &right),
            BinaryOp::Xor => logical::xor(&left, &right),

            // Comparison; `<` and `<=` flip their operands
            BinaryOp::Equal => Ok(comparison::equal(&left, &right)),
            BinaryOp::NotEqual => Ok(comparison::not_equal(&left, &right)),
            BinaryOp::GreaterThan => Ok(comparison::greater(&left, &right)),
            BinaryOp::GreaterThanOrEqual => Ok(comparison::greater_or_equal(&left, &right)),
            BinaryOp::LessThan => Ok(comparison::greater(&right, &left)),
            BinaryOp::LessThanOrEqual => Ok(comparison::greater_or_equal(&right, &left)),

            // String
            BinaryOp::StartsWith => string::starts_with(&left, &right),
            BinaryOp::EndsWith => string::ends_with(&left, &right),
            BinaryOp::Contains => string::contains(&left, &right),
            BinaryOp::RegexMatch => string::regex_match(&self.regex_cache, &left, &right),

            // List
            BinaryOp::In => list::in_list(&left, &right),

            // Arithmetic
            BinaryOp::Add => arithmetic::add(&left, &right),
            BinaryOp::Subtract => arithmetic::subtract(&left, &right),
            BinaryOp::Multiply => arithmetic::multiply(&left, &right),
            BinaryOp::Divide => arithmetic::divide(&left, &right),
            BinaryOp::Modulo => arithmetic::modulo(&left, &right),
            BinaryOp::Power => arithmetic::power(&left, &right),
        }
    }

    fn eval_unary(
        &self,
        expr: &UnaryExpression,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let operand = self.eval(&expr.operand, ctx, depth)?;
        match expr.op {
            UnaryOp::Not => logical::not(&operand),
            UnaryOp::Negate => arithmetic::negate(&operand),
            UnaryOp::IsNull => Ok(CypherValue::Boolean(operand.is_null())),
            UnaryOp::IsNotNull => Ok(CypherValue::Boolean(!operand.is_null())),
        }
    }

    /// Evaluate the planner's n-ary conjunction, stopping at the first falsy operand
    fn eval_ands(
        &self,
        operands: &[Expression],
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        for operand in operands {
            if !logical::is_truthy(&self.eval(operand, ctx, depth)?)? {
                return Ok(CypherValue::Boolean(false));
            }
        }
        Ok(CypherValue::Boolean(true))
    }

    /// Evaluate the planner's n-ary disjunction, stopping at the first truthy operand
    fn eval_ors(
        &self,
        operands: &[Expression],
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        for operand in operands {
            if logical::is_truthy(&self.eval(operand, ctx, depth)?)? {
                return Ok(CypherValue::Boolean(true));
            }
        }
        Ok(CypherValue::Boolean(false))
    }

    // =========================================================================
    // Function invocation
    // =========================================================================

    /// Invoke a registered function for a single row.
    ///
    /// Aggregating functions cannot fold a single row; their evaluated
    /// arguments are packaged into a list for the caller to collect.
    fn eval_function(
        &self,
        call: &FunctionInvocation,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let definition = self
            .registry
            .get(&call.name)
            .ok_or_else(|| EvalError::undefined_function(&call.name))?;

        if !definition.accepts_arity(call.args.len()) {
            return Err(EvalError::invocation(
                &call.name,
                format!(
                    "expected {}, got {}",
                    definition.arity_description(),
                    call.args.len()
                ),
            ));
        }

        let args = call
            .args
            .iter()
            .map(|arg| self.eval(arg, ctx, depth))
            .collect::<EvalResult<Vec<_>>>()?;

        if definition.aggregating {
            return Ok(CypherValue::List(args));
        }

        debug!("invoking {} with {} argument(s)", definition.name, args.len());
        definition.invoke(&args)
    }
}

fn literal_value(lit: &Literal) -> CypherValue {
    match lit {
        Literal::Null => CypherValue::Null,
        Literal::Boolean(b) => CypherValue::Boolean(*b),
        Literal::Integer(i) => CypherValue::Integer(*i),
        Literal::Float(f) => CypherValue::Float(*f),
        Literal::String(s) => CypherValue::String(s.clone()),
    }
}
