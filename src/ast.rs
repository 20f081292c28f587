use crate::number::Number;
use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Power,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Scalar(Span, Number),
    Identifier(Span, String),
    UnaryOperator {
        op: UnaryOperator,
        expr: Box<Expression>,
        span_op: Span,
    },
    BinaryOperator {
        op: BinaryOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
        /// `None` for implicit multiplication, where there is no operator
        /// token in the source.
        span_op: Option<Span>,
    },
    FunctionCall {
        span: Span,
        name: String,
        args: Vec<Expression>,
    },
    Convert {
        span_op: Span,
        value: Box<Expression>,
        target: Box<Expression>,
    },
    MultiConvert {
        span_op: Span,
        value: Box<Expression>,
        targets: Vec<Expression>,
    },
}

impl Expression {
    pub fn full_span(&self) -> Span {
        match self {
            Expression::Scalar(span, _) => *span,
            Expression::Identifier(span, _) => *span,
            Expression::UnaryOperator { expr, span_op, .. } => span_op.extend(&expr.full_span()),
            Expression::BinaryOperator {
                lhs, rhs, span_op, ..
            } => {
                let mut span = lhs.full_span().extend(&rhs.full_span());
                if let Some(span_op) = span_op {
                    span = span.extend(span_op);
                }
                span
            }
            Expression::FunctionCall { span, .. } => *span,
            Expression::Convert {
                span_op,
                value,
                target,
            } => value
                .full_span()
                .extend(span_op)
                .extend(&target.full_span()),
            Expression::MultiConvert {
                span_op,
                value,
                targets,
            } => {
                let mut span = value.full_span().extend(span_op);
                for target in targets {
                    span = span.extend(&target.full_span());
                }
                span
            }
        }
    }
}

#[cfg(test)]
impl Expression {
    /// Strip all span information, for tests that only care about structure.
    pub fn erase_spans(self) -> Expression {
        match self {
            Expression::Scalar(_, n) => Expression::Scalar(Span::dummy(), n),
            Expression::Identifier(_, name) => Expression::Identifier(Span::dummy(), name),
            Expression::UnaryOperator { op, expr, .. } => Expression::UnaryOperator {
                op,
                expr: Box::new(expr.erase_spans()),
                span_op: Span::dummy(),
            },
            Expression::BinaryOperator { op, lhs, rhs, .. } => Expression::BinaryOperator {
                op,
                lhs: Box::new(lhs.erase_spans()),
                rhs: Box::new(rhs.erase_spans()),
                span_op: None,
            },
            Expression::FunctionCall { name, args, .. } => Expression::FunctionCall {
                span: Span::dummy(),
                name,
                args: args.into_iter().map(|a| a.erase_spans()).collect(),
            },
            Expression::Convert { value, target, .. } => Expression::Convert {
                span_op: Span::dummy(),
                value: Box::new(value.erase_spans()),
                target: Box::new(target.erase_spans()),
            },
            Expression::MultiConvert { value, targets, .. } => Expression::MultiConvert {
                span_op: Span::dummy(),
                value: Box::new(value.erase_spans()),
                targets: targets.into_iter().map(|t| t.erase_spans()).collect(),
            },
        }
    }
}

#[cfg(test)]
#[macro_export]
macro_rules! scalar {
    ( $num:expr ) => {{
        $crate::ast::Expression::Scalar(
            $crate::span::Span::dummy(),
            $crate::number::Number::from_f64($num),
        )
    }};
}

#[cfg(test)]
#[macro_export]
macro_rules! identifier {
    ( $name:expr ) => {{
        $crate::ast::Expression::Identifier($crate::span::Span::dummy(), $name.into())
    }};
}

#[cfg(test)]
#[macro_export]
macro_rules! negate {
    ( $expr:expr ) => {{
        $crate::ast::Expression::UnaryOperator {
            op: $crate::ast::UnaryOperator::Negate,
            expr: Box::new($expr),
            span_op: $crate::span::Span::dummy(),
        }
    }};
}

#[cfg(test)]
#[macro_export]
macro_rules! binop {
    ( $lhs:expr, $op:ident, $rhs:expr ) => {{
        $crate::ast::Expression::BinaryOperator {
            op: $crate::ast::BinaryOperator::$op,
            lhs: Box::new($lhs),
            rhs: Box::new($rhs),
            span_op: None,
        }
    }};
}
