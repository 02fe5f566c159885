//! Predicate trees produced by the criteria compiler
//!
//! A predicate is an engine-agnostic boolean condition over one record. Leaves
//! compare a [`FieldPath`] with a [`LiteralValue`]; the only combinator the
//! compiler emits is conjunction. The `Display` impl renders a deterministic
//! SQL-like query text that is handy for logging and assertions.

mod literal;

use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;

pub use literal::LiteralValue;

/// Location of a field on a record: either a direct field or one relationship hop
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    relation: Option<String>,
    field: String,
}

impl FieldPath {
    /// A field stored directly on the record
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            relation: None,
            field: name.into(),
        }
    }

    /// A field reached through exactly one relationship
    #[must_use]
    pub fn join(relation: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            relation: Some(relation.into()),
            field: field.into(),
        }
    }

    /// The relationship traversed, if any
    #[must_use]
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    /// The name of the target field
    #[must_use]
    pub fn name(&self) -> &str {
        &self.field
    }

    /// The top-level column a reader must load to resolve this path
    #[must_use]
    pub fn root(&self) -> &str {
        self.relation.as_deref().unwrap_or(&self.field)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.relation {
            Some(relation) => write!(f, "{relation}.{}", self.field),
            None => f.write_str(&self.field),
        }
    }
}

/// Represents a predicate over one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Field equals a literal value
    Eq(FieldPath, LiteralValue),

    /// Field does not equal a literal value
    NotEq(FieldPath, LiteralValue),

    /// Field is greater than a literal value
    Gt(FieldPath, LiteralValue),

    /// Field is greater than or equal to a literal value
    GtEq(FieldPath, LiteralValue),

    /// Field is less than a literal value
    Lt(FieldPath, LiteralValue),

    /// Field is less than or equal to a literal value
    LtEq(FieldPath, LiteralValue),

    /// Field is one of a set of values
    In(FieldPath, Vec<LiteralValue>),

    /// Field is none of a set of values
    NotIn(FieldPath, Vec<LiteralValue>),

    /// Field is null
    IsNull(FieldPath),

    /// Field is not null
    IsNotNull(FieldPath),

    /// Text form of the field matches a SQL `LIKE` pattern (`%` and `_` wildcards)
    Like(FieldPath, String),

    /// Lower-cased text form of the field contains the (lower-case) needle
    ContainsCi(FieldPath, String),

    /// Logical NOT of a predicate
    Not(Box<Expr>),

    /// Logical AND of predicates
    And(Vec<Expr>),

    /// Matches every record
    AlwaysTrue,
}

impl Expr {
    /// Combine two predicates with AND.
    ///
    /// `AlwaysTrue` is the neutral element and nested conjunctions are
    /// flattened, so `(a AND b) AND c` becomes `AND[a, b, c]`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::AlwaysTrue, expr) | (expr, Self::AlwaysTrue) => expr,
            (Self::And(mut a), Self::And(mut b)) => {
                a.append(&mut b);
                Self::And(a)
            }
            (Self::And(mut a), b) => {
                a.push(b);
                Self::And(a)
            }
            (a, Self::And(b)) => {
                let mut list = Vec::with_capacity(b.len() + 1);
                list.push(a);
                list.extend(b);
                Self::And(list)
            }
            (a, b) => Self::And(vec![a, b]),
        }
    }

    /// Conjunction of every predicate in `exprs`; `AlwaysTrue` when empty
    #[must_use]
    pub fn all<I>(exprs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        exprs.into_iter().fold(Self::AlwaysTrue, Self::and)
    }

    /// Negate this predicate.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Whether this predicate trivially matches every record
    #[must_use]
    pub fn is_always_true(&self) -> bool {
        match self {
            Self::AlwaysTrue => true,
            Self::And(exprs) => exprs.iter().all(Self::is_always_true),
            _ => false,
        }
    }

    /// Returns every field path referenced by this predicate
    #[must_use]
    pub fn required_fields(&self) -> HashSet<FieldPath> {
        let mut fields = HashSet::new();
        self.collect_required_fields(&mut fields);
        fields
    }

    /// Returns the top-level columns needed to evaluate this predicate
    #[must_use]
    pub fn required_columns(&self) -> HashSet<String> {
        self.required_fields()
            .iter()
            .map(|path| path.root().to_string())
            .collect()
    }

    fn collect_required_fields(&self, fields: &mut HashSet<FieldPath>) {
        match self {
            Self::Eq(path, _)
            | Self::NotEq(path, _)
            | Self::Gt(path, _)
            | Self::GtEq(path, _)
            | Self::Lt(path, _)
            | Self::LtEq(path, _)
            | Self::In(path, _)
            | Self::NotIn(path, _)
            | Self::IsNull(path)
            | Self::IsNotNull(path)
            | Self::Like(path, _)
            | Self::ContainsCi(path, _) => {
                fields.insert(path.clone());
            }
            Self::Not(expr) => expr.collect_required_fields(fields),
            Self::And(exprs) => {
                for expr in exprs {
                    expr.collect_required_fields(fields);
                }
            }
            Self::AlwaysTrue => {}
        }
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::AlwaysTrue
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq(path, value) => write!(f, "{path} = {value}"),
            Self::NotEq(path, value) => write!(f, "{path} <> {value}"),
            Self::Gt(path, value) => write!(f, "{path} > {value}"),
            Self::GtEq(path, value) => write!(f, "{path} >= {value}"),
            Self::Lt(path, value) => write!(f, "{path} < {value}"),
            Self::LtEq(path, value) => write!(f, "{path} <= {value}"),
            Self::In(path, values) => write!(f, "{path} IN ({})", values.iter().join(", ")),
            Self::NotIn(path, values) => {
                write!(f, "{path} NOT IN ({})", values.iter().join(", "))
            }
            Self::IsNull(path) => write!(f, "{path} IS NULL"),
            Self::IsNotNull(path) => write!(f, "{path} IS NOT NULL"),
            Self::Like(path, pattern) => write!(f, "{path} LIKE {}", quote(pattern)),
            Self::ContainsCi(path, needle) => {
                write!(f, "LOWER({path}) LIKE {}", quote(&format!("%{needle}%")))
            }
            Self::Not(expr) => write!(f, "NOT ({expr})"),
            Self::And(exprs) if exprs.is_empty() => f.write_str("TRUE"),
            Self::And(exprs) => {
                let mut rendered = exprs.iter().map(|expr| match expr {
                    Self::And(_) => format!("({expr})"),
                    _ => expr.to_string(),
                });
                f.write_str(&rendered.join(" AND "))
            }
            Self::AlwaysTrue => f.write_str("TRUE"),
        }
    }
}
