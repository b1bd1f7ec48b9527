//! Dynamic WHERE-clause builder with positional parameter tracking.
//!
//! Predicates and their bind values are appended atomically through
//! [`SqlFilter::push`], which substitutes the running placeholder index into
//! the predicate text. Callers never track `$n` indices by hand, so adding or
//! reordering filters cannot drift the bindings.

use lumen_core::types::Timestamp;

/// Typed bind value for dynamically-built queries.
#[derive(Debug, Clone)]
pub enum BindValue {
    BigInt(i64),
    Text(String),
    Bool(bool),
    Timestamp(Timestamp),
}

/// An ordered list of SQL predicates plus their bind values.
///
/// Predicates use `$?` as the placeholder marker; every occurrence of `$?`
/// within one predicate refers to the same bound value, so a predicate like
/// `(title ILIKE $? OR description ILIKE $?)` binds its pattern once.
#[derive(Debug, Default)]
pub struct SqlFilter {
    conditions: Vec<String>,
    binds: Vec<BindValue>,
}

impl SqlFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate with no bind value (e.g. `is_public = true`).
    pub fn push_static(&mut self, condition: &str) {
        self.conditions.push(condition.to_string());
    }

    /// Append a predicate and its bind value atomically.
    ///
    /// Every `$?` in `condition` is replaced with the next placeholder index.
    pub fn push(&mut self, condition: &str, value: BindValue) {
        let idx = self.binds.len() + 1;
        self.conditions
            .push(condition.replace("$?", &format!("${idx}")));
        self.binds.push(value);
    }

    /// The `WHERE ...` clause, or an empty string when no predicates exist.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// The placeholder index the next bound value would receive.
    ///
    /// Use this for trailing LIMIT/OFFSET parameters bound after the filter.
    pub fn next_index(&self) -> usize {
        self.binds.len() + 1
    }

    /// Bind all collected values to a `query_as` in insertion order.
    pub fn bind_to<'q, O>(
        &'q self,
        mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
        for val in &self.binds {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
                BindValue::Bool(v) => q = q.bind(*v),
                BindValue::Timestamp(v) => q = q.bind(*v),
            }
        }
        q
    }

    /// Bind all collected values to a `query_scalar` in insertion order.
    pub fn bind_to_scalar<'q, O>(
        &'q self,
        mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    ) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
        for val in &self.binds {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
                BindValue::Bool(v) => q = q.bind(*v),
                BindValue::Timestamp(v) => q = q.bind(*v),
            }
        }
        q
    }
}
