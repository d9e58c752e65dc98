//! Search query construction.
//!
//! A [`SearchQuery`] turns its filters into an ordered list of [`Predicate`]s.
//! The count statement and the page statement are both rendered from that one
//! list, so they always constrain the same rows.

use sqlx::{QueryBuilder, Sqlite};

const COUNT_SELECT: &str = "SELECT COUNT(id) FROM messages";
const PAGE_SELECT: &str = "SELECT id, value, ip_address, date_created FROM messages";

/// A single `<column> LIKE <pattern>` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: &'static str,
    pub pattern: String,
}

/// Filtered, paginated search over `messages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub offset: i64,
    pub limit: i64,
    /// Substring the message value must contain; empty means unconstrained.
    pub message: String,
    /// Prefix the textual IP address must start with; empty means unconstrained.
    pub ip: String,
}

impl SearchQuery {
    pub fn new(offset: i64, limit: i64, message: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            offset,
            limit,
            message: message.into(),
            ip: ip.into(),
        }
    }

    /// Conditions in the order they are AND-ed together.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::with_capacity(2);
        if !self.message.is_empty() {
            predicates.push(Predicate {
                column: "value",
                pattern: format!("%{}%", self.message),
            });
        }
        if !self.ip.is_empty() {
            predicates.push(Predicate {
                column: "CAST(ip_address AS TEXT)",
                pattern: format!("{}%", self.ip),
            });
        }
        predicates
    }

    /// `COUNT` over every matching row, ignoring offset and limit.
    pub fn count_query(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(COUNT_SELECT);
        push_predicates(&mut qb, &self.predicates());
        qb
    }

    /// The requested slice of matching rows, in natural row order.
    pub fn page_query(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(PAGE_SELECT);
        push_predicates(&mut qb, &self.predicates());
        qb.push(" LIMIT ").push_bind(self.limit);
        qb.push(" OFFSET ").push_bind(self.offset);
        qb
    }
}

fn push_predicates(qb: &mut QueryBuilder<'static, Sqlite>, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(predicate.column)
            .push(" LIKE ")
            .push_bind(predicate.pattern.clone());
    }
}
