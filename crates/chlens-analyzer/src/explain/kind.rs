//! EXPLAIN kinds
//!
//! The server accepts `EXPLAIN AST`, `EXPLAIN SYNTAX`, `EXPLAIN QUERY TREE`,
//! `EXPLAIN PLAN`, `EXPLAIN PIPELINE`, `EXPLAIN ESTIMATE` and
//! `EXPLAIN TABLE OVERRIDE`; `EXPLAIN indexes = 1` is tracked as its own kind
//! because its output is shaped differently from a plain plan.

use serde::Serialize;
use std::fmt;

/// The requested flavor of EXPLAIN output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    #[default]
    Plan,
    Pipeline,
    Ast,
    Syntax,
    Estimate,
    Indexes,
    TableOverride,
    QueryTree,
}

/// Keywords that end the EXPLAIN header and start the explained statement
const STATEMENT_KEYWORDS: &[&str] = &["select", "with", "insert", "create", "alter", "("];

impl PlanKind {
    pub const ALL: [PlanKind; 8] = [
        PlanKind::Plan,
        PlanKind::Pipeline,
        PlanKind::Ast,
        PlanKind::Syntax,
        PlanKind::Estimate,
        PlanKind::Indexes,
        PlanKind::TableOverride,
        PlanKind::QueryTree,
    ];

    /// Lowercase keyword naming this kind in query text and output banners
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Pipeline => "pipeline",
            Self::Ast => "ast",
            Self::Syntax => "syntax",
            Self::Estimate => "estimate",
            Self::Indexes => "indexes",
            Self::TableOverride => "table override",
            Self::QueryTree => "query tree",
        }
    }

    /// Human-readable name, used for the synthetic root node
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Plan => "Plan",
            Self::Pipeline => "Pipeline",
            Self::Ast => "AST",
            Self::Syntax => "Syntax",
            Self::Estimate => "Estimate",
            Self::Indexes => "Indexes",
            Self::TableOverride => "Table Override",
            Self::QueryTree => "Query Tree",
        }
    }

    /// Parses a kind hint such as `"pipeline"` or `"QUERY_TREE"`.
    ///
    /// Unknown or empty hints fall back to [`PlanKind::Plan`].
    pub fn from_hint(hint: &str) -> Self {
        let normalized = normalize(hint);
        Self::ALL
            .into_iter()
            .find(|kind| kind.marker() == normalized)
            .unwrap_or_default()
    }

    /// Reads the kind from EXPLAIN query text.
    ///
    /// ```
    /// use chlens_analyzer::explain::PlanKind;
    ///
    /// assert_eq!(PlanKind::detect("EXPLAIN PIPELINE SELECT 1"), PlanKind::Pipeline);
    /// assert_eq!(PlanKind::detect("explain query tree select 1"), PlanKind::QueryTree);
    /// assert_eq!(PlanKind::detect("EXPLAIN indexes = 1 SELECT * FROM t"), PlanKind::Indexes);
    /// assert_eq!(PlanKind::detect("SELECT 1"), PlanKind::Plan);
    /// ```
    pub fn detect(query: &str) -> Self {
        let normalized = normalize(query);
        let Some(rest) = normalized.strip_prefix("explain") else {
            return Self::Plan;
        };
        if !rest.is_empty() && !rest.starts_with(' ') {
            return Self::Plan;
        }
        let rest = rest.trim_start();

        let explicit = Self::ALL.into_iter().find(|kind| {
            rest.strip_prefix(kind.marker())
                .is_some_and(|after| after.is_empty() || after.starts_with(' '))
        });

        match explicit {
            Some(kind) if kind != Self::Plan && kind != Self::Indexes => kind,
            _ if header_enables_indexes(rest) => Self::Indexes,
            _ => Self::Plan,
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lowercases, maps `_` to a space and collapses whitespace runs
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when the settings between EXPLAIN and the statement set `indexes = 1`
fn header_enables_indexes(rest: &str) -> bool {
    let header: String = rest
        .split(' ')
        .take_while(|token| !STATEMENT_KEYWORDS.iter().any(|k| token.starts_with(*k)))
        .collect();
    header.split(',').any(|setting| setting.ends_with("indexes=1"))
}

#[cfg(test)]
mod tests;
