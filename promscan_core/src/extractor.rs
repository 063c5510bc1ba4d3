use promql_parser::label::{MatchOp, Matcher};
use promql_parser::parser::{self, Expr, VectorSelector};

use crate::error::{Result, ScanError};

/// The reserved label under which a selector carries its metric name.
pub const METRIC_NAME_LABEL: &str = "__name__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherOp {
    Equal,
    NotEqual,
    RegexMatch,
    RegexNotMatch,
}

/// One label matcher of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatcher {
    pub name: String,
    pub op: MatcherOp,
    pub value: String,
}

/// The matcher set of one vector or matrix selector. Conventionally one
/// matcher is named `__name__` and carries the metric name; it may be
/// absent.
#[derive(Debug, Clone, Default)]
pub struct SelectorGroup {
    pub matchers: Vec<LabelMatcher>,
}

impl SelectorGroup {
    /// The metric name by the `__name__` convention, or the empty string
    /// when the selector names no metric.
    pub fn metric_name(&self) -> &str {
        self.matchers
            .iter()
            .find(|m| m.name == METRIC_NAME_LABEL)
            .map(|m| m.value.as_str())
            .unwrap_or("")
    }

    /// Every matcher name except the metric-name convention label.
    pub fn label_names(&self) -> Vec<String> {
        self.matchers
            .iter()
            .filter(|m| m.name != METRIC_NAME_LABEL)
            .map(|m| m.name.clone())
            .collect()
    }
}

/// Parse a normalized query and collect one selector group per vector or
/// matrix selector in the expression tree.
pub fn extract_selectors(query: &str) -> Result<Vec<SelectorGroup>> {
    let expr = parser::parse(query).map_err(ScanError::QueryParse)?;
    let mut groups = Vec::new();
    collect_groups(&expr, &mut groups);
    Ok(groups)
}

fn collect_groups(expr: &Expr, groups: &mut Vec<SelectorGroup>) {
    match expr {
        Expr::VectorSelector(vs) => {
            groups.push(selector_group(vs));
        }
        Expr::MatrixSelector(ms) => {
            groups.push(selector_group(&ms.vs));
        }
        Expr::Call(call) => {
            for arg in &call.args.args {
                collect_groups(arg, groups);
            }
        }
        Expr::Aggregate(agg) => {
            collect_groups(&agg.expr, groups);
            if let Some(param) = &agg.param {
                collect_groups(param, groups);
            }
        }
        Expr::Binary(bin) => {
            collect_groups(&bin.lhs, groups);
            collect_groups(&bin.rhs, groups);
        }
        Expr::Paren(paren) => {
            collect_groups(&paren.expr, groups);
        }
        Expr::Unary(unary) => {
            collect_groups(&unary.expr, groups);
        }
        Expr::Subquery(sq) => {
            collect_groups(&sq.expr, groups);
        }
        Expr::Extension(_) | Expr::NumberLiteral(_) | Expr::StringLiteral(_) => {}
    }
}

fn selector_group(vs: &VectorSelector) -> SelectorGroup {
    let mut matchers = Vec::new();
    if let Some(name) = &vs.name {
        matchers.push(LabelMatcher {
            name: METRIC_NAME_LABEL.to_string(),
            op: MatcherOp::Equal,
            value: name.clone(),
        });
    }
    for matcher in vs.matchers.matchers.iter() {
        matchers.push(convert_matcher(matcher));
    }
    SelectorGroup { matchers }
}

fn convert_matcher(matcher: &Matcher) -> LabelMatcher {
    let op = match &matcher.op {
        MatchOp::Equal => MatcherOp::Equal,
        MatchOp::NotEqual => MatcherOp::NotEqual,
        MatchOp::Re(_) => MatcherOp::RegexMatch,
        MatchOp::NotRe(_) => MatcherOp::RegexNotMatch,
    };

    LabelMatcher {
        name: matcher.name.clone(),
        op,
        value: matcher.value.clone(),
    }
}
