use serde::Serialize;

use super::Statement;
use crate::Value;

/// Whether a clause-group matches the listed values or everything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Logic {
    /// `column = ?`, OR-joined
    #[default]
    Include,
    /// `column != ?`, AND-joined
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Joiner {
    And,
    Or,
}

impl Joiner {
    pub fn as_sql(self) -> &'static str {
        match self {
            Joiner::And => " AND ",
            Joiner::Or => " OR ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    Eq,
    NotEq,
}

impl Operator {
    pub fn as_sql(self) -> &'static str {
        match self {
            Operator::Eq => " = ",
            Operator::NotEq => " != ",
        }
    }
}

/// Leaf comparisons and parenthesized AND/OR groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Clause {
    Compare {
        column: String,
        operator: Operator,
        value: Value,
    },
    Group {
        joiner: Joiner,
        children: Vec<Clause>,
    },
}

impl Clause {
    /// One clause-group for `column` against every value.
    pub fn group(column: &str, values: Vec<Value>, logic: Logic) -> Self {
        let (operator, joiner) = match logic {
            Logic::Include => (Operator::Eq, Joiner::Or),
            Logic::Exclude => (Operator::NotEq, Joiner::And),
        };
        let children = values
            .into_iter()
            .map(|value| Clause::Compare {
                column: column.to_string(),
                operator,
                value,
            })
            .collect();
        Clause::Group { joiner, children }
    }

    pub fn render(&self, statement: &mut Statement) {
        match self {
            Clause::Compare {
                column,
                operator,
                value,
            } => {
                statement
                    .push(column)
                    .push(operator.as_sql())
                    .push_param(value.clone());
            }
            Clause::Group { joiner, children } => {
                statement.push("(");
                if children.is_empty() {
                    // OR over nothing matches nothing, AND over nothing matches all
                    statement.push(match joiner {
                        Joiner::Or => "1 = 0",
                        Joiner::And => "1 = 1",
                    });
                }
                statement.push_list(children, joiner.as_sql(), |s, child| child.render(s));
                statement.push(")");
            }
        }
    }
}

/// Clause-groups in call order, each linked to the previous one by its joiner.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conditions {
    groups: Vec<(Joiner, Clause)>,
}

impl Conditions {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn push(&mut self, joiner: Joiner, clause: Clause) {
        self.groups.push((joiner, clause));
    }

    /// Groups flattened left to right; the first group's joiner is not written.
    pub fn render(&self, statement: &mut Statement) {
        for (i, (joiner, clause)) in self.groups.iter().enumerate() {
            if i > 0 {
                statement.push(joiner.as_sql());
            }
            clause.render(statement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(clause: &Clause) -> Statement {
        let mut statement = Statement::new();
        clause.render(&mut statement);
        statement
    }

    #[test]
    fn test_include_group() {
        let clause = Clause::group("c", vec![json!(1), json!(2), json!(3)], Logic::Include);
        let statement = rendered(&clause);
        assert_eq!(statement.sql, "(c = ? OR c = ? OR c = ?)");
        assert_eq!(statement.params, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_exclude_group() {
        let clause = Clause::group("c", vec![json!(1), json!(2)], Logic::Exclude);
        assert_eq!(rendered(&clause).sql, "(c != ? AND c != ?)");
    }

    #[test]
    fn test_empty_groups() {
        assert_eq!(rendered(&Clause::group("c", vec![], Logic::Include)).sql, "(1 = 0)");
        assert_eq!(rendered(&Clause::group("c", vec![], Logic::Exclude)).sql, "(1 = 1)");
    }

    #[test]
    fn test_nested_groups() {
        let clause = Clause::Group {
            joiner: Joiner::And,
            children: vec![
                Clause::group("a", vec![json!(1), json!(2)], Logic::Include),
                Clause::Compare {
                    column: "b".into(),
                    operator: Operator::NotEq,
                    value: json!("x"),
                },
            ],
        };
        let statement = rendered(&clause);
        assert_eq!(statement.sql, "((a = ? OR a = ?) AND b != ?)");
        assert_eq!(statement.params, vec![json!(1), json!(2), json!("x")]);
    }

    #[test]
    fn test_conditions_skip_first_joiner() {
        let mut conditions = Conditions::default();
        conditions.push(Joiner::Or, Clause::group("a", vec![json!(1)], Logic::Include));
        conditions.push(Joiner::Or, Clause::group("b", vec![json!(2)], Logic::Include));
        conditions.push(Joiner::And, Clause::group("c", vec![json!(3)], Logic::Exclude));
        let mut statement = Statement::new();
        conditions.render(&mut statement);
        assert_eq!(statement.sql, "(a = ?) OR (b = ?) AND (c != ?)");
    }
}
