// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Abstract ILP model description with a CPLEX-LP text renderer.
//!
//! The model is deliberately minimal: named variables (binary, or general
//! integer with bounds), linear constraints with integer coefficients, and
//! a minimization objective. That is the full shape the collaborator
//! boundary promises to any backend, and everything the assignment
//! formulation needs.

/// The relation of a linear constraint.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Eq => write!(f, "="),
            Relation::Le => write!(f, "<="),
            Relation::Ge => write!(f, ">="),
        }
    }
}

/// One linear constraint: `Σ coeffᵢ · varᵢ  <relation>  rhs`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LpConstraint {
    name: String,
    terms: Vec<(i64, String)>,
    relation: Relation,
    rhs: i64,
}

impl LpConstraint {
    /// Returns the constraint name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the linear terms.
    #[inline]
    pub fn terms(&self) -> &[(i64, String)] {
        &self.terms
    }

    /// Returns the relation.
    #[inline]
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Returns the right-hand side.
    #[inline]
    pub fn rhs(&self) -> i64 {
        self.rhs
    }
}

/// An integer-programming model: binary variables, bounded general integer
/// variables, linear constraints, and a minimization objective.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LpModel {
    name: String,
    objective: Vec<(i64, String)>,
    constraints: Vec<LpConstraint>,
    binaries: Vec<String>,
    generals: Vec<(String, i64, i64)>,
}

impl LpModel {
    /// Creates an empty model with the given problem name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objective: Vec::new(),
            constraints: Vec::new(),
            binaries: Vec::new(),
            generals: Vec::new(),
        }
    }

    /// Adds a term to the minimization objective.
    #[inline]
    pub fn minimize(&mut self, coeff: i64, var: impl Into<String>) -> &mut Self {
        self.objective.push((coeff, var.into()));
        self
    }

    /// Declares a binary decision variable.
    #[inline]
    pub fn add_binary(&mut self, name: impl Into<String>) -> &mut Self {
        self.binaries.push(name.into());
        self
    }

    /// Declares a general integer variable bounded to `[lower, upper]`.
    #[inline]
    pub fn add_general(&mut self, name: impl Into<String>, lower: i64, upper: i64) -> &mut Self {
        self.generals.push((name.into(), lower, upper));
        self
    }

    /// Adds a linear constraint.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(i64, String)>,
        relation: Relation,
        rhs: i64,
    ) -> &mut Self {
        self.constraints.push(LpConstraint {
            name: name.into(),
            terms,
            relation,
            rhs,
        });
        self
    }

    /// Returns the total number of declared variables.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.binaries.len() + self.generals.len()
    }

    /// Returns the number of constraints.
    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the constraints.
    #[inline]
    pub fn constraints(&self) -> &[LpConstraint] {
        &self.constraints
    }

    /// Renders the model as CPLEX-LP-format text.
    ///
    /// Long constraint rows wrap onto continuation lines so the output
    /// stays readable; LP readers treat leading whitespace as continuation.
    pub fn to_lp_format(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("\\ Problem: {}\n", self.name));

        out.push_str("Minimize\n");
        out.push_str(" obj:");
        write_terms(&mut out, &self.objective);
        out.push('\n');

        out.push_str("Subject To\n");
        for constraint in &self.constraints {
            out.push_str(&format!(" {}:", constraint.name));
            write_terms(&mut out, &constraint.terms);
            out.push_str(&format!(" {} {}\n", constraint.relation, constraint.rhs));
        }

        if !self.generals.is_empty() {
            out.push_str("Bounds\n");
            for (name, lower, upper) in &self.generals {
                out.push_str(&format!(" {lower} <= {name} <= {upper}\n"));
            }
            out.push_str("Generals\n");
            for (name, _, _) in &self.generals {
                out.push_str(&format!(" {name}\n"));
            }
        }

        if !self.binaries.is_empty() {
            out.push_str("Binary\n");
            let mut on_line = 0usize;
            for name in &self.binaries {
                out.push_str(&format!(" {name}"));
                on_line += 1;
                if on_line == 8 {
                    out.push('\n');
                    on_line = 0;
                }
            }
            if on_line != 0 {
                out.push('\n');
            }
        }

        out.push_str("End\n");
        out
    }
}

/// Writes `+ c x` style terms, wrapping every eight terms.
fn write_terms(out: &mut String, terms: &[(i64, String)]) {
    for (position, (coeff, var)) in terms.iter().enumerate() {
        if position > 0 && position % 8 == 0 {
            out.push_str("\n   ");
        }
        let sign = if *coeff < 0 { "-" } else if position == 0 { "" } else { "+" };
        let magnitude = coeff.unsigned_abs();
        if sign.is_empty() {
            if magnitude == 1 {
                out.push_str(&format!(" {var}"));
            } else {
                out.push_str(&format!(" {magnitude} {var}"));
            }
        } else if magnitude == 1 {
            out.push_str(&format!(" {sign} {var}"));
        } else {
            out.push_str(&format!(" {sign} {magnitude} {var}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_minimal_model() {
        let mut model = LpModel::new("tiny");
        model.minimize(1, "z");
        model.add_general("z", 0, 5);
        model.add_binary("x_0_0");
        model.add_binary("x_0_1");
        model.add_constraint(
            "item_0",
            vec![(1, "x_0_0".to_string()), (1, "x_0_1".to_string())],
            Relation::Eq,
            1,
        );

        let text = model.to_lp_format();
        assert!(text.starts_with("\\ Problem: tiny\n"));
        assert!(text.contains("Minimize\n obj: z\n"));
        assert!(text.contains(" item_0: x_0_0 + x_0_1 = 1\n"));
        assert!(text.contains("Bounds\n 0 <= z <= 5\n"));
        assert!(text.contains("Generals\n z\n"));
        assert!(text.contains("Binary\n x_0_0 x_0_1\n"));
        assert!(text.ends_with("End\n"));
    }

    #[test]
    fn test_negative_and_scaled_coefficients() {
        let mut model = LpModel::new("coeffs");
        model.minimize(1, "z");
        model.add_constraint(
            "and_link",
            vec![
                (1, "o".to_string()),
                (-1, "x_a".to_string()),
                (-1, "x_b".to_string()),
            ],
            Relation::Ge,
            -1,
        );
        model.add_constraint(
            "scaled",
            vec![(2, "x_a".to_string())],
            Relation::Le,
            4,
        );

        let text = model.to_lp_format();
        assert!(text.contains(" and_link: o - x_a - x_b >= -1\n"));
        assert!(text.contains(" scaled: 2 x_a <= 4\n"));
    }

    #[test]
    fn test_long_rows_wrap() {
        let mut model = LpModel::new("wide");
        model.minimize(1, "z");
        let terms: Vec<(i64, String)> = (0..20).map(|i| (1, format!("x_{i}"))).collect();
        model.add_constraint("wide_row", terms, Relation::Eq, 10);

        let text = model.to_lp_format();
        let row_lines: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with(" wide_row:"))
            .take_while(|l| l.starts_with(" wide_row:") || l.starts_with("   "))
            .collect();
        assert!(row_lines.len() > 1, "expected wrapped continuation lines");
    }

    #[test]
    fn test_variable_and_constraint_counts() {
        let mut model = LpModel::new("counts");
        model.add_binary("a");
        model.add_binary("b");
        model.add_general("z", 0, 3);
        model.add_constraint("only", vec![(1, "a".to_string())], Relation::Le, 1);

        assert_eq!(model.num_variables(), 3);
        assert_eq!(model.num_constraints(), 1);
    }
}
