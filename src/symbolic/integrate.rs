//! Rule-based antidifferentiation.
//!
//! [`integral_steps`] matches the integrand against a fixed rule table and records how it was
//! solved as an [`IntegralStep`] tree; [`IntegralStep::eval`] turns that tree into the
//! antiderivative. Integrands no rule covers become an unevaluated [`Expr::Integral`], so the
//! operation itself never fails.

use serde::Serialize;

use crate::symbolic::diff::diff;
use crate::symbolic::expr::{Condition, Constant, Expr, Func, Symbol};
use crate::symbolic::number::Number;
use crate::symbolic::subs::subs;

/// Recursion limit for substitution and integration by parts.
const MAX_DEPTH: usize = 6;

/// One node of the solution tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegralStep {
    pub integrand: Expr,
    pub var: Symbol,
    #[serde(flatten)]
    pub rule: Rule,
}

/// How a step was solved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Integrand does not depend on the variable.
    Constant,
    /// `c * g(x)`
    ConstantTimes {
        constant: Expr,
        substep: Box<IntegralStep>,
    },
    /// Term by term.
    Add { substeps: Vec<IntegralStep> },
    /// `x**n`, including a symbolic `n`.
    Power { exp: Expr },
    /// `1/x`
    Reciprocal,
    /// `a**x` and `exp(x)`.
    Exp { base: Expr },
    /// Elementary function of the bare variable.
    Trig { func: Func },
    /// `sec(x)**2`
    SecSquared,
    /// `csc(x)**2`
    CscSquared,
    /// `sec(x)*tan(x)`
    SecTan,
    /// `csc(x)*cot(x)`
    CscCot,
    /// `1/(a*x**2 + c)` with `a, c > 0`.
    ArcTan { a: Number, c: Number },
    /// `1/sqrt(c - a*x**2)` with `a, c > 0`.
    ArcSin { a: Number, c: Number },
    /// Substitution `u = u_func`.
    USub {
        u_var: Symbol,
        u_func: Expr,
        substep: Box<IntegralStep>,
    },
    /// `u*v - integral(v*du)`
    Parts {
        u: Expr,
        dv: Expr,
        v_step: Box<IntegralStep>,
        second_step: Box<IntegralStep>,
    },
    /// Integrand rewritten into an equivalent form first.
    Rewrite {
        rewritten: Expr,
        substep: Box<IntegralStep>,
    },
    /// Integral of a derivative in the same variable.
    Derivative,
    /// No rule applies.
    DontKnow,
}

/// Antiderivative together with how it was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Antiderivative {
    pub result: Expr,
    pub steps: IntegralStep,
}

/// Indefinite integral of `expr` with respect to `var`, without constant of integration.
pub fn manual_integrate(expr: &Expr, var: &Symbol) -> Antiderivative {
    let steps = integral_steps(expr, var, 0);
    Antiderivative {
        result: steps.eval(),
        steps,
    }
}

impl IntegralStep {
    fn new(integrand: &Expr, var: &Symbol, rule: Rule) -> Self {
        Self {
            integrand: integrand.clone(),
            var: var.clone(),
            rule,
        }
    }

    /// `true` when some part of the tree has no rule.
    pub fn contains_dont_know(&self) -> bool {
        match &self.rule {
            Rule::DontKnow => true,
            Rule::ConstantTimes { substep, .. }
            | Rule::USub { substep, .. }
            | Rule::Rewrite { substep, .. } => substep.contains_dont_know(),
            Rule::Add { substeps } => substeps.iter().any(IntegralStep::contains_dont_know),
            Rule::Parts {
                v_step,
                second_step,
                ..
            } => v_step.contains_dont_know() || second_step.contains_dont_know(),
            _ => false,
        }
    }

    /// Antiderivative described by this step.
    pub fn eval(&self) -> Expr {
        let x = Expr::symbol(self.var.clone());
        match &self.rule {
            Rule::Constant => Expr::mul(vec![self.integrand.clone(), x]),
            Rule::ConstantTimes { constant, substep } => {
                Expr::mul(vec![constant.clone(), substep.eval()])
            }
            Rule::Add { substeps } => Expr::add(substeps.iter().map(IntegralStep::eval).collect()),
            Rule::Power { exp } => {
                let raised = Expr::div(
                    Expr::pow(x.clone(), Expr::add(vec![exp.clone(), Expr::one()])),
                    Expr::add(vec![exp.clone(), Expr::one()]),
                );
                if exp.as_number().is_some() {
                    raised
                } else {
                    Expr::piecewise(vec![
                        (
                            Expr::func(Func::Log, x),
                            Condition::Equals(exp.clone(), Expr::minus_one()),
                        ),
                        (raised, Condition::Otherwise),
                    ])
                }
            }
            Rule::Reciprocal => Expr::func(Func::Log, x),
            Rule::Exp { base } => match base {
                Expr::Constant(Constant::E) => Expr::func(Func::Exp, x),
                _ => Expr::div(
                    Expr::pow(base.clone(), x),
                    Expr::func(Func::Log, base.clone()),
                ),
            },
            Rule::Trig { func } => trig_antiderivative(*func, x)
                .unwrap_or_else(|| Expr::integral(self.integrand.clone(), self.var.clone())),
            Rule::SecSquared => Expr::func(Func::Tan, x),
            Rule::CscSquared => Expr::neg(Expr::func(Func::Cot, x)),
            Rule::SecTan => Expr::func(Func::Sec, x),
            Rule::CscCot => Expr::neg(Expr::func(Func::Csc, x)),
            Rule::ArcTan { a, c } => {
                let scale = Expr::sqrt(Expr::Number(a.mul(c.recip().unwrap_or(Number::one()))));
                Expr::div(
                    Expr::func(Func::Atan, Expr::mul(vec![x, scale])),
                    Expr::sqrt(Expr::Number(a.mul(*c))),
                )
            }
            Rule::ArcSin { a, c } => {
                let scale = Expr::sqrt(Expr::Number(a.mul(c.recip().unwrap_or(Number::one()))));
                Expr::div(
                    Expr::func(Func::Asin, Expr::mul(vec![x, scale])),
                    Expr::sqrt(Expr::Number(*a)),
                )
            }
            Rule::USub {
                u_var,
                u_func,
                substep,
            } => subs(&substep.eval(), &Expr::symbol(u_var.clone()), u_func),
            Rule::Parts {
                u,
                v_step,
                second_step,
                ..
            } => Expr::sub(
                Expr::mul(vec![u.clone(), v_step.eval()]),
                second_step.eval(),
            ),
            Rule::Rewrite { substep, .. } => substep.eval(),
            Rule::Derivative => match &self.integrand {
                Expr::Derivative { expr, .. } => (**expr).clone(),
                other => Expr::integral(other.clone(), self.var.clone()),
            },
            Rule::DontKnow => Expr::integral(self.integrand.clone(), self.var.clone()),
        }
    }
}

fn trig_antiderivative(f: Func, x: Expr) -> Option<Expr> {
    let call = |g: Func| Expr::func(g, x.clone());
    let out = match f {
        Func::Sin => Expr::neg(call(Func::Cos)),
        Func::Cos => call(Func::Sin),
        Func::Tan => Expr::neg(Expr::func(Func::Log, call(Func::Cos))),
        Func::Cot => Expr::func(Func::Log, call(Func::Sin)),
        Func::Sec => Expr::func(
            Func::Log,
            Expr::add(vec![call(Func::Sec), call(Func::Tan)]),
        ),
        Func::Csc => Expr::neg(Expr::func(
            Func::Log,
            Expr::add(vec![call(Func::Csc), call(Func::Cot)]),
        )),
        Func::Sinh => call(Func::Cosh),
        Func::Cosh => call(Func::Sinh),
        Func::Tanh => Expr::func(Func::Log, call(Func::Cosh)),
        _ => return None,
    };
    Some(out)
}

/// Build the solution tree for `integral(expr, var)`.
pub fn integral_steps(expr: &Expr, var: &Symbol, depth: usize) -> IntegralStep {
    let step = |rule| IntegralStep::new(expr, var, rule);

    if !expr.depends_on(var) {
        return step(Rule::Constant);
    }
    if depth > MAX_DEPTH {
        return step(Rule::DontKnow);
    }

    if let Expr::Add(terms) = expr {
        let substeps = terms.iter().map(|t| integral_steps(t, var, depth)).collect();
        return step(Rule::Add { substeps });
    }

    if let Expr::Mul(factors) = expr {
        let (constant, dependent): (Vec<Expr>, Vec<Expr>) =
            factors.iter().cloned().partition(|f| !f.depends_on(var));
        if !constant.is_empty() {
            let other = Expr::mul(dependent);
            return step(Rule::ConstantTimes {
                constant: Expr::mul(constant),
                substep: Box::new(integral_steps(&other, var, depth)),
            });
        }
    }

    if let Some(rule) = direct_rule(expr, var) {
        return step(rule);
    }

    if let Some(rule) = try_substitution(expr, var, depth) {
        return step(rule);
    }

    if let Some(rule) = try_expansion(expr, var, depth) {
        return step(rule);
    }

    if let Some(rule) = try_parts(expr, var, depth) {
        return step(rule);
    }

    step(Rule::DontKnow)
}

/// Table lookup for integrands that are a single known form in the bare variable.
fn direct_rule(expr: &Expr, var: &Symbol) -> Option<Rule> {
    let is_var = |e: &Expr| e.as_symbol() == Some(var);

    match expr {
        Expr::Symbol(_) if is_var(expr) => Some(Rule::Power { exp: Expr::one() }),
        Expr::Pow(base, exp) if is_var(base) && !exp.depends_on(var) => {
            if exp.as_number().is_some_and(Number::is_minus_one) {
                Some(Rule::Reciprocal)
            } else {
                Some(Rule::Power {
                    exp: (**exp).clone(),
                })
            }
        }
        Expr::Pow(base, exp) if is_var(exp) && !base.depends_on(var) => Some(Rule::Exp {
            base: (**base).clone(),
        }),
        Expr::Pow(base, exp) => match (&**base, exp.as_number()?.as_rational()?) {
            (Expr::Func(Func::Sec, u), (2, 1)) if is_var(u) => Some(Rule::SecSquared),
            (Expr::Func(Func::Cos, u), (-2, 1)) if is_var(u) => Some(Rule::SecSquared),
            (Expr::Func(Func::Csc, u), (2, 1)) if is_var(u) => Some(Rule::CscSquared),
            (Expr::Func(Func::Sin, u), (-2, 1)) if is_var(u) => Some(Rule::CscSquared),
            (b, (-1, 1)) => {
                let (a, c) = quadratic_without_linear(b, var)?;
                (a.is_positive() && c.is_positive()).then_some(Rule::ArcTan { a, c })
            }
            (b, (-1, 2)) => {
                let (a, c) = quadratic_without_linear(b, var)?;
                let a = a.neg();
                (a.is_positive() && c.is_positive()).then_some(Rule::ArcSin { a, c })
            }
            _ => None,
        },
        Expr::Func(Func::Exp, u) if is_var(u) => Some(Rule::Exp {
            base: Expr::Constant(Constant::E),
        }),
        Expr::Func(
            f @ (Func::Sin
            | Func::Cos
            | Func::Tan
            | Func::Cot
            | Func::Sec
            | Func::Csc
            | Func::Sinh
            | Func::Cosh
            | Func::Tanh),
            u,
        ) if is_var(u) => Some(Rule::Trig { func: *f }),
        Expr::Mul(fs) if fs.len() == 2 => {
            let pair = (&fs[0], &fs[1]);
            let matches_pair = |a: Func, b: Func| match pair {
                (Expr::Func(f, u), Expr::Func(g, w)) => {
                    is_var(u) && is_var(w) && ((*f == a && *g == b) || (*f == b && *g == a))
                }
                _ => false,
            };
            if matches_pair(Func::Sec, Func::Tan) {
                Some(Rule::SecTan)
            } else if matches_pair(Func::Csc, Func::Cot) {
                Some(Rule::CscCot)
            } else {
                None
            }
        }
        Expr::Derivative { var: v, .. } if v == var => Some(Rule::Derivative),
        _ => None,
    }
}

/// `(a, c)` for `a*x**2 + c` with numeric coefficients.
fn quadratic_without_linear(e: &Expr, var: &Symbol) -> Option<(Number, Number)> {
    let Expr::Add(terms) = e else {
        return None;
    };
    let mut a = Number::zero();
    let mut c = Number::zero();
    for term in terms {
        if let Some(n) = term.as_number() {
            c = c.add(n);
            continue;
        }
        let (coeff, rest) = term.split_coefficient();
        match rest {
            Expr::Pow(b, e)
                if b.as_symbol() == Some(var)
                    && e.as_number().and_then(Number::as_integer) == Some(2) =>
            {
                a = a.add(coeff);
            }
            _ => return None,
        }
    }
    Some((a, c))
}

fn substitution_candidates(expr: &Expr, var: &Symbol, out: &mut Vec<Expr>) {
    let mut push = |e: &Expr| {
        if e.depends_on(var) && e.as_symbol() != Some(var) && !out.contains(e) {
            out.push(e.clone());
        }
    };
    match expr {
        Expr::Func(_, arg) => {
            push(arg);
            push(expr);
            substitution_candidates(arg, var, out);
        }
        Expr::Pow(base, exp) => {
            push(base);
            if exp.depends_on(var) {
                push(exp);
            }
            substitution_candidates(base, var, out);
            substitution_candidates(exp, var, out);
        }
        Expr::Mul(fs) | Expr::Add(fs) => {
            for f in fs {
                substitution_candidates(f, var, out);
            }
        }
        Expr::Applied { args, .. } => {
            for a in args {
                push(a);
            }
        }
        _ => {}
    }
}

fn try_substitution(expr: &Expr, var: &Symbol, depth: usize) -> Option<Rule> {
    let mut candidates = Vec::new();
    substitution_candidates(expr, var, &mut candidates);

    let u_var = Symbol::dummy(format!("u{depth}"));
    let u = Expr::symbol(u_var.clone());
    for u_func in candidates {
        let du = diff(&u_func, var);
        if du.is_zero() {
            continue;
        }
        let quotient = Expr::div(expr.clone(), du);
        let replaced = subs(&quotient, &u_func, &u);
        if replaced.depends_on(var) {
            continue;
        }
        let substep = integral_steps(&replaced, &u_var, depth + 1);
        if substep.contains_dont_know() {
            continue;
        }
        return Some(Rule::USub {
            u_var,
            u_func,
            substep: Box::new(substep),
        });
    }
    None
}

fn try_expansion(expr: &Expr, var: &Symbol, depth: usize) -> Option<Rule> {
    let has_sum = match expr {
        Expr::Mul(fs) => fs.iter().any(|f| matches!(f, Expr::Add(_) | Expr::Pow(..))),
        Expr::Pow(b, _) => matches!(**b, Expr::Add(_)),
        _ => false,
    };
    if !has_sum {
        return None;
    }
    let rewritten = expr.expand();
    if rewritten == *expr {
        return None;
    }
    let substep = integral_steps(&rewritten, var, depth + 1);
    if substep.contains_dont_know() {
        return None;
    }
    Some(Rule::Rewrite {
        rewritten,
        substep: Box::new(substep),
    })
}

/// Position in the usual "log, inverse trig, algebraic, trig, exponential" preference.
fn parts_priority(e: &Expr, var: &Symbol) -> Option<u8> {
    match e {
        Expr::Func(Func::Log, _) => Some(0),
        Expr::Func(Func::Asin | Func::Acos | Func::Atan, _) => Some(1),
        Expr::Symbol(s) if s == var => Some(2),
        Expr::Pow(b, ex)
            if b.as_symbol() == Some(var)
                && ex.as_number().and_then(Number::as_integer).is_some_and(|n| n > 0) =>
        {
            Some(2)
        }
        Expr::Func(Func::Sin | Func::Cos | Func::Sinh | Func::Cosh, _) => Some(3),
        Expr::Func(Func::Exp, _) => Some(4),
        _ => None,
    }
}

fn try_parts(expr: &Expr, var: &Symbol, depth: usize) -> Option<Rule> {
    let factors: Vec<Expr> = match expr {
        Expr::Mul(fs) => fs.clone(),
        other => vec![other.clone()],
    };

    let mut order: Vec<(u8, usize)> = factors
        .iter()
        .enumerate()
        .filter_map(|(i, f)| parts_priority(f, var).map(|p| (p, i)))
        .collect();
    order.sort();

    for (priority, i) in order {
        // A lone polynomial or exponential is handled by the direct rules.
        if factors.len() == 1 && priority >= 2 {
            continue;
        }
        let u = factors[i].clone();
        let dv = Expr::mul(
            factors
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, f)| f.clone())
                .collect(),
        );
        let v_step = integral_steps(&dv, var, depth + 1);
        if v_step.contains_dont_know() {
            continue;
        }
        let du = diff(&u, var);
        let second = Expr::mul(vec![v_step.eval(), du]);
        let second_step = integral_steps(&second, var, depth + 1);
        if second_step.contains_dont_know() {
            continue;
        }
        return Some(Rule::Parts {
            u,
            dv,
            v_step: Box::new(v_step),
            second_step: Box::new(second_step),
        });
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/symbolic/integrate.rs"]
mod tests;
