//! Plain-text printing in the conventional computer-algebra notation (`x**2/2 + sin(x)`).

use std::fmt;

use crate::symbolic::expr::{Condition, Constant, Expr};
use crate::symbolic::number::Number;
use crate::symbolic::ordering::print_order;

const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_POW: u8 = 3;
const PREC_ATOM: u8 = 4;

/// A product split into sign, numerator factors and denominator factors.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fraction {
    pub negative: bool,
    pub numer: Vec<Expr>,
    pub denom: Vec<Expr>,
}

impl Fraction {
    /// Split `e` (usually a product) for printing.
    pub(crate) fn of(e: &Expr) -> Self {
        let factors: &[Expr] = match e {
            Expr::Mul(fs) => fs,
            other => std::slice::from_ref(other),
        };
        let mut out = Fraction {
            negative: false,
            numer: Vec::new(),
            denom: Vec::new(),
        };
        for f in factors {
            match f {
                Expr::Number(n) => {
                    out.negative ^= n.is_negative();
                    match n.abs() {
                        Number::Rational { num, den } => {
                            if num != 1 {
                                out.numer.push(Expr::int(num));
                            }
                            if den != 1 {
                                out.denom.push(Expr::int(den));
                            }
                        }
                        float => out.numer.push(Expr::Number(float)),
                    }
                }
                Expr::Pow(b, ex) if ex.as_number().is_some_and(Number::is_negative) => {
                    out.denom.push(Expr::pow((**b).clone(), Expr::neg((**ex).clone())));
                }
                other => out.numer.push(other.clone()),
            }
        }
        out.numer.sort_by_key(factor_rank);
        out.denom.sort_by_key(factor_rank);
        out
    }
}

/// Reading order inside a product: numbers, then plain atoms and their powers, then the rest.
fn factor_rank(e: &Expr) -> u8 {
    match e {
        Expr::Number(_) => 0,
        Expr::Symbol(_) | Expr::Constant(_) => 1,
        Expr::Pow(b, _) if matches!(**b, Expr::Symbol(_) | Expr::Constant(_)) => 1,
        _ => 2,
    }
}

fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Add(_) | Expr::Piecewise(_) => PREC_ADD,
        Expr::Mul(_) => PREC_MUL,
        Expr::Number(Number::Rational { den, .. }) if *den != 1 => PREC_MUL,
        Expr::Number(n) if n.is_negative() => PREC_ADD,
        Expr::Pow(..) => PREC_POW,
        _ => PREC_ATOM,
    }
}

fn paren(e: &Expr, min: u8) -> String {
    if precedence(e) < min {
        format!("({e})")
    } else {
        e.to_string()
    }
}

fn join_factors(fs: &[Expr]) -> String {
    fs.iter()
        .map(|f| paren(f, PREC_MUL))
        .collect::<Vec<_>>()
        .join("*")
}

fn write_mul(f: &mut fmt::Formatter<'_>, e: &Expr) -> fmt::Result {
    let frac = Fraction::of(e);
    if frac.negative {
        f.write_str("-")?;
    }
    let numer = if frac.numer.is_empty() {
        "1".to_owned()
    } else {
        join_factors(&frac.numer)
    };
    match frac.denom.as_slice() {
        [] => f.write_str(&numer),
        [single] => write!(f, "{numer}/{}", paren(single, PREC_POW)),
        many => write!(f, "{numer}/({})", join_factors(many)),
    }
}

fn write_pow(f: &mut fmt::Formatter<'_>, base: &Expr, exp: &Expr) -> fmt::Result {
    if let Some(n) = exp.as_number() {
        if n == (Number::Rational { num: 1, den: 2 }) {
            return write!(f, "sqrt({base})");
        }
        if n.is_negative() {
            return write_mul(f, &Expr::Pow(Box::new(base.clone()), Box::new(exp.clone())));
        }
    }
    let exp_text = match exp {
        Expr::Number(n) if !n.is_negative() && (n.is_integer() || matches!(n, Number::Float(_))) => {
            n.to_string()
        }
        Expr::Symbol(_) | Expr::Constant(_) => exp.to_string(),
        other => format!("({other})"),
    };
    write!(f, "{}**{exp_text}", paren(base, PREC_ATOM))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Symbol(s) => f.write_str(s.name()),
            Expr::Constant(c) => f.write_str(match c {
                Constant::Pi => "pi",
                Constant::E => "E",
                Constant::I => "I",
                Constant::Infinity => "oo",
                Constant::ComplexInfinity => "zoo",
                Constant::NaN => "nan",
            }),
            Expr::Add(terms) => {
                for (i, term) in print_order(terms).into_iter().enumerate() {
                    let text = paren(term, PREC_ADD);
                    match (i, text.strip_prefix('-')) {
                        (0, _) => f.write_str(&text)?,
                        (_, Some(rest)) => write!(f, " - {rest}")?,
                        (_, None) => write!(f, " + {text}")?,
                    }
                }
                Ok(())
            }
            Expr::Mul(_) => write_mul(f, self),
            Expr::Pow(b, e) => write_pow(f, b, e),
            Expr::Func(func, arg) => write!(f, "{}({arg})", func.name()),
            Expr::Applied { name, args } => {
                let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                write!(f, "{name}({})", args.join(", "))
            }
            Expr::Derivative { expr, var } => write!(f, "Derivative({expr}, {})", var.name()),
            Expr::Subs { expr, var, point } => {
                write!(f, "Subs({expr}, {}, {point})", var.name())
            }
            Expr::Integral { integrand, var } => {
                write!(f, "Integral({integrand}, {})", var.name())
            }
            Expr::Piecewise(pieces) => {
                f.write_str("Piecewise(")?;
                for (i, (e, c)) in pieces.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match c {
                        Condition::Equals(l, r) => write!(f, "({e}, Eq({l}, {r}))")?,
                        Condition::Otherwise => write!(f, "({e}, True)")?,
                    }
                }
                f.write_str(")")
            }
        }
    }
}
