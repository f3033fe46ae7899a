//! LaTeX printing of symbolic expressions.
//!
//! Layout follows the usual computer-algebra conventions: sums by descending degree with the
//! constant term last, products with negative powers as `\frac`, function arguments wrapped
//! in `\left( \right)`, greek names as their macros and trailing digits as subscripts.

use crate::symbolic::display::Fraction;
use crate::symbolic::expr::{Condition, Constant, Expr, Func, Symbol};
use crate::symbolic::number::Number;
use crate::symbolic::ordering::print_order;

const GREEK: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi",
    "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Psi",
    "Omega", "varepsilon",
];

const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_POW: u8 = 3;
const PREC_ATOM: u8 = 4;

/// LaTeX math-mode source for `expr`, without surrounding `$`.
pub fn latex(expr: &Expr) -> String {
    match expr {
        Expr::Number(n) => number(*n),
        Expr::Symbol(s) => symbol(s),
        Expr::Constant(c) => match c {
            Constant::Pi => r"\pi",
            Constant::E => "e",
            Constant::I => "i",
            Constant::Infinity => r"\infty",
            Constant::ComplexInfinity => r"\tilde{\infty}",
            Constant::NaN => r"\text{NaN}",
        }
        .to_owned(),
        Expr::Add(terms) => add(terms),
        Expr::Mul(_) => mul(expr),
        Expr::Pow(b, e) => pow(b, e),
        Expr::Func(f, arg) => func(*f, arg),
        Expr::Applied { name, args } => {
            let args: Vec<String> = args.iter().map(latex).collect();
            format!(r"{}{{\left({} \right)}}", name_to_latex(name), args.join(","))
        }
        Expr::Derivative { .. } => derivative(expr),
        Expr::Subs { expr, var, point } => format!(
            r"\left. {} \right|_{{\substack{{ {}={} }}}}",
            latex(expr),
            symbol(var),
            latex(point)
        ),
        Expr::Integral { integrand, var } => format!(
            r"\int {}\, d{}",
            paren(integrand, PREC_MUL),
            symbol(var)
        ),
        Expr::Piecewise(pieces) => {
            let rows: Vec<String> = pieces
                .iter()
                .map(|(e, c)| match c {
                    Condition::Equals(l, r) => {
                        format!(r"{} & \text{{for}}\: {} = {}", latex(e), latex(l), latex(r))
                    }
                    Condition::Otherwise => format!(r"{} & \text{{otherwise}}", latex(e)),
                })
                .collect();
            format!(r"\begin{{cases}} {} \end{{cases}}", rows.join(r" \\ "))
        }
    }
}

fn number(n: Number) -> String {
    match n {
        Number::Rational { num, den: 1 } => num.to_string(),
        Number::Rational { num, den } if num < 0 => format!(r"- \frac{{{}}}{{{den}}}", -i128::from(num)),
        Number::Rational { num, den } => format!(r"\frac{{{num}}}{{{den}}}"),
        Number::Float(v) => float(v),
    }
}

/// `2.5e-10` → `2.5 \cdot 10^{-10}`; non-finite values as their symbols.
fn float(v: f64) -> String {
    if v.is_nan() {
        return r"\text{NaN}".to_owned();
    }
    if v.is_infinite() {
        return if v < 0.0 { r"- \infty" } else { r"\infty" }.to_owned();
    }
    let text = format!("{v:?}");
    match text.split_once('e') {
        Some((mantissa, exp)) => format!(r"{mantissa} \cdot 10^{{{exp}}}"),
        None => text,
    }
}

fn symbol(s: &Symbol) -> String {
    name_to_latex(s.name())
}

/// `alpha2` → `\alpha_{2}`, `x_max` → `x_{max}`, `x_` → `x\_`.
fn name_to_latex(name: &str) -> String {
    let (stem, sub) = match name.split_once('_') {
        Some((stem, sub)) if !stem.is_empty() && !sub.is_empty() && !sub.starts_with('_') => {
            (stem, Some(sub))
        }
        _ => {
            let digits = name.len()
                - name
                    .bytes()
                    .rev()
                    .take_while(u8::is_ascii_digit)
                    .count();
            if digits > 0 && digits < name.len() {
                (&name[..digits], Some(&name[digits..]))
            } else {
                (name, None)
            }
        }
    };
    let stem = if GREEK.contains(&stem) {
        format!(r"\{stem}")
    } else {
        stem.replace('_', r"\_")
    };
    match sub {
        Some(sub) => format!("{stem}_{{{}}}", name_to_latex(sub)),
        None => stem,
    }
}

fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Add(_) | Expr::Piecewise(_) => PREC_ADD,
        Expr::Mul(_) => PREC_MUL,
        Expr::Number(n) if n.is_negative() => PREC_ADD,
        Expr::Number(Number::Rational { den, .. }) if *den != 1 => PREC_MUL,
        Expr::Number(Number::Float(v)) if float(*v).contains(r"\cdot") => PREC_MUL,
        Expr::Pow(_, ex) if ex.as_number().is_some_and(Number::is_negative) => PREC_MUL,
        Expr::Pow(..) => PREC_POW,
        Expr::Derivative { .. } | Expr::Integral { .. } | Expr::Subs { .. } => PREC_MUL,
        _ => PREC_ATOM,
    }
}

fn paren(e: &Expr, min: u8) -> String {
    if precedence(e) < min {
        format!(r"\left({}\right)", latex(e))
    } else {
        latex(e)
    }
}

fn add(terms: &[Expr]) -> String {
    let mut out = String::new();
    for (i, term) in print_order(terms).into_iter().enumerate() {
        let text = latex(term);
        if i == 0 {
            out.push_str(&text);
            continue;
        }
        match text.strip_prefix("- ").or_else(|| text.strip_prefix('-')) {
            Some(rest) => {
                out.push_str(" - ");
                out.push_str(rest);
            }
            None => {
                out.push_str(" + ");
                out.push_str(&text);
            }
        }
    }
    out
}

fn join_factors(fs: &[Expr]) -> String {
    let parts: Vec<String> = fs.iter().map(|f| paren(f, PREC_MUL)).collect();
    let mut out = String::new();
    for (i, p) in parts.iter().enumerate() {
        if i > 0 {
            let numeric_pair = matches!(fs[i - 1], Expr::Number(_)) && matches!(fs[i], Expr::Number(_));
            out.push_str(if numeric_pair { r" \cdot " } else { " " });
        }
        out.push_str(p);
    }
    out
}

fn mul(e: &Expr) -> String {
    let frac = Fraction::of(e);
    let sign = if frac.negative { "- " } else { "" };
    if frac.denom.is_empty() {
        let numer = if frac.numer.is_empty() {
            "1".to_owned()
        } else {
            join_factors(&frac.numer)
        };
        return format!("{sign}{numer}");
    }
    // Inside \frac a lone factor needs no parentheses.
    let side = |fs: &[Expr]| match fs {
        [] => "1".to_owned(),
        [single] => latex(single),
        many => join_factors(many),
    };
    format!(
        r"{sign}\frac{{{}}}{{{}}}",
        side(&frac.numer),
        side(&frac.denom)
    )
}

fn pow(base: &Expr, exp: &Expr) -> String {
    if let Some(n) = exp.as_number() {
        if n.is_negative() {
            return mul(&Expr::Pow(Box::new(base.clone()), Box::new(exp.clone())));
        }
        if let Some((1, q)) = n.as_rational() {
            return if q == 2 {
                format!(r"\sqrt{{{}}}", latex(base))
            } else {
                format!(r"\sqrt[{q}]{{{}}}", latex(base))
            };
        }
        if let (Expr::Func(f, arg), Some(k)) = (base, n.as_integer())
            && let Some(name) = func_macro(*f)
        {
            return format!(r"{name}^{{{k}}}{{\left({} \right)}}", latex(arg));
        }
    }
    let base_text = match base {
        Expr::Func(Func::Exp, _) | Expr::Func(Func::Abs, _) => format!(r"\left({}\right)", latex(base)),
        Expr::Applied { .. } => latex(base),
        _ => paren(base, PREC_ATOM),
    };
    format!("{base_text}^{{{}}}", latex(exp))
}

/// Macro name for functions printed as `\name{\left(u \right)}`.
fn func_macro(f: Func) -> Option<&'static str> {
    Some(match f {
        Func::Sin => r"\sin",
        Func::Cos => r"\cos",
        Func::Tan => r"\tan",
        Func::Cot => r"\cot",
        Func::Sec => r"\sec",
        Func::Csc => r"\csc",
        Func::Asin => r"\operatorname{asin}",
        Func::Acos => r"\operatorname{acos}",
        Func::Atan => r"\operatorname{atan}",
        Func::Sinh => r"\sinh",
        Func::Cosh => r"\cosh",
        Func::Tanh => r"\tanh",
        Func::Log => r"\log",
        Func::Sign => r"\operatorname{sign}",
        Func::Exp | Func::Abs => return None,
    })
}

fn func(f: Func, arg: &Expr) -> String {
    match f {
        Func::Exp => format!("e^{{{}}}", latex(arg)),
        Func::Abs => format!(r"\left|{{{}}}\right|", latex(arg)),
        _ => {
            let name = func_macro(f).unwrap_or("");
            format!(r"{name}{{\left({} \right)}}", latex(arg))
        }
    }
}

fn derivative(e: &Expr) -> String {
    let mut vars = Vec::new();
    let mut inner = e;
    while let Expr::Derivative { expr, var } = inner {
        vars.push(var);
        inner = expr;
    }
    let partial = inner.free_symbols().len() > 1;
    let d = if partial { r"\partial" } else { "d" };
    let order = vars.len();
    let head = if order == 1 {
        d.to_owned()
    } else {
        format!("{d}^{{{order}}}")
    };
    let mut denom = String::new();
    let mut i = 0;
    while i < vars.len() {
        let run = vars[i..].iter().take_while(|v| **v == vars[i]).count();
        if !denom.is_empty() {
            denom.push(' ');
        }
        if run == 1 {
            denom.push_str(&format!("{d} {}", symbol(vars[i])));
        } else {
            denom.push_str(&format!("{d} {}^{{{run}}}", symbol(vars[i])));
        }
        i += run;
    }
    format!(r"\frac{{{head}}}{{{denom}}} {}", paren(inner, PREC_POW))
}

#[cfg(test)]
#[path = "../../tests/unit/render/latex.rs"]
mod tests;
