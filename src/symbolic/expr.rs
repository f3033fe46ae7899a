use std::collections::BTreeSet;

use serde::Serialize;

use crate::symbolic::number::Number;
use crate::symbolic::ordering::{cmp_exprs, cmp_factors};

/// Assumption attached to a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Unconstrained.
    Generic,
    /// Integer-valued.
    Integer,
    /// Internal bound variable (substitution and evaluation points).
    Dummy,
}

/// Named atom. Two symbols are the same symbol iff name and kind agree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
}

impl Symbol {
    /// Unconstrained symbol.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Generic,
        }
    }

    /// Integer-valued symbol.
    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Integer,
        }
    }

    /// Bound variable that never collides with user symbols.
    pub fn dummy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Dummy,
        }
    }

    /// Symbol name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached assumption.
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }
}

/// Named mathematical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constant {
    /// `pi`
    Pi,
    /// Euler's number.
    E,
    /// Imaginary unit.
    I,
    /// `oo`
    Infinity,
    /// Unsigned infinity, the value of `1/0`.
    ComplexInfinity,
    /// Undefined result of an indeterminate form such as `0/0` or `oo - oo`.
    NaN,
}

/// Built-in elementary functions of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Log,
    Abs,
    Sign,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Parity {
    Odd,
    Even,
    Neither,
}

impl Func {
    /// Every built-in function.
    pub const ALL: [Func; 16] = [
        Func::Sin,
        Func::Cos,
        Func::Tan,
        Func::Cot,
        Func::Sec,
        Func::Csc,
        Func::Asin,
        Func::Acos,
        Func::Atan,
        Func::Sinh,
        Func::Cosh,
        Func::Tanh,
        Func::Exp,
        Func::Log,
        Func::Abs,
        Func::Sign,
    ];

    /// Name used in expression text.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Cot => "cot",
            Func::Sec => "sec",
            Func::Csc => "csc",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Abs => "Abs",
            Func::Sign => "sign",
        }
    }

    /// Inverse of [`Func::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    fn parity(self) -> Parity {
        match self {
            Func::Sin
            | Func::Tan
            | Func::Cot
            | Func::Csc
            | Func::Asin
            | Func::Atan
            | Func::Sinh
            | Func::Tanh
            | Func::Sign => Parity::Odd,
            Func::Cos | Func::Sec | Func::Cosh | Func::Abs => Parity::Even,
            Func::Acos | Func::Exp | Func::Log => Parity::Neither,
        }
    }

    fn special_value(self, arg: &Expr) -> Option<Expr> {
        let zoo = || Expr::Constant(Constant::ComplexInfinity);
        let pi_over = |d: i64| Expr::mul(vec![Expr::frac(1, d), Expr::Constant(Constant::Pi)]);

        if let Expr::Number(n) = arg {
            if n.is_zero() {
                return Some(match self {
                    Func::Sin
                    | Func::Tan
                    | Func::Asin
                    | Func::Atan
                    | Func::Sinh
                    | Func::Tanh
                    | Func::Abs
                    | Func::Sign => Expr::zero(),
                    Func::Cos | Func::Sec | Func::Cosh | Func::Exp => Expr::one(),
                    Func::Acos => pi_over(2),
                    Func::Cot | Func::Csc | Func::Log => zoo(),
                });
            }
            if n.is_one() {
                match self {
                    Func::Log | Func::Acos => return Some(Expr::zero()),
                    Func::Exp => return Some(Expr::Constant(Constant::E)),
                    Func::Asin => return Some(pi_over(2)),
                    Func::Atan => return Some(pi_over(4)),
                    _ => {}
                }
            }
            match self {
                Func::Abs => return Some(Expr::Number(n.abs())),
                Func::Sign => {
                    let s = if n.is_negative() { -1 } else { 1 };
                    return Some(Expr::int(s));
                }
                _ => {}
            }
        }

        match (self, arg) {
            (Func::Sin | Func::Tan, Expr::Constant(Constant::Pi)) => Some(Expr::zero()),
            (Func::Cos | Func::Sec, Expr::Constant(Constant::Pi)) => Some(Expr::minus_one()),
            (Func::Log, Expr::Constant(Constant::E)) => Some(Expr::one()),
            (Func::Abs, Expr::Constant(c @ (Constant::Pi | Constant::E | Constant::Infinity))) => {
                Some(Expr::Constant(*c))
            }
            (Func::Exp, Expr::Func(Func::Log, inner)) => Some((**inner).clone()),
            _ => None,
        }
    }
}

/// Condition attached to one branch of a [`Expr::Piecewise`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// `lhs == rhs`
    Equals(Expr, Expr),
    /// Catch-all final branch.
    Otherwise,
}

/// Immutable symbolic expression tree.
///
/// Always build values through the associated constructors ([`Expr::add`], [`Expr::mul`],
/// [`Expr::pow`], ...): they keep the tree canonical, so structurally equal trees are the
/// same expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Number(Number),
    Symbol(Symbol),
    Constant(Constant),
    /// At least two terms, no nested sums, at most one numeric term.
    Add(Vec<Expr>),
    /// At least two factors, no nested products, at most one (leading) numeric factor.
    Mul(Vec<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Func(Func, Box<Expr>),
    /// Undefined function applied to arguments, `f(x)`.
    Applied {
        name: String,
        args: Vec<Expr>,
    },
    /// Unevaluated derivative.
    Derivative {
        expr: Box<Expr>,
        var: Symbol,
    },
    /// `expr` evaluated at `var = point`.
    Subs {
        expr: Box<Expr>,
        var: Symbol,
        point: Box<Expr>,
    },
    /// Unevaluated antiderivative.
    Integral {
        integrand: Box<Expr>,
        var: Symbol,
    },
    /// First branch whose condition holds.
    Piecewise(Vec<(Expr, Condition)>),
}

impl Expr {
    /// Exact integer.
    pub fn int(v: i64) -> Self {
        Self::Number(Number::int(v))
    }

    /// Exact `num / den`; `1/0` is complex infinity.
    pub fn frac(num: i64, den: i64) -> Self {
        Number::rational(num, den).map_or(Self::Constant(Constant::ComplexInfinity), Self::Number)
    }

    /// `0`
    pub fn zero() -> Self {
        Self::int(0)
    }

    /// `1`
    pub fn one() -> Self {
        Self::int(1)
    }

    /// `-1`
    pub fn minus_one() -> Self {
        Self::int(-1)
    }

    /// Atom for `s`.
    pub fn symbol(s: Symbol) -> Self {
        Self::Symbol(s)
    }

    /// Numeric value when this is a number atom.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Symbol when this is a symbol atom.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for a symbol atom.
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Exact zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|n| n.is_zero())
    }

    /// Exact one.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(|n| n.is_one())
    }

    /// `nan`
    pub fn nan() -> Self {
        Self::Constant(Constant::NaN)
    }

    /// `true` for `nan`.
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Constant(Constant::NaN))
    }

    /// The infinity this atom is, if any.
    fn as_infinity(&self) -> Option<Constant> {
        match self {
            Self::Constant(c @ (Constant::Infinity | Constant::ComplexInfinity)) => Some(*c),
            _ => None,
        }
    }

    /// Canonical sum.
    pub fn add(terms: Vec<Expr>) -> Expr {
        let mut constant = Number::zero();
        let mut collected: Vec<(Expr, Number)> = Vec::new();
        let mut infinities: Vec<(Constant, Number)> = Vec::new();

        let mut stack = terms;
        while let Some(term) = stack.pop() {
            match term {
                Expr::Add(inner) => stack.extend(inner),
                Expr::Number(n) => constant = constant.add(n),
                other => {
                    let (coeff, rest) = other.split_coefficient();
                    if rest.is_nan() {
                        return Expr::nan();
                    }
                    if let Some(inf) = rest.as_infinity() {
                        infinities.push((inf, coeff));
                        continue;
                    }
                    match collected.iter_mut().find(|(e, _)| *e == rest) {
                        Some(slot) => slot.1 = slot.1.add(coeff),
                        None => collected.push((rest, coeff)),
                    }
                }
            }
        }

        let mut out: Vec<Expr> = collected
            .into_iter()
            .filter(|(_, c)| !c.is_zero())
            .map(|(e, c)| Expr::with_coefficient(c, e))
            .collect();
        if infinities.is_empty() {
            if !constant.is_zero() || (matches!(constant, Number::Float(_)) && out.is_empty()) {
                out.push(Expr::Number(constant));
            }
        } else {
            // Finite numbers are absorbed; opposing or unsigned infinities are indeterminate.
            match sum_of_infinities(&infinities) {
                Some(inf) => out.push(inf),
                None => return Expr::nan(),
            }
        }
        out.sort_by(cmp_exprs);
        match out.len() {
            0 => Expr::zero(),
            1 => out.remove(0),
            _ => Expr::Add(out),
        }
    }

    /// Canonical product.
    pub fn mul(factors: Vec<Expr>) -> Expr {
        let mut coeff = Number::one();
        let mut powers: Vec<(Expr, Expr)> = Vec::new();

        let mut stack = factors;
        while let Some(f) = stack.pop() {
            match f {
                Expr::Mul(inner) => stack.extend(inner),
                Expr::Number(n) => coeff = coeff.mul(n),
                Expr::Constant(Constant::NaN) => return Expr::nan(),
                other => {
                    let (base, exp) = other.as_base_exp();
                    match powers.iter_mut().find(|(b, _)| *b == base) {
                        Some(slot) => slot.1 = Expr::add(vec![slot.1.clone(), exp]),
                        None => powers.push((base, exp)),
                    }
                }
            }
        }

        if coeff.is_zero() && !powers.iter().any(|(b, _)| b.as_infinity().is_some()) {
            return Expr::Number(coeff);
        }

        let mut out = Vec::with_capacity(powers.len() + 1);
        for (base, exp) in powers {
            match Expr::pow(base, exp) {
                Expr::Number(n) => coeff = coeff.mul(n),
                Expr::Mul(inner) => {
                    for f in inner {
                        match f {
                            Expr::Number(n) => coeff = coeff.mul(n),
                            other => out.push(other),
                        }
                    }
                }
                other => out.push(other),
            }
        }

        if out.iter().any(Expr::is_nan) {
            return Expr::nan();
        }
        let infinity = out.iter().find_map(Expr::as_infinity);
        if coeff.is_zero() {
            return if infinity.is_some() {
                Expr::nan()
            } else {
                Expr::Number(coeff)
            };
        }
        // Infinities keep only the sign of their coefficient; `zoo` not even that.
        match infinity {
            Some(Constant::ComplexInfinity) => coeff = Number::one(),
            Some(_) if coeff.is_negative() => coeff = Number::minus_one(),
            Some(_) => coeff = Number::one(),
            None => {}
        }
        if !coeff.is_one()
            && let [Expr::Add(terms)] = out.as_slice()
        {
            return Expr::add(
                terms
                    .iter()
                    .map(|t| Expr::mul(vec![Expr::Number(coeff), t.clone()]))
                    .collect(),
            );
        }
        if !coeff.is_one() {
            out.push(Expr::Number(coeff));
        }
        out.sort_by(cmp_factors);
        match out.len() {
            0 => Expr::one(),
            1 => out.remove(0),
            _ => Expr::Mul(out),
        }
    }

    /// `-e`
    pub fn neg(e: Expr) -> Expr {
        Expr::mul(vec![Expr::minus_one(), e])
    }

    /// `a - b`
    pub fn sub(a: Expr, b: Expr) -> Expr {
        Expr::add(vec![a, Expr::neg(b)])
    }

    /// `a / b`
    pub fn div(a: Expr, b: Expr) -> Expr {
        Expr::mul(vec![a, Expr::recip(b)])
    }

    /// `1 / e`
    pub fn recip(e: Expr) -> Expr {
        Expr::pow(e, Expr::minus_one())
    }

    /// `sqrt(e)`
    pub fn sqrt(e: Expr) -> Expr {
        Expr::pow(e, Expr::frac(1, 2))
    }

    /// Canonical power.
    pub fn pow(base: Expr, exp: Expr) -> Expr {
        if exp.is_zero() {
            return Expr::one();
        }
        if exp.is_one() {
            return base;
        }
        if base.is_one() {
            return Expr::one();
        }
        if base.is_nan() || exp.is_nan() {
            return Expr::nan();
        }
        if base.as_infinity().is_some()
            && let Some(e) = exp.as_number()
        {
            if e.is_positive() {
                return base;
            }
            if e.is_negative() {
                return Expr::zero();
            }
        }

        let int_exp = exp.as_number().and_then(Number::as_integer);

        if let (Some(b), Some(e)) = (base.as_number(), exp.as_number()) {
            if let Some(e) = e.as_integer() {
                return b
                    .pow_int(e)
                    .map_or(Expr::Constant(Constant::ComplexInfinity), Expr::Number);
            }
            if let Some((p, q)) = e.as_rational()
                && let Some(root) = b.exact_root(q)
            {
                return Expr::pow(Expr::Number(root), Expr::int(p));
            }
            if b.is_zero() && e.is_positive() {
                return Expr::zero();
            }
            let inexact = matches!(b, Number::Float(_)) || matches!(e, Number::Float(_));
            if inexact && !b.is_negative() {
                return Expr::Number(Number::float(b.to_f64().powf(e.to_f64())));
            }
        }

        if base.is_zero() && exp.as_number().is_some_and(Number::is_positive) {
            return Expr::zero();
        }

        match (base, int_exp) {
            (Expr::Constant(Constant::E), _) => Expr::func(Func::Exp, exp),
            (Expr::Constant(Constant::I), Some(n)) => match n.rem_euclid(4) {
                0 => Expr::one(),
                1 => Expr::Constant(Constant::I),
                2 => Expr::minus_one(),
                _ => Expr::neg(Expr::Constant(Constant::I)),
            },
            (Expr::Pow(b, e), Some(_)) => Expr::pow(*b, Expr::mul(vec![*e, exp])),
            (Expr::Mul(fs), Some(_)) => Expr::mul(
                fs.into_iter()
                    .map(|f| Expr::pow(f, exp.clone()))
                    .collect(),
            ),
            (Expr::Func(Func::Exp, u), Some(_)) => Expr::func(Func::Exp, Expr::mul(vec![*u, exp])),
            (base, _) => Expr::Pow(Box::new(base), Box::new(exp)),
        }
    }

    /// Canonical elementary function application.
    pub fn func(f: Func, arg: Expr) -> Expr {
        if arg.is_nan() {
            return arg;
        }
        if let Some(v) = f.special_value(&arg) {
            return v;
        }
        if arg.could_extract_minus_sign() {
            match f.parity() {
                Parity::Odd => return Expr::neg(Expr::func(f, Expr::neg(arg))),
                Parity::Even => return Expr::func(f, Expr::neg(arg)),
                Parity::Neither => {}
            }
        }
        Expr::Func(f, Box::new(arg))
    }

    /// Undefined function application.
    pub fn applied(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Applied {
            name: name.into(),
            args,
        }
    }

    /// Unevaluated derivative; collapses to zero when `expr` does not depend on `var`.
    pub fn derivative(expr: Expr, var: Symbol) -> Expr {
        if !expr.depends_on(&var) {
            return Expr::zero();
        }
        Expr::Derivative {
            expr: Box::new(expr),
            var,
        }
    }

    /// `expr` at `var = point`; collapses when `var` does not occur.
    pub fn subs_at(expr: Expr, var: Symbol, point: Expr) -> Expr {
        if !expr.depends_on(&var) {
            return expr;
        }
        if point.as_symbol() == Some(&var) {
            return expr;
        }
        Expr::Subs {
            expr: Box::new(expr),
            var,
            point: Box::new(point),
        }
    }

    /// Unevaluated antiderivative.
    pub fn integral(integrand: Expr, var: Symbol) -> Expr {
        Expr::Integral {
            integrand: Box::new(integrand),
            var,
        }
    }

    /// Piecewise expression; collapses when the first branch is unconditional.
    pub fn piecewise(mut pieces: Vec<(Expr, Condition)>) -> Expr {
        if matches!(pieces.first(), Some((_, Condition::Otherwise))) {
            return pieces.remove(0).0;
        }
        Expr::Piecewise(pieces)
    }

    /// `(coefficient, rest)` with `self == coefficient * rest`.
    pub fn split_coefficient(&self) -> (Number, Expr) {
        match self {
            Expr::Number(n) => (*n, Expr::one()),
            Expr::Mul(fs) => match fs.as_slice() {
                [Expr::Number(n), single] => (*n, single.clone()),
                [Expr::Number(n), rest @ ..] => (*n, Expr::Mul(rest.to_vec())),
                _ => (Number::one(), self.clone()),
            },
            _ => (Number::one(), self.clone()),
        }
    }

    fn with_coefficient(coeff: Number, rest: Expr) -> Expr {
        if coeff.is_one() {
            return rest;
        }
        Expr::mul(vec![Expr::Number(coeff), rest])
    }

    /// `(base, exponent)` with `self == base ** exponent`.
    pub fn as_base_exp(&self) -> (Expr, Expr) {
        match self {
            Expr::Pow(b, e) => ((**b).clone(), (**e).clone()),
            Expr::Func(Func::Exp, u) => (Expr::Constant(Constant::E), (**u).clone()),
            other => (other.clone(), Expr::one()),
        }
    }

    /// `true` when the expression is written with a leading minus.
    pub fn could_extract_minus_sign(&self) -> bool {
        match self {
            Expr::Number(n) => n.is_negative(),
            Expr::Mul(fs) => matches!(fs.first(), Some(Expr::Number(n)) if n.is_negative()),
            _ => false,
        }
    }

    /// Free occurrence of `s`.
    pub fn depends_on(&self, s: &Symbol) -> bool {
        match self {
            Expr::Number(_) | Expr::Constant(_) => false,
            Expr::Symbol(x) => x == s,
            Expr::Add(xs) | Expr::Mul(xs) => xs.iter().any(|x| x.depends_on(s)),
            Expr::Pow(b, e) => b.depends_on(s) || e.depends_on(s),
            Expr::Func(_, u) => u.depends_on(s),
            Expr::Applied { args, .. } => args.iter().any(|a| a.depends_on(s)),
            Expr::Derivative { expr, var } => var == s || expr.depends_on(s),
            Expr::Subs { expr, var, point } => {
                point.depends_on(s) || (var != s && expr.depends_on(s))
            }
            Expr::Integral { integrand, var } => var != s && integrand.depends_on(s),
            Expr::Piecewise(pieces) => pieces.iter().any(|(e, c)| {
                e.depends_on(s)
                    || matches!(c, Condition::Equals(l, r) if l.depends_on(s) || r.depends_on(s))
            }),
        }
    }

    /// Every symbol occurring free.
    pub fn free_symbols(&self) -> BTreeSet<Symbol> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out.retain(|s| self.depends_on(s));
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<Symbol>) {
        match self {
            Expr::Symbol(s) => {
                out.insert(s.clone());
            }
            Expr::Derivative { expr, var } => {
                out.insert(var.clone());
                expr.collect_symbols(out);
            }
            Expr::Piecewise(pieces) => {
                for (e, c) in pieces {
                    e.collect_symbols(out);
                    if let Condition::Equals(l, r) = c {
                        l.collect_symbols(out);
                        r.collect_symbols(out);
                    }
                }
            }
            other => other.for_each_child(&mut |c| c.collect_symbols(out)),
        }
    }

    fn for_each_child(&self, f: &mut impl FnMut(&Expr)) {
        match self {
            Expr::Number(_) | Expr::Symbol(_) | Expr::Constant(_) => {}
            Expr::Add(xs) | Expr::Mul(xs) => xs.iter().for_each(&mut *f),
            Expr::Pow(b, e) => {
                f(b);
                f(e);
            }
            Expr::Func(_, u) => f(u),
            Expr::Applied { args, .. } => args.iter().for_each(&mut *f),
            Expr::Derivative { expr, .. } => f(expr),
            Expr::Subs { expr, point, .. } => {
                f(expr);
                f(point);
            }
            Expr::Integral { integrand, .. } => f(integrand),
            Expr::Piecewise(pieces) => {
                for (e, c) in pieces {
                    f(e);
                    if let Condition::Equals(l, r) = c {
                        f(l);
                        f(r);
                    }
                }
            }
        }
    }

    /// Rebuild with `f` applied to every direct child, re-canonicalizing on the way up.
    pub fn map_children(&self, f: &mut impl FnMut(&Expr) -> Expr) -> Expr {
        match self {
            Expr::Number(_) | Expr::Symbol(_) | Expr::Constant(_) => self.clone(),
            Expr::Add(xs) => Expr::add(xs.iter().map(&mut *f).collect()),
            Expr::Mul(xs) => Expr::mul(xs.iter().map(&mut *f).collect()),
            Expr::Pow(b, e) => {
                let b = f(b);
                Expr::pow(b, f(e))
            }
            Expr::Func(g, u) => Expr::func(*g, f(u)),
            Expr::Applied { name, args } => {
                Expr::applied(name.clone(), args.iter().map(&mut *f).collect())
            }
            Expr::Derivative { expr, var } => Expr::derivative(f(expr), var.clone()),
            Expr::Subs { expr, var, point } => {
                let e = f(expr);
                Expr::subs_at(e, var.clone(), f(point))
            }
            Expr::Integral { integrand, var } => Expr::integral(f(integrand), var.clone()),
            Expr::Piecewise(pieces) => Expr::piecewise(
                pieces
                    .iter()
                    .map(|(e, c)| {
                        let e = f(e);
                        let c = match c {
                            Condition::Equals(l, r) => {
                                let l = f(l);
                                Condition::Equals(l, f(r))
                            }
                            Condition::Otherwise => Condition::Otherwise,
                        };
                        (e, c)
                    })
                    .collect(),
            ),
        }
    }

    /// Distribute products over sums and expand small positive integer powers of sums.
    pub fn expand(&self) -> Expr {
        let e = self.map_children(&mut |c| c.expand());
        if let Expr::Mul(fs) = &e
            && fs.iter().any(|f| matches!(f, Expr::Add(_)))
        {
            return fs.iter().fold(Expr::one(), |acc, f| distribute(&acc, f));
        }
        if let Expr::Pow(b, ex) = &e
            && matches!(**b, Expr::Add(_))
            && let Some(n) = ex.as_number().and_then(Number::as_integer)
            && (2..=MAX_EXPAND_POWER).contains(&n)
        {
            return (0..n).fold(Expr::one(), |acc, _| distribute(&acc, b));
        }
        e
    }
}

const MAX_EXPAND_POWER: i64 = 12;

/// Combined value of infinite terms, or `None` when the sum is indeterminate.
fn sum_of_infinities(terms: &[(Constant, Number)]) -> Option<Expr> {
    match terms {
        [(Constant::ComplexInfinity, _)] => Some(Expr::Constant(Constant::ComplexInfinity)),
        _ if terms.iter().any(|(c, _)| *c == Constant::ComplexInfinity) => None,
        _ => {
            let negative = terms.iter().filter(|(_, k)| k.is_negative()).count();
            let oo = Expr::Constant(Constant::Infinity);
            if negative == 0 {
                Some(oo)
            } else if negative == terms.len() {
                Some(Expr::neg(oo))
            } else {
                None
            }
        }
    }
}

fn distribute(a: &Expr, b: &Expr) -> Expr {
    fn terms(x: &Expr) -> &[Expr] {
        match x {
            Expr::Add(ts) => ts,
            other => std::slice::from_ref(other),
        }
    }
    let mut out = Vec::new();
    for ta in terms(a) {
        for tb in terms(b) {
            out.push(Expr::mul(vec![ta.clone(), tb.clone()]));
        }
    }
    Expr::add(out)
}

#[cfg(test)]
#[path = "../../tests/unit/symbolic/expr.rs"]
mod tests;
