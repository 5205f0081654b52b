//! Grammar for typed answers.
//!
//! Accepts the notation students actually type: integers, decimals and
//! fractions (`0.25`, `1/4`), `pi` and `e`, powers with signed exponents
//! (`3^-2`), function calls (`sqrt(1/3)`), absolute-value bars (`|x|`),
//! Unicode roots (`√3`, `∛8`, `⁵√32`), superscript exponents (`x²`) and
//! implicit multiplication (`2sqrt(3)`, `2pi`).
//!
//! Decimals are converted to exact rationals while parsing, so `0.125`
//! and `1/8` produce the same value.

use drill_ast::{Constant, Context, Expr, ExprId};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::multispace0,
    combinator::map,
    multi::{fold_many0, separated_list0},
    sequence::{delimited, pair, preceded},
    IResult,
};
use num_bigint::BigInt;
use num_rational::BigRational;

use crate::error::ParseError;

/// Longest accepted input, in bytes. Every level of grammar nesting
/// consumes at least one byte, so this also caps the recursion depth of
/// the descent on input like an unclosed run of `(` or `-`.
pub const MAX_INPUT_LEN: usize = 128;

fn superscript_to_digit(c: char) -> Option<u32> {
    match c {
        '⁰' => Some(0),
        '¹' => Some(1),
        '²' => Some(2),
        '³' => Some(3),
        '⁴' => Some(4),
        '⁵' => Some(5),
        '⁶' => Some(6),
        '⁷' => Some(7),
        '⁸' => Some(8),
        '⁹' => Some(9),
        _ => None,
    }
}

/// Read a run of superscript digits, returning the value and the rest.
fn parse_superscript_number(input: &str) -> Option<(u64, &str)> {
    let mut value: u64 = 0;
    let mut byte_len = 0;
    for c in input.chars() {
        match superscript_to_digit(c) {
            Some(digit) => {
                value = value * 10 + u64::from(digit);
                byte_len += c.len_utf8();
            }
            None => break,
        }
    }
    if byte_len > 0 {
        Some((value, &input[byte_len..]))
    } else {
        None
    }
}

/// Recognize a root prefix: `√`, `∛`, `∜`, or `ⁿ√` for arbitrary `n`.
fn parse_unicode_root_prefix(input: &str) -> Option<(u64, &str)> {
    if let Some(rest) = input.strip_prefix('∛') {
        return Some((3, rest));
    }
    if let Some(rest) = input.strip_prefix('∜') {
        return Some((4, rest));
    }
    if let Some(rest) = input.strip_prefix('√') {
        return Some((2, rest));
    }
    if let Some((index, after_digits)) = parse_superscript_number(input) {
        if let Some(rest) = after_digits.strip_prefix('√') {
            return Some((index, rest));
        }
    }
    None
}

// Intermediate tree built during parsing, lowered into the arena at the end.
#[derive(Debug, Clone)]
enum ParseNode {
    Number(BigRational),
    Constant(Constant),
    Variable(String),
    Add(Box<ParseNode>, Box<ParseNode>),
    Sub(Box<ParseNode>, Box<ParseNode>),
    Mul(Box<ParseNode>, Box<ParseNode>),
    Div(Box<ParseNode>, Box<ParseNode>),
    Pow(Box<ParseNode>, Box<ParseNode>),
    Neg(Box<ParseNode>),
    Function(String, Vec<ParseNode>),
}

impl ParseNode {
    fn lower(self, ctx: &mut Context) -> ExprId {
        match self {
            ParseNode::Number(n) => ctx.add(Expr::Number(n)),
            ParseNode::Constant(c) => ctx.add(Expr::Constant(c)),
            ParseNode::Variable(s) => ctx.add(Expr::Variable(s)),
            ParseNode::Add(l, r) => {
                let lid = l.lower(ctx);
                let rid = r.lower(ctx);
                ctx.add(Expr::Add(lid, rid))
            }
            ParseNode::Sub(l, r) => {
                let lid = l.lower(ctx);
                let rid = r.lower(ctx);
                ctx.add(Expr::Sub(lid, rid))
            }
            ParseNode::Mul(l, r) => {
                let lid = l.lower(ctx);
                let rid = r.lower(ctx);
                ctx.add(Expr::Mul(lid, rid))
            }
            ParseNode::Div(l, r) => {
                let lid = l.lower(ctx);
                let rid = r.lower(ctx);
                ctx.add(Expr::Div(lid, rid))
            }
            ParseNode::Pow(b, e) => {
                let bid = b.lower(ctx);
                let eid = e.lower(ctx);
                ctx.add(Expr::Pow(bid, eid))
            }
            ParseNode::Neg(e) => {
                let eid = e.lower(ctx);
                ctx.add(Expr::Neg(eid))
            }
            ParseNode::Function(name, args) => {
                let arg_ids = args.into_iter().map(|a| a.lower(ctx)).collect();
                ctx.add(Expr::Function(name, arg_ids))
            }
        }
    }
}

/// Convert `"A.B"` to the exact rational `(A*10^k + B) / 10^k` where
/// `k = len(B)`. Either part may be empty (`.5`, `8.`).
fn decimal_to_rational(integer_part: &str, fractional_part: &str) -> BigRational {
    let k = fractional_part.len();
    if k == 0 {
        let n: BigInt = integer_part.parse().unwrap_or_default();
        return BigRational::from_integer(n);
    }

    let ten = BigInt::from(10);
    let mut denominator = BigInt::from(1);
    for _ in 0..k {
        denominator *= &ten;
    }

    let int_val: BigInt = if integer_part.is_empty() {
        BigInt::from(0)
    } else {
        integer_part.parse().unwrap_or_default()
    };
    let frac_val: BigInt = fractional_part.parse().unwrap_or_default();

    let numerator = int_val * &denominator + frac_val;
    BigRational::new(numerator, denominator)
}

// Numeric literals: 123, 8.2, .5, 8.
fn parse_number(input: &str) -> IResult<&str, ParseNode> {
    use nom::bytes::complete::take_while;
    use nom::combinator::opt;

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    let (remaining, (int_part, maybe_frac)) = pair(
        take_while(is_digit),
        opt(pair(tag("."), take_while(is_digit))),
    )(input)?;

    let (int_str, frac_str) = match maybe_frac {
        Some((_, frac)) => (int_part, frac),
        None => (int_part, ""),
    };

    // A bare "." or no digits at all is not a number.
    if int_str.is_empty() && frac_str.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }

    let rational = decimal_to_rational(int_str, frac_str);
    Ok((remaining, ParseNode::Number(rational)))
}

// Constants need a word boundary so 'e' does not eat the head of 'ex'
// and 'pi' does not eat the head of 'pivot'.
fn parse_constant(input: &str) -> IResult<&str, ParseNode> {
    fn is_word_boundary(remaining: &str) -> bool {
        remaining
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric() && c != '_')
    }

    if let Some(rest) = input.strip_prefix("pi") {
        if is_word_boundary(rest) {
            return Ok((rest, ParseNode::Constant(Constant::Pi)));
        }
    }
    if let Some(rest) = input.strip_prefix('e') {
        if is_word_boundary(rest) {
            return Ok((rest, ParseNode::Constant(Constant::E)));
        }
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Tag,
    )))
}

// Identifiers: letter or underscore, then letters, digits, underscores.
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    let mut chars = input.chars();
    let first = chars.next();
    if !matches!(first, Some(c) if c.is_ascii_alphabetic() || c == '_') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Alpha,
        )));
    }

    let mut len = 1;
    for c in chars {
        if c.is_ascii_alphanumeric() || c == '_' {
            len += c.len_utf8();
        } else {
            break;
        }
    }

    Ok((&input[len..], &input[..len]))
}

fn parse_variable(input: &str) -> IResult<&str, ParseNode> {
    map(parse_identifier, |s: &str| {
        ParseNode::Variable(s.to_string())
    })(input)
}

fn parse_parens(input: &str) -> IResult<&str, ParseNode> {
    delimited(
        preceded(multispace0, tag("(")),
        parse_expr,
        preceded(multispace0, tag(")")),
    )(input)
}

fn parse_function(input: &str) -> IResult<&str, ParseNode> {
    let (input, name) = parse_identifier(input)?;
    let (input, _) = preceded(multispace0, tag("("))(input)?;
    let (input, args) = separated_list0(preceded(multispace0, tag(",")), parse_expr)(input)?;
    let (input, _) = preceded(multispace0, tag(")"))(input)?;
    Ok((input, ParseNode::Function(name.to_string(), args)))
}

fn parse_abs(input: &str) -> IResult<&str, ParseNode> {
    delimited(
        preceded(multispace0, tag("|")),
        parse_expr,
        preceded(multispace0, tag("|")),
    )(input)
    .map(|(next_input, expr)| {
        (
            next_input,
            ParseNode::Function("abs".to_string(), vec![expr]),
        )
    })
}

// Unicode roots: √(x), ∛8, ³√(x+1), ⁵√32. Lowered to sqrt(arg, index).
fn parse_unicode_root(input: &str) -> IResult<&str, ParseNode> {
    let input = input.trim_start();

    let (index, after_prefix) = parse_unicode_root_prefix(input).ok_or_else(|| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag))
    })?;

    // Parenthesized argument first, then a tight factor like √x or ∛8.
    let (remaining, arg) = alt((parse_parens, parse_postfix))(after_prefix)?;

    let index_node = ParseNode::Number(BigRational::from_integer(BigInt::from(index)));
    Ok((
        remaining,
        ParseNode::Function("sqrt".to_string(), vec![arg, index_node]),
    ))
}

fn parse_atom(input: &str) -> IResult<&str, ParseNode> {
    preceded(
        multispace0,
        alt((
            parse_unicode_root,
            parse_number,
            parse_function,
            parse_constant,
            parse_variable,
            parse_parens,
            parse_abs,
        )),
    )(input)
}

// Superscript exponents bind tighter than anything else: x² → x^2.
// No whitespace allowed, the superscript is attached to its base.
fn parse_postfix(input: &str) -> IResult<&str, ParseNode> {
    let (input, atom) = parse_atom(input)?;

    if let Some((exp_value, remaining)) = parse_superscript_number(input) {
        let exp_node = ParseNode::Number(BigRational::from_integer(BigInt::from(exp_value)));
        return Ok((
            remaining,
            ParseNode::Pow(Box::new(atom), Box::new(exp_node)),
        ));
    }

    Ok((input, atom))
}

// Power is right associative: 2^3^2 = 2^(3^2).
fn parse_power(input: &str) -> IResult<&str, ParseNode> {
    let (input, base) = parse_postfix(input)?;

    let try_caret = preceded::<_, _, _, nom::error::Error<&str>, _, _>(
        multispace0::<_, nom::error::Error<&str>>,
        tag::<_, _, nom::error::Error<&str>>("^"),
    )(input);

    if let Ok((input, _)) = try_caret {
        let (input, exp) = parse_power_exponent(input)?;
        Ok((input, ParseNode::Pow(Box::new(base), Box::new(exp))))
    } else {
        Ok((input, base))
    }
}

// Exponents allow a sign prefix (3^-2) and recurse for chained powers.
fn parse_power_exponent(input: &str) -> IResult<&str, ParseNode> {
    preceded(
        multispace0,
        alt((
            map(pair(tag("-"), parse_power_exponent), |(_, expr)| {
                ParseNode::Neg(Box::new(expr))
            }),
            map(pair(tag("+"), parse_power_exponent), |(_, expr)| expr),
            parse_power,
        )),
    )(input)
}

fn parse_unary(input: &str) -> IResult<&str, ParseNode> {
    alt((
        map(
            pair(preceded(multispace0, tag("-")), parse_unary),
            |(_, expr)| ParseNode::Neg(Box::new(expr)),
        ),
        parse_power,
    ))(input)
}

// Terms: explicit * · / operators, then implicit multiplication.
fn parse_term(input: &str) -> IResult<&str, ParseNode> {
    let (input, init) = parse_unary(input)?;

    let (input, result) = fold_many0(
        pair(
            preceded(multispace0, alt((tag("*"), tag("·"), tag("/")))),
            parse_unary,
        ),
        move || init.clone(),
        |acc, (op, val)| match op {
            "*" | "·" => ParseNode::Mul(Box::new(acc), Box::new(val)),
            "/" => ParseNode::Div(Box::new(acc), Box::new(val)),
            _ => unreachable!(),
        },
    )(input)?;

    parse_implicit_mul_chain(input, result)
}

// Implicit multiplication: 2x, 2pi, 2sqrt(3), 3(x+1), 2√3.
// Only fires with no whitespace between the factors.
fn parse_implicit_mul_chain(input: &str, acc: ParseNode) -> IResult<&str, ParseNode> {
    let chainable = matches!(
        input.chars().next(),
        Some(c) if c.is_ascii_alphabetic()
            || c == '_'
            || c == '('
            || c == '√'
            || c == '∛'
            || c == '∜'
    );

    if chainable && can_implicit_mul(&acc) {
        if let Ok((remaining, next_factor)) = parse_unary(input) {
            let new_acc = ParseNode::Mul(Box::new(acc), Box::new(next_factor));
            return parse_implicit_mul_chain(remaining, new_acc);
        }
    }
    Ok((input, acc))
}

// A factor can only be glued onto a literal, a power, or the tail of a
// running product, so 'x y' stays two tokens while '2x' is a product.
fn can_implicit_mul(node: &ParseNode) -> bool {
    match node {
        ParseNode::Number(_) => true,
        ParseNode::Pow(_, _) => true,
        ParseNode::Mul(_, right) | ParseNode::Div(_, right) => can_implicit_mul(right),
        _ => false,
    }
}

fn parse_expr(input: &str) -> IResult<&str, ParseNode> {
    let (input, init) = parse_term(input)?;
    fold_many0(
        pair(preceded(multispace0, alt((tag("+"), tag("-")))), parse_term),
        move || init.clone(),
        |acc, (op, val)| match op {
            "+" => ParseNode::Add(Box::new(acc), Box::new(val)),
            "-" => ParseNode::Sub(Box::new(acc), Box::new(val)),
            _ => unreachable!(),
        },
    )(input)
}

/// Parse one expression, requiring the whole input to be consumed.
/// Input longer than [`MAX_INPUT_LEN`] bytes is rejected before the
/// grammar runs.
pub fn parse(input: &str, ctx: &mut Context) -> Result<ExprId, ParseError> {
    if input.len() > MAX_INPUT_LEN {
        return Err(ParseError::InputTooLong(input.len()));
    }

    let (remaining, expr_node) =
        parse_expr(input).map_err(|e| ParseError::NomError(format!("{}", e)))?;

    let remaining = remaining.trim();
    if !remaining.is_empty() {
        return Err(ParseError::UnconsumedInput(remaining.to_string()));
    }

    Ok(expr_node.lower(ctx))
}
