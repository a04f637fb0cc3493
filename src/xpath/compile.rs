//! Compiling segment texts into executable steps.
//!
//! Segment boundaries come from [`parse_segments`](super::segments::parse_segments)
//! and predicate boundaries from [`predicate_groups`]; this module only parses
//! what is inside them.

use super::ast::{NameTest, Operand, PathExpression, Predicate, Step};
use super::error::EvalError;
use super::segments::{predicate_groups, ParsedPath};

/// Compiles a split path into a `PathExpression`.
pub fn compile(parsed: &ParsedPath) -> Result<PathExpression, EvalError> {
    let mut steps = Vec::with_capacity(parsed.segments.len());
    let mut attribute = None;
    let last = parsed.segments.len().saturating_sub(1);

    for (index, segment) in parsed.segments.iter().enumerate() {
        if let Some(name) = segment.strip_prefix('@') {
            if index != last {
                return Err(EvalError::MisplacedAttribute {
                    segment: segment.clone(),
                });
            }
            if !is_name(name) {
                return Err(EvalError::InvalidNameTest {
                    segment: segment.clone(),
                });
            }
            attribute = Some(name.to_string());
        } else {
            steps.push(compile_step(segment)?);
        }
    }

    Ok(PathExpression {
        origin: parsed.origin,
        steps,
        attribute,
    })
}

/// Compiles one `tag[pred]…` segment.
pub fn compile_step(segment: &str) -> Result<Step, EvalError> {
    let groups = predicate_groups(segment).map_err(|e| EvalError::InvalidPredicate {
        segment: segment.to_string(),
        message: e.to_string(),
    })?;

    let head_end = groups.first().map(|g| g.start).unwrap_or(segment.len());
    let head = segment[..head_end].trim();
    let test = match head {
        "*" => NameTest::Any,
        name if is_name(name) => NameTest::Tag(name.to_ascii_lowercase()),
        _ => {
            return Err(EvalError::InvalidNameTest {
                segment: segment.to_string(),
            })
        }
    };

    let mut predicates = Vec::with_capacity(groups.len());
    let mut cursor = head_end;
    for group in &groups {
        if !segment[cursor..group.start].trim().is_empty() {
            return Err(invalid(segment, "unexpected text between predicates"));
        }
        let inner = &segment[group.start + 1..group.end - 1];
        predicates.push(PredicateParser::parse(inner, segment)?);
        cursor = group.end;
    }
    if !segment[cursor..].trim().is_empty() {
        return Err(invalid(segment, "unexpected text after predicates"));
    }

    Ok(Step { test, predicates })
}

fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_alphanumeric() || matches!(ch, '-' | '_' | ':' | '.'))
}

fn invalid(segment: &str, message: &str) -> EvalError {
    EvalError::InvalidPredicate {
        segment: segment.to_string(),
        message: message.to_string(),
    }
}

/// Recursive-descent parser for the text between `[` and `]`.
struct PredicateParser<'a> {
    input: Vec<char>,
    position: usize,
    segment: &'a str,
}

impl<'a> PredicateParser<'a> {
    fn parse(inner: &str, segment: &'a str) -> Result<Predicate, EvalError> {
        let trimmed = inner.trim();
        if trimmed.is_empty() {
            return Err(invalid(segment, "empty predicate"));
        }
        if trimmed.chars().all(|ch| ch.is_ascii_digit()) {
            return match trimmed.parse::<usize>() {
                Ok(0) => Err(invalid(segment, "positions start at 1")),
                Ok(n) => Ok(Predicate::Position(n)),
                Err(_) => Err(invalid(segment, "position out of range")),
            };
        }

        let mut parser = PredicateParser {
            input: trimmed.chars().collect(),
            position: 0,
            segment,
        };
        let predicate = parser.parse_or()?;
        parser.skip_whitespace();
        if let Some(ch) = parser.peek() {
            return Err(parser.error(&format!("unexpected '{}'", ch)));
        }
        Ok(predicate)
    }

    fn error(&self, message: &str) -> EvalError {
        invalid(self.segment, message)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.position += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), EvalError> {
        self.skip_whitespace();
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(self.error(&format!("expected '{}', found '{}'", expected, ch))),
            None => Err(self.error(&format!("expected '{}'", expected))),
        }
    }

    /// Consumes `keyword` if it appears next as a whole word.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let end = self.position + keyword.chars().count();
        if end > self.input.len() {
            return false;
        }
        let candidate: String = self.input[self.position..end].iter().collect();
        let boundary = self
            .input
            .get(end)
            .map_or(true, |ch| !(ch.is_alphanumeric() || *ch == '-' || *ch == '_'));
        if candidate == keyword && boundary {
            self.position = end;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Result<Predicate, EvalError> {
        let mut left = self.parse_and()?;
        while self.eat_keyword("or") {
            let right = self.parse_and()?;
            left = Predicate::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Predicate, EvalError> {
        let mut left = self.parse_primary()?;
        while self.eat_keyword("and") {
            let right = self.parse_primary()?;
            left = Predicate::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Predicate, EvalError> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => {
                self.next();
                let inner = self.parse_or()?;
                self.expect(')')?;
                Ok(inner)
            }
            Some('@') => {
                self.next();
                let name = self.parse_name()?;
                match self.parse_comparison() {
                    Some(negated) => {
                        let value = self.parse_literal()?;
                        Ok(Predicate::AttributeEquals {
                            name,
                            value,
                            negated,
                        })
                    }
                    None => Ok(Predicate::HasAttribute(name)),
                }
            }
            Some(ch) if ch.is_ascii_digit() => {
                Err(self.error("numeric predicates must stand alone"))
            }
            Some(ch) if ch.is_alphabetic() => self.parse_function(),
            Some(ch) => Err(self.error(&format!("unexpected '{}'", ch))),
            None => Err(self.error("unexpected end of predicate")),
        }
    }

    fn parse_function(&mut self) -> Result<Predicate, EvalError> {
        let name = self.parse_name()?;
        self.expect('(')?;
        match name.as_str() {
            "not" => {
                let inner = self.parse_or()?;
                self.expect(')')?;
                Ok(Predicate::Not(Box::new(inner)))
            }
            "last" => {
                self.expect(')')?;
                Ok(Predicate::Last)
            }
            "position" => {
                self.expect(')')?;
                self.skip_whitespace();
                if self.parse_comparison() != Some(false) {
                    return Err(self.error("position() must be compared with '='"));
                }
                let n = self.parse_number()?;
                if n == 0 {
                    return Err(self.error("positions start at 1"));
                }
                Ok(Predicate::Position(n))
            }
            "text" => {
                self.expect(')')?;
                let negated = self
                    .parse_comparison()
                    .ok_or_else(|| self.error("text() must be compared with a literal"))?;
                let value = self.parse_literal()?;
                Ok(Predicate::TextEquals { value, negated })
            }
            "contains" | "starts-with" => {
                let operand = self.parse_operand()?;
                self.expect(',')?;
                let literal = self.parse_literal()?;
                self.expect(')')?;
                Ok(if name == "contains" {
                    Predicate::Contains {
                        operand,
                        needle: literal,
                    }
                } else {
                    Predicate::StartsWith {
                        operand,
                        prefix: literal,
                    }
                })
            }
            _ => Err(EvalError::UnsupportedFunction { name }),
        }
    }

    fn parse_operand(&mut self) -> Result<Operand, EvalError> {
        self.skip_whitespace();
        match self.peek() {
            Some('@') => {
                self.next();
                Ok(Operand::Attribute(self.parse_name()?))
            }
            Some('.') => {
                self.next();
                Ok(Operand::Context)
            }
            Some(_) => {
                let name = self.parse_name()?;
                if name != "text" {
                    return Err(EvalError::UnsupportedFunction { name });
                }
                self.expect('(')?;
                self.expect(')')?;
                Ok(Operand::Text)
            }
            None => Err(self.error("expected an argument")),
        }
    }

    /// Parses `=` or `!=`, returning whether the comparison is negated.
    fn parse_comparison(&mut self) -> Option<bool> {
        self.skip_whitespace();
        match self.peek() {
            Some('=') => {
                self.next();
                Some(false)
            }
            Some('!') if self.input.get(self.position + 1) == Some(&'=') => {
                self.position += 2;
                Some(true)
            }
            _ => None,
        }
    }

    fn parse_name(&mut self) -> Result<String, EvalError> {
        self.skip_whitespace();
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || matches!(ch, '-' | '_' | ':' | '.') {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            Err(self.error("expected a name"))
        } else {
            Ok(name)
        }
    }

    fn parse_literal(&mut self) -> Result<String, EvalError> {
        self.skip_whitespace();
        let quote = match self.next() {
            Some(ch @ ('"' | '\'')) => ch,
            _ => return Err(self.error("expected a quoted string")),
        };
        let mut value = String::new();
        loop {
            match self.next() {
                Some(ch) if ch == quote => return Ok(value),
                Some(ch) => value.push(ch),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_number(&mut self) -> Result<usize, EvalError> {
        self.skip_whitespace();
        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.next();
            } else {
                break;
            }
        }
        digits
            .parse::<usize>()
            .map_err(|_| self.error("expected a number"))
    }
}
