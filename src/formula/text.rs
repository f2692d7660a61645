//! The line format for clause sets: one clause per line, literals separated
//! by `,`, a leading `~` marking negation, and variables named `x<index>`.
//!
//! ```text
//! ~x42,x7,x99
//! x3
//! ```

use crate::formula::{Clause, Literal, Variable};
use std::fmt::{self, Display, Formatter};
use std::io::{BufRead, BufReader, Read, Write};
use thiserror::Error;

pub const NEGATION: char = '~';
pub const VARIABLE_PREFIX: char = 'x';
pub const SEPARATOR: char = ',';

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{}", VARIABLE_PREFIX, self.0)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(v) => write!(f, "{}", v),
            Literal::Negative(v) => write!(f, "{}{}", NEGATION, v),
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first_literal = true;
        for literal in self.literals() {
            if first_literal {
                first_literal = false;
            } else {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

/// Writes `clause` as a single LF-terminated line.
pub fn write_clause<W: Write + ?Sized>(sink: &mut W, clause: &Clause) -> std::io::Result<()> {
    writeln!(sink, "{}", clause)
}

pub fn parse<R: Read>(reader: R) -> Result<Vec<Clause>, TextParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let clause = parse_clause(&line)
            .map_err(|e| e.at_line(number + 1))?;
        clauses.push(clause);
    }
    Ok(clauses)
}

pub fn parse_clause(line: &str) -> Result<Clause, TextParseError> {
    if line.is_empty() {
        return Err(TextParseError::Format("empty clause".into()));
    }
    let literals = line
        .split(SEPARATOR)
        .map(parse_literal)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Clause::new(literals))
}

fn parse_literal(s: &str) -> Result<Literal, TextParseError> {
    let (negated, name) = match s.strip_prefix(NEGATION) {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let digits = name
        .strip_prefix(VARIABLE_PREFIX)
        .ok_or_else(|| TextParseError::Format(format!("literal {:?} is missing '{}'", s, VARIABLE_PREFIX)))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TextParseError::Format(format!("invalid variable index in {:?}", s)));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(TextParseError::Format(format!("leading zero in {:?}", s)));
    }
    let idx = digits
        .parse::<usize>()
        .map_err(|_| TextParseError::Format(format!("variable index out of range in {:?}", s)))?;

    Ok(Literal::new(Variable(idx), negated))
}

#[derive(Error, Debug)]
pub enum TextParseError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed clause: {0}")]
    Format(String),
}

impl TextParseError {
    fn at_line(self, line: usize) -> Self {
        match self {
            TextParseError::Format(msg) => TextParseError::Format(format!("line {}: {}", line, msg)),
            e => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{clause_strategy, n, p};
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn display_clause() {
        let c = Clause::new(vec![n(42), p(7), p(99)]);
        assert_eq!(c.to_string(), "~x42,x7,x99");
        assert_eq!(Clause::new(vec![p(0)]).to_string(), "x0");
    }

    #[test]
    fn write_clause_terminates_line() {
        let mut buf = vec![];
        write_clause(&mut buf, &Clause::new(vec![n(1), p(10)])).unwrap();
        write_clause(&mut buf, &Clause::new(vec![p(3)])).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "~x1,x10\nx3\n");
    }

    #[test]
    fn parse_basic() {
        let text = "~x42,x7,x99\nx0\n~x3\n";
        let clauses = parse(text.as_bytes()).expect("failed to parse");
        assert_eq!(clauses.len(), 3);
        assert_eq!(
            clauses[0].literals().cloned().collect::<Vec<_>>(),
            vec![n(42), p(7), p(99)]
        );
        assert_eq!(clauses[1].literals().cloned().collect::<Vec<_>>(), vec![p(0)]);
        assert_eq!(clauses[2].literals().cloned().collect::<Vec<_>>(), vec![n(3)]);
    }

    #[test]
    fn parse_rejects_malformed() {
        for line in &["", "x1,", ",x1", "y1", "~~x1", "x", "~x", "x01", "x-1", "x1 ", "X1", "x1;x2"] {
            assert!(
                matches!(parse_clause(line), Err(TextParseError::Format(_))),
                "accepted {:?}",
                line
            );
        }
    }

    #[test]
    fn parse_reports_line_number() {
        match parse("x1\nx2,\n".as_bytes()) {
            Err(e @ TextParseError::Format(_)) => assert!(e.to_string().starts_with("malformed clause: line 2:"), "{}", e),
            other => panic!("unexpected {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn reparse_preserves_literals(clause in clause_strategy(2000, 50)) {
            let line = clause.to_string();
            prop_assert_eq!(line.matches(NEGATION).count(), clause.literals().filter(|l| l.is_negated()).count());

            let parsed = parse_clause(&line).unwrap();
            let original = clause.literals().cloned().collect::<HashSet<_>>();
            let reparsed = parsed.literals().cloned().collect::<HashSet<_>>();
            prop_assert_eq!(original, reparsed);
        }
    }
}
