//! Reads generated array literals back and compares them with the source rows.

use seedlink::CodeEmitter;
use seedlink::config::CodeStyle;
use tables::{Row, Value};

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Array(Vec<(Key, Literal)>),
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Key {
    Index(i64),
    Name(String),
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) {
        assert!(self.eat(token), "expected {token:?} at {:?}", self.rest());
    }

    fn literal(&mut self) -> Literal {
        self.skip_ws();
        if self.eat("array (") {
            return self.array();
        }
        if self.rest().starts_with('\'') {
            return Literal::Str(self.string());
        }
        for (word, value) in [
            ("NULL", Literal::Null),
            ("true", Literal::Bool(true)),
            ("false", Literal::Bool(false)),
            ("-INF", Literal::Float(f64::NEG_INFINITY)),
            ("INF", Literal::Float(f64::INFINITY)),
        ] {
            if self.eat(word) {
                return value;
            }
        }
        self.number()
    }

    fn array(&mut self) -> Literal {
        let mut entries = Vec::new();
        while !self.eat(")") {
            let key = match self.literal() {
                Literal::Int(i) => Key::Index(i),
                Literal::Str(s) => Key::Name(s),
                other => panic!("bad key {other:?}"),
            };
            self.expect("=>");
            let value = self.literal();
            self.expect(",");
            entries.push((key, value));
        }
        Literal::Array(entries)
    }

    /// Single-quoted string, possibly spliced with `"\0"` parts.
    fn string(&mut self) -> String {
        let mut out = String::new();
        loop {
            self.expect("'");
            let mut chars = self.rest().char_indices();
            loop {
                let (i, c) = chars.next().expect("unterminated string");
                match c {
                    '\\' => {
                        let (_, escaped) = chars.next().expect("dangling escape");
                        match escaped {
                            '\\' | '\'' => out.push(escaped),
                            other => {
                                out.push('\\');
                                out.push(other);
                            }
                        }
                    }
                    '\'' => {
                        self.pos += i + 1;
                        break;
                    }
                    _ => out.push(c),
                }
            }
            let save = self.pos;
            if self.eat(".") && self.eat("\"\\0\"") && self.eat(".") {
                out.push('\0');
                continue;
            }
            self.pos = save;
            return out;
        }
    }

    fn number(&mut self) -> Literal {
        self.skip_ws();
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || "+-.".contains(c)))
            .unwrap_or(self.rest().len());
        let token = &self.rest()[..len];
        self.pos += len;
        if token.contains(['.', 'E']) {
            Literal::Float(token.parse().unwrap_or_else(|_| panic!("bad float {token}")))
        } else {
            Literal::Int(token.parse().unwrap_or_else(|_| panic!("bad int {token}")))
        }
    }
}

fn parse(src: &str) -> Literal {
    let mut parser = Parser::new(src);
    let literal = parser.literal();
    parser.skip_ws();
    assert!(parser.rest().is_empty(), "trailing input {:?}", parser.rest());
    literal
}

fn expected(rows: &[Row]) -> Literal {
    Literal::Array(
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let fields = row
                    .iter()
                    .map(|(column, value)| {
                        let value = match value {
                            Value::Null => Literal::Null,
                            Value::Bool(b) => Literal::Bool(*b),
                            Value::Int(n) => Literal::Int(*n),
                            Value::Float(f) => Literal::Float(*f),
                            Value::Text(s) => Literal::Str(s.clone()),
                        };
                        let key = match column.parse::<i64>() {
                            Ok(n) if n.to_string() == column => Key::Index(n),
                            _ => Key::Name(column.to_string()),
                        };
                        (key, value)
                    })
                    .collect();
                (Key::Index(i as i64), Literal::Array(fields))
            })
            .collect(),
    )
}

fn awkward_rows() -> Vec<Row> {
    vec![
        Row::new()
            .with("id", 1)
            .with("title", "it's (not) a \"test\"")
            .with("path", r"C:\temp\new\")
            .with("ratio", 0.1)
            .with("active", true),
        Row::new()
            .with("id", 2)
            .with("title", "line one\n    indented (line two\n)\nline three")
            .with("path", Value::Null)
            .with("ratio", 1.5e-7)
            .with("active", false),
        Row::new()
            .with("id", -3)
            .with("title", "nul\0byte")
            .with("path", "' => array (")
            .with("ratio", 1e25)
            .with("active", Value::Null),
        Row::new()
            .with("id", i64::MAX)
            .with("title", "")
            .with("path", "trailing backslash \\")
            .with("ratio", f64::NEG_INFINITY)
            .with("42", "numeric column"),
    ]
}

#[test]
fn test_indexed_literal_reads_back() {
    let rows = awkward_rows();
    let emitter = CodeEmitter::new(CodeStyle::default());

    let literal = emitter.render_literal(&rows);

    assert_eq!(parse(&literal), expected(&rows));
}

#[test]
fn test_multiline_values_survive_reindent() {
    let rows = awkward_rows();
    let emitter = CodeEmitter::new(CodeStyle::default()).with_depth(5);

    let literal = emitter.render_literal(&rows);

    assert!(literal.contains("\n    indented (line two\n)\nline three'"));
    assert_eq!(parse(&literal), expected(&rows));
}

#[test]
fn test_unindexed_literal_has_same_rows() {
    let rows = awkward_rows();
    let emitter = CodeEmitter::new(CodeStyle::default()).indexed(false);

    let literal = emitter.render_literal(&rows);
    let Literal::Array(expected) = expected(&rows) else {
        unreachable!();
    };

    let values: Vec<_> = expected.into_iter().map(|(_, v)| v).collect();
    assert_eq!(parse_list(&literal), values);
}

/// Parses a list literal whose elements carry no keys.
fn parse_list(src: &str) -> Vec<Literal> {
    let mut parser = Parser::new(src);
    parser.expect("array (");
    let mut values = Vec::new();
    while !parser.eat(")") {
        values.push(parser.literal());
        parser.expect(",");
    }
    values
}
