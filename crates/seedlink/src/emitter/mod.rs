//! Rendering of row sets into insert statements.
//!
//! - [`export`]: array-literal export of a slice of rows
//! - [`reindent`]: re-indentation of an exported literal
//! - [`CodeEmitter`]: chunking and insert statement assembly

pub mod export;
pub mod indent;

pub use export::export;
pub use indent::reindent;

use tables::{Row, RowSet};

use crate::config::CodeStyle;

/// Splits rows into consecutive groups of at most `chunk_size` rows.
pub fn chunk(rows: &RowSet, chunk_size: usize) -> Vec<&[Row]> {
    rows.chunks(chunk_size).collect()
}

/// Renders rows as insert statements for the seeder's `run` body.
#[derive(Debug, Clone)]
pub struct CodeEmitter {
    style: CodeStyle,
    depth: usize,
    indexed: bool,
}

impl CodeEmitter {
    /// Creates an emitter producing indexed literals nested three levels
    /// deep, matching the bundled stub.
    pub fn new(style: CodeStyle) -> Self {
        Self {
            style,
            depth: 3,
            indexed: true,
        }
    }

    /// Sets the nesting depth of the literal's elements.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Toggles positional keys on the outer row list.
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// Exports and re-indents one group of rows.
    pub fn render_literal(&self, rows: &[Row]) -> String {
        reindent(&export(rows, self.indexed), self.depth, &self.style.indent)
    }

    /// One statement per chunk, each on a new line two indents deep.
    /// No rows yields an empty string.
    pub fn insert_statements(&self, table: &str, rows: &RowSet, chunk_size: usize) -> String {
        let mut inserts = String::new();
        for group in chunk(rows, chunk_size) {
            inserts.push_str(&self.style.newline);
            inserts.push_str(&self.style.indents(2));
            inserts.push_str(&format!(
                "\\DB::table('{}')->insert({});",
                table,
                self.render_literal(group)
            ));
        }
        inserts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tables::Value;

    fn rows(n: usize) -> RowSet {
        RowSet::from_rows(
            (0..n)
                .map(|i| Row::new().with("id", i as i64).with("name", format!("user {i}")))
                .collect(),
        )
    }

    #[test]
    fn test_statement_count_is_ceil_of_chunks() {
        let emitter = CodeEmitter::new(CodeStyle::default());
        for (n, size, expected) in [(0, 500, 0), (1, 500, 1), (500, 500, 1), (501, 500, 2), (7, 3, 3)] {
            let out = emitter.insert_statements("users", &rows(n), size);
            assert_eq!(out.matches("\\DB::table('users')->insert(").count(), expected);
        }
    }

    #[test]
    fn test_chunks_keep_order() {
        let set = rows(7);
        let groups = chunk(&set, 3);
        let ids: Vec<_> = groups
            .iter()
            .flat_map(|g| g.iter())
            .filter_map(|r| r.get("id").cloned())
            .collect();
        let expected: Vec<_> = (0..7).map(Value::Int).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_rendered_statement_shape() {
        let emitter = CodeEmitter::new(CodeStyle::default());
        let set = RowSet::from_rows(vec![Row::new().with("id", 1).with("name", "ada")]);

        let out = emitter.insert_statements("users", &set, 500);

        let expected = [
            "",
            "        \\DB::table('users')->insert(array (",
            "            0 => ",
            "            array (",
            "                'id' => 1,",
            "                'name' => 'ada',",
            "            ),",
            "        ));",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_noindex_drops_outer_keys_only() {
        let emitter = CodeEmitter::new(CodeStyle::default()).indexed(false);
        let literal = emitter.render_literal(rows(3).rows());

        for key in ["0 =>", "1 =>", "2 =>"] {
            assert!(!literal.contains(key), "unexpected {key} in {literal}");
        }
        assert_eq!(literal.matches("'id' =>").count(), 3);
        assert_eq!(literal.matches("'name' =>").count(), 3);
    }

    #[test]
    fn test_render_is_deterministic() {
        let emitter = CodeEmitter::new(CodeStyle::default());
        let set = rows(20);
        assert_eq!(
            emitter.insert_statements("users", &set, 6),
            emitter.insert_statements("users", &set, 6)
        );
    }
}
