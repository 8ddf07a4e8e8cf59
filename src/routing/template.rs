//! Path templates.
//!
//! A template such as `/files/{name}` is compiled into literal and variable
//! pieces. Matching is anchored at both ends; each variable captures one or
//! more characters greedily and may span `/`.

use std::collections::HashMap;

use crate::routing::RouteError;

/// Captured path variables, keyed by placeholder name.
pub type PathParams = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Variable(String),
}

/// A compiled path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    pieces: Vec<Piece>,
    variables: Vec<String>,
}

impl PathTemplate {
    /// Compiles `template`.
    ///
    /// `{name}` is a placeholder when `name` is non-empty ASCII letters;
    /// any other brace group is literal text.
    pub fn parse(template: &str) -> Result<Self, RouteError> {
        if !template.starts_with('/') {
            return Err(RouteError::InvalidTemplate {
                template: template.to_string(),
                reason: "must start with '/'".to_string(),
            });
        }

        let mut pieces = Vec::new();
        let mut variables: Vec<String> = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let name = after
                .find('}')
                .map(|close| &after[..close])
                .filter(|name| !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()));

            let Some(name) = name else {
                literal.push_str(&rest[..=open]);
                rest = after;
                continue;
            };

            if variables.iter().any(|v| v == name) {
                return Err(RouteError::InvalidTemplate {
                    template: template.to_string(),
                    reason: format!("variable {{{name}}} appears more than once"),
                });
            }

            literal.push_str(&rest[..open]);
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Variable(name.to_string()));
            variables.push(name.to_string());

            rest = &after[name.len() + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self {
            raw: template.to_string(),
            pieces,
            variables,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in template order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Matches the whole of `path`, returning the captured variables.
    ///
    /// A table of which pieces can match which suffixes of `path` is filled
    /// from the right, then each variable takes the longest capture the table
    /// allows. No backtracking, so the cost stays proportional to the path
    /// length times the template length.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let table = SuffixTable::build(&self.pieces, path);
        if !table.accepts(0, 0) {
            return None;
        }

        let mut params = PathParams::with_capacity(self.variables.len());
        let mut pos = 0;

        for (i, piece) in self.pieces.iter().enumerate() {
            match piece {
                Piece::Literal(lit) => pos += lit.len(),
                Piece::Variable(name) => {
                    let end = (pos + 1..=path.len())
                        .rev()
                        .find(|&end| table.accepts(i + 1, end))?;
                    params.insert(name.clone(), path[pos..end].to_string());
                    pos = end;
                }
            }
        }

        Some(params)
    }
}

/// `rows[i][p]` is true when `pieces[i..]` matches `path[p..]` exactly.
struct SuffixTable {
    rows: Vec<Vec<bool>>,
}

impl SuffixTable {
    fn build(pieces: &[Piece], path: &str) -> Self {
        let len = path.len();
        let bytes = path.as_bytes();

        let mut rows = vec![vec![false; len + 1]; pieces.len() + 1];
        rows[pieces.len()][len] = true;

        for (i, piece) in pieces.iter().enumerate().rev() {
            let (row, next) = rows.split_at_mut(i + 1);
            let (row, next) = (&mut row[i], &next[0]);

            match piece {
                Piece::Literal(lit) => {
                    let lit = lit.as_bytes();
                    let Some(last) = len.checked_sub(lit.len()) else {
                        continue;
                    };
                    for p in 0..=last {
                        row[p] = next[p + lit.len()]
                            && path.is_char_boundary(p)
                            && bytes[p..].starts_with(lit);
                    }
                }
                Piece::Variable(_) => {
                    // At least one character: some boundary strictly after `p`.
                    let mut reachable = false;
                    for p in (0..len).rev() {
                        reachable |= next[p + 1];
                        row[p] = reachable && path.is_char_boundary(p);
                    }
                }
            }
        }

        Self { rows }
    }

    fn accepts(&self, piece: usize, pos: usize) -> bool {
        self.rows[piece][pos]
    }
}
