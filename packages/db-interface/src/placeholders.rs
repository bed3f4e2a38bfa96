//! Positional `?` placeholder handling.
//!
//! Question marks inside single-quoted literals, double-quoted identifiers,
//! `--` line comments and `/* */` block comments are not placeholders.

#[derive(Clone, Copy)]
enum Scan {
    Code,
    Quoted(char),
    LineComment,
    BlockComment,
}

/// Splits `sql` at every placeholder, so `n` placeholders yield `n + 1` pieces.
fn split(sql: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut state = Scan::Code;
    let mut start = 0;
    let mut chars = sql.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        state = match (state, c, next) {
            (Scan::Code, '\'' | '"', _) => Scan::Quoted(c),
            (Scan::Code, '-', Some('-')) => {
                chars.next();
                Scan::LineComment
            }
            (Scan::Code, '/', Some('*')) => {
                chars.next();
                Scan::BlockComment
            }
            (Scan::Code, '?', _) => {
                pieces.push(&sql[start..i]);
                start = i + 1;
                Scan::Code
            }
            (Scan::Quoted(open), c, _) if c == open => Scan::Code,
            (Scan::LineComment, '\n', _) => Scan::Code,
            (Scan::BlockComment, '*', Some('/')) => {
                chars.next();
                Scan::Code
            }
            (state, _, _) => state,
        };
    }
    pieces.push(&sql[start..]);
    pieces
}

pub fn count_placeholders(sql: &str) -> usize {
    split(sql).len() - 1
}

/// Rewrites `?` placeholders as `$1`, `$2`, ... for Postgres.
pub fn number_placeholders(sql: &str) -> String {
    let pieces = split(sql);
    let mut numbered = String::with_capacity(sql.len() + pieces.len() * 2);
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            numbered.push('$');
            numbered.push_str(&i.to_string());
        }
        numbered.push_str(piece);
    }
    numbered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_placeholders() {
        assert_eq!(count_placeholders("select count(*) from users "), 0);
        assert_eq!(
            count_placeholders("select count(*) from users where id = ?"),
            1
        );
        assert_eq!(
            count_placeholders("where status = ? and created_at > ?"),
            2
        );
    }

    #[test]
    fn test_quoted_question_marks_are_ignored() {
        assert_eq!(count_placeholders("where note = 'why?' and id = ?"), 1);
        assert_eq!(count_placeholders(r#"where "odd?col" = ?"#), 1);
        assert_eq!(count_placeholders("where note = 'it''s ?' and id = ?"), 1);
    }

    #[test]
    fn test_commented_question_marks_are_ignored() {
        assert_eq!(count_placeholders("where id = ? -- why?\n and name = ?"), 2);
        assert_eq!(count_placeholders("where id = ? -- trailing ?"), 1);
        assert_eq!(count_placeholders("where /* maybe? */ id = ?"), 1);
        assert_eq!(count_placeholders("where id = ? /* unterminated ?"), 1);
        assert_eq!(count_placeholders("where note = '--' and id = ?"), 1);
        assert_eq!(count_placeholders("where a = 1 - ? and b = 2/?"), 2);
    }

    #[test]
    fn test_number_placeholders_skips_comments() {
        assert_eq!(
            number_placeholders("where status = ? /* ? */ and id = ? -- ?\n"),
            "where status = $1 /* ? */ and id = $2 -- ?\n"
        );
    }

    #[test]
    fn test_number_placeholders() {
        assert_eq!(
            number_placeholders("where status = ? and note <> '?' and id = ?"),
            "where status = $1 and note <> '?' and id = $2"
        );
        assert_eq!(number_placeholders("where 1 = 1"), "where 1 = 1");
        assert_eq!(number_placeholders("?"), "$1");
    }
}
