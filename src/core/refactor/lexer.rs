//! C/C++ source lexer.
//!
//! Splits file content into a lossless token stream: concatenating every
//! token's text reproduces the input byte-for-byte. Only `Identifier` tokens
//! are candidates for renaming; string/char literals, header names, comments
//! and preprocessor directive names are carried through untouched.

/// Token classification for rewriting purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Identifier,
    /// String, character, raw-string, numeric or `#include <...>` literal.
    Literal,
    /// `// ...` or `/* ... */`.
    Comment,
    /// Operators, delimiters and preprocessor directive names.
    Punctuation,
    Whitespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Where we are inside a preprocessor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    None,
    /// Saw `#` at the start of a line.
    Hash,
    /// Saw `#include`, so `<...>` is a header name.
    Include,
}

const STRING_PREFIXES: &[&str] = &["L", "u", "U", "u8"];
const RAW_STRING_PREFIXES: &[&str] = &["R", "LR", "uR", "UR", "u8R"];
const INCLUDE_DIRECTIVES: &[&str] = &["include", "include_next", "import"];
const MAX_RAW_DELIMITER: usize = 16;

pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Split `src` into tokens.
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut directive = Directive::None;
    let mut line_start = true;

    while pos < src.len() {
        let rest = &src[pos..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        let (kind, len) = if c.is_whitespace() {
            (TokenKind::Whitespace, scan_while(rest, char::is_whitespace))
        } else if rest.starts_with("//") {
            (TokenKind::Comment, scan_line_comment(rest))
        } else if rest.starts_with("/*") {
            (TokenKind::Comment, scan_block_comment(rest))
        } else if c == '#' && line_start {
            (TokenKind::Punctuation, 1)
        } else if directive == Directive::Include && c == '<' {
            (TokenKind::Literal, scan_header_name(rest))
        } else if is_ident_start(c) {
            let ident_len = scan_while(rest, is_ident_continue);
            let ident = &rest[..ident_len];
            if directive == Directive::Hash {
                (TokenKind::Punctuation, ident_len)
            } else if let Some(literal_len) = scan_prefixed_literal(rest, ident) {
                (TokenKind::Literal, literal_len)
            } else {
                (TokenKind::Identifier, ident_len)
            }
        } else if c.is_ascii_digit() || (c == '.' && starts_with_digit(&rest[1..])) {
            (TokenKind::Literal, scan_number(rest))
        } else if c == '"' || c == '\'' {
            (TokenKind::Literal, scan_quoted(rest, c))
        } else {
            (TokenKind::Punctuation, c.len_utf8())
        };

        let text = &src[pos..pos + len];

        directive = match (directive, kind) {
            (_, TokenKind::Whitespace) if text.contains('\n') => Directive::None,
            (d, TokenKind::Whitespace) | (d, TokenKind::Comment) => d,
            (Directive::None, TokenKind::Punctuation) if text == "#" && line_start => {
                Directive::Hash
            }
            (Directive::Hash, TokenKind::Punctuation) if INCLUDE_DIRECTIVES.contains(&text) => {
                Directive::Include
            }
            _ => Directive::None,
        };

        line_start = match kind {
            TokenKind::Whitespace => line_start || text.contains('\n'),
            TokenKind::Comment => line_start || text.ends_with('\n'),
            _ => false,
        };

        tokens.push(Token { kind, text });
        pos += len;
    }

    tokens
}

/// Reassemble a token stream. Inverse of `tokenize`.
pub fn render(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect()
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Byte length of the leading run of chars matching `pred`.
fn scan_while(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// `// ...` up to (not including) the newline. A trailing backslash splices
/// the next line into the comment.
fn scan_line_comment(s: &str) -> usize {
    let mut prev = '\0';
    for (i, c) in s.char_indices() {
        if c == '\n' && prev != '\\' {
            return if i > 0 && s.as_bytes()[i - 1] == b'\r' {
                i - 1
            } else {
                i
            };
        }
        if c != '\r' {
            prev = c;
        }
    }
    s.len()
}

/// `/* ... */`; an unterminated comment runs to end of input.
fn scan_block_comment(s: &str) -> usize {
    s[2..].find("*/").map(|i| i + 4).unwrap_or(s.len())
}

/// `<...>` after `#include`, bounded by the end of the line.
fn scan_header_name(s: &str) -> usize {
    for (i, c) in s.char_indices().skip(1) {
        match c {
            '>' => return i + 1,
            '\n' => return i,
            _ => {}
        }
    }
    s.len()
}

/// Quoted literal starting at `s[0] == quote`. Stops at an unescaped
/// newline when the literal is unterminated.
fn scan_quoted(s: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\n' => return i,
            c if c == quote => return i + 1,
            _ => {}
        }
    }
    s.len()
}

/// `R"delim( ... )delim"` starting at `s[0] == '"'`.
fn scan_raw_string(s: &str) -> Option<usize> {
    let open = s[1..].find('(')? + 1;
    let delimiter = &s[1..open];
    if delimiter.len() > MAX_RAW_DELIMITER
        || delimiter
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\\' | ')' | '"'))
    {
        return None;
    }

    let closing = format!("){}\"", delimiter);
    Some(
        s[open + 1..]
            .find(&closing)
            .map(|i| open + 1 + i + closing.len())
            .unwrap_or(s.len()),
    )
}

/// Encoding-prefixed literals such as `L"..."`, `u8'x'` or `R"(...)"`.
/// Returns the byte length including the prefix.
fn scan_prefixed_literal(s: &str, ident: &str) -> Option<usize> {
    let after = &s[ident.len()..];
    let quote = after.chars().next()?;

    if quote == '"' && RAW_STRING_PREFIXES.contains(&ident) {
        return scan_raw_string(after).map(|len| ident.len() + len);
    }
    if (quote == '"' || quote == '\'') && STRING_PREFIXES.contains(&ident) {
        return Some(ident.len() + scan_quoted(after, quote));
    }
    None
}

/// Numeric literal including suffixes, digit separators and exponents.
fn scan_number(s: &str) -> usize {
    let mut prev = '\0';
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let keep = c.is_ascii_alphanumeric()
            || c == '_'
            || c == '.'
            || (c == '\'' && next.is_some_and(|n| n.is_ascii_alphanumeric()))
            || (matches!(c, '+' | '-') && matches!(prev, 'e' | 'E' | 'p' | 'P'));
        if !keep {
            return i;
        }
        prev = c;
    }
    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<(TokenKind, &str)> {
        tokenize(src)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn identifiers(src: &str) -> Vec<&str> {
        tokenize(src)
            .into_iter()
            .filter(|t| t.kind == TokenKind::Identifier)
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn render_is_lossless() {
        let src = "#include <vector>\n#include \"Errors.h\"\n\nint _count = 0; // counter\r\n\
                   /* block\n comment */ const char* s = R\"x(a_b)x\";\nchar c = '\\'';\n\
                   double d = 1.5e-3; int n = 1'000'000; auto u = u8\"ü_x\"; § tail_end";
        assert_eq!(render(&tokenize(src)), src);
    }

    #[test]
    fn render_empty_input() {
        assert!(tokenize("").is_empty());
        assert_eq!(render(&tokenize("")), "");
    }

    #[test]
    fn splits_identifiers_and_punctuation() {
        assert_eq!(
            kinds("void foo(int a_item_index)"),
            vec![
                (TokenKind::Identifier, "void"),
                (TokenKind::Identifier, "foo"),
                (TokenKind::Punctuation, "("),
                (TokenKind::Identifier, "int"),
                (TokenKind::Identifier, "a_item_index"),
                (TokenKind::Punctuation, ")"),
            ]
        );
    }

    #[test]
    fn leading_underscore_is_part_of_identifier() {
        assert_eq!(identifiers("_ + _foo - x_"), vec!["_", "_foo", "x_"]);
    }

    #[test]
    fn strings_and_chars_are_literals() {
        assert_eq!(identifiers(r#"print("source_file_path", 'a_b');"#), vec!["print"]);
        assert_eq!(
            kinds(r#""esc \" still_inside" next_one"#),
            vec![
                (TokenKind::Literal, r#""esc \" still_inside""#),
                (TokenKind::Identifier, "next_one"),
            ]
        );
    }

    #[test]
    fn unterminated_string_stops_at_newline() {
        assert_eq!(
            kinds("\"open_string\nafter_line"),
            vec![
                (TokenKind::Literal, "\"open_string"),
                (TokenKind::Identifier, "after_line"),
            ]
        );
    }

    #[test]
    fn comments_are_not_identifiers() {
        assert_eq!(identifiers("x_1 // line_comment\ny_2 /* block_comment */ z_3"), vec![
            "x_1", "y_2", "z_3"
        ]);
    }

    #[test]
    fn line_comment_with_continuation_spans_lines() {
        assert_eq!(
            kinds("// first \\\nstill_comment\nreal_code"),
            vec![
                (TokenKind::Comment, "// first \\\nstill_comment"),
                (TokenKind::Identifier, "real_code"),
            ]
        );
    }

    #[test]
    fn unterminated_block_comment_runs_to_end() {
        assert_eq!(kinds("a /* never_closed"), vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::Comment, "/* never_closed"),
        ]);
    }

    #[test]
    fn prefixed_and_raw_strings() {
        assert_eq!(identifiers(r#"L"wide_str" u8"utf_8" R"d(raw_body)d" uR"(x_y)""#), Vec::<&str>::new());
        assert_eq!(
            kinds(r#"R"(a ")" b_c)" tail_x"#),
            vec![
                (TokenKind::Literal, r#"R"(a ")""#),
                (TokenKind::Identifier, "b_c"),
                (TokenKind::Punctuation, ")"),
                (TokenKind::Literal, "\" tail_x"),
            ]
        );
    }

    #[test]
    fn prefix_identifier_without_quote_is_identifier() {
        assert_eq!(identifiers("u8 L R u_x"), vec!["u8", "L", "R", "u_x"]);
    }

    #[test]
    fn include_header_names_are_literals() {
        assert_eq!(
            kinds("#include <string_view>\n#  include_next <my_header.h>\nstring_view x;"),
            vec![
                (TokenKind::Punctuation, "#"),
                (TokenKind::Punctuation, "include"),
                (TokenKind::Literal, "<string_view>"),
                (TokenKind::Punctuation, "#"),
                (TokenKind::Punctuation, "include_next"),
                (TokenKind::Literal, "<my_header.h>"),
                (TokenKind::Identifier, "string_view"),
                (TokenKind::Identifier, "x"),
                (TokenKind::Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn less_than_outside_include_is_punctuation() {
        assert_eq!(identifiers("#define MAX_A(a_x) a_x < b_y\n"), vec!["MAX_A", "a_x", "a_x", "b_y"]);
        assert_eq!(identifiers("if (a_x < b_y) {}"), vec!["if", "a_x", "b_y"]);
    }

    #[test]
    fn hash_mid_line_is_plain_punctuation() {
        assert_eq!(identifiers("#define STR(x) #x_y\n"), vec!["STR", "x", "x_y"]);
    }

    #[test]
    fn numbers_are_literals() {
        assert_eq!(
            kinds("0x1F 1'000 3.14f 1e+10 .5"),
            vec![
                (TokenKind::Literal, "0x1F"),
                (TokenKind::Literal, "1'000"),
                (TokenKind::Literal, "3.14f"),
                (TokenKind::Literal, "1e+10"),
                (TokenKind::Literal, ".5"),
            ]
        );
    }

    #[test]
    fn non_ascii_placeholder_is_punctuation() {
        assert_eq!(kinds("\"§\" §"), vec![
            (TokenKind::Literal, "\"§\""),
            (TokenKind::Punctuation, "§"),
        ]);
    }
}
