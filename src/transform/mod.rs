//! Text transforms applied while concatenating sources.
//!
//! Two policies:
//!
//! - [`strip_lines`]: line based. Drops blank lines and lines whose first
//!   non-blank characters are `//`. Used for styles and for scripts in
//!   modes without a source map.
//! - [`compact`]: character based. Strips comments, collapses whitespace and
//!   records a source map segment at every input line boundary.
//!
//! Both are streaming; neither loads the whole input.

use std::io::{self, BufRead, Write};

use crate::sourcemap::SourceMap;

/// Copy `input` to `out`, dropping blank and `//` comment lines and leading
/// whitespace. Block comments and trailing comments are kept.
pub fn strip_lines<R: BufRead, W: Write>(input: R, out: &mut W) -> io::Result<()> {
    for line in input.split(b'\n') {
        let line = line?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        let start = line
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(line.len());
        let line = &line[start..];
        if line.is_empty() || line.starts_with(b"//") {
            continue;
        }
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Compact `input` into `out`, recording mappings for source `file` in `map`.
///
/// Output grows one line per call unless a string literal or a backslash
/// continuation carries a raw newline. Every input line starts with a
/// segment pointing at column 0 of that line.
pub fn compact<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    file: i64,
    map: &mut SourceMap,
) -> io::Result<()> {
    Compactor {
        input: Bytes::new(input),
        out,
        map,
        file,
        out_col: 0,
        in_line: 0,
    }
    .run()
}

// ============================================================================
// Byte stream
// ============================================================================

/// Byte-at-a-time reader with one byte of pushback.
struct Bytes<R> {
    inner: R,
    pending: Option<u8>,
}

impl<R: BufRead> Bytes<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            pending: None,
        }
    }

    fn next(&mut self) -> io::Result<Option<u8>> {
        if let Some(b) = self.pending.take() {
            return Ok(Some(b));
        }
        let b = loop {
            match self.inner.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        if b.is_some() {
            self.inner.consume(1);
        }
        Ok(b)
    }

    fn unread(&mut self, b: u8) {
        self.pending = Some(b);
    }
}

// ============================================================================
// Compactor
// ============================================================================

struct Compactor<'a, R, W> {
    input: Bytes<R>,
    out: &'a mut W,
    map: &'a mut SourceMap,
    file: i64,
    out_col: i64,
    in_line: i64,
}

impl<R: BufRead, W: Write> Compactor<'_, R, W> {
    fn run(mut self) -> io::Result<()> {
        self.mark();

        let mut quote: Option<u8> = None;
        // Last emitted byte was a separator, or nothing was emitted yet
        let mut space = true;

        while let Some(c) = self.input.next()? {
            if let Some(q) = quote {
                match c {
                    b'\\' => self.escape()?,
                    b'\n' => self.put_raw(c)?,
                    _ => {
                        if c == q {
                            quote = None;
                        }
                        self.put(c)?;
                    }
                }
                space = false;
                continue;
            }

            match c {
                b'\n' => {
                    if !space {
                        self.put(b' ')?;
                    }
                    self.in_line += 1;
                    self.mark();
                    space = true;
                }
                b'\\' => {
                    self.escape()?;
                    space = false;
                }
                b'/' => match self.input.next()? {
                    // The newline after it still writes the separator
                    Some(b'/') => self.skip_line_comment()?,
                    Some(b'*') => {
                        self.skip_block_comment()?;
                        if !space {
                            self.put(b' ')?;
                            space = true;
                        }
                    }
                    next => {
                        if let Some(n) = next {
                            self.input.unread(n);
                        }
                        self.put(c)?;
                        space = false;
                    }
                },
                b'"' | b'\'' | b'`' => {
                    quote = Some(c);
                    self.put(c)?;
                    space = false;
                }
                c if c.is_ascii_whitespace() => {
                    if !space {
                        self.put(b' ')?;
                        space = true;
                    }
                }
                _ => {
                    self.put(c)?;
                    space = false;
                }
            }
        }

        self.out.write_all(b"\n")?;
        self.map.add_line();
        Ok(())
    }

    /// Segment for the start of the current input line.
    fn mark(&mut self) {
        self.map.map(self.out_col, self.in_line, 0, self.file);
    }

    fn put(&mut self, b: u8) -> io::Result<()> {
        self.out.write_all(&[b])?;
        self.out_col += 1;
        Ok(())
    }

    /// Emit `b` unchanged. A raw newline opens a new output line, so the
    /// mapping follows it.
    fn put_raw(&mut self, b: u8) -> io::Result<()> {
        if b != b'\n' {
            return self.put(b);
        }
        self.out.write_all(b"\n")?;
        self.map.add_line();
        self.out_col = 0;
        self.in_line += 1;
        self.mark();
        Ok(())
    }

    /// Backslash and the byte after it, both verbatim.
    fn escape(&mut self) -> io::Result<()> {
        self.put(b'\\')?;
        match self.input.next()? {
            Some(n) => self.put_raw(n),
            None => Ok(()),
        }
    }

    /// Consume up to, not including, the next newline.
    fn skip_line_comment(&mut self) -> io::Result<()> {
        while let Some(c) = self.input.next()? {
            if c == b'\n' {
                self.input.unread(c);
                break;
            }
        }
        Ok(())
    }

    /// Consume through the closing `*/`, counting lines.
    fn skip_block_comment(&mut self) -> io::Result<()> {
        while let Some(c) = self.input.next()? {
            match c {
                b'\n' => self.in_line += 1,
                b'*' => match self.input.next()? {
                    Some(b'/') => break,
                    Some(n) => self.input.unread(n),
                    None => break,
                },
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sourcemap::tests::decode;

    fn strip(input: &str) -> String {
        let mut out = Vec::new();
        strip_lines(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn compacted(input: &str) -> (String, SourceMap) {
        let mut out = Vec::new();
        let mut map = SourceMap::new();
        compact(input.as_bytes(), &mut out, 0, &mut map).unwrap();
        (String::from_utf8(out).unwrap(), map)
    }

    #[test]
    fn test_strip_comment_and_blank_lines() {
        let input = "//@require a.js\n\n   // note\n  var x = 1; // keep\n\t\r\n/* block */\n";
        assert_eq!(strip(input), "var x = 1; // keep\n/* block */\n");
    }

    #[test]
    fn test_strip_comment_only_file_is_empty() {
        assert_eq!(strip("// one\n  // two\n\n"), "");
        assert_eq!(strip(""), "");
    }

    #[test]
    fn test_strip_keeps_string_lookalike() {
        assert_eq!(strip("x = \"// not a comment\";"), "x = \"// not a comment\";\n");
    }

    #[test]
    fn test_strip_crlf() {
        assert_eq!(strip("a {\r\n  color: red;\r\n}\r\n"), "a {\ncolor: red;\n}\n");
    }

    #[test]
    fn test_compact_removes_comments_and_whitespace() {
        let (out, _) = compacted("var  a = 1; // one\n/* two\n three */var b = a / 2;\n");
        assert_eq!(out, "var a = 1; var b = a / 2; \n");
    }

    #[test]
    fn test_compact_keeps_strings() {
        let (out, _) = compacted("s = \"a  // b\";\nt = 'it\\'s  /* x */';\n");
        assert_eq!(out, "s = \"a  // b\"; t = 'it\\'s  /* x */'; \n");
    }

    #[test]
    fn test_compact_keeps_comment_lookalike_in_string() {
        let (out, _) = compacted("x = \"// not a comment\"; // real\ny();\n");
        assert_eq!(out, "x = \"// not a comment\"; y(); \n");
    }

    #[test]
    fn test_compact_line_comment_keeps_tokens_apart() {
        assert_eq!(compacted("return//x\nvalue;\n").0, "return value; \n");
        assert_eq!(
            compacted("var a = 1//one\nvar b = 2;\n").0,
            "var a = 1 var b = 2; \n"
        );
    }

    #[test]
    fn test_compact_block_comment_is_a_separator() {
        assert_eq!(compacted("a/*x*/b\n").0, "a b \n");
        assert_eq!(compacted("a /* x */ b\n").0, "a b \n");
        assert_eq!(compacted("/* header */\nrun();\n").0, "run(); \n");
    }

    #[test]
    fn test_compact_maps_every_input_line() {
        let (out, map) = compacted("a();\n\nb();\n");
        assert_eq!(out, "a(); b(); \n");
        let segments = decode(map.mappings());
        let lines: Vec<_> = segments.iter().map(|s| (s.0, s.1, s.2)).collect();
        // (out_line, out_col, in_line)
        assert_eq!(lines, vec![(0, 0, 0), (0, 5, 1), (0, 5, 2), (0, 10, 3)]);
    }

    #[test]
    fn test_compact_block_comment_counts_lines() {
        let (_, map) = compacted("/*\n\n*/x\ny\n");
        let segments = decode(map.mappings());
        let in_lines: Vec<_> = segments.iter().map(|s| s.2).collect();
        assert_eq!(in_lines, vec![0, 3, 4]);
    }

    #[test]
    fn test_compact_raw_newline_in_string_starts_output_line() {
        let (out, map) = compacted("s = 'a\\\nb';\nc;\n");
        assert_eq!(out, "s = 'a\\\nb'; c; \n");
        let segments = decode(map.mappings());
        // Second output line starts at input line 1, column 0
        assert!(segments.contains(&(1, 0, 1, 0, 0)));
        assert!(segments.contains(&(1, 4, 2, 0, 0)));
    }

    #[test]
    fn test_compact_division_not_comment() {
        let (out, _) = compacted("x = a/b;");
        assert_eq!(out, "x = a/b;\n");
    }

    #[test]
    fn test_compact_file_index_recorded() {
        let mut out = Vec::new();
        let mut map = SourceMap::new();
        compact("a;".as_bytes(), &mut out, 0, &mut map).unwrap();
        compact("b;".as_bytes(), &mut out, 1, &mut map).unwrap();
        let files: Vec<_> = decode(map.mappings()).iter().map(|s| s.4).collect();
        assert_eq!(files, vec![0, 1]);
    }
}
