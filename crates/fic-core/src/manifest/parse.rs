//! Tokenize manifest lines into entries.

use super::{LineError, ManifestEntry};

/// A manifest line that is not blank or a comment, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub line_no: usize,
    pub result: Result<ManifestEntry, LineError>,
}

/// Parse one raw manifest line.
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(raw: &str) -> Result<Option<ManifestEntry>, LineError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let Some((digest, rest)) = line.split_once(char::is_whitespace) else {
        return Err(LineError::MissingPath {
            line: line.to_string(),
        });
    };
    // `line` is trimmed, so the remainder always holds a non-whitespace char.
    Ok(Some(ManifestEntry {
        expected_digest: digest.to_string(),
        file_path: rest.trim().to_string(),
    }))
}

/// Split text into lines ending in `\n`, `\r\n` or a lone `\r`.
fn split_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(i) = rest.find(|c: char| c == '\r' || c == '\n') else {
            let line = rest;
            rest = "";
            return Some(line);
        };
        let (line, tail) = rest.split_at(i);
        let eol = if tail.starts_with("\r\n") { 2 } else { 1 };
        rest = &tail[eol..];
        Some(line)
    })
}

/// Parse all lines of a manifest, dropping blanks and comments.
pub fn parse_manifest(text: &str) -> impl Iterator<Item = ParsedLine> + '_ {
    split_lines(text).enumerate().filter_map(|(i, raw)| {
        parse_line(raw).transpose().map(|result| ParsedLine {
            line_no: i + 1,
            result,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(digest: &str, path: &str) -> ManifestEntry {
        ManifestEntry {
            expected_digest: digest.to_string(),
            file_path: path.to_string(),
        }
    }

    #[test]
    fn parse_line_simple_entry() {
        let r = parse_line("abc123  file.bin").unwrap();
        assert_eq!(r, Some(entry("abc123", "file.bin")));
    }

    #[test]
    fn parse_line_path_keeps_inner_whitespace() {
        let r = parse_line("  abc\t my holiday photo.jpg   ").unwrap();
        assert_eq!(r, Some(entry("abc", "my holiday photo.jpg")));
    }

    #[test]
    fn parse_line_blank_and_comment_are_skipped() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \t "), Ok(None));
        assert_eq!(parse_line("# sha256 of release"), Ok(None));
        assert_eq!(parse_line("   #indented comment"), Ok(None));
    }

    #[test]
    fn parse_line_single_token_is_invalid() {
        let err = parse_line("  e3b0c442   ").unwrap_err();
        assert_eq!(
            err,
            LineError::MissingPath {
                line: "e3b0c442".to_string()
            }
        );
        assert_eq!(err.line(), "e3b0c442");
        assert_eq!(err.to_string(), "invalid line format: e3b0c442");
    }

    #[test]
    fn parse_manifest_numbers_lines_and_skips_comments() {
        let text = "# header\n\naaa one.txt\nbogus\r\nbbb two words.txt\n";
        let lines: Vec<ParsedLine> = parse_manifest(text).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].line_no, 3);
        assert_eq!(lines[0].result, Ok(entry("aaa", "one.txt")));
        assert_eq!(lines[1].line_no, 4);
        assert!(lines[1].result.is_err());
        assert_eq!(lines[2].line_no, 5);
        assert_eq!(lines[2].result, Ok(entry("bbb", "two words.txt")));
    }

    #[test]
    fn parse_manifest_accepts_cr_only_line_endings() {
        let text = "aaa one.txt\rbbb two.txt\r\r# c\rccc three.txt";
        let lines: Vec<ParsedLine> = parse_manifest(text).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].result, Ok(entry("aaa", "one.txt")));
        assert_eq!(lines[1].result, Ok(entry("bbb", "two.txt")));
        assert_eq!(lines[2].line_no, 5);
        assert_eq!(lines[2].result, Ok(entry("ccc", "three.txt")));
    }

    #[test]
    fn split_lines_mixed_endings() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\n\nd\n").collect();
        assert_eq!(lines, ["a", "b", "c", "", "d"]);
    }

    #[test]
    fn parse_manifest_only_comments_is_empty() {
        assert_eq!(parse_manifest("#a\n\n   \n# b\n").count(), 0);
    }
}
