//! Marker scanning over a single file's text.
//!
//! A documentation fragment sits strictly between a `@swg_begin` and a
//! `@swg_end` marker. The markers may appear inside any comment syntax;
//! extraction does not know or care about the host language, it only
//! searches the raw text. [`BlockExtractor`] walks one file and yields
//! every fragment in order of appearance.

use std::path::Path;

use crate::diagnostics::MalformedBlock;

/// Opens a documentation fragment.
pub const BLOCK_BEGIN: &str = "@swg_begin";
/// Closes a documentation fragment.
pub const BLOCK_END: &str = "@swg_end";

/// One raw fragment found between a marker pair.
///
/// `text` is byte-identical to the region between the markers, untouched
/// whitespace included. `start`/`end` are its byte offsets within the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub source: &'a Path,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Iterator over the fragments of one file.
///
/// Yields `Ok(RawBlock)` for each properly closed marker pair and
/// `Err(MalformedBlock)` for each open marker that is never closed, either
/// because another open marker intervenes or because the file ends first.
/// Extraction always resumes after a malformed marker, so later valid
/// blocks in the same file are still found. A stray close marker with no
/// preceding open is plain text and ignored.
pub struct BlockExtractor<'a> {
    source: &'a Path,
    text: &'a str,
    cursor: usize,
}

impl<'a> BlockExtractor<'a> {
    pub fn new(source: &'a Path, text: &'a str) -> Self {
        BlockExtractor {
            source,
            text,
            cursor: 0,
        }
    }

    /// 1-based line number of a byte offset, for diagnostics.
    fn line_of(&self, offset: usize) -> usize {
        self.text[..offset].bytes().filter(|&b| b == b'\n').count() + 1
    }

    fn unterminated(&self, begin: usize) -> MalformedBlock {
        MalformedBlock {
            source: self.source.to_path_buf(),
            reason: format!(
                "{} at line {} has no matching {}",
                BLOCK_BEGIN,
                self.line_of(begin),
                BLOCK_END
            ),
        }
    }
}

impl<'a> Iterator for BlockExtractor<'a> {
    type Item = Result<RawBlock<'a>, MalformedBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        let begin = self.cursor + self.text[self.cursor..].find(BLOCK_BEGIN)?;
        let start = begin + BLOCK_BEGIN.len();
        let reopen = self.text[start..].find(BLOCK_BEGIN);
        match self.text[start..].find(BLOCK_END) {
            Some(close) if reopen.map_or(true, |r| close < r) => {
                let end = start + close;
                self.cursor = end + BLOCK_END.len();
                Some(Ok(RawBlock {
                    source: self.source,
                    text: &self.text[start..end],
                    start,
                    end,
                }))
            }
            // No close marker before the next open marker (or EOF). Report
            // this open marker and resume at the intervening one, if any.
            _ => {
                self.cursor = match reopen {
                    Some(r) => start + r,
                    None => self.text.len(),
                };
                Some(Err(self.unterminated(begin)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn blocks(text: &str) -> Vec<Result<String, String>> {
        BlockExtractor::new(Path::new("test.py"), text)
            .map(|item| {
                item.map(|block| block.text.to_string())
                    .map_err(|malformed| malformed.reason)
            })
            .collect()
    }

    #[test]
    fn test_extracts_single_block() {
        let text = "/*\n@swg_begin\npath: /pets\nmethod: get\n@swg_end\n*/\n";
        let found = blocks(text);
        assert_eq!(found, vec![Ok("\npath: /pets\nmethod: get\n".to_string())]);
    }

    #[test]
    fn test_extracts_blocks_in_order_of_appearance() {
        let text = "@swg_begin one @swg_end middle @swg_begin two @swg_end";
        let found = blocks(text);
        assert_eq!(
            found,
            vec![Ok(" one ".to_string()), Ok(" two ".to_string())]
        );
    }

    #[test]
    fn test_block_text_is_byte_identical() {
        let text = "x @swg_begin\t \n  raw\r\n@swg_end y";
        let found = BlockExtractor::new(Path::new("t"), text)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "\t \n  raw\r\n");
        assert_eq!(&text[found[0].start..found[0].end], found[0].text);
    }

    #[test]
    fn test_no_markers_yields_nothing() {
        assert!(blocks("def index():\n    pass\n").is_empty());
    }

    #[test]
    fn test_empty_block_is_yielded() {
        let found = blocks("@swg_begin@swg_end");
        assert_eq!(found, vec![Ok(String::new())]);
    }

    #[test]
    fn test_unterminated_block_at_eof() {
        let found = blocks("text\n@swg_begin\npath: /pets\n");
        assert_eq!(found.len(), 1);
        let reason = found[0].as_ref().unwrap_err();
        assert!(reason.contains("line 2"), "unexpected reason: {}", reason);
        assert!(reason.contains("no matching @swg_end"));
    }

    #[test]
    fn test_reopened_block_reports_first_and_keeps_second() {
        let text = "@swg_begin broken\n@swg_begin\npath: /ok\n@swg_end";
        let found = blocks(text);
        assert_eq!(found.len(), 2);
        assert!(found[0].is_err());
        assert_eq!(found[1], Ok("\npath: /ok\n".to_string()));
    }

    #[test]
    fn test_two_unterminated_opens_report_two_diagnostics() {
        let found = blocks("@swg_begin a\n@swg_begin b\n");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|item| item.is_err()));
    }

    #[test]
    fn test_stray_close_marker_is_plain_text() {
        let found = blocks("@swg_end\n@swg_begin ok @swg_end");
        assert_eq!(found, vec![Ok(" ok ".to_string())]);
    }

    #[test]
    fn test_close_marker_inside_block_terminates_it() {
        // The first close wins; the rest of the line is outside the block.
        let found = blocks("@swg_begin a @swg_end b @swg_end");
        assert_eq!(found, vec![Ok(" a ".to_string())]);
    }

    #[test]
    fn test_source_path_is_threaded_through() {
        let text = "@swg_begin x @swg_end @swg_begin y";
        let mut extractor = BlockExtractor::new(Path::new("app/views.py"), text);
        let ok = extractor.next().unwrap().unwrap();
        assert_eq!(ok.source, Path::new("app/views.py"));
        let err = extractor.next().unwrap().unwrap_err();
        assert_eq!(err.source, Path::new("app/views.py"));
    }
}
