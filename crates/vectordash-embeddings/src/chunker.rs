//! Text chunking for indexing.
//!
//! Documents are split into fragments before they are sent to an index.
//! Three policies are available:
//! - fixed-size windows with overlap ([`chunk`])
//! - blank-line separated pages ([`split_by_pages`])
//! - the whole document as one fragment ([`whole_document`])
//!
//! Sizes and offsets count characters, not bytes, so a fragment never
//! ends in the middle of a multi-byte character.

use crate::{EmbeddingError, EmbeddingResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static PAGE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("Invalid regex"));

/// Chunking configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Fragment size in characters. Must be positive.
    pub size: usize,
    /// Characters shared between neighbouring fragments. Must be below `size`.
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            overlap: 100,
        }
    }
}

impl ChunkConfig {
    /// Create a validated config.
    pub fn new(size: usize, overlap: usize) -> EmbeddingResult<Self> {
        let config = Self { size, overlap };
        config.validate()?;
        Ok(config)
    }

    /// Config for paragraph-sized fragments (knowledge bases, handbooks).
    pub fn paragraphs() -> Self {
        Self {
            size: 1500,
            overlap: 150,
        }
    }

    /// Config for section-sized fragments (contracts, reports).
    pub fn sections() -> Self {
        Self {
            size: 3000,
            overlap: 300,
        }
    }

    /// Config for product descriptions.
    pub fn products() -> Self {
        Self {
            size: 1000,
            overlap: 50,
        }
    }

    /// Check `size > 0` and `overlap < size`.
    pub fn validate(&self) -> EmbeddingResult<()> {
        if self.size == 0 {
            return Err(EmbeddingError::InvalidConfig(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if self.overlap >= self.size {
            return Err(EmbeddingError::InvalidConfig(format!(
                "overlap ({}) must be smaller than chunk size ({})",
                self.overlap, self.size
            )));
        }
        Ok(())
    }

    /// Distance between the starts of consecutive fragments.
    ///
    /// Zero when `overlap >= size`.
    pub fn step(&self) -> usize {
        self.size.saturating_sub(self.overlap)
    }

    /// Number of fragments [`chunk`] produces for a text of `len` characters.
    ///
    /// Zero for a config that fails [`validate`](Self::validate).
    pub fn fragment_count(&self, len: usize) -> usize {
        match self.step() {
            0 => 0,
            step => len.div_ceil(step),
        }
    }
}

/// How a document is turned into fragments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkMethod {
    /// Fixed-size windows with overlap.
    #[default]
    Chunks,
    /// Blank-line separated blocks.
    Pages,
    /// The entire document.
    Whole,
}

impl ChunkMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkMethod::Chunks => "chunks",
            ChunkMethod::Pages => "pages",
            ChunkMethod::Whole => "whole",
        }
    }
}

impl fmt::Display for ChunkMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChunkMethod {
    type Err = EmbeddingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chunks" => Ok(ChunkMethod::Chunks),
            "pages" => Ok(ChunkMethod::Pages),
            "whole" => Ok(ChunkMethod::Whole),
            other => Err(EmbeddingError::InvalidConfig(format!(
                "unknown chunk method '{}' (expected chunks, pages or whole)",
                other
            ))),
        }
    }
}

/// A fragment of text with position info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Position in the fragment sequence.
    pub index: usize,
    /// The fragment text.
    pub text: String,
    /// Start offset in the source, in characters.
    pub start: usize,
    /// End offset (exclusive) in the source, in characters.
    pub end: usize,
    /// Characters shared with the previous fragment.
    pub overlap: usize,
}

impl Fragment {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Text chunker.
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    method: ChunkMethod,
    config: ChunkConfig,
}

impl Chunker {
    /// Create a chunker. The config is validated even for methods that
    /// ignore it, so a bad setting surfaces before any text is processed.
    pub fn new(method: ChunkMethod, config: ChunkConfig) -> EmbeddingResult<Self> {
        config.validate()?;
        Ok(Self { method, config })
    }

    /// Fixed-size chunker.
    pub fn fixed(size: usize, overlap: usize) -> EmbeddingResult<Self> {
        Self::new(ChunkMethod::Chunks, ChunkConfig::new(size, overlap)?)
    }

    pub fn method(&self) -> ChunkMethod {
        self.method
    }

    pub fn config(&self) -> ChunkConfig {
        self.config
    }

    /// Split text into fragment strings.
    pub fn split(&self, text: &str) -> Vec<String> {
        match self.method {
            ChunkMethod::Chunks => fixed_windows(text, &self.config)
                .into_iter()
                .map(|f| f.text)
                .collect(),
            ChunkMethod::Pages => split_by_pages(text),
            ChunkMethod::Whole => whole_document(text),
        }
    }

    /// Split text into fragments with offsets.
    pub fn fragments(&self, text: &str) -> Vec<Fragment> {
        match self.method {
            ChunkMethod::Chunks => fixed_windows(text, &self.config),
            ChunkMethod::Pages => page_fragments(text),
            ChunkMethod::Whole => {
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![Fragment {
                        index: 0,
                        text: text.to_string(),
                        start: 0,
                        end: text.chars().count(),
                        overlap: 0,
                    }]
                }
            }
        }
    }
}

/// Split text into overlapping fixed-size fragments.
///
/// Emits `text[offset..offset + size]` (clipped at the end) and advances by
/// `size - overlap` until the offset passes the end of the text.
///
/// ```rust
/// use vectordash_embeddings::chunk;
///
/// let parts = chunk("abcdefghij", 4, 1).unwrap();
/// assert_eq!(parts, vec!["abcd", "defg", "ghij", "j"]);
/// ```
pub fn chunk(text: &str, size: usize, overlap: usize) -> EmbeddingResult<Vec<String>> {
    let config = ChunkConfig::new(size, overlap)?;
    Ok(fixed_windows(text, &config)
        .into_iter()
        .map(|f| f.text)
        .collect())
}

/// Split text on blank lines, dropping blocks that are only whitespace.
pub fn split_by_pages(text: &str) -> Vec<String> {
    PAGE_BREAK
        .split(text)
        .filter(|page| !page.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// The whole text as a single fragment, or nothing for empty text.
pub fn whole_document(text: &str) -> Vec<String> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![text.to_string()]
    }
}

/// Non-blank lines of a text, each embedded separately in batch mode.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn fixed_windows(text: &str, config: &ChunkConfig) -> Vec<Fragment> {
    // Byte offset of every character, plus the end of the text.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let len = bounds.len() - 1;

    let mut fragments = Vec::with_capacity(if len == 0 { 0 } else { config.fragment_count(len) });
    let mut start = 0;
    let mut prev_end: usize = 0;

    while start < len {
        let end = start.saturating_add(config.size).min(len);
        fragments.push(Fragment {
            index: fragments.len(),
            text: text[bounds[start]..bounds[end]].to_string(),
            start,
            end,
            overlap: prev_end.saturating_sub(start),
        });
        prev_end = end;
        start = start.saturating_add(config.step());
    }

    fragments
}

fn page_fragments(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut byte_cursor = 0;
    let mut char_cursor = 0;
    let mut block_start = 0;

    let mut push_block = |from: usize, to: usize, fragments: &mut Vec<Fragment>| {
        let block = &text[from..to];
        char_cursor += text[byte_cursor..from].chars().count();
        let start = char_cursor;
        let end = start + block.chars().count();
        char_cursor = end;
        byte_cursor = to;
        if !block.trim().is_empty() {
            fragments.push(Fragment {
                index: fragments.len(),
                text: block.to_string(),
                start,
                end,
                overlap: 0,
            });
        }
    };

    for separator in PAGE_BREAK.find_iter(text) {
        push_block(block_start, separator.start(), &mut fragments);
        block_start = separator.end();
    }
    push_block(block_start, text.len(), &mut fragments);

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_chunk_boundaries() {
        let chunks = chunk("abcdefghij", 4, 1).unwrap();
        assert_eq!(chunks, vec!["abcd", "defg", "ghij", "j"]);
    }

    #[test]
    fn test_fragment_offsets_and_overlap() {
        let chunker = Chunker::fixed(4, 1).unwrap();
        let fragments = chunker.fragments("abcdefghij");
        let offsets: Vec<(usize, usize, usize)> =
            fragments.iter().map(|f| (f.start, f.end, f.overlap)).collect();
        assert_eq!(offsets, vec![(0, 4, 0), (3, 7, 1), (6, 10, 1), (9, 10, 1)]);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(chunk("abc", 0, 0), Err(EmbeddingError::InvalidConfig(_))));
        assert!(matches!(chunk("abc", 4, 4), Err(EmbeddingError::InvalidConfig(_))));
        assert!(matches!(chunk("abc", 4, 9), Err(EmbeddingError::InvalidConfig(_))));
        assert!(Chunker::new(ChunkMethod::Whole, ChunkConfig { size: 2, overlap: 2 }).is_err());
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk("", 10, 2).unwrap().is_empty());
        assert!(split_by_pages("").is_empty());
        assert!(whole_document("").is_empty());
        assert!(Chunker::default().fragments("").is_empty());
    }

    #[test]
    fn test_short_text_single_fragment() {
        assert_eq!(chunk("Hello world", 512, 64).unwrap(), vec!["Hello world"]);
    }

    #[test]
    fn test_huge_size_does_not_overflow() {
        assert_eq!(chunk("abc", usize::MAX, 0).unwrap(), vec!["abc"]);
        assert_eq!(
            chunk("abc", usize::MAX, usize::MAX - 1).unwrap(),
            vec!["abc", "bc", "c"]
        );
    }

    #[test]
    fn test_unvalidated_config_counts() {
        let config = ChunkConfig { size: 1, overlap: 2 };
        assert_eq!(config.step(), 0);
        assert_eq!(config.fragment_count(5), 0);
        assert_eq!(ChunkConfig { size: 4, overlap: 4 }.fragment_count(10), 0);
        assert_eq!(ChunkConfig::new(4, 1).unwrap().fragment_count(10), 4);
    }

    #[test]
    fn test_multibyte_characters_are_not_split() {
        let text = "héllo wörld ünïcode";
        let chunks = chunk(text, 5, 2).unwrap();
        assert!(chunks.iter().all(|c| c.chars().count() <= 5));
        assert_eq!(chunks[0], "héllo");
        assert_eq!(chunks.len(), ChunkConfig::new(5, 2).unwrap().fragment_count(text.chars().count()));
    }

    #[test]
    fn test_split_by_pages() {
        assert_eq!(split_by_pages("a\n\nb\n\n\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_by_pages("one\n \t\ntwo\nstill two"), vec!["one", "two\nstill two"]);
        assert_eq!(split_by_pages("\n\n   \n\nonly\n\n"), vec!["only"]);
    }

    #[test]
    fn test_page_fragment_offsets() {
        let chunker = Chunker::new(ChunkMethod::Pages, ChunkConfig::default()).unwrap();
        let fragments = chunker.fragments("ab\n\ncd\n\n\nef");
        let spans: Vec<(&str, usize, usize)> = fragments
            .iter()
            .map(|f| (f.text.as_str(), f.start, f.end))
            .collect();
        assert_eq!(spans, vec![("ab", 0, 2), ("cd", 4, 6), ("ef", 9, 11)]);
        assert_eq!(fragments[2].index, 2);
    }

    #[test]
    fn test_whole_document() {
        assert_eq!(whole_document("x"), vec!["x"]);
        let chunker = Chunker::new(ChunkMethod::Whole, ChunkConfig::default()).unwrap();
        let fragments = chunker.fragments("ünï");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].len(), 3);
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("first\n\n  \nsecond\r\nthird"), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("Pages".parse::<ChunkMethod>().unwrap(), ChunkMethod::Pages);
        assert_eq!(ChunkMethod::Whole.to_string(), "whole");
        assert!("sentences".parse::<ChunkMethod>().is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        for config in [
            ChunkConfig::default(),
            ChunkConfig::paragraphs(),
            ChunkConfig::sections(),
            ChunkConfig::products(),
        ] {
            assert!(config.validate().is_ok());
        }
    }
}
