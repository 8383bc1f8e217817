use regex::Regex;
use shared_types::ExtractionError;

/// Splits a page of recognized text into one segment per business card.
///
/// A new card starts right before each delimiter phrase; the phrase itself
/// stays at the head of the segment it opens.
pub struct CardSegmenter {
    delimiters: Vec<String>,
    boundary: Option<Regex>,
}

impl CardSegmenter {
    pub fn new(delimiters: &[String]) -> Result<Self, ExtractionError> {
        let delimiters: Vec<String> = delimiters
            .iter()
            .filter(|d| !d.trim().is_empty())
            .cloned()
            .collect();

        let boundary = if delimiters.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = delimiters.iter().map(|d| regex::escape(d)).collect();
            Some(
                Regex::new(&alternatives.join("|"))
                    .map_err(|e| ExtractionError::InvalidPattern(e.to_string()))?,
            )
        };

        Ok(Self {
            delimiters,
            boundary,
        })
    }

    /// Card segments worth extracting from.
    ///
    /// Text without any delimiter phrase yields nothing. Otherwise a segment
    /// is kept when it has content and either an "@" or a delimiter phrase.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let Some(boundary) = &self.boundary else {
            return Vec::new();
        };

        let starts: Vec<usize> = boundary.find_iter(text).map(|m| m.start()).collect();
        if starts.is_empty() {
            return Vec::new();
        }

        split_at_offsets(text, &starts)
            .into_iter()
            .filter(|segment| self.is_card(segment))
            .collect()
    }

    fn is_card(&self, segment: &str) -> bool {
        let trimmed = segment.trim();
        !trimmed.is_empty()
            && (trimmed.contains('@') || self.delimiters.iter().any(|d| trimmed.contains(d)))
    }
}

fn split_at_offsets<'a>(text: &'a str, offsets: &[usize]) -> Vec<&'a str> {
    let mut pieces = Vec::with_capacity(offsets.len() + 1);
    let mut start = 0;

    for &offset in offsets {
        if offset > start {
            pieces.push(&text[start..offset]);
        }
        start = offset;
    }
    pieces.push(&text[start..]);

    pieces
}
