use crate::error::ExtractionError;
use serde_json::Value;

/// Scanner state while walking candidate JSON text.
#[derive(Default)]
struct Scan {
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl Scan {
    /// Feeds one byte; returns `true` when it closes the outermost object.
    fn feed(&mut self, byte: u8) -> bool {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if byte == b'\\' {
                self.escaped = true;
            } else if byte == b'"' {
                self.in_string = false;
            }
            return false;
        }

        match byte {
            b'"' => self.in_string = true,
            b'{' => self.depth += 1,
            b'}' => {
                self.depth = self.depth.saturating_sub(1);
                return self.depth == 0;
            }
            _ => {}
        }
        false
    }
}

/// Returns the slice holding the first balanced `{ ... }` block in `text`.
///
/// Braces inside string literals are ignored, and a backslash inside a string
/// escapes exactly the following character.
pub fn find_first_json_object(text: &str) -> Result<&str, ExtractionError> {
    let start = text.find('{').ok_or(ExtractionError::NotFound)?;
    let mut scan = Scan::default();

    // The delimiters are all ASCII, so a byte walk never splits a UTF-8
    // sequence at a position we slice on.
    text.as_bytes()[start..]
        .iter()
        .position(|&b| scan.feed(b))
        .map(|offset| &text[start..=start + offset])
        .ok_or(ExtractionError::Unterminated)
}

/// Extracts and parses the first complete JSON object embedded in `text`.
///
/// Engine output interleaves log lines with a single JSON result; everything
/// before the first `{` and after its matching `}` is ignored.
pub fn extract_first_json_object(text: &str) -> Result<Value, ExtractionError> {
    let blob = find_first_json_object(text)?;
    serde_json::from_str(blob).map_err(|e| ExtractionError::InvalidJson(e.to_string()))
}
