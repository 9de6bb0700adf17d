//! Scanned code domain model.

use serde::{Deserialize, Serialize};

/// The decoded result of one scan: a barcode or 2D-code content.
///
/// Built once per completed scan and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Code {
    text: String,
    length: usize,
    #[serde(rename = "type")]
    code_type: String,
}

impl Code {
    /// Create a code from the three values read out of the driver buffer.
    pub fn new(text: impl Into<String>, length: usize, code_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            length,
            code_type: code_type.into(),
        }
    }

    /// Decoded text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length reported by the driver for the buffered data.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Code type indicator reported by the driver.
    pub fn code_type(&self) -> &str {
        &self.code_type
    }

    /// Consume the code, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} ({})", self.code_type, self.text, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let code = Code::new("12345", 5, "A");
        assert_eq!(code.text(), "12345");
        assert_eq!(code.length(), 5);
        assert_eq!(code.code_type(), "A");
        assert_eq!(code.into_text(), "12345");
    }

    #[test]
    fn test_display() {
        let code = Code::new("4901234567894", 13, "A");
        assert_eq!(code.to_string(), "[A] 4901234567894 (13)");
    }

    #[test]
    fn test_json_uses_type_key() {
        let code = Code::new("12345", 5, "A");
        let json = serde_json::to_value(&code).unwrap();
        assert_eq!(json["text"], "12345");
        assert_eq!(json["length"], 5);
        assert_eq!(json["type"], "A");
    }
}
