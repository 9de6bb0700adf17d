//! Port state and buffer-read stage models.

use serde::{Deserialize, Serialize};

// ============================================================================
// PortState
// ============================================================================

/// Logical open/closed state of the connection to the scanner device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PortState {
    /// Port is closed; no scans are delivered.
    #[default]
    Closed,
    /// Port is open; the device may deliver scans.
    Open,
}

impl PortState {
    /// Map a driver's port flag to a state.
    pub fn from_open(open: bool) -> Self {
        if open {
            PortState::Open
        } else {
            PortState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PortState::Open)
    }
}

impl std::fmt::Display for PortState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortState::Closed => write!(f, "closed"),
            PortState::Open => write!(f, "open"),
        }
    }
}

// ============================================================================
// ReadStage
// ============================================================================

/// One of the three sequential queries made against the driver buffer
/// after a scan completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadStage {
    /// Code type indicator.
    Type,
    /// Byte count of the buffered data.
    Length,
    /// Full decoded text.
    Content,
}

impl ReadStage {
    /// All stages, in the order they are read.
    pub const ALL: [ReadStage; 3] = [ReadStage::Type, ReadStage::Length, ReadStage::Content];

    /// Parse a stage name (`type`, `length`/`count`, `content`/`text`).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "type" => Some(ReadStage::Type),
            "length" | "count" => Some(ReadStage::Length),
            "content" | "text" => Some(ReadStage::Content),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadStage::Type => write!(f, "type"),
            ReadStage::Length => write!(f, "length"),
            ReadStage::Content => write!(f, "content"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_state_default_is_closed() {
        assert_eq!(PortState::default(), PortState::Closed);
        assert!(!PortState::default().is_open());
        assert_eq!(PortState::from_open(true), PortState::Open);
        assert_eq!(PortState::Open.to_string(), "open");
    }

    #[test]
    fn test_read_stage_parse() {
        assert_eq!(ReadStage::parse("type"), Some(ReadStage::Type));
        assert_eq!(ReadStage::parse("Count"), Some(ReadStage::Length));
        assert_eq!(ReadStage::parse(" text "), Some(ReadStage::Content));
        assert_eq!(ReadStage::parse("symbology"), None);
    }

    #[test]
    fn test_read_stage_display_roundtrips_through_parse() {
        for stage in ReadStage::ALL {
            assert_eq!(ReadStage::parse(&stage.to_string()), Some(stage));
        }
    }
}
