//! Horizontal placement of the grid block.

use serde::{Deserialize, Serialize};

/// Where the block of columns sits when it is narrower than the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridAlignment {
    /// Flush with the left edge.
    #[default]
    #[serde(alias = "left")]
    Start,
    /// Flush with the right edge.
    #[serde(alias = "right")]
    End,
    /// Centered.
    Center,
}

impl GridAlignment {
    /// Horizontal offset applied to every row.
    ///
    /// Negative when a fixed item width makes the block wider than the
    /// viewport.
    pub fn margin(self, viewport_width: f32, item_width: f32, columns: usize) -> f32 {
        let slack = viewport_width - item_width * columns as f32;
        match self {
            GridAlignment::Start => 0.0,
            GridAlignment::End => slack,
            GridAlignment::Center => slack / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins() {
        assert_eq!(GridAlignment::Start.margin(210.0, 50.0, 4), 0.0);
        assert_eq!(GridAlignment::End.margin(210.0, 50.0, 4), 10.0);
        assert_eq!(GridAlignment::Center.margin(210.0, 50.0, 4), 5.0);
    }

    #[test]
    fn test_oversized_block() {
        assert_eq!(GridAlignment::End.margin(40.0, 50.0, 1), -10.0);
        assert_eq!(GridAlignment::Center.margin(40.0, 50.0, 1), -5.0);
    }

    #[test]
    fn test_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            alignment: GridAlignment,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{"alignment": "left"}"#).unwrap();
        assert_eq!(parsed.alignment, GridAlignment::Start);
        let parsed: Wrapper = serde_json::from_str(r#"{"alignment": "end"}"#).unwrap();
        assert_eq!(parsed.alignment, GridAlignment::End);
    }
}
