//! Board configuration: which papers to render and which background images to
//! preload before their papers get the loaded marker.

use serde::{Deserialize, Serialize};

const BUILTIN_BOARD: &str = include_str!("../assets/board.json");

/// Id of the optional `<script type="application/json">` block a page can use
/// to replace the built-in board.
pub const CONFIG_SCRIPT_ID: &str = "paper-board-config";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperKind {
    #[default]
    Note,
    Heart,
    Image,
}

impl PaperKind {
    /// Extra CSS class besides `paper`.
    pub fn class(self) -> Option<&'static str> {
        match self {
            PaperKind::Note => None,
            PaperKind::Heart => Some("heart"),
            PaperKind::Image => Some("image"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperSpec {
    #[serde(default)]
    pub kind: PaperKind,
    #[serde(default)]
    pub text: Option<String>,
    /// Inline image shown on the paper, revealed lazily.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreloadEntry {
    pub category: String,
    pub url: String,
    /// CSS selector for the elements that receive the marker once `url` loads.
    pub selector: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_loaded_class")]
    pub loaded_class: String,
    #[serde(default)]
    pub preload: Vec<PreloadEntry>,
    #[serde(default)]
    pub papers: Vec<PaperSpec>,
}

fn default_loaded_class() -> String {
    "loaded".to_string()
}

impl BoardConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn builtin() -> Self {
        // Shipped with the binary; covered by the builtin_board_parses test.
        Self::from_json(BUILTIN_BOARD).unwrap_or_else(|_| Self::empty())
    }

    fn empty() -> Self {
        Self {
            loaded_class: default_loaded_class(),
            preload: Vec::new(),
            papers: Vec::new(),
        }
    }

    /// Page-provided config if present and valid, otherwise the built-in board.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_SCRIPT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|err| {
                crate::util::cwarn(&format!("ignoring {}: {}", CONFIG_SCRIPT_ID, err));
                Self::builtin()
            }),
            None => Self::builtin(),
        }
    }
}
