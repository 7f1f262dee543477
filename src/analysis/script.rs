//! Script classification (CJK vs Latin).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Document;

/// Number of leading pages sampled.
const SAMPLE_PAGES: usize = 3;

/// Minimum share of CJK characters for a CJK classification.
const CJK_RATIO: f64 = 0.1;

/// Dominant writing system of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Script {
    /// Chinese, Japanese (ideographs, hiragana, katakana)
    Cjk,
    /// Everything else
    #[default]
    Latin,
}

impl Script {
    /// Check if this is a CJK script.
    pub fn is_cjk(&self) -> bool {
        matches!(self, Script::Cjk)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Script::Cjk => write!(f, "CJK"),
            Script::Latin => write!(f, "LATIN"),
        }
    }
}

/// Check if a character is a CJK ideograph, hiragana or katakana.
pub fn is_cjk_char(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |
        '\u{3040}'..='\u{309F}' |
        '\u{30A0}'..='\u{30FF}'
    )
}

/// Classify a document by sampling its first pages.
pub fn detect_script(doc: &Document) -> Script {
    let mut cjk = 0usize;
    let mut total = 0usize;

    for page in doc.pages.iter().take(SAMPLE_PAGES) {
        for c in page.plain_text().chars() {
            total += 1;
            if is_cjk_char(c) {
                cjk += 1;
            }
        }
    }

    let script = if total > 0 && (cjk as f64 / total as f64) > CJK_RATIO {
        Script::Cjk
    } else {
        Script::Latin
    };
    log::debug!("{}: {}/{} CJK chars, script {}", doc.name, cjk, total, script);
    script
}
