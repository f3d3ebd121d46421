//! Words and pictures of the show, embedded at compile time.

use serde::{Deserialize, Serialize};

const MEMORIES_JSON: &str = include_str!("../content/memories.json");
const STORIES_JSON: &str = include_str!("../content/stories.json");
const SCREENS_JSON: &str = include_str!("../content/screens.json");
const LETTER_TXT: &str = include_str!("../content/letter.txt");

/// A polaroid in the memory carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub image: String,
    pub caption: String,
    pub emoji: String,
    /// Tilt of the card in degrees.
    #[serde(default)]
    pub rotate: f32,
}

/// A photo in the gallery grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub image: String,
    pub caption: String,
    pub date: String,
    pub description: String,
}

/// Heading text of one screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenCopy {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Screens {
    pub fullscreen: ScreenCopy,
    pub auth: ScreenCopy,
    pub fireworks: ScreenCopy,
    pub hero: ScreenCopy,
    pub countdown: ScreenCopy,
    pub countdown_arrived: ScreenCopy,
    pub memories: ScreenCopy,
    pub gallery: ScreenCopy,
    pub celebration: ScreenCopy,
    pub wishes: ScreenCopy,
    pub letter: ScreenCopy,
    pub farewell: ScreenCopy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub memories: Vec<Memory>,
    pub stories: Vec<Story>,
    pub screens: Screens,
    pub letter: String,
}

impl Content {
    /// Parse the embedded content files.
    pub fn load() -> Result<Self, serde_json::Error> {
        Ok(Self {
            memories: serde_json::from_str(MEMORIES_JSON)?,
            stories: serde_json::from_str(STORIES_JSON)?,
            screens: serde_json::from_str(SCREENS_JSON)?,
            letter: LETTER_TXT.trim_end().to_string(),
        })
    }

    /// The embedded content, or empty content (logged) if it fails to parse.
    pub fn embedded() -> Self {
        Self::load().unwrap_or_else(|err| {
            log::error!("embedded content is malformed: {}", err);
            Self::default()
        })
    }

    /// Everything the host needs to build the DOM, as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses() {
        let content = Content::load().unwrap();
        assert_eq!(content.memories.len(), 5);
        assert_eq!(content.stories.len(), 3);
        assert_eq!(content.memories[4].rotate, -6.0);
        assert_eq!(content.screens.hero.title, "Dear Ruqayya");
        assert!(content.letter.starts_with("My Beloved Ruqayya,"));
        assert!(!content.letter.ends_with('\n'));
    }

    #[test]
    fn host_json_lists_every_section() {
        let content = Content::embedded();
        let json = content.to_json().unwrap();
        for key in ["\"memories\"", "\"stories\"", "\"screens\"", "\"letter\""] {
            assert!(json.contains(key), "missing {key}");
        }
    }
}
