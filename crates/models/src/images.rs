use serde::{Deserialize, Serialize};

pub const DEFAULT_HERO_IMAGE: &str = "/assets/generated/ceilingpro-hero-bg.dim_1920x1080.png";
pub const DEFAULT_SERVICE_CARDS: [&str; 4] = [
    "/images/service1.jpg",
    "/images/service2.jpg",
    "/images/service3.jpg",
    "/images/service4.jpg",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub path: String,
    pub url: String,
}

/// Image locations used across the marketing pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaths {
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub service_card1: String,
    #[serde(default)]
    pub service_card2: String,
    #[serde(default)]
    pub service_card3: String,
    #[serde(default)]
    pub service_card4: String,
    #[serde(default)]
    pub before_after_gallery: Vec<String>,
}

impl ImagePaths {
    /// Replace blank entries with the bundled defaults.
    pub fn with_defaults(mut self) -> Self {
        fill(&mut self.hero_image, DEFAULT_HERO_IMAGE);
        fill(&mut self.service_card1, DEFAULT_SERVICE_CARDS[0]);
        fill(&mut self.service_card2, DEFAULT_SERVICE_CARDS[1]);
        fill(&mut self.service_card3, DEFAULT_SERVICE_CARDS[2]);
        fill(&mut self.service_card4, DEFAULT_SERVICE_CARDS[3]);
        self
    }
}

impl Default for ImagePaths {
    fn default() -> Self {
        Self {
            hero_image: DEFAULT_HERO_IMAGE.into(),
            service_card1: DEFAULT_SERVICE_CARDS[0].into(),
            service_card2: DEFAULT_SERVICE_CARDS[1].into(),
            service_card3: DEFAULT_SERVICE_CARDS[2].into(),
            service_card4: DEFAULT_SERVICE_CARDS[3].into(),
            before_after_gallery: Vec::new(),
        }
    }
}

fn fill(slot: &mut String, default: &str) {
    if slot.trim().is_empty() {
        *slot = default.to_string();
    }
}

/// One gallery path per non-blank line.
pub fn parse_gallery(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blanks_fall_back_to_defaults() {
        let paths = ImagePaths {
            hero_image: "".into(),
            service_card1: "/uploads/1_a.jpg".into(),
            service_card2: "  ".into(),
            service_card3: "".into(),
            service_card4: "".into(),
            before_after_gallery: vec!["/uploads/g.jpg".into()],
        }
        .with_defaults();
        assert_eq!(paths.hero_image, DEFAULT_HERO_IMAGE);
        assert_eq!(paths.service_card1, "/uploads/1_a.jpg");
        assert_eq!(paths.service_card2, "/images/service2.jpg");
        assert_eq!(paths.before_after_gallery.len(), 1);
    }

    #[test]
    fn gallery_text_skips_blank_lines() {
        let gallery = parse_gallery("/a.jpg\n\n  /b.jpg  \n");
        assert_eq!(gallery, vec!["/a.jpg".to_string(), "/b.jpg".to_string()]);
    }
}
