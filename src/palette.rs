//! Built-in PASCAL VOC legend and the default tracked classes.

use crate::model::{Color, Legend};

/// PASCAL VOC class labels in class-index order.
pub const PASCAL_VOC_LABELS: [&str; 21] = [
    "background",
    "aeroplane",
    "bicycle",
    "bird",
    "boat",
    "bottle",
    "bus",
    "car",
    "cat",
    "chair",
    "cow",
    "diningtable",
    "dog",
    "horse",
    "motorbike",
    "person",
    "pottedplant",
    "sheep",
    "sofa",
    "train",
    "tvmonitor",
];

/// Animal classes reported by default.
pub const DEFAULT_TRACKED_CLASSES: [&str; 44] = [
    "dog", "cat", "horse", "cow", "sheep", "bird", "person", "elephant", "bear", "zebra",
    "giraffe", "deer", "monkey", "kangaroo", "panda", "tiger", "lion", "leopard", "fox", "wolf",
    "rabbit", "pig", "goat", "chicken", "duck", "goose", "turkey", "camel", "buffalo", "donkey",
    "squirrel", "mouse", "rat", "bat", "penguin", "seal", "whale", "dolphin", "shark", "fish",
    "crocodile", "turtle", "frog", "snake",
];

/// Color the VOC color map assigns to class `index`.
///
/// The low three bits of the index feed the top bit of R, G and B, the next
/// three bits the next bit down, and so on.
pub fn voc_color(index: u8) -> Color {
    let (mut r, mut g, mut b) = (0u8, 0u8, 0u8);
    let mut c = index;
    for shift in (0..8).rev() {
        r |= (c & 1) << shift;
        g |= ((c >> 1) & 1) << shift;
        b |= ((c >> 2) & 1) << shift;
        c >>= 3;
    }
    Color::new(r, g, b)
}

/// Legend of the 21 PASCAL VOC classes, background included.
pub fn pascal_voc_legend() -> Legend {
    PASCAL_VOC_LABELS
        .iter()
        .zip(0u8..)
        .map(|(label, index)| (*label, voc_color(index)))
        .collect()
}

/// Owned copy of [`DEFAULT_TRACKED_CLASSES`].
pub fn default_tracked_classes() -> Vec<String> {
    DEFAULT_TRACKED_CLASSES.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::LegendResolver;

    #[test]
    fn test_voc_colors() {
        assert_eq!(voc_color(0), Color::new(0, 0, 0));
        assert_eq!(voc_color(1), Color::new(128, 0, 0));
        assert_eq!(voc_color(2), Color::new(0, 128, 0));
        assert_eq!(voc_color(8), Color::new(64, 0, 0));
        assert_eq!(voc_color(12), Color::new(64, 0, 128));
        assert_eq!(voc_color(15), Color::new(192, 128, 128));
        assert_eq!(voc_color(20), Color::new(0, 64, 128));
    }

    #[test]
    fn test_pascal_legend_lookup() {
        let legend = pascal_voc_legend();
        assert_eq!(legend.len(), 21);
        assert_eq!(legend.color_of("dog"), Some(Color::new(64, 0, 128)));
        assert_eq!(legend.color_of("person"), Some(Color::new(192, 128, 128)));
    }

    #[test]
    fn test_pascal_legend_colors_are_unique() {
        assert!(LegendResolver::new(&pascal_voc_legend()).is_ok());
    }

    #[test]
    fn test_tracked_classes() {
        let tracked = default_tracked_classes();
        assert_eq!(tracked.len(), 44);
        assert!(tracked.iter().any(|c| c == "dog"));
        assert!(!tracked.iter().any(|c| c == "tvmonitor"));
    }
}
