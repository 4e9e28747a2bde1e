//! Pixel classification: which pixels of the input belong to a curve.
//!
//! The sweep asks the classifier exactly once per pixel. Implementations must
//! be deterministic and free of side effects.
use crate::image::ImageView;
use serde::{Deserialize, Serialize};

pub trait PixelClassifier<I: ?Sized> {
    fn is_active(&self, image: &I, x: usize, y: usize) -> bool;
}

impl<I: ?Sized, F> PixelClassifier<I> for F
where
    F: Fn(&I, usize, usize) -> bool,
{
    #[inline]
    fn is_active(&self, image: &I, x: usize, y: usize) -> bool {
        self(image, x, y)
    }
}

/// Which side of the threshold counts as curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
    /// Dark curves on a light background (`value <= threshold`).
    #[default]
    Dark,
    /// Light curves on a dark background (`value > threshold`).
    Light,
}

/// Fixed intensity threshold on 8-bit grayscale input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdClassifier {
    pub threshold: u8,
    pub polarity: Polarity,
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self {
            threshold: 128,
            polarity: Polarity::Dark,
        }
    }
}

impl ThresholdClassifier {
    pub fn new(threshold: u8, polarity: Polarity) -> Self {
        Self {
            threshold,
            polarity,
        }
    }

    #[inline]
    pub fn classify(&self, value: u8) -> bool {
        match self.polarity {
            Polarity::Dark => value <= self.threshold,
            Polarity::Light => value > self.threshold,
        }
    }
}

impl<I> PixelClassifier<I> for ThresholdClassifier
where
    I: ImageView<Pixel = u8> + ?Sized,
{
    #[inline]
    fn is_active(&self, image: &I, x: usize, y: usize) -> bool {
        self.classify(image.get(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageU8;

    #[test]
    fn polarity_selects_side_of_threshold() {
        let dark = ThresholdClassifier::new(100, Polarity::Dark);
        let light = ThresholdClassifier::new(100, Polarity::Light);
        assert!(dark.classify(100));
        assert!(!dark.classify(101));
        assert!(!light.classify(100));
        assert!(light.classify(101));
    }

    #[test]
    fn closures_act_as_classifiers() {
        let data = [0u8, 10, 20, 30];
        let view = ImageU8::new(2, 2, &data);
        let odd_rows = |_: &ImageU8<'_>, _x: usize, y: usize| y % 2 == 1;
        assert!(!odd_rows.is_active(&view, 0, 0));
        assert!(odd_rows.is_active(&view, 1, 1));
        assert!(ThresholdClassifier::default().is_active(&view, 1, 1));
    }
}
