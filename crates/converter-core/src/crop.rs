//! Centered aspect-ratio cropping.

use image::{DynamicImage, GenericImageView};

use crate::ratio::AspectRatio;

/// Crop bounds into a source image.
///
/// `left < right <= width` and `top < bottom <= height` of the image the
/// rectangle was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Compute the largest centered rectangle of `width` x `height` that has the
/// given ratio.
///
/// A source wider than the ratio keeps its full height and loses columns on
/// both sides; anything else (taller, or already matching) keeps its full
/// width and loses rows top and bottom. Sides are floored, and never drop
/// below one pixel.
pub fn crop_rect(width: u32, height: u32, ratio: AspectRatio) -> CropRect {
    let (w, h) = (width as u64, height as u64);
    let (rw, rh) = (ratio.width() as u64, ratio.height() as u64);

    if w * rh > rw * h {
        let new_width = ((h * rw / rh) as u32).max(1);
        let left = (width - new_width) / 2;
        CropRect {
            left,
            top: 0,
            right: left + new_width,
            bottom: height,
        }
    } else {
        let new_height = ((w * rh / rw) as u32).max(1);
        let top = (height - new_height) / 2;
        CropRect {
            left: 0,
            top,
            right: width,
            bottom: top + new_height,
        }
    }
}

/// Crop `image` to `ratio`, returning a new image.
pub fn crop(image: &DynamicImage, ratio: AspectRatio) -> DynamicImage {
    let (width, height) = image.dimensions();
    let rect = crop_rect(width, height, ratio);

    log::debug!(
        "Cropping {}x{} to {}: x {}..{}, y {}..{}",
        width,
        height,
        ratio,
        rect.left,
        rect.right,
        rect.top,
        rect.bottom
    );

    image.crop_imm(rect.left, rect.top, rect.width(), rect.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use proptest::prelude::*;

    fn ratio(w: u32, h: u32) -> AspectRatio {
        AspectRatio::new(w, h).unwrap()
    }

    #[test]
    fn wide_source_to_square() {
        let rect = crop_rect(1000, 500, ratio(1, 1));
        assert_eq!(
            rect,
            CropRect {
                left: 250,
                top: 0,
                right: 750,
                bottom: 500
            }
        );
    }

    #[test]
    fn tall_source_to_four_three() {
        let rect = crop_rect(500, 1000, ratio(4, 3));
        assert_eq!(rect.width(), 500);
        assert_eq!(rect.height(), 375);
        assert_eq!(rect.top, 312);
        assert_eq!(rect.bottom, 687);
    }

    #[test]
    fn matching_ratio_keeps_everything() {
        let rect = crop_rect(1920, 1080, ratio(16, 9));
        assert_eq!(
            rect,
            CropRect {
                left: 0,
                top: 0,
                right: 1920,
                bottom: 1080
            }
        );
    }

    #[test]
    fn extreme_ratio_keeps_one_pixel() {
        let rect = crop_rect(1, 1000, ratio(1000, 1));
        assert_eq!(rect.width(), 1);
        assert_eq!(rect.height(), 1);
        assert_eq!(rect.top, 499);
    }

    #[test]
    fn crop_takes_pixels_from_the_center() {
        let mut source = RgbaImage::from_pixel(1000, 500, Rgba([0, 0, 0, 255]));
        source.put_pixel(250, 0, Rgba([255, 0, 0, 255]));
        source.put_pixel(749, 499, Rgba([0, 255, 0, 255]));
        let source = DynamicImage::ImageRgba8(source);

        let cropped = crop(&source, ratio(1, 1));

        assert_eq!(cropped.dimensions(), (500, 500));
        assert_eq!(cropped.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(cropped.get_pixel(499, 499), Rgba([0, 255, 0, 255]));
    }

    proptest! {
        #[test]
        fn crop_matches_ratio_within_source(
            width in 50u32..4000,
            height in 50u32..4000,
            rw in 1u32..50,
            rh in 1u32..50,
        ) {
            let rect = crop_rect(width, height, ratio(rw, rh));

            prop_assert!(rect.left < rect.right && rect.right <= width);
            prop_assert!(rect.top < rect.bottom && rect.bottom <= height);
            prop_assert!(rect.width() == width || rect.height() == height);

            // The constrained side is the floor of the exact value.
            let (cw, ch) = (rect.width() as u64, rect.height() as u64);
            let (rw, rh) = (rw as u64, rh as u64);
            let width_floored = cw * rh <= ch * rw && ch * rw < (cw + 1) * rh;
            let height_floored = ch * rw <= cw * rh && cw * rh < (ch + 1) * rw;
            prop_assert!(width_floored || height_floored);
        }

        #[test]
        fn crop_at_own_ratio_discards_nothing(
            width in 1u32..2000,
            height in 1u32..2000,
        ) {
            let rect = crop_rect(width, height, ratio(width, height));
            prop_assert_eq!(rect.width(), width);
            prop_assert_eq!(rect.height(), height);
        }

        #[test]
        fn crop_is_centered(
            width in 1u32..3000,
            height in 1u32..3000,
            rw in 1u32..20,
            rh in 1u32..20,
        ) {
            let rect = crop_rect(width, height, ratio(rw, rh));
            let slack_x = rect.left + (width - rect.right);
            let slack_y = rect.top + (height - rect.bottom);
            prop_assert!(rect.left == slack_x / 2);
            prop_assert!(rect.top == slack_y / 2);
        }
    }
}
