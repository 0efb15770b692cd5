use std::cell::Cell;
use std::fs::{self, File};
use std::path::Path;
use std::rc::Rc;

use converter_core::{
    AspectRatio, ConversionRequest, ConvertError, Converter, ConverterConfig, IconPackager,
    OutputFormat, crop, open_image,
};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use tempfile::tempdir;

fn write_sample(path: &Path, width: u32, height: u32) {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255]));
    img.put_pixel(0, 0, Rgba([255, 0, 0, 128]));
    img.save(path).unwrap();
}

/// Packager that only counts calls and writes a placeholder container.
struct CountingPackager {
    eligible: bool,
    calls: Rc<Cell<usize>>,
}

impl IconPackager for CountingPackager {
    fn check_platform(&self) -> Result<(), ConvertError> {
        if self.eligible {
            Ok(())
        } else {
            Err(ConvertError::UnsupportedPlatform("test"))
        }
    }

    fn package(&self, iconset_dir: &Path, output: &Path) -> Result<(), ConvertError> {
        self.calls.set(self.calls.get() + 1);
        assert_eq!(fs::read_dir(iconset_dir).unwrap().count(), 10);
        fs::write(output, b"icns").unwrap();
        Ok(())
    }
}

#[test]
fn png_to_ico_is_always_48x48() {
    let dir = tempdir().unwrap();
    let converter = Converter::default();

    for (width, height) in [(640, 480), (16, 16), (30, 200)] {
        let input = dir.path().join(format!("in_{}x{}.png", width, height));
        let output = dir.path().join(format!("out_{}x{}.ico", width, height));
        write_sample(&input, width, height);

        converter
            .convert(&ConversionRequest::new(&input, &output, OutputFormat::Ico))
            .unwrap();

        let icon_dir = ico::IconDir::read(File::open(&output).unwrap()).unwrap();
        assert_eq!(icon_dir.entries().len(), 1);
        assert_eq!(icon_dir.entries()[0].width(), 48);
        assert_eq!(icon_dir.entries()[0].height(), 48);
        assert_eq!(image::open(&output).unwrap().dimensions(), (48, 48));
    }
}

#[test]
fn png_to_jpeg_keeps_dimensions() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.jpg");
    write_sample(&input, 120, 80);

    Converter::default()
        .convert(&ConversionRequest::new(&input, &output, OutputFormat::Jpeg))
        .unwrap();

    let decoded = image::open(&output).unwrap();
    assert_eq!(decoded.dimensions(), (120, 80));
    assert_eq!(
        image::ImageFormat::from_path(&output).unwrap(),
        image::ImageFormat::Jpeg
    );
}

#[test]
fn jpeg_to_png_round_trip_dimensions() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let jpeg = dir.path().join("mid.jpg");
    let png = dir.path().join("out.png");
    write_sample(&input, 33, 21);

    let converter = Converter::default();
    converter
        .convert(&ConversionRequest::new(&input, &jpeg, OutputFormat::Jpeg))
        .unwrap();
    converter
        .convert(&ConversionRequest::new(&jpeg, &png, OutputFormat::Png))
        .unwrap();

    assert_eq!(image::open(&png).unwrap().dimensions(), (33, 21));
}

#[test]
fn missing_input_is_conversion_failure() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.png");

    let result = Converter::default().convert(&ConversionRequest::new(
        dir.path().join("missing.png"),
        &output,
        OutputFormat::Png,
    ));

    assert!(matches!(result, Err(ConvertError::ConversionFailed { .. })));
    assert!(!output.exists());
}

#[test]
fn unwritable_output_is_conversion_failure() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    write_sample(&input, 10, 10);
    let output = dir.path().join("no-such-dir").join("out.ico");

    let result =
        Converter::default().convert(&ConversionRequest::new(&input, &output, OutputFormat::Ico));

    assert!(matches!(result, Err(ConvertError::ConversionFailed { .. })));
}

#[test]
fn icns_uses_packager() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.icns");
    write_sample(&input, 64, 64);

    let calls = Rc::new(Cell::new(0));
    let converter = Converter::default().with_packager(Box::new(CountingPackager {
        eligible: true,
        calls: Rc::clone(&calls),
    }));

    converter
        .convert(&ConversionRequest::new(&input, &output, OutputFormat::Icns))
        .unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(fs::read(&output).unwrap(), b"icns");
}

#[test]
fn icns_on_ineligible_platform_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.icns");
    write_sample(&input, 64, 64);

    let calls = Rc::new(Cell::new(0));
    let converter = Converter::default().with_packager(Box::new(CountingPackager {
        eligible: false,
        calls: Rc::clone(&calls),
    }));

    let result = converter.convert(&ConversionRequest::new(&input, &output, OutputFormat::Icns));

    assert!(matches!(result, Err(ConvertError::UnsupportedPlatform(_))));
    assert_eq!(calls.get(), 0);
    assert!(!output.exists());
}

#[cfg(not(target_os = "macos"))]
#[test]
fn default_converter_rejects_icns_off_macos() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.icns");
    write_sample(&input, 16, 16);

    let result = Converter::new(ConverterConfig::default())
        .convert(&ConversionRequest::new(&input, &output, OutputFormat::Icns));

    assert!(matches!(result, Err(ConvertError::UnsupportedPlatform(_))));
    assert!(!output.exists());
}

#[test]
fn cropped_image_goes_straight_to_dispatcher() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("square.png");
    write_sample(&input, 1000, 500);

    let source = open_image(&input).unwrap();
    let ratio: AspectRatio = "1:1".parse().unwrap();
    let cropped: DynamicImage = crop(&source, ratio);

    Converter::default()
        .convert_image(&cropped, &output, OutputFormat::Png)
        .unwrap();

    assert_eq!(image::open(&output).unwrap().dimensions(), (500, 500));
}
