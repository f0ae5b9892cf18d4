/*!
 * Tests for background image compositing
 */

use image::{DynamicImage, Rgb, RgbImage};
use quotereel::image_compositor::{cover_resize, prepare_background};
use crate::common;

fn solid_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// Test that the output always has exactly the target dimensions
#[test]
fn test_cover_resize_withVariousSources_shouldMatchTargetDimensions() {
    let targets = [(1080, 1920), (640, 480), (100, 100)];
    let sources = [(4000, 3000), (300, 800), (50, 50), (1, 1)];

    for (tw, th) in targets {
        for (sw, sh) in sources {
            let source = solid_image(sw, sh, [10, 20, 30]);
            let result = cover_resize(&source, (tw, th)).unwrap();
            assert_eq!(result.dimensions(), (tw, th),
                "wrong output size for source {}x{} target {}x{}", sw, sh, tw, th);
        }
    }
}

/// Test that cover semantics leave no black bars: a wide source scaled onto a
/// tall canvas must fill the corners with source content, not canvas fill
#[test]
fn test_cover_resize_withWideSourceOnTallTarget_shouldLeaveNoBlackBars() {
    let source = solid_image(400, 100, [200, 40, 40]);
    let result = cover_resize(&source, (100, 200)).unwrap();

    assert_eq!(result.get_pixel(0, 0).0, [200, 40, 40]);
    assert_eq!(result.get_pixel(99, 199).0, [200, 40, 40]);
    assert_eq!(result.get_pixel(50, 100).0, [200, 40, 40]);
}

/// Test that a tall source on a wide canvas also covers fully
#[test]
fn test_cover_resize_withTallSourceOnWideTarget_shouldLeaveNoBlackBars() {
    let source = solid_image(100, 400, [40, 40, 200]);
    let result = cover_resize(&source, (200, 100)).unwrap();

    assert_eq!(result.get_pixel(0, 0).0, [40, 40, 200]);
    assert_eq!(result.get_pixel(199, 99).0, [40, 40, 200]);
}

/// Test that the crop is centered: a source with a distinct center column
/// keeps that column at the center of the output
#[test]
fn test_cover_resize_withMarkedCenter_shouldCropCentered() {
    // 300x100 source, center third green, outer thirds red; target is square
    // so the left and right thirds get cropped symmetrically.
    let mut source = RgbImage::from_pixel(300, 100, Rgb([200, 0, 0]));
    for x in 100..200 {
        for y in 0..100 {
            source.put_pixel(x, y, Rgb([0, 200, 0]));
        }
    }
    let result = cover_resize(&DynamicImage::ImageRgb8(source), (100, 100)).unwrap();

    // The surviving horizontal window is the middle 100 of 300 source pixels
    assert_eq!(result.get_pixel(50, 50).0, [0, 200, 0]);
}

/// Test that a zero-sized target is rejected
#[test]
fn test_cover_resize_withZeroTarget_shouldReturnError() {
    let source = solid_image(100, 100, [0, 0, 0]);
    assert!(cover_resize(&source, (0, 1920)).is_err());
    assert!(cover_resize(&source, (1080, 0)).is_err());
}

/// Test the file-level wrapper: load, composite, save
#[test]
fn test_prepare_background_withValidImage_shouldWriteTargetSizedPng() {
    let temp_dir = common::create_temp_dir().unwrap();
    let source_path = common::create_test_image(temp_dir.path(), "bg.png", 640, 480).unwrap();
    let output_path = temp_dir.path().join("prepared.png");

    prepare_background(&source_path, (270, 480), &output_path).unwrap();

    let written = image::open(&output_path).unwrap().to_rgb8();
    assert_eq!(written.dimensions(), (270, 480));
}

/// Test that a missing source image is an error
#[test]
fn test_prepare_background_withMissingSource_shouldReturnError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let result = prepare_background(
        temp_dir.path().join("does_not_exist.jpg"),
        (1080, 1920),
        temp_dir.path().join("out.png"),
    );
    assert!(result.is_err());
}
