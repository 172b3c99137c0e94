// Integration tests for the merge pipeline over real encoded PNGs
use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};

use image_merge::{MergeConfig, MergeError, merge, merge_with};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn png_from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize);
    let mut img = ImageBuffer::new(width, height);
    for (i, pixel) in pixels.iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        img.put_pixel(x, y, Rgba(*pixel));
    }

    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("failed to encode test image");
    cursor.into_inner()
}

fn decode_pixels(bytes: &[u8]) -> (u32, u32, Vec<[u8; 4]>) {
    let img = image::load_from_memory(bytes)
        .expect("merged output should decode")
        .to_rgba8();
    let (width, height) = img.dimensions();
    let pixels = img.pixels().map(|p| p.0).collect();
    (width, height, pixels)
}

fn merge_pixels(layers: &[[u8; 4]], config: &MergeConfig) -> [u8; 4] {
    let images: Vec<Vec<u8>> = layers
        .iter()
        .map(|pixel| png_from_pixels(1, 1, &[*pixel]))
        .collect();
    let merged = merge_with(&images, config).expect("merge should succeed");
    let (width, height, pixels) = decode_pixels(&merged);
    assert_eq!((width, height), (1, 1));
    pixels[0]
}

#[test]
fn single_opaque_layer_roundtrips_losslessly() {
    init_logger();
    let pixels = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [17, 34, 51, 255],
    ];
    let merged = merge(&[png_from_pixels(2, 2, &pixels)]).expect("merge should succeed");

    assert_eq!(&merged[..4], b"\x89PNG");
    let (width, height, out) = decode_pixels(&merged);
    assert_eq!((width, height), (2, 2));
    assert_eq!(out, pixels);
}

#[test]
fn fully_transparent_pixels_lose_their_color() {
    init_logger();
    // 原始颜色非零但 Alpha 为零：输出必须是 (0,0,0,0)。
    let out = merge_pixels(&[[200, 100, 50, 0]], &MergeConfig::default());
    assert_eq!(out, [0, 0, 0, 0]);
}

#[test]
fn reference_vectors_from_original_suite() {
    init_logger();
    let config = MergeConfig::default();

    assert_eq!(merge_pixels(&[[0, 0, 0, 255]], &config), [0, 0, 0, 255]);
    assert_eq!(
        merge_pixels(&[[255, 255, 255, 255], [0, 0, 0, 0]], &config),
        [255, 255, 255, 255]
    );
    assert_eq!(
        merge_pixels(
            &[
                [255, 255, 255, 255],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0]
            ],
            &config
        ),
        [255, 255, 255, 255]
    );
    assert_eq!(
        merge_pixels(&[[255, 255, 255, 255], [0, 0, 0, 255]], &config),
        [0, 0, 0, 255]
    );
    assert_eq!(
        merge_pixels(&[[0, 202, 0, 155], [0, 0, 0, 0]], &config),
        [0, 202, 0, 155]
    );
    // 预乘/反预乘舍入链路的参考值：绿色通道 152 -> 151。
    assert_eq!(
        merge_pixels(&[[0, 0, 0, 0], [0, 152, 253, 155]], &config),
        [0, 151, 253, 155]
    );
}

#[test]
fn opaque_top_layer_replaces_every_pixel() {
    init_logger();
    let bottom: Vec<[u8; 4]> = (0..9).map(|i| [i as u8 * 20, 0, 0, 255]).collect();
    let top: Vec<[u8; 4]> = (0..9).map(|i| [0, i as u8 * 25, 7, 255]).collect();

    let merged = merge(&[
        png_from_pixels(3, 3, &bottom),
        png_from_pixels(3, 3, &top),
    ])
    .expect("merge should succeed");

    let (_, _, out) = decode_pixels(&merged);
    assert_eq!(out, top);
}

#[test]
fn fully_transparent_top_layer_is_a_no_op() {
    init_logger();
    let bottom: Vec<[u8; 4]> = (0..4).map(|i| [i as u8 * 60, 100, 200, 255]).collect();
    let transparent = vec![[0u8, 0, 0, 0]; 4];

    let merged = merge(&[
        png_from_pixels(2, 2, &bottom),
        png_from_pixels(2, 2, &transparent),
    ])
    .expect("merge should succeed");

    let (_, _, out) = decode_pixels(&merged);
    assert_eq!(out, bottom);
}

#[test]
fn preserve_colors_keeps_bottom_under_identical_top() {
    init_logger();
    let pixels: Vec<[u8; 4]> = vec![
        [0, 202, 0, 155],
        [255, 255, 255, 255],
        [10, 20, 30, 0],
        [90, 60, 30, 128],
    ];
    let layer = png_from_pixels(2, 2, &pixels);

    let config = MergeConfig {
        preserve_colors: true,
        ..MergeConfig::default()
    };
    let masked = merge_with(&[layer.clone(), layer.clone()], &config)
        .expect("masked merge should succeed");
    let single = merge(&[layer]).expect("single merge should succeed");

    assert_eq!(decode_pixels(&masked), decode_pixels(&single));
}

#[test]
fn empty_stack_is_rejected() {
    init_logger();
    let images: Vec<Vec<u8>> = Vec::new();
    assert!(matches!(merge(&images), Err(MergeError::Input(_))));
}

#[test]
fn oversized_stack_is_rejected_without_decoding() {
    init_logger();
    // 字节不可解码：只要触碰解码器就会得到 Decode 而非 Input。
    let images = vec![b"garbage".to_vec(); 1025];
    assert!(matches!(merge(&images), Err(MergeError::Input(_))));
}

#[test]
fn mismatched_dimensions_are_rejected() {
    init_logger();
    let result = merge(&[
        png_from_pixels(2, 2, &[[0, 0, 0, 255]; 4]),
        png_from_pixels(1, 2, &[[0, 0, 0, 255]; 2]),
    ]);

    assert!(matches!(
        result,
        Err(MergeError::DimensionMismatch {
            expected_width: 2,
            expected_height: 2,
            width: 1,
            height: 2,
        })
    ));
}

#[test]
fn undecodable_layer_is_a_decode_error() {
    init_logger();
    let result = merge(&[
        png_from_pixels(1, 1, &[[0, 0, 0, 255]]),
        b"not a png at all".to_vec(),
    ]);
    assert!(matches!(result, Err(MergeError::Decode(_))));
}

#[test]
fn pixel_limit_guard_maps_to_surface_allocation() {
    init_logger();
    let config = MergeConfig {
        max_layer_pixels: 2,
        ..MergeConfig::default()
    };
    let result = merge_with(&[png_from_pixels(2, 2, &[[0, 0, 0, 255]; 4])], &config);
    assert!(matches!(result, Err(MergeError::SurfaceAllocation(_))));
}

#[test]
fn merging_many_layers_up_to_the_limit_succeeds() {
    init_logger();
    let layer = png_from_pixels(1, 1, &[[7, 7, 7, 255]]);
    let config = MergeConfig {
        max_layers: 64,
        ..MergeConfig::default()
    };

    let images = vec![layer; 64];
    let merged = merge_with(&images, &config).expect("merge should succeed");
    let (_, _, out) = decode_pixels(&merged);
    assert_eq!(out, vec![[7, 7, 7, 255]]);
}
