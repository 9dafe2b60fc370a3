use std::collections::BTreeSet;

use pixform_image::PixelBuffer;
use pixform_imgproc::warp::{CanvasPolicy, RotateOptions};
use pixform_imgproc::{block_average, box_average, quantize, rotate, rotate_with, ImgprocError};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_buffer(rng: &mut StdRng, channels: usize) -> PixelBuffer {
    let width = rng.random_range(1..=24);
    let height = rng.random_range(1..=24);
    let samples = (0..width * height * channels)
        .map(|_| rng.random::<u8>())
        .collect();
    PixelBuffer::from_raw(width, height, channels, samples).unwrap()
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn quantize_ramp_has_exactly_levels_values() -> Result<(), ImgprocError> {
    init_logger();
    let ramp = PixelBuffer::from_raw(256, 1, 1, (0..=255u8).collect())?;

    for exp in 1..=8 {
        let levels = 1usize << exp;
        let step = 255 / (levels - 1);
        let out = quantize(&ramp, levels)?;

        let distinct: BTreeSet<u8> = out.as_slice().iter().copied().collect();
        assert_eq!(distinct.len(), levels, "levels = {levels}");
        assert!(distinct.iter().all(|&v| v as usize % step == 0));
        assert!(out
            .as_slice()
            .iter()
            .zip(ramp.as_slice())
            .all(|(&o, &i)| o <= i));
    }

    Ok(())
}

#[test]
fn quantize_only_rounds_down() -> Result<(), ImgprocError> {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let buffer = random_buffer(&mut rng, 1);
        let out = quantize(&buffer, 8)?;
        assert_eq!(out.size(), buffer.size());
        assert!(out
            .as_slice()
            .iter()
            .zip(buffer.as_slice())
            .all(|(&o, &i)| o <= i && o % 36 == 0));
    }
    Ok(())
}

#[test]
fn quantize_scenario_and_invalid_levels() -> Result<(), ImgprocError> {
    let buffer = PixelBuffer::from_raw(8, 8, 1, vec![200; 64])?;
    let out = quantize(&buffer, 4)?;
    assert!(out.as_slice().iter().all(|&v| v == 170));

    for levels in [0, 1, 5, 257, 1024] {
        let err = quantize(&buffer, levels).unwrap_err();
        assert!(err.is_invalid_parameter(), "levels = {levels}");
    }
    Ok(())
}

#[test]
fn box_average_identity_on_random_buffers() -> Result<(), ImgprocError> {
    let mut rng = StdRng::seed_from_u64(11);
    for channels in [1, 3] {
        for _ in 0..5 {
            let buffer = random_buffer(&mut rng, channels);
            assert_eq!(box_average(&buffer, 1)?, buffer);

            let blurred = box_average(&buffer, rng.random_range(2..=30))?;
            assert_eq!(blurred.size(), buffer.size());
            assert_eq!(blurred.channels(), channels);
        }
    }
    Ok(())
}

#[test]
fn box_average_stays_within_input_range() -> Result<(), ImgprocError> {
    let mut rng = StdRng::seed_from_u64(13);
    let buffer = random_buffer(&mut rng, 1);
    let (min, max) = buffer
        .as_slice()
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    let out = box_average(&buffer, 5)?;
    assert!(out.as_slice().iter().all(|&v| v >= min && v <= max));
    Ok(())
}

#[test]
fn block_average_dimensions_and_identity() -> Result<(), ImgprocError> {
    let mut rng = StdRng::seed_from_u64(17);
    for channels in [1, 3] {
        for _ in 0..5 {
            let buffer = random_buffer(&mut rng, channels);
            assert_eq!(block_average(&buffer, 1)?, buffer);

            for block in [2, 3, 5, 7, 40] {
                let out = block_average(&buffer, block)?;
                assert_eq!(out.width(), buffer.width().div_ceil(block));
                assert_eq!(out.height(), buffer.height().div_ceil(block));
                assert_eq!(out.channels(), channels);
            }
        }
    }
    Ok(())
}

#[test]
fn block_average_scenario() -> Result<(), ImgprocError> {
    let samples = (0..16).map(|i| i * 10).collect();
    let buffer = PixelBuffer::from_raw(4, 4, 1, samples)?;

    let out = block_average(&buffer, 2)?;
    assert_eq!((out.width(), out.height()), (2, 2));
    assert_eq!(out.as_slice()[0], 25);
    Ok(())
}

#[test]
fn block_average_exact_division_matches_mean() -> Result<(), ImgprocError> {
    let mut rng = StdRng::seed_from_u64(19);
    let samples: Vec<u8> = (0..6 * 9 * 3).map(|_| rng.random()).collect();
    let buffer = PixelBuffer::from_raw(6, 9, 3, samples.clone())?;

    let out = block_average(&buffer, 3)?;
    for by in 0..3 {
        for bx in 0..2 {
            for ch in 0..3 {
                let mut sum = 0u32;
                for y in by * 3..by * 3 + 3 {
                    for x in bx * 3..bx * 3 + 3 {
                        sum += samples[(y * 6 + x) * 3 + ch] as u32;
                    }
                }
                assert_eq!(out.as_slice()[(by * 2 + bx) * 3 + ch] as u32, sum / 9);
            }
        }
    }
    Ok(())
}

#[test]
fn rotate_full_turns_are_identity() -> Result<(), ImgprocError> {
    let mut rng = StdRng::seed_from_u64(23);
    for channels in [1, 3] {
        let buffer = random_buffer(&mut rng, channels);
        assert_eq!(rotate(&buffer, 0.0)?, buffer);
        assert_eq!(rotate(&buffer, 360.0)?, rotate(&buffer, 0.0)?);
        assert_eq!(rotate(&buffer, -360.0)?, buffer);
    }
    Ok(())
}

#[test]
fn rotate_four_quarter_turns_round_trip() -> Result<(), ImgprocError> {
    let mut rng = StdRng::seed_from_u64(29);
    let buffer = random_buffer(&mut rng, 3);

    let mut out = buffer.clone();
    for _ in 0..4 {
        out = rotate(&out, 90.0)?;
    }
    assert_eq!(out, buffer);
    Ok(())
}

#[test]
fn rotate_expanded_canvas_only_holds_fill_or_source() -> Result<(), ImgprocError> {
    let buffer = PixelBuffer::from_raw(10, 6, 1, vec![42; 60])?;
    let options = RotateOptions::default().fill(255);

    let out = rotate_with(&buffer, 30.0, &options)?;
    assert!(out.width() >= 10 && out.height() >= 6);
    assert_eq!(out.as_slice()[0], 255);
    assert!(out.as_slice().iter().all(|&v| v == 42 || v == 255));

    let cropped = rotate_with(&buffer, 30.0, &options.canvas(CanvasPolicy::Crop))?;
    assert_eq!(cropped.size(), buffer.size());
    Ok(())
}

#[test]
fn concurrent_transforms_share_input() -> Result<(), ImgprocError> {
    let mut rng = StdRng::seed_from_u64(31);
    let buffer = random_buffer(&mut rng, 3);

    let (a, b) = std::thread::scope(|s| {
        let a = s.spawn(|| box_average(&buffer, 3));
        let b = s.spawn(|| box_average(&buffer, 3));
        (a.join().unwrap(), b.join().unwrap())
    });
    assert_eq!(a?, b?);
    Ok(())
}
