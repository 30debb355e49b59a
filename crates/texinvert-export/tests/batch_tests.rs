//! Integration tests for the batch inverter
//!
//! These tests run the inverter against real directories of PNG files:
//! - Selection by case-sensitive `.png` suffix
//! - Non-recursive listing
//! - Pixel results, alpha and dimension invariance
//! - Abort-on-error and keep-going policies
//! - Dry runs and empty directories

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;

use texinvert_core::{Error, FailurePolicy, FileStatus, ListingOrder};
use texinvert_export::{invert_all, InvertOptions, TextureInverter};

/// Helper to write an RGBA texture
fn write_rgba(dir: &Path, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    image.save_with_format(&path, image::ImageFormat::Png).unwrap();
    path
}

fn read_rgba(path: &Path) -> RgbaImage {
    image::open(path).unwrap().into_rgba8()
}

fn white_2x2() -> RgbaImage {
    RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]))
}

fn sorted() -> TextureInverter {
    TextureInverter::with_options(InvertOptions {
        order: ListingOrder::Name,
        ..Default::default()
    })
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_white_texture_becomes_black() {
        let dir = TempDir::new().unwrap();
        let path = write_rgba(dir.path(), "white.png", &white_2x2());

        let report = invert_all(dir.path()).unwrap();

        assert_eq!(report.inverted(), 1);
        let out = read_rgba(&path);
        assert_eq!(out.dimensions(), (2, 2));
        assert!(out.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_alpha_is_preserved() {
        let dir = TempDir::new().unwrap();
        let source = RgbaImage::from_fn(4, 3, |x, y| {
            Rgba([(x * 60) as u8, (y * 80) as u8, 17, (x * 40 + y * 10) as u8])
        });
        let path = write_rgba(dir.path(), "glyph.png", &source);

        invert_all(dir.path()).unwrap();

        let out = read_rgba(&path);
        assert_eq!(out.dimensions(), source.dimensions());
        for (o, s) in out.pixels().zip(source.pixels()) {
            assert_eq!(o[3], s[3]);
            assert_eq!([o[0], o[1], o[2]], [255 - s[0], 255 - s[1], 255 - s[2]]);
        }
    }

    #[test]
    fn test_running_twice_restores_original() {
        let dir = TempDir::new().unwrap();
        let source = RgbaImage::from_fn(5, 5, |x, y| Rgba([x as u8 * 50, y as u8 * 50, 128, 200]));
        let path = write_rgba(dir.path(), "c065.png", &source);

        invert_all(dir.path()).unwrap();
        invert_all(dir.path()).unwrap();

        assert_eq!(read_rgba(&path), source);
    }

    #[test]
    fn test_rgb_source_written_as_rgba() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rgb.png");
        RgbImage::from_pixel(3, 1, Rgb([0, 100, 255])).save(&path).unwrap();

        invert_all(dir.path()).unwrap();

        let decoded = image::open(&path).unwrap();
        assert!(matches!(decoded, DynamicImage::ImageRgba8(_)));
        assert!(decoded.to_rgba8().pixels().all(|p| *p == Rgba([255, 155, 0, 255])));
    }

    #[test]
    fn test_sixteen_bit_source_keeps_depth() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep.png");
        let source: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(2, 2, Rgba([0, 1000, 65535, 30000]));
        DynamicImage::ImageRgba16(source).save(&path).unwrap();

        let report = invert_all(dir.path()).unwrap();
        assert_eq!(report.outcomes[0].bit_depth, 16);

        let out = image::open(&path).unwrap().into_rgba16();
        assert!(out.pixels().all(|p| *p == Rgba([65535, 64535, 0, 30000])));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_texture_inverts_its_target() {
        let dir = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let real = write_rgba(other.path(), "real.png", &white_2x2());
        let link = dir.path().join("link.png");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let report = invert_all(dir.path()).unwrap();

        assert_eq!(report.inverted(), 1);
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), real);
        assert!(read_rgba(&real).pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }
}

mod selection_tests {
    use super::*;

    #[test]
    fn test_only_lowercase_png_is_processed() {
        let dir = TempDir::new().unwrap();
        let a = write_rgba(dir.path(), "a.png", &white_2x2());
        let b = write_rgba(dir.path(), "b.PNG", &white_2x2());
        fs::write(dir.path().join("c.txt"), b"notes").unwrap();
        fs::write(dir.path().join("d.jpg"), b"not really a jpeg").unwrap();

        let report = invert_all(dir.path()).unwrap();

        assert_eq!(report.total(), 1);
        assert_eq!(report.outcomes[0].path, a);
        assert_eq!(*read_rgba(&a).get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(read_rgba(&b), white_2x2());
        assert_eq!(fs::read(dir.path().join("c.txt")).unwrap(), b"notes");
        assert_eq!(fs::read(dir.path().join("d.jpg")).unwrap(), b"not really a jpeg");
    }

    #[test]
    fn test_subdirectories_are_not_entered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let nested = write_rgba(&dir.path().join("sub"), "e.png", &white_2x2());
        let top = write_rgba(dir.path(), "top.png", &white_2x2());

        let report = invert_all(dir.path()).unwrap();

        assert_eq!(report.total(), 1);
        assert_eq!(read_rgba(&nested), white_2x2());
        assert_ne!(read_rgba(&top), white_2x2());
    }

    #[test]
    fn test_no_new_files_are_left_behind() {
        let dir = TempDir::new().unwrap();
        write_rgba(dir.path(), "a.png", &white_2x2());
        write_rgba(dir.path(), "b.png", &white_2x2());

        invert_all(dir.path()).unwrap();

        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["a.png", "b.png"]);
    }

    #[test]
    fn test_empty_directory_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readme.txt"), b"").unwrap();

        let report = invert_all(dir.path()).unwrap();

        assert_eq!(report.total(), 0);
        assert!(report.is_success());
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = invert_all(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::InvalidDirectory(_)));
    }

    #[test]
    fn test_file_instead_of_directory() {
        let dir = TempDir::new().unwrap();
        let file = write_rgba(dir.path(), "a.png", &white_2x2());

        let err = invert_all(&file).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
        assert_eq!(read_rgba(&file), white_2x2());
    }

    #[test]
    fn test_abort_on_decode_error() {
        let dir = TempDir::new().unwrap();
        let good = write_rgba(dir.path(), "a_good.png", &white_2x2());
        let bad = dir.path().join("b_bad.png");
        fs::write(&bad, b"").unwrap();
        let later = write_rgba(dir.path(), "c_later.png", &white_2x2());

        let err = sorted().invert_all(dir.path()).unwrap_err();

        assert!(matches!(err, Error::Decode { .. }));
        assert!(read_rgba(&good).pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
        assert!(fs::read(&bad).unwrap().is_empty());
        assert_eq!(read_rgba(&later), white_2x2());
    }

    #[test]
    fn test_abort_in_listing_order() {
        let dir = TempDir::new().unwrap();
        let good = write_rgba(dir.path(), "good.png", &white_2x2());
        let bad = dir.path().join("bad.png");
        fs::write(&bad, b"").unwrap();

        let err = invert_all(dir.path()).unwrap_err();

        // Whether good.png came first depends on the filesystem; either way
        // it holds original or inverted pixels, never anything else.
        assert!(err.is_decode_error());
        assert!(fs::read(&bad).unwrap().is_empty());
        let pixel = *read_rgba(&good).get_pixel(0, 0);
        assert!(pixel == Rgba([255, 255, 255, 255]) || pixel == Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_keep_going_collects_failures() {
        let dir = TempDir::new().unwrap();
        let first = write_rgba(dir.path(), "a.png", &white_2x2());
        fs::write(dir.path().join("b.png"), b"garbage").unwrap();
        let last = write_rgba(dir.path(), "c.png", &white_2x2());

        let inverter = TextureInverter::with_options(InvertOptions {
            order: ListingOrder::Name,
            policy: FailurePolicy::Continue,
            dry_run: false,
        });
        let report = inverter.invert_all(dir.path()).unwrap();

        assert_eq!(report.inverted(), 2);
        assert_eq!(report.failed(), 1);
        let statuses: Vec<_> = report.outcomes.iter().map(|o| o.status).collect();
        assert_eq!(statuses, [FileStatus::Inverted, FileStatus::Failed, FileStatus::Inverted]);
        assert!(report.outcomes[1].error.as_deref().unwrap().contains("b.png"));

        assert_ne!(read_rgba(&first), white_2x2());
        assert_ne!(read_rgba(&last), white_2x2());
        assert_eq!(fs::read(dir.path().join("b.png")).unwrap(), b"garbage");

        assert!(matches!(
            report.into_result().unwrap_err(),
            Error::BatchFailed { failed: 1, total: 3 }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_abort_on_write_error() {
        use std::os::unix::fs::{symlink, PermissionsExt};

        let dir = TempDir::new().unwrap();
        let first = write_rgba(dir.path(), "a.png", &white_2x2());
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let real = write_rgba(&locked, "real.png", &white_2x2());
        symlink(&real, dir.path().join("b.png")).unwrap();
        let later = write_rgba(dir.path(), "c.png", &white_2x2());

        // b.png decodes fine but its target directory refuses the temp file.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
        if fs::write(locked.join("writable"), b"").is_ok() {
            // Running as root: permissions are not enforced.
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = sorted().invert_all(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(err.is_write_error());
        assert!(read_rgba(&first).pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
        assert_eq!(read_rgba(&real), white_2x2());
        assert_eq!(read_rgba(&later), white_2x2());
        assert_eq!(fs::read_dir(&locked).unwrap().count(), 1);
    }
}

mod dry_run_tests {
    use super::*;

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let a = write_rgba(dir.path(), "a.png", &white_2x2());
        let before = fs::read(&a).unwrap();
        fs::write(dir.path().join("broken.png"), b"").unwrap();

        let inverter = TextureInverter::with_options(InvertOptions {
            dry_run: true,
            ..Default::default()
        });
        let report = inverter.invert_all(dir.path()).unwrap();

        assert_eq!(report.total(), 2);
        assert_eq!(report.skipped(), 2);
        assert_eq!(fs::read(&a).unwrap(), before);
    }

    #[test]
    fn test_report_serializes() {
        let dir = TempDir::new().unwrap();
        write_rgba(dir.path(), "a.png", &white_2x2());

        let report = invert_all(dir.path()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["outcomes"][0]["status"], "inverted");
        assert_eq!(json["outcomes"][0]["width"], 2);
        assert!(json["outcomes"][0]["bytes_written"].as_u64().unwrap() > 0);
    }
}
