//! Padded-plane construction tests.

use cutscan::{MBParam, PaddedPlane, EDGE};

fn padded(src: &[u8], width: usize, height: usize) -> (PaddedPlane, MBParam) {
    let param = MBParam::new(width, height);
    let mut plane = PaddedPlane::new(&param);
    plane.load(src, &param);
    (plane, param)
}

#[test]
fn geometry_derivation() {
    let param = MBParam::new(20, 12);
    assert_eq!(param.mb_width, 2);
    assert_eq!(param.mb_height, 1);
    assert_eq!(param.edged_width, 32 + 2 * EDGE);
    assert_eq!(param.edged_height, 16 + 2 * EDGE);
    assert_eq!(param.mb_count(), 2);
    assert_eq!(param.padded_len(), param.edged_width * param.edged_height);

    let param = MBParam::new(1920, 1080);
    assert_eq!(param.mb_width, 120);
    assert_eq!(param.mb_height, 68);
}

#[test]
fn constant_plane_pads_to_constant() {
    // Dimensions deliberately off the macroblock grid.
    let src = vec![7u8; 20 * 12];
    let (plane, param) = padded(&src, 20, 12);

    assert_eq!(plane.data().len(), param.padded_len());
    assert!(plane.data().iter().all(|&p| p == 7));
}

#[test]
fn one_by_one_plane() {
    let src = [200u8];
    let (plane, param) = padded(&src, 1, 1);

    assert_eq!(param.mb_width, 1);
    assert_eq!(param.mb_height, 1);
    assert!(plane.data().iter().all(|&p| p == 200));
}

#[test]
fn interior_copy_and_alignment_replication() {
    let width = 20;
    let height = 12;
    let src: Vec<u8> = (0..width * height)
        .map(|i| ((i % width) * 10 + i / width) as u8)
        .collect();
    let (plane, param) = padded(&src, width, height);

    let ew = param.edged_width;
    let data = plane.data();

    // Visible pixels land untouched at the interior origin.
    for y in 0..height {
        for x in 0..width {
            assert_eq!(data[(EDGE + y) * ew + EDGE + x], src[y * width + x]);
        }
    }

    // Columns [width, 16 * mb_width) replicate the last real column.
    for y in 0..height {
        let last = src[y * width + width - 1];
        for x in width..16 * param.mb_width {
            assert_eq!(data[(EDGE + y) * ew + EDGE + x], last);
        }
    }

    // Rows [height, 16 * mb_height) replicate the extended last row.
    for y in height..16 * param.mb_height {
        for x in 0..16 * param.mb_width {
            let expected = data[(EDGE + height - 1) * ew + EDGE + x];
            assert_eq!(data[(EDGE + y) * ew + EDGE + x], expected);
        }
    }
}

#[test]
fn border_replicates_nearest_interior_pixel() {
    let width = 20;
    let height = 12;
    let src: Vec<u8> = (0..width * height)
        .map(|i| ((i * 13) % 251) as u8)
        .collect();
    let (plane, param) = padded(&src, width, height);

    let ew = param.edged_width;
    let eh = param.edged_height;
    let data = plane.data();

    // Left and right borders replicate each row's edge pixels.
    for y in 0..height {
        let row = (EDGE + y) * ew;
        for x in 0..EDGE {
            assert_eq!(data[row + x], src[y * width]);
        }
        for x in EDGE + 16 * param.mb_width..ew {
            assert_eq!(data[row + x], src[y * width + width - 1]);
        }
    }

    // Top and bottom borders replicate the first and last interior rows.
    for i in 0..EDGE {
        for x in 0..16 * param.mb_width {
            assert_eq!(data[i * ew + EDGE + x], src[x.min(width - 1)]);
            let bottom_expected = data[(EDGE + height - 1) * ew + EDGE + x];
            assert_eq!(data[(eh - 1 - i) * ew + EDGE + x], bottom_expected);
        }
    }

    // Corners resolve to the nearest visible corner pixel.
    assert_eq!(data[0], src[0]);
    assert_eq!(data[ew - 1], src[width - 1]);
    assert_eq!(data[(eh - 1) * ew], src[(height - 1) * width]);
    assert_eq!(data[eh * ew - 1], src[height * width - 1]);
}

#[test]
fn reload_overwrites_previous_contents() {
    let param = MBParam::new(16, 16);
    let mut plane = PaddedPlane::new(&param);

    plane.load(&vec![255u8; 256], &param);
    assert!(plane.data().iter().all(|&p| p == 255));

    plane.load(&vec![1u8; 256], &param);
    assert!(plane.data().iter().all(|&p| p == 1));
}
