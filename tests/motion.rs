//! Motion search tests.

use cutscan::motion::{mv_bits, search, search_limit};
use cutscan::{MBParam, PaddedPlane, SearchRange};

/// Triangle wave with period 120: smooth, textured, no hard wraps.
fn tri(t: usize) -> u8 {
    let m = t % 120;
    m.min(120 - m) as u8
}

fn load_plane(param: &MBParam, f: impl Fn(usize, usize) -> u8) -> PaddedPlane {
    let src: Vec<u8> = (0..param.width * param.height)
        .map(|i| f(i % param.width, i / param.width))
        .collect();
    let mut plane = PaddedPlane::new(param);
    plane.load(&src, param);
    plane
}

#[test]
fn bit_cost_table() {
    assert_eq!(mv_bits(0, 0), 1);
    assert_eq!(mv_bits(1, 0), 3);
    assert_eq!(mv_bits(-1, 0), 3);
    assert_eq!(mv_bits(0, 2), 3);
    assert_eq!(mv_bits(3, 0), 5);
    assert_eq!(mv_bits(7, 0), 7);
    // Components are independent and additive.
    assert_eq!(mv_bits(2, 2), 6);
    assert_eq!(mv_bits(-3, 1), 8);
}

#[test]
fn window_size_per_fcode() {
    assert_eq!(search_limit(2), 32);
    assert_eq!(search_limit(3), 64);
    assert_eq!(search_limit(4), 128);
    assert_eq!(search_limit(6), 512);
}

#[test]
fn fcode_selection() {
    assert_eq!(SearchRange::Small.fcode(1920, 1080), 2);
    assert_eq!(SearchRange::Medium.fcode(1920, 1080), 4);
    assert_eq!(SearchRange::Large.fcode(1920, 1080), 6);

    assert_eq!(SearchRange::Auto.fcode(704, 480), 3);
    assert_eq!(SearchRange::Auto.fcode(720, 480), 3);
    assert_eq!(SearchRange::Auto.fcode(1280, 720), 4);
    assert_eq!(SearchRange::Auto.fcode(1920, 1080), 4);
    assert_eq!(SearchRange::Auto.fcode(3840, 2160), 5);
}

#[test]
fn identical_planes_yield_zero_vector() {
    let param = MBParam::new(64, 48);
    let plane = load_plane(&param, |x, y| tri(x).wrapping_add(tri(y)));

    for mb_y in 0..param.mb_height {
        for mb_x in 0..param.mb_width {
            let (mv, sad) = search(&plane, &plane, &param, mb_x, mb_y, 2);
            assert_eq!((mv.dx, mv.dy), (0, 0));
            assert_eq!(sad, 0);
        }
    }
}

#[test]
fn uniform_planes_stay_at_origin() {
    // Every candidate has the same SAD; the bit-cost penalty and the
    // strict-improvement rule must keep the origin.
    let param = MBParam::new(32, 32);
    let plane = load_plane(&param, |_, _| 128);

    let (mv, sad) = search(&plane, &plane, &param, 1, 1, 4);
    assert_eq!((mv.dx, mv.dy), (0, 0));
    assert_eq!(sad, 0);
}

#[test]
fn recovers_horizontal_shift() {
    let param = MBParam::new(64, 48);
    let reference = load_plane(&param, |x, y| tri(x) + tri(y));
    let current = load_plane(&param, |x, y| tri(x + 3) + tri(y));

    let (mv, sad) = search(&reference, &current, &param, 1, 1, 2);
    assert_eq!((mv.dx, mv.dy), (3, 0));
    assert_eq!(sad, 0);
}

#[test]
fn recovers_vertical_shift() {
    let param = MBParam::new(64, 48);
    let reference = load_plane(&param, |x, y| tri(x) + tri(y));
    let current = load_plane(&param, |x, y| tri(x) + tri(y + 2));

    let (mv, sad) = search(&reference, &current, &param, 1, 1, 2);
    assert_eq!((mv.dx, mv.dy), (0, 2));
    assert_eq!(sad, 0);
}

#[test]
fn search_is_deterministic() {
    let param = MBParam::new(64, 48);
    let reference = load_plane(&param, |x, y| ((x * 7) ^ (y * 13)) as u8);
    let current = load_plane(&param, |x, y| ((x * 11) ^ (y * 5)) as u8);

    let first = search(&reference, &current, &param, 2, 1, 4);
    let second = search(&reference, &current, &param, 2, 1, 4);
    assert_eq!(first, second);
}

#[test]
fn single_macroblock_frame_searches_safely() {
    let param = MBParam::new(16, 16);
    let reference = load_plane(&param, |x, y| (x * 16 + y) as u8);
    let current = reference.clone();

    let (mv, sad) = search(&reference, &current, &param, 0, 0, 6);
    assert_eq!((mv.dx, mv.dy), (0, 0));
    assert_eq!(sad, 0);
}
