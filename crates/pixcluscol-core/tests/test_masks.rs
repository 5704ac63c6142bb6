mod common;

use ndarray::Axis;

use pixcluscol_core::masks::{build_highlights, build_masks, HighlightStyle};
use pixcluscol_core::Annotator;

use common::{scenario_annotator, scenario_grid, striped_grid};

const STYLE: HighlightStyle = HighlightStyle {
    color: [200, 200, 200],
    dim_offset: 32,
};

// ---------------------------------------------------------------------------
// Masks
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_masks() {
    let a = scenario_annotator();
    assert_eq!(a.num_labels(), 2);

    let masks = a.masks();
    let ones = [(0, 0), (0, 1), (1, 0), (2, 0), (2, 1)];
    let twos = [(0, 2), (1, 1), (1, 2), (2, 2)];
    for &(r, c) in &ones {
        assert!(masks[[0, r, c]]);
        assert!(!masks[[1, r, c]]);
    }
    for &(r, c) in &twos {
        assert!(masks[[1, r, c]]);
        assert!(!masks[[0, r, c]]);
    }
    assert_eq!(masks.index_axis(Axis(0), 0).iter().filter(|&&m| m).count(), 5);
    assert_eq!(masks.index_axis(Axis(0), 1).iter().filter(|&&m| m).count(), 4);
}

#[test]
fn test_exactly_one_mask_per_pixel() {
    let grid = striped_grid(5, 4, 3);
    let masks = build_masks(&grid, 4);
    for ((r, c), &label) in grid.indexed_iter() {
        let owners: Vec<usize> = (0..4).filter(|&i| masks[[i, r, c]]).collect();
        assert_eq!(owners, vec![label as usize - 1], "pixel ({r}, {c})");
    }
}

// ---------------------------------------------------------------------------
// Color image
// ---------------------------------------------------------------------------

#[test]
fn test_default_palette_is_black() {
    let a = scenario_annotator();
    assert!(a.palette().iter().all(|p| *p == [0, 0, 0]));
    assert!(a.color_image().iter().all(|&v| v == 0));
}

#[test]
fn test_color_image_follows_palette() {
    let mut a = scenario_annotator();
    a.set_color(0, [255, 0, 0]).unwrap();
    a.set_color(1, [10, 20, 30]).unwrap();

    let grid = scenario_grid();
    for ((r, c), &label) in grid.indexed_iter() {
        let expected = a.palette()[label as usize - 1];
        let got = [
            a.color_image()[[r, c, 0]],
            a.color_image()[[r, c, 1]],
            a.color_image()[[r, c, 2]],
        ];
        assert_eq!(got, expected, "pixel ({r}, {c})");
    }
    assert_eq!(a.palette()[0], [255, 0, 0]);
}

#[test]
fn test_set_color_out_of_range() {
    let mut a = scenario_annotator();
    assert!(a.set_color(2, [1, 2, 3]).is_err());
    assert!(a.palette().iter().all(|p| *p == [0, 0, 0]));
}

// ---------------------------------------------------------------------------
// Highlights
// ---------------------------------------------------------------------------

#[test]
fn test_highlight_law() {
    let mut a = scenario_annotator();
    a.set_color(0, [255, 100, 7]).unwrap();
    a.set_color(1, [0, 64, 201]).unwrap();

    let (h, w) = a.shape();
    for i in 0..a.num_labels() {
        let hl = a.highlight(i).unwrap();
        for r in 0..h {
            for c in 0..w {
                for ch in 0..3 {
                    let expected = if a.masks()[[i, r, c]] {
                        200
                    } else {
                        a.color_image()[[r, c, ch]] / 2 + 32
                    };
                    assert_eq!(hl[[r, c, ch]], expected);
                }
            }
        }
    }
}

#[test]
fn test_highlights_rebuilt_after_recolor() {
    let mut a = scenario_annotator();
    let before = a.revision();
    a.set_color(1, [254, 254, 254]).unwrap();
    assert!(a.revision() > before);
    // Pixel (0, 2) belongs to cluster 1, so it is dimmed in highlight 0.
    assert_eq!(a.highlight(0).unwrap()[[0, 2, 0]], 254 / 2 + 32);
}

#[test]
fn test_parallel_and_sequential_highlights_agree() {
    // 8 clusters over 96x96 crosses the parallel threshold.
    let grid = striped_grid(96, 8, 12);
    let mut a = Annotator::new(grid.clone()).unwrap();
    for i in 0..8u8 {
        a.set_color(i as usize, [i * 30, 255 - i * 30, i]).unwrap();
    }

    let masks = build_masks(&grid, 8);
    let full = build_highlights(a.color_image(), &masks, STYLE);
    assert_eq!(&full, a.highlights());

    // A single cluster stays below the threshold.
    let small = build_highlights(
        a.color_image(),
        &masks.slice(ndarray::s![0..1, .., ..]).to_owned(),
        STYLE,
    );
    assert_eq!(small.index_axis(Axis(0), 0), a.highlights().index_axis(Axis(0), 0));
}
