#![allow(dead_code)]

use ndarray::{array, Array2, Array3};

use pixcluscol_core::{Annotator, Event, Key};

/// The 3x3, two-cluster grid used throughout the scenarios.
pub fn scenario_grid() -> Array2<u32> {
    array![[1, 1, 2], [1, 2, 2], [1, 1, 2]]
}

pub fn scenario_annotator() -> Annotator {
    Annotator::new(scenario_grid()).expect("valid grid")
}

/// A grid of `n` vertical stripes, each `stripe` columns wide.
pub fn striped_grid(h: usize, n: usize, stripe: usize) -> Array2<u32> {
    Array2::from_shape_fn((h, n * stripe), |(_, col)| (col / stripe) as u32 + 1)
}

/// Deterministic RGB gradient image.
pub fn gradient_rgb(h: usize, w: usize) -> Array3<u8> {
    Array3::from_shape_fn((h, w, 3), |(row, col, ch)| {
        ((row * 31 + col * 17 + ch * 53) % 256) as u8
    })
}

/// Enter the plot and move to (x, y).
pub fn hover(a: &mut Annotator, x: f64, y: f64) {
    a.handle(Event::PointerEnter).unwrap();
    a.handle(Event::PointerMove { x, y }).unwrap();
}

/// Send one key event per character.
pub fn type_str(a: &mut Annotator, text: &str) {
    for c in text.chars() {
        a.handle(Event::Key(Key::Char(c))).unwrap();
    }
}

pub fn press(a: &mut Annotator, name: &str) {
    a.handle(Event::Key(Key::from_name(name))).unwrap();
}
