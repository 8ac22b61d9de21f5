use std::cmp;

use clap::builder::PossibleValue;
use clap::ValueEnum;

use super::{ChannelGrid, Image};

const GRAYSCALE_WEIGHTS: [f64; 3] = [0.3, 0.6, 0.1];
const SEPIA_RED_WEIGHTS: [f64; 3] = [0.393, 0.769, 0.189];
const SEPIA_GREEN_WEIGHTS: [f64; 3] = [0.349, 0.686, 0.168];
const SEPIA_BLUE_WEIGHTS: [f64; 3] = [0.272, 0.534, 0.131];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    FlipHorizontal,
    FlipVertical,
    RotateClockwise,
    RotateCounterclockwise,
    Grayscale,
    Sepia,
}

impl ValueEnum for Operation {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::FlipHorizontal,
            Self::FlipVertical,
            Self::RotateClockwise,
            Self::RotateCounterclockwise,
            Self::Grayscale,
            Self::Sepia,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::FlipHorizontal => Some(PossibleValue::new("flip-horizontal")),
            Self::FlipVertical => Some(PossibleValue::new("flip-vertical")),
            Self::RotateClockwise => Some(PossibleValue::new("rotate-cw")),
            Self::RotateCounterclockwise => Some(PossibleValue::new("rotate-ccw")),
            Self::Grayscale => Some(PossibleValue::new("grayscale")),
            Self::Sepia => Some(PossibleValue::new("sepia")),
        }
    }
}

pub fn apply(image: &mut Image, operation: Operation) {
    match operation {
        Operation::FlipHorizontal => flip_horizontal(image),
        Operation::FlipVertical => flip_vertical(image),
        Operation::RotateClockwise => rotate_clockwise(image),
        Operation::RotateCounterclockwise => rotate_counterclockwise(image),
        Operation::Grayscale => grayscale(image),
        Operation::Sepia => sepia(image),
    }
}

pub fn flip_horizontal(image: &mut Image) {
    let width = image.width;
    let height = image.height;
    for channel in [&mut image.red_gray, &mut image.green, &mut image.blue] {
        for row_index in 0..height / 2 {
            for column_index in 0..width {
                channel.swap_samples(
                    (row_index, column_index),
                    (height - 1 - row_index, column_index),
                );
            }
        }
    }
}

pub fn flip_vertical(image: &mut Image) {
    let height = image.height;
    for channel in [&mut image.red_gray, &mut image.green, &mut image.blue] {
        for row_index in 0..height {
            channel.row_mut(row_index).reverse();
        }
    }
}

pub fn rotate_clockwise(image: &mut Image) {
    let red_gray = rotate_grid_clockwise(&image.red_gray);
    let green = rotate_grid_clockwise(&image.green);
    let blue = rotate_grid_clockwise(&image.blue);
    image.width = red_gray.width();
    image.height = red_gray.height();
    image.red_gray = red_gray;
    image.green = green;
    image.blue = blue;
}

pub fn rotate_counterclockwise(image: &mut Image) {
    let red_gray = rotate_grid_counterclockwise(&image.red_gray);
    let green = rotate_grid_counterclockwise(&image.green);
    let blue = rotate_grid_counterclockwise(&image.blue);
    image.width = red_gray.width();
    image.height = red_gray.height();
    image.red_gray = red_gray;
    image.green = green;
    image.blue = blue;
}

pub fn grayscale(image: &mut Image) {
    for row_index in 0..image.height {
        for column_index in 0..image.width {
            let red = image.red_gray.sample(row_index, column_index) as f64;
            let green = image.green.sample(row_index, column_index) as f64;
            let blue = image.blue.sample(row_index, column_index) as f64;
            let luminance = weighted_sum(GRAYSCALE_WEIGHTS, red, green, blue);
            image
                .red_gray
                .set_sample(row_index, column_index, luminance as u8);
        }
    }
}

pub fn sepia(image: &mut Image) {
    for row_index in 0..image.height {
        for column_index in 0..image.width {
            // all three sources are read before any channel is written
            let red = image.red_gray.sample(row_index, column_index) as f64;
            let green = image.green.sample(row_index, column_index) as f64;
            let blue = image.blue.sample(row_index, column_index) as f64;
            image.red_gray.set_sample(
                row_index,
                column_index,
                clamped_sum(SEPIA_RED_WEIGHTS, red, green, blue),
            );
            image.green.set_sample(
                row_index,
                column_index,
                clamped_sum(SEPIA_GREEN_WEIGHTS, red, green, blue),
            );
            image.blue.set_sample(
                row_index,
                column_index,
                clamped_sum(SEPIA_BLUE_WEIGHTS, red, green, blue),
            );
        }
    }
}

// the old top row becomes the new rightmost column
fn rotate_grid_clockwise(grid: &ChannelGrid) -> ChannelGrid {
    let width = grid.width();
    let height = grid.height();
    let mut samples = Vec::with_capacity(width as usize * height as usize);
    for row_index in 0..width {
        for column_index in 0..height {
            samples.push(grid.sample(height - 1 - column_index, row_index));
        }
    }
    ChannelGrid::from_samples(height, width, samples)
}

// the old top row becomes the new leftmost column
fn rotate_grid_counterclockwise(grid: &ChannelGrid) -> ChannelGrid {
    let width = grid.width();
    let height = grid.height();
    let mut samples = Vec::with_capacity(width as usize * height as usize);
    for row_index in 0..width {
        for column_index in 0..height {
            samples.push(grid.sample(column_index, width - 1 - row_index));
        }
    }
    ChannelGrid::from_samples(height, width, samples)
}

fn weighted_sum(weights: [f64; 3], red: f64, green: f64, blue: f64) -> f64 {
    weights[0] * red + weights[1] * green + weights[2] * blue
}

fn clamped_sum(weights: [f64; 3], red: f64, green: f64, blue: f64) -> u8 {
    let value = weighted_sum(weights, red, green, blue) as u32;
    cmp::min(value, 255) as u8
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::image::FormatTag;

    fn create_image(width: u32, height: u32, red: Vec<u8>, green: Vec<u8>, blue: Vec<u8>) -> Image {
        Image::new(
            FormatTag::PlainPixmap,
            String::new(),
            255,
            ChannelGrid::from_samples(width, height, red),
            ChannelGrid::from_samples(width, height, green),
            ChannelGrid::from_samples(width, height, blue),
        )
    }

    fn create_two_by_three_image() -> Image {
        create_image(
            3,
            2,
            vec![1, 2, 3, 4, 5, 6],
            vec![11, 12, 13, 14, 15, 16],
            vec![21, 22, 23, 24, 25, 26],
        )
    }

    #[test]
    fn flip_horizontal_reverses_row_order() {
        let mut image = create_image(
            2,
            2,
            vec![255, 0, 0, 255],
            vec![0, 255, 0, 255],
            vec![0, 0, 255, 255],
        );
        flip_horizontal(&mut image);
        assert_eq!(
            *image.red_gray_channel(),
            ChannelGrid::from_samples(2, 2, vec![0, 255, 255, 0])
        );
        assert_eq!(
            *image.green_channel(),
            ChannelGrid::from_samples(2, 2, vec![0, 255, 0, 255])
        );
        assert_eq!(
            *image.blue_channel(),
            ChannelGrid::from_samples(2, 2, vec![255, 255, 0, 0])
        );
    }

    #[test]
    fn flip_horizontal_is_involution() {
        let mut image = create_two_by_three_image();
        let original = image.clone();
        flip_horizontal(&mut image);
        assert_ne!(image, original);
        flip_horizontal(&mut image);
        assert_eq!(image, original);
    }

    #[test]
    fn flip_vertical_reverses_column_order() {
        let mut image = create_two_by_three_image();
        flip_vertical(&mut image);
        assert_eq!(
            *image.red_gray_channel(),
            ChannelGrid::from_samples(3, 2, vec![3, 2, 1, 6, 5, 4])
        );
        assert_eq!(
            *image.green_channel(),
            ChannelGrid::from_samples(3, 2, vec![13, 12, 11, 16, 15, 14])
        );
    }

    #[test]
    fn flip_vertical_is_involution() {
        let mut image = create_two_by_three_image();
        let original = image.clone();
        flip_vertical(&mut image);
        assert_ne!(image, original);
        flip_vertical(&mut image);
        assert_eq!(image, original);
    }

    #[test]
    fn rotate_clockwise_moves_top_row_to_last_column() {
        let mut image = create_two_by_three_image();
        rotate_clockwise(&mut image);
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 3);
        assert_eq!(
            *image.red_gray_channel(),
            ChannelGrid::from_samples(2, 3, vec![4, 1, 5, 2, 6, 3])
        );
        assert_eq!(
            *image.green_channel(),
            ChannelGrid::from_samples(2, 3, vec![14, 11, 15, 12, 16, 13])
        );
        assert_eq!(
            *image.blue_channel(),
            ChannelGrid::from_samples(2, 3, vec![24, 21, 25, 22, 26, 23])
        );
    }

    #[test]
    fn rotate_counterclockwise_moves_top_row_to_first_column() {
        let mut image = create_two_by_three_image();
        rotate_counterclockwise(&mut image);
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 3);
        assert_eq!(
            *image.red_gray_channel(),
            ChannelGrid::from_samples(2, 3, vec![3, 6, 2, 5, 1, 4])
        );
        assert_eq!(
            *image.blue_channel(),
            ChannelGrid::from_samples(2, 3, vec![23, 26, 22, 25, 21, 24])
        );
    }

    #[test]
    fn four_clockwise_rotations_are_identity() {
        let mut image = create_two_by_three_image();
        let original = image.clone();
        for _ in 0..4 {
            rotate_clockwise(&mut image);
        }
        assert_eq!(image, original);
    }

    #[test]
    fn rotate_counterclockwise_undoes_rotate_clockwise() {
        let mut image = create_two_by_three_image();
        let original = image.clone();
        rotate_clockwise(&mut image);
        rotate_counterclockwise(&mut image);
        assert_eq!(image, original);
    }

    #[test]
    fn grayscale_weights_collapse_color_pixels() {
        let mut image = create_image(2, 1, vec![100, 10], vec![200, 20], vec![50, 30]);
        grayscale(&mut image);
        assert_eq!(image.red_gray_channel().sample(0, 0), 155);
        assert_eq!(image.red_gray_channel().sample(0, 1), 18);
    }

    #[test]
    fn grayscale_keeps_gray_pixels() {
        let mut image = create_image(
            3,
            1,
            vec![0, 17, 255],
            vec![0, 17, 255],
            vec![0, 17, 255],
        );
        grayscale(&mut image);
        assert_eq!(
            *image.red_gray_channel(),
            ChannelGrid::from_samples(3, 1, vec![0, 17, 255])
        );
    }

    #[test]
    fn grayscale_leaves_tag_and_other_channels_untouched() {
        let mut image = create_image(1, 1, vec![100], vec![200], vec![50]);
        grayscale(&mut image);
        assert_eq!(image.format_tag(), FormatTag::PlainPixmap);
        assert_eq!(image.green_channel().sample(0, 0), 200);
        assert_eq!(image.blue_channel().sample(0, 0), 50);
    }

    #[test]
    fn sepia_clamps_to_sample_maximum() {
        let mut image = create_image(1, 1, vec![255], vec![255], vec![255]);
        sepia(&mut image);
        assert_eq!(image.red_gray_channel().sample(0, 0), 255);
        assert_eq!(image.green_channel().sample(0, 0), 255);
        assert_eq!(image.blue_channel().sample(0, 0), 238);
    }

    #[test]
    fn sepia_reads_sources_before_writing() {
        let mut image = create_image(1, 1, vec![200], vec![0], vec![0]);
        sepia(&mut image);
        assert_eq!(image.red_gray_channel().sample(0, 0), 78);
        assert_eq!(image.green_channel().sample(0, 0), 69);
        assert_eq!(image.blue_channel().sample(0, 0), 54);
    }

    #[test]
    fn sepia_of_black_is_black() {
        let mut image = create_image(1, 1, vec![0], vec![0], vec![0]);
        sepia(&mut image);
        assert_eq!(image.red_gray_channel().sample(0, 0), 0);
        assert_eq!(image.green_channel().sample(0, 0), 0);
        assert_eq!(image.blue_channel().sample(0, 0), 0);
    }

    #[test]
    fn sepia_of_mid_gray() {
        let mut image = create_image(1, 1, vec![100], vec![100], vec![100]);
        sepia(&mut image);
        assert_eq!(image.red_gray_channel().sample(0, 0), 135);
        assert_eq!(image.green_channel().sample(0, 0), 120);
        assert_eq!(image.blue_channel().sample(0, 0), 93);
    }

    #[test]
    fn apply_runs_requested_operation() {
        let mut applied = create_two_by_three_image();
        let mut direct = create_two_by_three_image();
        apply(&mut applied, Operation::RotateClockwise);
        rotate_clockwise(&mut direct);
        assert_eq!(applied, direct);

        let mut applied = create_two_by_three_image();
        let mut direct = create_two_by_three_image();
        apply(&mut applied, Operation::Grayscale);
        grayscale(&mut direct);
        assert_eq!(applied, direct);
    }
}
