/// White canvas of the given size.
pub fn blank_u8(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    vec![255u8; width * height]
}

/// Draws one dark pixel per column at `y = f(x)` rounded to the nearest row.
pub fn plot_u8(width: usize, height: usize, f: impl Fn(f32) -> f32) -> Vec<u8> {
    let mut img = blank_u8(width, height);
    for x in 0..width {
        let y = f(x as f32).round();
        if y >= 0.0 && (y as usize) < height {
            img[y as usize * width + x] = 0;
        }
    }
    img
}

/// Two one-pixel diagonals crossing in the middle of a square image.
pub fn cross_u8(size: usize) -> Vec<u8> {
    let mut img = blank_u8(size, size);
    for x in 0..size {
        img[x * size + x] = 0;
        img[(size - 1 - x) * size + x] = 0;
    }
    img
}
