use ndarray::{Array2, Zip};

/// Binomial approximation of a 5-tap Gaussian; weights sum to 16.
const KERNEL: [u32; 5] = [1, 4, 6, 4, 1];
const RADIUS: isize = 2;

/// Mirrors an out-of-range index back into `0..len` without repeating the edge
/// sample (`-1 -> 1`, `len -> len - 2`).
fn reflect101(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = index;
    while i < 0 || i > last {
        if i < 0 {
            i = -i;
        }
        if i > last {
            i = 2 * last - i;
        }
    }
    i as usize
}

/// 5x5 Gaussian smoothing of an 8-bit single channel image.
///
/// Applied as a horizontal then vertical pass with integer arithmetic, so the
/// output is exactly reproducible: `(sum + 128) >> 8` with the full 256
/// weight. Borders use reflect-101. Both passes run row/column parallel.
pub fn gaussian_blur_5x5(input: &Array2<u8>) -> Array2<u8> {
    let (height, width) = input.dim();
    if height == 0 || width == 0 {
        return Array2::zeros((height, width));
    }

    // horizontal pass, unnormalized (max 255 * 16)
    let mut horizontal = Array2::<u16>::zeros((height, width));
    Zip::from(horizontal.rows_mut())
        .and(input.rows())
        .par_for_each(|mut out, src| {
            for x in 0..width {
                let mut sum = 0u32;
                for (k, weight) in KERNEL.iter().enumerate() {
                    let sx = reflect101(x as isize + k as isize - RADIUS, width);
                    sum += weight * src[sx] as u32;
                }
                out[x] = sum as u16;
            }
        });

    let mut output = Array2::<u8>::zeros((height, width));
    Zip::from(output.columns_mut())
        .and(horizontal.columns())
        .par_for_each(|mut out, src| {
            for y in 0..height {
                let mut sum = 0u32;
                for (k, weight) in KERNEL.iter().enumerate() {
                    let sy = reflect101(y as isize + k as isize - RADIUS, height);
                    sum += weight * src[sy] as u32;
                }
                out[y] = ((sum + 128) >> 8) as u8;
            }
        });

    output
}
