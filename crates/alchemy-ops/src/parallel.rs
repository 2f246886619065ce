//! Per-pixel maps and reductions over interleaved RGB buffers.
//!
//! With the `parallel` feature the work runs on the rayon pool; without it
//! the same functions run sequentially and give identical results.
//!
//! Reductions split the buffer into fixed [`REDUCE_CHUNK`]-pixel chunks and
//! return one partial per chunk in buffer order, so floating-point sums come
//! out the same whatever the thread count.

use alchemy_core::ImageBuffer;
use alchemy_core::image::CHANNELS;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Pixels per reduction chunk.
pub const REDUCE_CHUNK: usize = 16 * 1024;

/// Pixels per map work item.
const MAP_CHUNK: usize = 4 * 1024;

/// Applies `f` to every pixel of `image` in place.
///
/// # Example
///
/// ```rust
/// use alchemy_core::ImageBuffer;
/// use alchemy_ops::parallel::map_pixels;
///
/// let mut img = ImageBuffer::filled(8, 8, [0.5, 0.25, 1.0]);
/// map_pixels(&mut img, |[r, g, b]| [r * 2.0, g * 2.0, b * 2.0]);
/// assert_eq!(img.pixel(3, 3), [1.0, 0.5, 2.0]);
/// ```
pub fn map_pixels<F>(image: &mut ImageBuffer, f: F)
where
    F: Fn([f32; 3]) -> [f32; 3] + Sync + Send,
{
    let data = image.data_mut();

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(MAP_CHUNK * CHANNELS)
        .for_each(|block| map_block(block, &f));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(MAP_CHUNK * CHANNELS)
        .for_each(|block| map_block(block, &f));
}

#[inline]
fn map_block<F>(block: &mut [f32], f: &F)
where
    F: Fn([f32; 3]) -> [f32; 3],
{
    for px in block.chunks_exact_mut(CHANNELS) {
        let out = f([px[0], px[1], px[2]]);
        px.copy_from_slice(&out);
    }
}

/// Runs `f` over fixed-size chunks, returning partials in buffer order.
///
/// `f` receives the index of the chunk's first pixel and its samples.
pub fn reduce_chunks<T, F>(data: &[f32], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &[f32]) -> T + Sync + Send,
{
    let len = REDUCE_CHUNK * CHANNELS;

    #[cfg(feature = "parallel")]
    let partials = data
        .par_chunks(len)
        .enumerate()
        .map(|(i, chunk)| f(i * REDUCE_CHUNK, chunk))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let partials = data
        .chunks(len)
        .enumerate()
        .map(|(i, chunk)| f(i * REDUCE_CHUNK, chunk))
        .collect();

    partials
}

/// Folds chunks into accumulators and merges them.
///
/// `merge` must be associative and commutative in exact arithmetic
/// (integer counts, min/max); the grouping varies between runs.
pub fn fold_chunks<T, I, F, M>(data: &[f32], identity: I, fold: F, merge: M) -> T
where
    T: Send,
    I: Fn() -> T + Sync + Send,
    F: Fn(T, &[f32]) -> T + Sync + Send,
    M: Fn(T, T) -> T + Sync + Send,
{
    let len = REDUCE_CHUNK * CHANNELS;

    #[cfg(feature = "parallel")]
    let out = data
        .par_chunks(len)
        .fold(&identity, |acc, chunk| fold(acc, chunk))
        .reduce(&identity, &merge);

    #[cfg(not(feature = "parallel"))]
    let out = {
        let _ = &merge;
        data.chunks(len).fold(identity(), |acc, chunk| fold(acc, chunk))
    };

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(pixels: usize) -> Vec<f32> {
        (0..pixels * CHANNELS).map(|i| (i % 977) as f32 * 1e-3).collect()
    }

    #[test]
    fn partials_follow_buffer_order() {
        let data = ramp(REDUCE_CHUNK * 2 + 5);
        let starts = reduce_chunks(&data, |start, chunk| (start, chunk.len() / CHANNELS));
        assert_eq!(
            starts,
            vec![(0, REDUCE_CHUNK), (REDUCE_CHUNK, REDUCE_CHUNK), (2 * REDUCE_CHUNK, 5)]
        );
    }

    #[test]
    fn ordered_sum_is_reproducible() {
        let data = ramp(REDUCE_CHUNK * 3 + 17);
        let sum = || -> f64 {
            reduce_chunks(&data, |_, c| c.iter().map(|&v| v as f64).sum::<f64>())
                .into_iter()
                .sum()
        };
        assert_eq!(sum().to_bits(), sum().to_bits());
    }

    #[test]
    fn fold_counts_every_sample() {
        let data = ramp(REDUCE_CHUNK + 3);
        let n = fold_chunks(&data, || 0usize, |acc, c| acc + c.len(), |a, b| a + b);
        assert_eq!(n, data.len());
    }

    #[test]
    fn map_touches_every_pixel() {
        let mut img = ImageBuffer::filled(MAP_CHUNK as u32 + 3, 2, [1.0, 2.0, 3.0]);
        map_pixels(&mut img, |[r, g, b]| [b, g, r]);
        assert!(img.pixels().all(|p| p == [3.0, 2.0, 1.0]));
    }
}
