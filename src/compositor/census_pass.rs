//! Census pass: count segmentation pixels per legend class.

use rayon::prelude::*;

use crate::constants::RGBA_STRIDE;
use crate::model::Color;
use crate::resolver::LegendResolver;

/// Pixels handed to one rayon task.
const CHUNK_PIXELS: usize = 16 * 1024;

/// Add the classes of every pixel in `samples` into `counts`.
fn tally(resolver: &LegendResolver, samples: &[u8], counts: &mut [u64]) {
    for pixel in samples.chunks_exact(RGBA_STRIDE) {
        if let Some(class) = resolver.class_of(Color::from_rgba(pixel)) {
            counts[class] += 1;
        }
    }
}

/// Count classes in a single traversal.
pub(super) fn count_sequential(resolver: &LegendResolver, samples: &[u8]) -> Vec<u64> {
    let mut counts = vec![0; resolver.len()];
    tally(resolver, samples, &mut counts);
    counts
}

/// Count classes over disjoint pixel chunks, summing partial counts.
pub(super) fn count_parallel(resolver: &LegendResolver, samples: &[u8]) -> Vec<u64> {
    let classes = resolver.len();
    samples
        .par_chunks(CHUNK_PIXELS * RGBA_STRIDE)
        .fold(
            || vec![0u64; classes],
            |mut counts, chunk| {
                tally(resolver, chunk, &mut counts);
                counts
            },
        )
        .reduce(
            || vec![0u64; classes],
            |mut total, partial| {
                for (sum, count) in total.iter_mut().zip(partial) {
                    *sum += count;
                }
                total
            },
        )
}
