use rayon::prelude::*;

use pixform_image::Image;

/// Apply a function to each pixel in the image in parallel.
///
/// The source and destination must have the same size.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    debug_assert_eq!(src.size(), dst.size());
    let cols = src.cols();
    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each sample in the image in parallel.
///
/// The source and destination must have the same size. Both share the channel
/// count `C`, so the n-th sample of `src` maps to the n-th sample of `dst`.
pub fn par_iter_rows_val<T1, T2, const C: usize>(
    src: &Image<T1, C>,
    dst: &mut Image<T2, C>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    debug_assert_eq!(src.size(), dst.size());
    let stride = C * src.cols();
    src.as_slice()
        .par_chunks_exact(stride)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(stride))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Fill each row of the destination in parallel.
///
/// The closure receives the row index and the mutable row slice of length
/// `cols * C`. Rows never observe each other, so the closure only needs
/// read access to whatever it samples from.
pub fn par_iter_rows_mut<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let stride = C * dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(row, dst_row)| f(row, dst_row));
}
