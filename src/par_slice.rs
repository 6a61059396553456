use crate::util::*;
use rayon::prelude::*;

/// Sets each element to the same value.
/// `chunk_size` is break the work into tasks for multi-threading.
pub fn set_value<NumType: NumTrait>(
    a_slice: &mut [NumType],
    value: NumType,
    chunk_size: usize,
) {
    a_slice
        .par_chunks_mut(chunk_size)
        .for_each(|a_chunk: &mut [NumType]| {
            for a in a_chunk {
                *a = value;
            }
        });
}

/// Sum `width` elements starting at `offset` in every `stride` long row.
/// One task per row.
pub fn strided_row_sum<NumType: NumTrait + std::iter::Sum>(
    a_slice: &[NumType],
    stride: usize,
    offset: usize,
    width: usize,
) -> NumType {
    debug_assert!(offset + width <= stride);
    a_slice
        .par_chunks(stride)
        .map(|row: &[NumType]| row[offset..offset + width].iter().copied().sum())
        .sum()
}
