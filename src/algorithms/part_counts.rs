/// Converts the cumulative start offsets of a multi-part record into the
/// number of points held by each part.
///
/// Every part but the last spans up to the next offset. The last part takes
/// whatever remains of `num_points` once the earlier counts are subtracted, so
/// a bad offset table can yield negative counts; callers must check.
pub fn part_point_counts(offsets: &[i32], num_points: i32) -> Vec<i64> {
    let num_parts = offsets.len();
    let mut counts = Vec::with_capacity(num_parts);
    let mut remaining = num_points as i64;
    for i in 0..num_parts {
        if i < num_parts - 1 {
            let count = offsets[i + 1] as i64 - offsets[i] as i64;
            remaining -= count;
            counts.push(count);
        } else {
            counts.push(remaining);
        }
    }
    counts
}
