/// Finds the indices of points that are identical to the point that follows
/// them. The earlier index of each duplicate pair is the one reported.
pub fn find_consecutive_duplicates<T: PartialEq>(points: &[T]) -> Vec<usize> {
    let mut dups = vec![];
    for i in 1..points.len() {
        if points[i - 1] == points[i] {
            dups.push(i - 1);
        }
    }
    dups
}

/// Removes consecutive duplicate points in place and drops the same indices
/// from `measures`, when present. Returns the number of points removed.
pub fn remove_consecutive_duplicates<T: PartialEq>(
    points: &mut Vec<T>,
    measures: Option<&mut Vec<f64>>,
) -> usize {
    let dups = find_consecutive_duplicates(points);
    // highest index first so the lower ones stay valid
    for &i in dups.iter().rev() {
        points.remove(i);
    }
    if let Some(measures) = measures {
        for &i in dups.iter().rev() {
            if i < measures.len() {
                measures.remove(i);
            }
        }
    }
    dups.len()
}

#[cfg(test)]
mod test {
    use super::{find_consecutive_duplicates, remove_consecutive_duplicates};
    use crate::structures::ShapePoint;

    fn pts(coords: &[(f64, f64)]) -> Vec<ShapePoint> {
        coords.iter().map(|&(x, y)| ShapePoint::new(x, y)).collect()
    }

    #[test]
    fn test_find_marks_earlier_index() {
        let points = pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 0.0)]);
        assert_eq!(find_consecutive_duplicates(&points), vec![0, 2, 3]);
    }

    #[test]
    fn test_removal_with_measures() {
        let mut points = pts(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (2.0, 0.0), (0.0, 0.0)]);
        let mut measures = vec![10.0, 11.0, 12.0, 13.0, 14.0];
        let removed = remove_consecutive_duplicates(&mut points, Some(&mut measures));
        assert_eq!(removed, 1);
        assert_eq!(points, pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (0.0, 0.0)]));
        assert_eq!(measures, vec![10.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    fn test_non_adjacent_repeats_are_kept() {
        // a closed ring repeats its first vertex at the end
        let mut points = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(remove_consecutive_duplicates(&mut points, None), 0);
        assert_eq!(points.len(), 4);
    }

    #[test]
    fn test_z_differences_are_not_duplicates() {
        let mut points = vec![
            ShapePoint::new(1.0, 1.0).with_z(0.0),
            ShapePoint::new(1.0, 1.0).with_z(5.0),
        ];
        assert_eq!(remove_consecutive_duplicates(&mut points, None), 0);
    }

    #[test]
    fn test_idempotent() {
        let mut once = pts(&[(3.0, 3.0), (3.0, 3.0), (3.0, 3.0), (4.0, 4.0), (4.0, 4.0)]);
        remove_consecutive_duplicates(&mut once, None);
        let mut twice = once.clone();
        assert_eq!(remove_consecutive_duplicates(&mut twice, None), 0);
        assert_eq!(once, twice);
        assert_eq!(once, pts(&[(3.0, 3.0), (4.0, 4.0)]));
    }
}
