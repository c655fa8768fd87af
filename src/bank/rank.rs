use rayon::prelude::*;

/// Clear the sign bit of NaN so every NaN sorts above `+inf` under `total_cmp`.
/// Other values pass through untouched.
#[inline]
pub(crate) fn canonical_score(score: f64) -> f64 {
    if score.is_nan() {
        score.abs()
    } else {
        score
    }
}

/// Order keys by descending score, breaking ties by the keys' natural ordering.
///
/// `f64::total_cmp` on canonical scores makes the order total, with every NaN
/// first. Keys are unique, so the result does not depend on the sort being stable.
pub(crate) fn by_descending_score<'a, K, I>(entries: I) -> Vec<K>
where
    K: Ord + Clone + Send + Sync + 'a,
    I: IntoIterator<Item = (&'a K, f64)>,
{
    let mut list: Vec<(&K, f64)> = entries
        .into_iter()
        .map(|(key, score)| (key, canonical_score(score)))
        .collect();
    list.par_sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    list.into_iter().map(|(key, _)| key.clone()).collect()
}

/// (min, max) of the non-NaN scores; the placeholder range (0, 1) when there are none.
pub(crate) fn score_bounds<I>(scores: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = scores.into_iter().filter(|s| !s.is_nan());
    let Some(first) = iter.next() else {
        return (0.0, 1.0);
    };
    iter.fold((first, first), |(min, max), s| {
        (if s < min { s } else { min }, if s > max { s } else { max })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_with_ascending_tie_break() {
        let entries = vec![("d", 1.0), ("c", 3.0), ("a", 5.0), ("b", 3.0)];
        let ranked = by_descending_score(entries.iter().map(|(k, s)| (k, *s)));
        assert_eq!(ranked, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn bounds_of_empty_is_placeholder_range() {
        assert_eq!(score_bounds(std::iter::empty()), (0.0, 1.0));
        assert_eq!(score_bounds([2.0, -1.5, 7.25]), (-1.5, 7.25));
    }

    #[test]
    fn nan_of_either_sign_ranks_first() {
        let negative_nan = f64::from_bits(f64::NAN.to_bits() | (1 << 63));
        assert!(negative_nan.is_nan() && negative_nan.is_sign_negative());
        let entries = vec![("a", 5.0), ("n", negative_nan), ("b", f64::INFINITY), ("p", f64::NAN), ("d", 1.0)];
        let ranked = by_descending_score(entries.iter().map(|(k, s)| (k, *s)));
        assert_eq!(ranked, vec!["n", "p", "b", "a", "d"]);
        assert!(canonical_score(negative_nan).is_sign_positive());
        assert_eq!(canonical_score(-0.5), -0.5);
    }

    #[test]
    fn bounds_skip_nan_wherever_it_appears() {
        let negative_nan = f64::from_bits(f64::NAN.to_bits() | (1 << 63));
        assert_eq!(score_bounds([f64::NAN, 3.0, negative_nan, 1.0]), (1.0, 3.0));
        assert_eq!(score_bounds([3.0, f64::NAN, 1.0]), (1.0, 3.0));
        assert_eq!(score_bounds([f64::NAN, negative_nan]), (0.0, 1.0));
    }
}
