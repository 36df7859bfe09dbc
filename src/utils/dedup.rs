/// Keeps the first occurrence of every value, in input order.
pub fn deduplicate<T, I>(items: I) -> Vec<T>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    items.into_iter().fold(Vec::new(), |mut acc, item| {
        if !acc.contains(&item) {
            acc.push(item);
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_seen_order() {
        let versions = vec!["v1.3.0", "v1.0.0", "v1.3.0", "v1.4.1", "v1.0.0"];
        assert_eq!(deduplicate(versions), vec!["v1.3.0", "v1.0.0", "v1.4.1"]);
    }

    #[test]
    fn test_empty_input() {
        let empty: Vec<String> = Vec::new();
        assert!(deduplicate(empty).is_empty());
    }

    #[test]
    fn test_no_duplicates_is_identity() {
        assert_eq!(deduplicate(1..=4), vec![1, 2, 3, 4]);
    }
}
