//! Ordering of containers for list views.

use std::cmp::Ordering;

use super::state::Container;

/// Build a container comparator from a comparator over the payload.
///
/// Ready containers come first, ordered by `comparator` and then by
/// timestamp. Non-ready containers follow, ordered by timestamp. Empty
/// containers always sort last.
pub fn compare_with<T, F>(comparator: F) -> impl Fn(&Container<T>, &Container<T>) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    move |a, b| compare(a, b, &comparator)
}

/// Sort a slice of containers in place, see [`compare_with`].
pub fn sort_containers<T, F>(containers: &mut [Container<T>], comparator: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    containers.sort_by(compare_with(comparator));
}

fn compare<T, F>(a: &Container<T>, b: &Container<T>, comparator: &F) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    match (a.data(), b.data()) {
        (Some(x), Some(y)) => {
            let by_data = comparator(x, y);
            if by_data != Ordering::Equal {
                return by_data;
            }
        }
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => {}
    }

    a.timestamp().unwrap_or(0).cmp(&b.timestamp().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ErrorState;

    fn by_str(a: &&str, b: &&str) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn ready_before_empty_ordered_by_data() {
        let mut list = vec![
            Container::modified("B", 5, None),
            Container::empty(),
            Container::synced("A", 1),
        ];
        sort_containers(&mut list, by_str);
        assert_eq!(
            list,
            vec![
                Container::synced("A", 1),
                Container::modified("B", 5, None),
                Container::empty(),
            ]
        );
    }

    #[test]
    fn equal_data_falls_back_to_timestamp() {
        let mut list = vec![Container::synced("A", 9), Container::modified("A", 3, None)];
        sort_containers(&mut list, by_str);
        assert_eq!(list[0].timestamp(), Some(3));
        assert_eq!(list[1].timestamp(), Some(9));
    }

    #[test]
    fn non_ready_sorted_by_timestamp_after_ready() {
        let mut list = vec![
            Container::errored(ErrorState::new("x", 40)),
            Container::empty(),
            Container::loading(20),
            Container::synced("Z", 100),
            Container::deleted(30, None),
        ];
        sort_containers(&mut list, by_str);
        let names: Vec<_> = list.iter().map(Container::state_name).collect();
        assert_eq!(names, vec!["synced", "loading", "deleted", "errored", "empty"]);
    }

    #[test]
    fn two_empties_compare_equal() {
        let cmp = compare_with(by_str);
        assert_eq!(
            cmp(&Container::empty(), &Container::empty()),
            Ordering::Equal
        );
    }
}
