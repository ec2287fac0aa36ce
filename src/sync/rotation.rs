//! Bounded working-copy history.

/// Maximum number of working-copy identifiers retained per document.
pub const MAX_COPY_HISTORY: usize = 3;

/// Compute the updated copy history after a new working copy is created.
///
/// Keeps the last two entries of the existing history and appends the new
/// identifier, so the result never exceeds [`MAX_COPY_HISTORY`] entries and
/// the new identifier is always last. Pure function; the caller persists the
/// result.
pub fn rotate(existing: &[String], new_copy_id: &str) -> Vec<String> {
    let tail_start = existing.len().saturating_sub(MAX_COPY_HISTORY - 1);
    let mut next: Vec<String> = existing[tail_start..].to_vec();
    next.push(new_copy_id.to_string());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rotate_empty_history() {
        assert_eq!(rotate(&[], "c1"), history(&["c1"]));
    }

    #[test]
    fn rotate_single_entry() {
        assert_eq!(rotate(&history(&["c1"]), "c2"), history(&["c1", "c2"]));
    }

    #[test]
    fn rotate_two_entries_fills_capacity() {
        assert_eq!(
            rotate(&history(&["c1", "c2"]), "c3"),
            history(&["c1", "c2", "c3"])
        );
    }

    #[test]
    fn rotate_full_history_evicts_oldest() {
        assert_eq!(
            rotate(&history(&["c1", "c2", "c3"]), "c4"),
            history(&["c2", "c3", "c4"])
        );
    }

    #[test]
    fn rotate_oversized_history_still_bounded() {
        // Histories longer than the cap should never occur, but rotation must
        // not widen them further if they do.
        let oversized = history(&["c1", "c2", "c3", "c4", "c5"]);
        assert_eq!(rotate(&oversized, "c6"), history(&["c4", "c5", "c6"]));
    }

    #[test]
    fn rotate_length_and_last_element_properties() {
        let ids = history(&["a", "b", "c"]);
        for len in 0..=ids.len() {
            let result = rotate(&ids[..len], "new");
            assert_eq!(result.len(), (len + 1).min(MAX_COPY_HISTORY));
            assert_eq!(result.last().map(String::as_str), Some("new"));
            assert!(result.len() <= MAX_COPY_HISTORY);
        }
    }
}
