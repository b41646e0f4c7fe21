use std::borrow::Cow;

use crate::protocol::Position;

pub const YOU_SUFFIX: &str = " (you)";

/// Horizontal placement of a car icon, floor(segment * 100 / segments).
pub fn track_percentage(segment: u32, segment_count: usize) -> u64 {
    if segment_count == 0 {
        return 0;
    }
    u64::from(segment) * 100 / segment_count as u64
}

/// Name shown for a racer; the local player gets `" (you)"` appended.
/// The position itself is never modified.
pub fn display_name(position: &Position, player_id: Option<u32>) -> Cow<'_, str> {
    if player_id == Some(position.id) {
        Cow::Owned(format!("{}{}", position.driver_name, YOU_SUFFIX))
    } else {
        Cow::Borrowed(position.driver_name.as_str())
    }
}

/// Finished racers by ascending final position, then racers still on track by
/// descending segment. Both sorts are stable.
pub fn order_positions(positions: &[Position]) -> Vec<&Position> {
    let (mut finished, mut racing): (Vec<&Position>, Vec<&Position>) =
        positions.iter().partition(|p| p.final_position.is_some());
    finished.sort_by_key(|p| p.final_position);
    racing.sort_by(|a, b| b.segment.cmp(&a.segment));
    finished.extend(racing);
    finished
}

/// Whether the final leaderboard replaces the live dashboard.
///
/// With `field_size` the board flips once exactly that many racers are ranked;
/// without it, once every racer is.
pub fn is_final(positions: &[Position], field_size: Option<usize>) -> bool {
    let ranked = positions.iter().filter(|p| p.final_position.is_some()).count();
    match field_size {
        Some(size) => ranked == size,
        None => !positions.is_empty() && ranked == positions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(id: u32, segment: u32, rank: Option<u32>) -> Position {
        Position {
            id,
            driver_name: format!("Racer {id}"),
            segment,
            final_position: rank,
            speed: None,
        }
    }

    #[test]
    fn test_track_percentage_floors() {
        assert_eq!(track_percentage(3, 10), 30);
        assert_eq!(track_percentage(3, 7), 42);
        assert_eq!(track_percentage(0, 7), 0);
        assert_eq!(track_percentage(7, 7), 100);
        assert_eq!(track_percentage(5, 0), 0);
    }

    #[test]
    fn test_racing_sorted_by_segment_descending() {
        let positions = vec![pos(1, 5, None), pos(2, 9, None)];
        let ids: Vec<u32> = order_positions(&positions).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_finished_first_ascending_then_racing_descending() {
        let positions = vec![
            pos(1, 40, None),
            pos(2, 201, Some(2)),
            pos(3, 120, None),
            pos(4, 201, Some(1)),
            pos(5, 80, None),
        ];
        let ids: Vec<u32> = order_positions(&positions).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 5, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let positions = vec![pos(1, 10, None), pos(2, 10, None), pos(3, 10, None)];
        let ids: Vec<u32> = order_positions(&positions).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_display_name_does_not_mutate() {
        let position = pos(3, 0, None);
        assert_eq!(display_name(&position, Some(3)), "Racer 3 (you)");
        assert_eq!(display_name(&position, Some(3)), "Racer 3 (you)");
        assert_eq!(display_name(&position, Some(1)), "Racer 3");
        assert_eq!(display_name(&position, None), "Racer 3");
        assert_eq!(position.driver_name, "Racer 3");
    }

    #[test]
    fn test_is_final_all_ranked() {
        let mut positions: Vec<Position> = (1..=5).map(|i| pos(i, 201, Some(i))).collect();
        assert!(is_final(&positions, None));
        assert!(is_final(&positions, Some(5)));
        positions[4].final_position = None;
        assert!(!is_final(&positions, None));
        assert!(!is_final(&positions, Some(5)));
        assert!(is_final(&positions, Some(4)));
        assert!(!is_final(&[], None));
    }
}
