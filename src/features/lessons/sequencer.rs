//! Ordering of lessons within a course.
//!
//! Everything here works on an in-memory snapshot of one course's lessons
//! (`LessonPosition`s); the service loads that snapshot under row locks and
//! writes back whatever [`plan_move`] returns.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("Lesson is already first in its course")]
    AlreadyFirst,

    #[error("Lesson is already last in its course")]
    AlreadyLast,

    #[error("Two lessons share position {position}; fix the ordering before moving")]
    Collision { position: i32 },

    #[error("Lesson {lesson_id} is not part of this course")]
    NotInCourse { lesson_id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonPosition {
    pub id: i64,
    pub position: i32,
}

/// Position a new lesson gets when none is chosen: one past the lesson count
pub fn next_available(lesson_count: i64) -> i32 {
    i32::try_from(lesson_count).unwrap_or(i32::MAX - 1) + 1
}

/// Position a lesson is appended at when none is chosen.
///
/// `next_available` for the current count if that is free; after a delete
/// leaves a gap it can be taken, in which case one past the highest position.
pub fn append_position(positions: &[i32]) -> i32 {
    let candidate = next_available(i64::try_from(positions.len()).unwrap_or(i64::MAX));
    if !positions.contains(&candidate) {
        return candidate;
    }
    positions
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

/// Smallest position >= 1 not used by any sibling
pub fn first_unused(positions: &[i32]) -> i32 {
    let mut sorted: Vec<i32> = positions.iter().copied().filter(|p| *p >= 1).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut candidate = 1;
    for p in sorted {
        if p > candidate {
            break;
        }
        candidate = p + 1;
    }
    candidate
}

/// First position shared by two siblings, if any
pub fn find_collision(siblings: &[LessonPosition]) -> Option<i32> {
    let mut positions: Vec<i32> = siblings.iter().map(|s| s.position).collect();
    positions.sort_unstable();
    positions.windows(2).find(|w| w[0] == w[1]).map(|w| w[0])
}

/// Swap `lesson_id` with its neighbour in `direction`.
///
/// Returns the two rows with their new positions. `siblings` must be every
/// lesson of the course, in any order.
pub fn plan_move(
    siblings: &[LessonPosition],
    lesson_id: i64,
    direction: MoveDirection,
) -> Result<[LessonPosition; 2], PositionError> {
    if let Some(position) = find_collision(siblings) {
        return Err(PositionError::Collision { position });
    }

    let current = siblings
        .iter()
        .find(|s| s.id == lesson_id)
        .copied()
        .ok_or(PositionError::NotInCourse { lesson_id })?;

    let neighbour = match direction {
        MoveDirection::Up => siblings
            .iter()
            .filter(|s| s.position < current.position)
            .max_by_key(|s| s.position)
            .copied()
            .ok_or(PositionError::AlreadyFirst)?,
        MoveDirection::Down => siblings
            .iter()
            .filter(|s| s.position > current.position)
            .min_by_key(|s| s.position)
            .copied()
            .ok_or(PositionError::AlreadyLast)?,
    };

    Ok([
        LessonPosition {
            id: current.id,
            position: neighbour.position,
        },
        LessonPosition {
            id: neighbour.id,
            position: current.position,
        },
    ])
}

/// Apply planned updates to a snapshot, returning it ordered by position
pub fn apply(siblings: &[LessonPosition], updates: &[LessonPosition]) -> Vec<LessonPosition> {
    let mut result: Vec<LessonPosition> = siblings
        .iter()
        .map(|s| {
            updates
                .iter()
                .find(|u| u.id == s.id)
                .copied()
                .unwrap_or(*s)
        })
        .collect();
    result.sort_by_key(|s| (s.position, s.id));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use std::collections::HashSet;

    fn course(positions: &[i32]) -> Vec<LessonPosition> {
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| LessonPosition {
                id: i as i64 + 1,
                position: *p,
            })
            .collect()
    }

    fn order(siblings: &[LessonPosition]) -> Vec<i64> {
        let mut sorted = siblings.to_vec();
        sorted.sort_by_key(|s| s.position);
        sorted.into_iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_first_cannot_move_up() {
        let lessons = course(&[1, 2, 3]);
        assert_eq!(
            plan_move(&lessons, 1, MoveDirection::Up),
            Err(PositionError::AlreadyFirst)
        );
    }

    #[test]
    fn test_last_cannot_move_down() {
        let lessons = course(&[1, 2, 3]);
        assert_eq!(
            plan_move(&lessons, 3, MoveDirection::Down),
            Err(PositionError::AlreadyLast)
        );
    }

    #[test]
    fn test_middle_swaps_with_predecessor() {
        let lessons = course(&[1, 2, 3]);
        let updates = plan_move(&lessons, 2, MoveDirection::Up).unwrap();
        assert_eq!(
            updates,
            [
                LessonPosition { id: 2, position: 1 },
                LessonPosition { id: 1, position: 2 },
            ]
        );
        assert_eq!(order(&apply(&lessons, &updates)), vec![2, 1, 3]);
    }

    #[test]
    fn test_up_then_down_restores_order() {
        let lessons = course(&[1, 2, 3, 4]);
        let up = apply(&lessons, &plan_move(&lessons, 3, MoveDirection::Up).unwrap());
        let back = apply(&up, &plan_move(&up, 3, MoveDirection::Down).unwrap());
        assert_eq!(order(&back), order(&lessons));
        assert_eq!(back, apply(&lessons, &[]));
    }

    #[test]
    fn test_sparse_positions_swap_with_nearest() {
        let lessons = course(&[10, 3, 7]);
        let updates = plan_move(&lessons, 1, MoveDirection::Up).unwrap();
        assert_eq!(
            updates,
            [
                LessonPosition { id: 1, position: 7 },
                LessonPosition { id: 3, position: 10 },
            ]
        );
    }

    #[test]
    fn test_collision_blocks_every_move() {
        let lessons = course(&[1, 2, 2, 3]);
        assert_eq!(
            plan_move(&lessons, 1, MoveDirection::Down),
            Err(PositionError::Collision { position: 2 })
        );
        assert_eq!(find_collision(&course(&[3, 1, 2])), None);
    }

    #[test]
    fn test_unknown_lesson() {
        assert_eq!(
            plan_move(&course(&[1]), 42, MoveDirection::Up),
            Err(PositionError::NotInCourse { lesson_id: 42 })
        );
    }

    #[test]
    fn test_positions_stay_distinct_after_random_moves() {
        let mut lessons = course(&[1, 2, 3, 4, 5, 6]);
        for _ in 0..200 {
            let id: i64 = (1..7).fake();
            let direction = if (0..2).fake::<u8>() == 0 {
                MoveDirection::Up
            } else {
                MoveDirection::Down
            };
            if let Ok(updates) = plan_move(&lessons, id, direction) {
                lessons = apply(&lessons, &updates);
            }
            let distinct: HashSet<i32> = lessons.iter().map(|l| l.position).collect();
            assert_eq!(distinct.len(), lessons.len());
        }
        let mut positions: Vec<i32> = lessons.iter().map(|l| l.position).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_next_available_and_first_unused() {
        assert_eq!(next_available(0), 1);
        assert_eq!(next_available(3), 4);
        assert_eq!(first_unused(&[]), 1);
        assert_eq!(first_unused(&[1, 2, 3]), 4);
        assert_eq!(first_unused(&[2, 3]), 1);
        assert_eq!(first_unused(&[1, 3, 4]), 2);
        assert_eq!(first_unused(&[1, 1, 2]), 3);
    }

    #[test]
    fn test_append_position_skips_taken_count() {
        assert_eq!(append_position(&[]), 1);
        assert_eq!(append_position(&[1, 2, 3]), 4);
        // First lesson deleted: count + 1 == 3 is still in use
        assert_eq!(append_position(&[2, 3]), 4);
        assert_eq!(append_position(&[1, 5, 9]), 4);
        assert_eq!(append_position(&[3, 4, 7]), 8);
    }

    #[test]
    fn test_appending_after_deletes_keeps_positions_distinct() {
        let mut positions: Vec<i32> = Vec::new();
        for _ in 0..200 {
            let delete = positions.len() > 1 && (0..3).fake::<u8>() == 0;
            if delete {
                let index = (0..positions.len()).fake::<usize>();
                positions.remove(index);
            } else {
                let next = append_position(&positions);
                assert!(!positions.contains(&next), "{next} already in {positions:?}");
                positions.push(next);
            }
        }
    }
}
