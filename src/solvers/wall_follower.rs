use super::Solution;
use crate::maze::{Direction, Maze, PathMark};

/// Right-hand rule: keep a hand on the right wall.
///
/// Each action tries to turn right and step, otherwise to step straight ahead, otherwise turns
/// left in place. There is no visited-set pruning, so cells can be walked through many times.
/// Only guaranteed to reach the goal on a perfect maze; an action budget stops it elsewhere.
pub fn solve_wall_follower(maze: &mut Maze) -> Solution {
    let (start, goal) = (maze.start(), maze.goal());
    // On a tree every passage is walked at most twice, with at most four actions per move
    let max_actions = 16 * maze.cell_count();

    let mut position = start;
    let mut facing = Direction::Right;
    let mut route = vec![start];
    maze.set_visited(start);
    maze.mark_path(start, PathMark::OnPath);

    let mut actions = 0;
    while position != goal {
        if actions == max_actions {
            tracing::warn!(
                "Wall follower gave up after {} actions at cell {}",
                actions,
                position
            );
            return Solution {
                goal_reached: false,
                route: Vec::new(),
                expanded: route.len(),
            };
        }
        actions += 1;

        let right = facing.turn_right();
        if let Some(next) = maze.open_neighbor(position, right) {
            facing = right;
            position = next;
        } else if let Some(next) = maze.open_neighbor(position, facing) {
            position = next;
        } else {
            facing = facing.turn_left();
            continue;
        }

        route.push(position);
        maze.set_visited(position);
        maze.mark_path(position, PathMark::OnPath);
        maze.step();
    }

    let expanded = route.len();
    Solution {
        goal_reached: true,
        route,
        expanded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_corridor() {
        // 0 - 1 - 2
        //         |
        //         5
        //         |
        //         8
        let mut maze = Maze::from_passages(3, &[(0, 1), (1, 2), (2, 5), (5, 8)], None).unwrap();
        let solution = solve_wall_follower(&mut maze);
        assert!(solution.goal_reached);
        assert_eq!(solution.route, vec![0, 1, 2, 5, 8]);
    }

    #[test]
    fn test_walks_into_dead_end_and_back() {
        // 0 - 1    start 0, goal 3
        // |
        // 2 - 3
        // Facing right at the start, the right-hand turn is Down, towards 2
        let mut maze = Maze::from_passages(2, &[(0, 1), (0, 2), (2, 3)], None).unwrap();
        let solution = solve_wall_follower(&mut maze);
        assert!(solution.goal_reached);
        assert_eq!(solution.route, vec![0, 2, 3]);

        // 0 - 1
        // |   |
        // 2   3
        // 2 is now a dead end, walked into and back out of
        let mut maze = Maze::from_passages(2, &[(0, 1), (1, 3), (0, 2)], None).unwrap();
        let solution = solve_wall_follower(&mut maze);
        assert!(solution.goal_reached);
        assert_eq!(solution.route, vec![0, 2, 0, 1, 3]);
    }

    #[test]
    fn test_start_is_goal() {
        let mut maze = Maze::from_passages(1, &[], None).unwrap();
        let solution = solve_wall_follower(&mut maze);
        assert!(solution.goal_reached);
        assert_eq!(solution.route, vec![0]);
    }

    #[test]
    fn test_gives_up_when_unreachable() {
        let mut maze = Maze::from_passages(3, &[(0, 1)], None).unwrap();
        let solution = solve_wall_follower(&mut maze);
        assert!(!solution.goal_reached);
        assert!(solution.route.is_empty());
    }
}
