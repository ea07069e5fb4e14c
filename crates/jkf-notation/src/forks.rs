//! Rebuilds the variation tree from the flat list of `変化` blocks.
//!
//! Each block names the ply it replaces. Blocks arrive in document order,
//! which nests them depth first: a block attaches to the nearest open line
//! whose branch ply does not exceed its own.

use crate::ParseError;
use jkf_core::{Color, MoveNode, Square};

/// A variation block as read from the text.
#[derive(Debug, Clone, PartialEq)]
pub struct Fork {
    /// Ply of the first move in `moves`.
    pub te: usize,
    pub moves: Vec<MoveNode>,
}

struct Line {
    te: usize,
    nodes: Vec<MoveNode>,
    /// Line index and node index this line hangs from.
    parent: Option<(usize, usize)>,
}

/// Attaches `forks` under `main`, whose node 0 is the pre-move placeholder.
///
/// Lines live in an arena while attachments are resolved; the tree is then
/// assembled bottom up, newest line first, so each variation list keeps
/// arrival order.
pub fn reconstruct(main: Vec<MoveNode>, forks: Vec<Fork>) -> Result<Vec<MoveNode>, ParseError> {
    let mut lines = vec![Line {
        te: 0,
        nodes: main,
        parent: None,
    }];
    let mut stack = vec![0usize];

    for fork in forks {
        while let [.., _, top] = stack[..] {
            if lines[top].te > fork.te {
                stack.pop();
            } else {
                break;
            }
        }
        let context = stack[stack.len() - 1];
        let line = &lines[context];
        let index = fork
            .te
            .checked_sub(line.te)
            .filter(|&i| i < line.nodes.len() && (context != 0 || i > 0))
            .ok_or(ParseError::DanglingFork { ply: fork.te })?;

        let id = lines.len();
        lines.push(Line {
            te: fork.te,
            nodes: fork.moves,
            parent: Some((context, index)),
        });
        stack.push(id);
    }

    for id in (1..lines.len()).rev() {
        let nodes = std::mem::take(&mut lines[id].nodes);
        if let Some((parent, index)) = lines[id].parent {
            lines[parent].nodes[index].forks.insert(0, nodes);
        }
    }

    let root = lines.swap_remove(0);
    Ok(root.nodes)
}

/// Sets move colors by ply parity. `first_ply` is the ply of `line[0]`.
pub fn assign_colors(line: &mut [MoveNode], first_ply: usize, first: Color) {
    for (i, node) in line.iter_mut().enumerate() {
        let ply = first_ply + i;
        if let Some(mv) = node.mv.as_mut() {
            mv.color = first.at_ply(ply);
        }
        for fork in &mut node.forks {
            assign_colors(fork, ply, first);
        }
    }
}

/// Fills the destination of 同 moves from the move before them.
///
/// The first move of a variation follows the move before its branch point.
pub fn resolve_same(line: &mut [MoveNode], before: Option<Square>) {
    let mut previous = before;
    for node in line.iter_mut() {
        for fork in &mut node.forks {
            resolve_same(fork, previous);
        }
        if let Some(mv) = node.mv.as_mut() {
            if mv.same && mv.to.is_none() {
                mv.to = previous;
            }
            previous = mv.to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jkf_core::{Kind, Move};

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y).unwrap()
    }

    fn line(label: &str, len: usize) -> Vec<MoveNode> {
        (0..len)
            .map(|i| MoveNode {
                comments: vec![format!("{label}{i}")],
                ..MoveNode::default()
            })
            .collect()
    }

    fn labels(forks: &[Vec<MoveNode>]) -> Vec<String> {
        forks.iter().map(|f| f[0].comments[0].clone()).collect()
    }

    #[test]
    fn single_fork_attaches_to_ply() {
        let tree = reconstruct(
            line("m", 6),
            vec![Fork {
                te: 3,
                moves: line("a", 2),
            }],
        )
        .unwrap();
        assert_eq!(labels(&tree[3].forks), vec!["a0"]);
        assert!(tree[2].forks.is_empty());
    }

    #[test]
    fn later_fork_at_same_ply_nests_under_first() {
        // A stays open; B does not branch earlier than A, so it hangs from A's
        // first move.
        let tree = reconstruct(
            line("m", 6),
            vec![
                Fork {
                    te: 2,
                    moves: line("a", 3),
                },
                Fork {
                    te: 2,
                    moves: line("b", 3),
                },
            ],
        )
        .unwrap();
        assert_eq!(labels(&tree[2].forks), vec!["a0"]);
        assert_eq!(labels(&tree[2].forks[0][0].forks), vec!["b0"]);
    }

    #[test]
    fn earlier_fork_returns_to_main_line() {
        let tree = reconstruct(
            line("m", 6),
            vec![
                Fork {
                    te: 4,
                    moves: line("a", 2),
                },
                Fork {
                    te: 2,
                    moves: line("b", 3),
                },
                Fork {
                    te: 4,
                    moves: line("c", 1),
                },
            ],
        )
        .unwrap();
        assert_eq!(labels(&tree[4].forks), vec!["a0"]);
        assert_eq!(labels(&tree[2].forks), vec!["b0"]);
        // C branches at ply 4 inside B (which starts at ply 2).
        assert_eq!(labels(&tree[2].forks[0][2].forks), vec!["c0"]);
    }

    #[test]
    fn forks_attach_to_open_lines() {
        let tree = reconstruct(
            line("m", 6),
            vec![
                Fork {
                    te: 3,
                    moves: line("a", 2),
                },
                Fork {
                    te: 4,
                    moves: line("x", 1),
                },
                Fork {
                    te: 3,
                    moves: line("b", 1),
                },
                Fork {
                    te: 3,
                    moves: line("c", 1),
                },
            ],
        )
        .unwrap();
        assert_eq!(labels(&tree[3].forks), vec!["a0"]);
        let a = &tree[3].forks[0];
        assert_eq!(labels(&a[1].forks), vec!["x0"]);
        assert_eq!(labels(&a[0].forks), vec!["b0"]);
        assert_eq!(labels(&a[0].forks[0][0].forks), vec!["c0"]);
    }

    #[test]
    fn dangling_fork_is_an_error() {
        let err = reconstruct(
            line("m", 3),
            vec![Fork {
                te: 5,
                moves: line("a", 1),
            }],
        )
        .unwrap_err();
        assert_eq!(err, ParseError::DanglingFork { ply: 5 });

        let err = reconstruct(
            line("m", 3),
            vec![Fork {
                te: 0,
                moves: line("a", 1),
            }],
        )
        .unwrap_err();
        assert_eq!(err, ParseError::DanglingFork { ply: 0 });
    }

    #[test]
    fn colors_follow_ply() {
        let mv = |to| MoveNode::with_move(Move::drop(Color::Black, to, Kind::Fu));
        let mut tree = vec![MoveNode::default(), mv(sq(1, 1)), mv(sq(2, 2))];
        tree[2].forks.push(vec![mv(sq(3, 3)), mv(sq(4, 4))]);
        assign_colors(&mut tree, 0, Color::White);
        let color = |node: &MoveNode| node.mv.as_ref().unwrap().color;
        assert_eq!(color(&tree[1]), Color::White);
        assert_eq!(color(&tree[2]), Color::Black);
        assert_eq!(color(&tree[2].forks[0][0]), Color::Black);
        assert_eq!(color(&tree[2].forks[0][1]), Color::White);
    }

    #[test]
    fn same_square_follows_previous_move() {
        let mut same = Move::drop(Color::White, sq(1, 1), Kind::Gi);
        same.to = None;
        same.same = true;
        let mut tree = vec![
            MoveNode::default(),
            MoveNode::with_move(Move::new(Color::Black, sq(8, 8), sq(2, 2), Kind::Um)),
            MoveNode::with_move(same.clone()),
        ];
        tree[2].forks.push(vec![MoveNode::with_move(same)]);
        resolve_same(&mut tree, None);
        assert_eq!(tree[2].mv.as_ref().unwrap().to, Some(sq(2, 2)));
        assert_eq!(tree[2].forks[0][0].mv.as_ref().unwrap().to, Some(sq(2, 2)));
    }
}
