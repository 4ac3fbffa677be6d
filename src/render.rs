use crate::Outcome;
use crate::tree::GameTree;
use ego_tree::NodeId;

const ROW_SEPARATOR: &str = "─┼─┼─\n";

impl GameTree {
    /// Draws the board at `id` as three rows of cells.
    ///
    /// Marks use the same parity rule as the outcome, so the winner's mark is the one that fills
    /// the winning line. With `numbered` set, empty cells show the index a player would type to
    /// take them; otherwise they are left blank.
    pub fn render(&self, id: NodeId, numbered: bool) -> String {
        let cells: Vec<char> = self
            .marks(id)
            .iter()
            .enumerate()
            .map(|(index, owner)| match owner {
                Some(player) => player.mark(),
                None if numbered => char::from_digit(index as u32, 10).unwrap_or(' '),
                None => ' ',
            })
            .collect();

        let rows: Vec<String> = cells
            .chunks(3)
            .map(|row| format!("{}│{}│{}\n", row[0], row[1], row[2]))
            .collect();
        let mut board = rows.join(ROW_SEPARATOR);
        board.push('\n');
        board
    }
}

/// A short human-readable verdict for a position.
pub fn describe(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Undetermined => "Still playing",
        Outcome::FirstPlayerWins => "X wins",
        Outcome::SecondPlayerWins => "O wins",
        Outcome::Draw => "Nobody wins",
    }
}

#[cfg(test)]
mod tests {
    use crate::bits::CELLS;
    use crate::render::describe;
    use crate::tree::GameTree;
    use crate::Outcome;

    #[test]
    fn empty_board_with_numbers() {
        let tree = GameTree::new();

        let board = tree.render(tree.root_id(), true);

        assert_eq!(board, "0│1│2\n─┼─┼─\n3│4│5\n─┼─┼─\n6│7│8\n\n");
    }

    #[test]
    fn marks_alternate_starting_with_x() {
        let mut tree = GameTree::new();
        let root = tree.root_id();
        let center = tree.apply_move(root, CELLS[4]).unwrap();
        let corner = tree.apply_move(center, CELLS[0]).unwrap();

        assert_eq!(
            tree.render(corner, false),
            "o│ │ \n─┼─┼─\n │x│ \n─┼─┼─\n │ │ \n\n"
        );
        assert_eq!(
            tree.render(corner, true),
            "o│1│2\n─┼─┼─\n3│x│5\n─┼─┼─\n6│7│8\n\n"
        );
    }

    #[test]
    fn winner_owns_the_rendered_line() {
        let mut tree = GameTree::new();
        let mut id = tree.root_id();
        for &cell in &[3, 0, 4, 1, 8, 2] {
            id = tree.apply_move(id, CELLS[cell]).unwrap();
        }

        assert_eq!(tree.node(id).outcome(), Outcome::SecondPlayerWins);
        assert!(tree.render(id, false).starts_with("o│o│o\n"));
        assert_eq!(describe(tree.node(id).outcome()), "O wins");
    }
}
