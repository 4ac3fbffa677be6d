use crate::bits::{bit_to_index, index_to_bit};
use crate::error::{Error, Result};
use crate::tree::GameTree;
use crate::{Outcome, Player};
use ego_tree::NodeId;
use std::fmt;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// Who is sitting at one side of the board.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Side {
    /// The person typing cell numbers.
    Human,
    /// `GameTree::best_move`.
    Computer,
}

impl Side {
    /// The side sitting across the board.
    pub fn other(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => f.write_str("Player"),
            Side::Computer => f.write_str("Computer"),
        }
    }
}

/// How a finished round ended.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum RoundEnd {
    /// The given side completed a line.
    Won(Side),
    /// The board filled up without a line.
    Draw,
}

/// Rounds won by each side over a session.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct Scoreboard {
    /// Rounds the human won.
    pub human: u32,
    /// Rounds the computer won.
    pub computer: u32,
    /// Rounds that ended full without a line.
    pub draws: u32,
}

impl Scoreboard {
    /// Adds one finished round.
    pub fn record(&mut self, end: RoundEnd) {
        match end {
            RoundEnd::Won(Side::Human) => self.human += 1,
            RoundEnd::Won(Side::Computer) => self.computer += 1,
            RoundEnd::Draw => self.draws += 1,
        }
    }

    /// Total rounds recorded.
    pub fn rounds(&self) -> u32 {
        self.human + self.computer + self.draws
    }
}

/// A text game loop between a person typing cell numbers and `GameTree::best_move`.
///
/// Input and output are generic so the loop can run on stdin/stdout or on in-memory buffers.
pub struct Shell<R, W> {
    tree: GameTree,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell over `tree`, completing its exploration from the root.
    ///
    /// A partly built tree gets every missing continuation; a fully explored one is unchanged.
    pub fn new(mut tree: GameTree, input: R, output: W) -> Self {
        let root = tree.root_id();
        tree.explore(root);
        Self {
            tree,
            input,
            output,
        }
    }

    /// The tree the shell plays on.
    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    /// Consumes the shell and hands back its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays rounds, alternating who opens, until `rounds` are done or the input runs out.
    ///
    /// With no limit the loop only stops at end of input.
    #[instrument(skip(self))]
    pub fn run(&mut self, rounds: Option<usize>, human_first: bool) -> Result<Scoreboard> {
        let mut scoreboard = Scoreboard::default();
        let mut human_first = human_first;
        let mut played = 0;
        while rounds.is_none_or(|limit| played < limit) {
            let Some(end) = self.play_round(human_first)? else {
                info!(played, "input closed");
                break;
            };
            scoreboard.record(end);
            played += 1;
            info!(round = played, ?end, "round finished");
            human_first = !human_first;
        }
        Ok(scoreboard)
    }

    /// Plays one game from the empty board.
    ///
    /// Returns `Ok(None)` if the input ends before the game does.
    pub fn play_round(&mut self, human_first: bool) -> Result<Option<RoundEnd>> {
        writeln!(self.output, "----------- New Game -------------")?;
        let human = if human_first {
            Player::First
        } else {
            Player::Second
        };
        let mut side = if human_first {
            Side::Human
        } else {
            Side::Computer
        };
        let mut current = self.tree.root_id();
        write!(self.output, "{}", self.tree.render(current, human_first))?;

        loop {
            current = match side {
                Side::Human => match self.human_move(current) {
                    Ok(Some(next)) => next,
                    Ok(None) => return Ok(None),
                    Err(Error::GameOver) => {
                        warn!("human move attempted after the game ended");
                        return self.announce(current, human);
                    }
                    Err(err) => return Err(err),
                },
                Side::Computer => self.computer_move(current)?,
            };
            // numbers are shown whenever the human moves next
            write!(
                self.output,
                "{}",
                self.tree.render(current, side == Side::Computer)
            )?;

            if let Some(end) = self.announce(current, human)? {
                return Ok(Some(end));
            }
            side = side.other();
        }
    }

    /// Reads cell numbers until one is a legal move. `Ok(None)` on end of input.
    fn human_move(&mut self, current: NodeId) -> Result<Option<NodeId>> {
        loop {
            write!(self.output, "Player move: ")?;
            self.output.flush()?;

            // bytes, not `read_line`: a line that is not UTF-8 is bad input, not a broken stream
            let mut raw = Vec::new();
            if self.input.read_until(b'\n', &mut raw)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim();

            let index = match line.parse::<usize>() {
                Ok(index) => index,
                Err(err) => {
                    writeln!(self.output, "invalid input {line:?}: {err}")?;
                    continue;
                }
            };
            let Some(mv) = index_to_bit(index) else {
                writeln!(self.output, "cell {index} is not on the board, pick 0-8")?;
                continue;
            };

            match self.tree.apply_move(current, mv) {
                Ok(next) => {
                    writeln!(self.output, "{index}")?;
                    return Ok(Some(next));
                }
                Err(Error::IllegalMove { .. }) => {
                    writeln!(self.output, "cell {index} is already taken")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn computer_move(&mut self, current: NodeId) -> Result<NodeId> {
        writeln!(self.output, "Computer move: ")?;
        let mv = self.tree.best_move(current).ok_or(Error::GameOver)?;
        debug!(cell = ?bit_to_index(mv), "computer plays");
        self.tree.apply_move(current, mv)
    }

    /// Prints the verdict if the game at `current` is over.
    fn announce(&mut self, current: NodeId, human: Player) -> Result<Option<RoundEnd>> {
        let end = match self.tree.node(current).outcome() {
            Outcome::Undetermined => return Ok(None),
            Outcome::Draw => RoundEnd::Draw,
            outcome if outcome.winner() == Some(human) => RoundEnd::Won(Side::Human),
            _ => RoundEnd::Won(Side::Computer),
        };
        match end {
            RoundEnd::Won(side) => writeln!(self.output, "{side} wins")?,
            RoundEnd::Draw => writeln!(self.output, "Nobody wins")?,
        }
        Ok(Some(end))
    }
}

#[cfg(test)]
mod tests {
    use crate::bits::CENTER;
    use crate::shell::{RoundEnd, Scoreboard, Shell, Side};
    use crate::tree::{FULL_TREE_SIZE, GameTree, explored_tree};

    fn shell(input: &str) -> Shell<&[u8], Vec<u8>> {
        Shell::new(explored_tree().clone(), input.as_bytes(), Vec::new())
    }

    #[test]
    fn human_first_round_reprompts_and_finishes() {
        // arrange
        let mut shell = shell("abc\n9\n0\n1\n2\n3\n4\n5\n6\n7\n8\n");

        // act
        let end = shell.play_round(true).unwrap();

        // assert
        assert_eq!(end, Some(RoundEnd::Won(Side::Computer)));
        let output = String::from_utf8(shell.into_output()).unwrap();
        assert!(output.starts_with("----------- New Game -------------\n0│1│2\n"));
        assert!(output.contains("invalid input \"abc\""));
        assert!(output.contains("cell 9 is not on the board"));
        assert!(output.contains("cell 2 is already taken"));
        assert!(output.contains("x│x│o\n─┼─┼─\nx│o│5\n─┼─┼─\no│7│8\n"));
        assert!(output.ends_with("Computer wins\n"));
    }

    #[test]
    fn computer_first_round_opens_in_the_center() {
        let mut shell = shell("0\n1\n2\n3\n4\n5\n6\n7\n8\n");

        let end = shell.play_round(false).unwrap();

        assert_eq!(end, Some(RoundEnd::Won(Side::Computer)));
        let output = String::from_utf8(shell.into_output()).unwrap();
        assert!(output.contains("Computer move: \n0│1│2\n─┼─┼─\n3│x│5\n"));
        assert!(output.contains("o│x│o\n─┼─┼─\n3│x│5\n─┼─┼─\n6│x│8\n"));
    }

    #[test]
    fn end_of_input_stops_the_session() {
        let mut shell = shell("");

        let scoreboard = shell.run(None, true).unwrap();

        assert_eq!(scoreboard, Scoreboard::default());
        let output = String::from_utf8(shell.into_output()).unwrap();
        assert!(output.contains("Player move: "));
    }

    #[test]
    fn rounds_alternate_until_the_limit() {
        let cells = "0\n1\n2\n3\n4\n5\n6\n7\n8\n".repeat(8);
        let mut shell = shell(&cells);

        let scoreboard = shell.run(Some(2), true).unwrap();

        assert_eq!(scoreboard.rounds(), 2);
        let output = String::from_utf8(shell.into_output()).unwrap();
        assert_eq!(output.matches("New Game").count(), 2);
    }

    #[test]
    fn unexplored_tree_is_explored_on_start() {
        let shell = Shell::new(GameTree::new(), "".as_bytes(), Vec::new());
        let root = shell.tree().root_id();
        assert_eq!(shell.tree().children(root).count(), 9);
    }

    #[test]
    fn non_utf8_line_is_reprompted() {
        // arrange
        let input: &[u8] = b"\xff\xfe\n0\n1\n2\n3\n4\n5\n6\n7\n8\n";
        let mut shell = Shell::new(explored_tree().clone(), input, Vec::new());

        // act
        let end = shell.play_round(true).unwrap();

        // assert
        assert_eq!(end, Some(RoundEnd::Won(Side::Computer)));
        let output = String::from_utf8(shell.into_output()).unwrap();
        assert!(output.contains("invalid input"));
        assert!(output.ends_with("Computer wins\n"));
    }

    #[test]
    fn partly_built_tree_is_completed_on_start() {
        // arrange
        let mut tree = GameTree::new();
        let root = tree.root_id();
        tree.apply_move(root, CENTER).unwrap();

        // act
        let mut shell = Shell::new(tree, "0\n".as_bytes(), Vec::new());
        let end = shell.play_round(false).unwrap();

        // assert
        assert_eq!(end, None);
        assert_eq!(shell.tree().len(), FULL_TREE_SIZE);
        let output = String::from_utf8(shell.into_output()).unwrap();
        assert_eq!(output.matches("Computer move: ").count(), 2);
    }

    #[test]
    fn scoreboard_records_each_side() {
        let mut scoreboard = Scoreboard::default();
        scoreboard.record(RoundEnd::Won(Side::Human));
        scoreboard.record(RoundEnd::Won(Side::Computer));
        scoreboard.record(RoundEnd::Draw);

        assert_eq!(scoreboard.rounds(), 3);
        assert_eq!(Side::Human.to_string(), "Player");
        assert_eq!(Side::Computer.other(), Side::Human);
    }
}
