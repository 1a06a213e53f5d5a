//! `Game`: the single entry point a caller embeds (spec §6), tying together `Board`,
//! `History`, and `Search` behind `createStandardGame`/`createFromFen`/`createFromBoard`,
//! move application, best-move search, and `status()`. Grounded on the teacher's
//! `engine/game.rs::AiGame`, trimmed of its REPL loop, opening book, and display
//! settings (all explicit non-goals) and generalized so the collaborator supplies a
//! `tracing` subscriber rather than the teacher's ad-hoc print statements.

use tracing::info;

use crate::board::{Board, BoardBuilder, Coord, Move, Piece, generate_legal_moves};
use crate::error::{BoardBuilderError, FenParseError};
use crate::eval::is_insufficient_material;
use crate::history::History;
use crate::search::engine::is_progress_move;
use crate::search::{Search, SearchParams};

/// Which side is driven by search vs. supplied externally (spec §6 `setPlayers`).
/// `Game` itself doesn't gate on this — it's bookkeeping the embedding collaborator
/// reads to decide when to call `find_best_move` versus wait for external input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// The exhaustive set of states `status()` can report (spec §6). The `*Reached`
/// variants are mechanical (the relevant counter crossed its threshold); the
/// `*Accepted` variants require a collaborator to call `claim_draw()` once a `*Reached`
/// status is showing, matching FIDE rules where threefold repetition and the
/// fifty-move rule are claimable draws rather than automatic ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Checkmate,
    Stalemate,
    ThreefoldReached,
    ThreefoldAccepted,
    FivefoldDraw,
    FiftyMovesReached,
    FiftyMovesAccepted,
    SeventyFiveMovesDraw,
    InsufficientMaterialDraw,
}

impl GameStatus {
    /// True for any status that ends the game: checkmate, stalemate, or a draw.
    /// `*Reached` alone does not end anything — play continues until claimed.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing | GameStatus::ThreefoldReached | GameStatus::FiftyMovesReached)
    }
}

pub struct Game {
    board: Board,
    history: History,
    search: Search,
    params: SearchParams,
    players: [PlayerKind; 2],
    draw_claimed: bool,
}

impl Game {
    fn from_board(board: Board) -> Self {
        let mut history = History::new();
        history.record(board.hash(), true);
        Game {
            board,
            history,
            search: Search::default(),
            params: SearchParams::default(),
            players: [PlayerKind::Human, PlayerKind::Computer],
            draw_claimed: false,
        }
    }

    pub fn create_standard_game() -> Self {
        Self::from_board(Board::new_standard())
    }

    pub fn create_from_fen(fen: &str) -> Result<Self, FenParseError> {
        Ok(Self::from_board(Board::create_from_fen(fen)?))
    }

    pub fn create_from_board(builder: BoardBuilder) -> Result<Self, BoardBuilderError> {
        Ok(Self::from_board(builder.build()?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }

    /// Applies `mv` to the board and advances history. Named `make_move` rather than
    /// `move`, a reserved word. The caller is responsible for only passing moves
    /// obtained from `generate_legal_moves`/`map_coordinates_to_move`.
    pub fn make_move(&mut self, mv: Move) {
        let progress = is_progress_move(&self.board, mv);
        let who = self.board.side_to_move();
        self.board.apply_move(who, mv);
        self.history.record(self.board.hash(), progress);
        self.draw_claimed = false;
        info!(src = ?mv.src, dst = ?mv.dst, "move applied");
    }

    /// Resolves a UI-level `(src, dst, promotion?)` gesture to the unique legal `Move`
    /// it denotes (spec §6 `mapCoordinatesToMove`). Several legal moves can share the
    /// source and destination only via distinct promotion choices — an explicit
    /// `promoted` piece disambiguates; omitting it defaults to the first non-promoting
    /// candidate, or the first candidate at all if every one promotes.
    pub fn map_coordinates_to_move(&self, src: Coord, dst: Coord, promoted: Option<Piece>) -> Option<Move> {
        let candidates: Vec<Move> = generate_legal_moves(&self.board)
            .into_iter()
            .filter(|m| m.src == src && m.dst == dst)
            .collect();

        if let Some(piece) = promoted {
            return candidates.into_iter().find(|m| m.promoted_piece == piece);
        }
        match candidates.iter().find(|m| !m.is_promoting()) {
            Some(&m) => Some(m),
            None => candidates.into_iter().next(),
        }
    }

    /// Runs iterative-deepening search for the side currently to move (spec §6
    /// `findBestMove`). Structured logging goes through the ambient `tracing`
    /// subscriber rather than an explicit logger parameter — the idiomatic Rust
    /// equivalent of the spec's collaborator-supplied logger.
    pub fn find_best_move(&mut self) -> Option<Move> {
        let (result, metrics) = self.search.find_best_move(&mut self.board, &mut self.history, &self.params);
        info!(
            nodes = metrics.nodes_explored,
            depth = metrics.max_depth_reached,
            nps = metrics.nodes_per_second() as u64,
            "find_best_move finished"
        );
        result.map(|r| r.best_move)
    }

    pub fn set_players(&mut self, white: PlayerKind, black: PlayerKind) {
        self.players = [white, black];
    }

    pub fn players(&self) -> [PlayerKind; 2] {
        self.players
    }

    pub fn set_max_depth(&mut self, depth: u8) {
        self.params.max_depth = depth;
    }

    pub fn set_search_timeout(&mut self, timeout: std::time::Duration) {
        self.params.max_search_time = timeout;
    }

    /// Installs a callback invoked once per completed iterative-deepening depth (spec
    /// §6 `setPeriodicFunction`) — a UI progress hook, distinct from the cooperative
    /// cancellation flag exposed by `cancellation_flag`.
    pub fn set_periodic_function(&mut self, f: impl FnMut() + 'static) {
        self.search.set_periodic_function(f);
    }

    pub fn cancellation_flag(&self) -> std::sync::Arc<std::sync::atomic::AtomicBool> {
        self.search.cancellation_flag()
    }

    /// Transitions a claimable `*Reached` status to its `*Accepted` counterpart.
    /// Returns `false` if the current position isn't in a claimable state.
    pub fn claim_draw(&mut self) -> bool {
        match self.status() {
            GameStatus::ThreefoldReached | GameStatus::FiftyMovesReached => {
                self.draw_claimed = true;
                true
            }
            _ => false,
        }
    }

    pub fn status(&self) -> GameStatus {
        if generate_legal_moves(&self.board).is_empty() {
            return if self.board.is_in_check(self.board.side_to_move()) {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            };
        }
        if is_insufficient_material(&self.board) {
            return GameStatus::InsufficientMaterialDraw;
        }
        if self.history.is_nth_repetition(self.board.hash(), 5) {
            return GameStatus::FivefoldDraw;
        }
        if self.history.half_moves_since_progress() >= 150 {
            return GameStatus::SeventyFiveMovesDraw;
        }
        if self.history.is_nth_repetition(self.board.hash(), 3) {
            return match self.draw_claimed {
                true => GameStatus::ThreefoldAccepted,
                false => GameStatus::ThreefoldReached,
            };
        }
        if self.history.fifty_move_rule_reached() {
            return match self.draw_claimed {
                true => GameStatus::FiftyMovesAccepted,
                false => GameStatus::FiftyMovesReached,
            };
        }
        GameStatus::Playing
    }
}
