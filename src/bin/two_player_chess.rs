//! A minimal two-player-vs-engine demo: the engine always searches for the side to
//! move and plays the move it finds, printing the resulting FEN after each ply until
//! the game reaches a terminal status. An interactive console REPL is out of scope
//! here — that belongs to whatever embeds this crate.

use rusty_chess_core::{Game, GameStatus};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut game = Game::create_standard_game();
    game.set_max_depth(4);

    loop {
        match game.status() {
            GameStatus::Playing | GameStatus::ThreefoldReached | GameStatus::FiftyMovesReached => {}
            status => {
                println!("game over: {status:?}");
                break;
            }
        }

        let Some(mv) = game.find_best_move() else {
            println!("search produced no move; stopping");
            break;
        };
        game.make_move(mv);
        println!("{}", game.to_fen());
    }
}
