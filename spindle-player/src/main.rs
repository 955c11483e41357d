//! Spindle player - headless front-end
//!
//! Stand-in for a GUI: reads one command per line from stdin and runs it
//! against the player controller, printing the playlist and any events. The
//! `end` command simulates the loaded track reaching its end so `tick`
//! auto-advance can be exercised without an audio device.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spindle_core::SortKey;
use spindle_player::{NullSink, Player, PlayerConfig};

/// Command-line arguments for spindle-player
#[derive(Parser, Debug)]
#[command(name = "spindle-player")]
#[command(about = "Headless front-end for the Spindle music player")]
#[command(version)]
struct Args {
    /// Path to a TOML config file with volume and seed songs
    #[arg(short, long, env = "SPINDLE_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spindle_player=info,spindle_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut player = Player::new(NullSink::new());
    if let Some(path) = &args.config {
        let config = PlayerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        player.apply_config(&config);
    }

    info!("Spindle player ready ({} songs)", player.playlist().len());
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if !run_command(&mut player, line.trim())? {
            break;
        }
        io::stdout().flush()?;
    }
    Ok(())
}

/// Execute one command line; returns false on `quit`
fn run_command(player: &mut Player<NullSink>, line: &str) -> Result<bool> {
    let (command, rest) = match line.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" => print_help(),
        "list" => print_playlist(player),
        "add" => match rest.splitn(3, '|').collect::<Vec<_>>()[..] {
            [title, artist, path] => {
                player.add_song(title.trim(), artist.trim(), path.trim());
                print_playlist(player);
            }
            _ => println!("Usage: add <title>|<artist>|<path>"),
        },
        "play" => {
            if player.play()?.is_none() {
                println!("Nothing to play.");
            }
            print_now_playing(player);
        }
        "pause" => {
            if player.pause().is_none() {
                println!("Not playing.");
            }
        }
        "toggle" => {
            player.toggle()?;
            print_now_playing(player);
        }
        "next" => {
            if !player.next()? {
                println!("Already at the last song.");
            }
            print_now_playing(player);
        }
        "prev" => {
            if !player.previous()? {
                println!("Already at the first song.");
            }
            print_now_playing(player);
        }
        "select" => match rest.parse::<usize>() {
            Ok(index) => {
                if player.select(index)? {
                    print_now_playing(player);
                } else {
                    println!("No song at index {}", index);
                }
            }
            Err(_) => println!("Usage: select <index>"),
        },
        "remove" => match rest.parse::<usize>() {
            Ok(index) => {
                if player.remove(index)? {
                    print_playlist(player);
                } else {
                    println!("No song at index {}", index);
                }
            }
            Err(_) => println!("Usage: remove <index>"),
        },
        "shuffle" => {
            if player.shuffle() {
                print_playlist(player);
            } else {
                println!("Not enough songs to shuffle.");
            }
        }
        "sort" => match rest.parse::<SortKey>() {
            Ok(key) => {
                if player.sort_by(key) {
                    print_playlist(player);
                }
            }
            Err(e) => println!("{} (try: title, artist, play_count)", e),
        },
        "volume" => match rest.parse::<f64>() {
            Ok(volume) => {
                player.set_volume(volume);
                println!("Volume: {:.2}", player.volume());
            }
            Err(_) => println!("Usage: volume <0.0-1.0>"),
        },
        "end" => {
            player.sink_mut().finish_current();
            println!("Track marked as ended; run 'tick'.");
        }
        "tick" => {
            for event in player.tick()? {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
        "json" => println!("{}", serde_json::to_string_pretty(&player.playlist().songs())?),
        "clear" => player.clear(),
        "quit" | "exit" => return Ok(false),
        other => println!("Unknown command: {} (try 'help')", other),
    }
    Ok(true)
}

fn print_help() {
    println!(
        "Commands:\n  \
         list                      show the playlist\n  \
         add <title>|<artist>|<path>\n  \
         play | pause | toggle     control playback\n  \
         next | prev               move the cursor\n  \
         select <index>            jump to a song\n  \
         remove <index>            remove a song\n  \
         shuffle                   random order\n  \
         sort <title|artist|play_count>\n  \
         volume <0.0-1.0>\n  \
         end                       simulate end of track\n  \
         tick                      poll for end of track\n  \
         json                      dump playlist as JSON\n  \
         clear | quit"
    );
}

fn print_playlist(player: &Player<NullSink>) {
    if player.playlist().is_empty() {
        println!("(empty playlist)");
        return;
    }
    let current = player.playlist().current_index();
    for (i, song) in player.playlist().iter().enumerate() {
        let marker = if Some(i) == current { ">" } else { " " };
        println!(
            "{} {:3}  {} - {} (plays: {})",
            marker, i, song.title, song.artist, song.play_count
        );
    }
}

fn print_now_playing(player: &Player<NullSink>) {
    match player.playlist().current_song() {
        Some(song) => println!("[{}] {}", player.playlist().state(), song),
        None => println!("(no current song)"),
    }
}
