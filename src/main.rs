//! Terminal client for the board core.
//!
//! The binary is intentionally thin: it reads one command per line, turns it
//! into a controller or store call, and prints what [`corkboard::render`]
//! builds. It is the stand-in for the browser event loop — one user event in,
//! one synchronous state change and re-render out.
//!
//! All state lives in the library. The only things decided here are where the
//! saved-searches slot is stored and how lines are parsed.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;

use corkboard::controller::{BoardController, LoadOutcome};
use corkboard::model::{report_post, Comment, CommentAuthor};
use corkboard::render;
use corkboard::samples::sample_posts;
use corkboard::saved::SavedSearchStore;
use corkboard::selection::AccessFilter;
use corkboard::sort::SortMode;
use corkboard::store::{FileBackend, KvBackend, MemBackend};
use corkboard::vocab::FacetCatalog;

#[derive(Parser)]
#[command(
    name = "corkboard",
    version,
    about = "Browse, filter and save searches over the community board"
)]
struct Cli {
    /// Directory for the saved-searches slot (defaults to the user data dir)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep saved searches in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Disable colored output
    #[arg(long)]
    plain: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if cli.plain {
        colored::control::set_override(false);
    }

    let backend: Box<dyn KvBackend> = if cli.ephemeral {
        Box::new(MemBackend::new())
    } else {
        let dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
        Box::new(FileBackend::new(dir))
    };
    let mut store = match SavedSearchStore::open(backend) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("could not open saved searches: {}", e);
            std::process::exit(1);
        }
    };

    let mut master = sample_posts();
    let catalog = FacetCatalog::from_posts(&master);
    let mut board = BoardController::new(master.clone());

    println!("{}", "corkboard — type 'help' for commands".bold());
    print_results(&board, false);
    prompt();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            prompt();
            continue;
        }
        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (trimmed, ""),
        };

        match cmd {
            "quit" | "exit" => break,
            "help" => print_help(),
            "panel" => print!("{}", render::facet_panel(&catalog, board.selection())),
            "searches" => print!(
                "{}",
                render::saved_search_picker(store.entries(), board.active_saved(), board.is_dirty())
            ),
            "list" => print_results(&board, true),
            "show" => match parse_index(rest, board.visible().len()) {
                Some(i) => print!("{}", render::post_card(&board.visible()[i], Utc::now())),
                None => println!("show <n> — n out of range"),
            },
            "search" => {
                board.set_query(rest);
                print_results(&board, false);
            }
            "category" => toggle_facet(&mut board, &catalog.categories, rest, FacetKind::Category),
            "sector" => toggle_facet(&mut board, &catalog.sectors, rest, FacetKind::Sector),
            "tag" => toggle_facet(&mut board, &catalog.tags, rest, FacetKind::Tag),
            "access" => match AccessFilter::parse(rest) {
                Some(access) => {
                    board.set_access(access);
                    print_results(&board, false);
                }
                None => println!("access free|paywalled|any"),
            },
            "from" => set_date(&mut board, rest, true),
            "to" => set_date(&mut board, rest, false),
            "sort" => match SortMode::parse(rest) {
                Some(mode) => {
                    board.set_sort(mode);
                    print_results(&board, false);
                }
                None => println!("unknown sort mode, keeping current order"),
            },
            "reset" => {
                board.reset();
                print_results(&board, false);
            }
            "save" => handle_save(&mut board, &mut store, rest),
            "load" => handle_load(&mut board, &store, rest),
            "discard" => {
                if board.resolve_discard() {
                    println!("changes discarded, saved search loaded");
                    print_results(&board, false);
                } else {
                    println!("nothing pending");
                }
            }
            "keep" => {
                board.cancel_pending();
                println!("staying on the current selection");
            }
            "delete" => handle_delete(&mut board, &mut store, rest),
            "like" => {
                if let Some(i) = parse_index(rest, board.visible().len()) {
                    let id = board.visible()[i].id;
                    if let Some(post) = master.iter_mut().find(|p| p.id == id) {
                        post.like();
                    }
                    board.set_posts(master.clone());
                    print_results(&board, false);
                } else {
                    println!("like <n> — n out of range");
                }
            }
            "comment" => {
                let (idx, text) = match rest.split_once(char::is_whitespace) {
                    Some((idx, text)) => (idx, text.trim()),
                    None => (rest, ""),
                };
                match (parse_index(idx, board.visible().len()), text.is_empty()) {
                    (Some(i), false) => {
                        let id = board.visible()[i].id;
                        if let Some(post) = master.iter_mut().find(|p| p.id == id) {
                            post.add_comment(Comment::new(session_author(), text));
                        }
                        board.set_posts(master.clone());
                        println!("comment added");
                    }
                    _ => println!("comment <n> <text>"),
                }
            }
            "report" => match parse_index(rest, board.visible().len()) {
                Some(i) => {
                    report_post(&board.visible()[i], "reported from terminal");
                    println!("thanks, the post was reported");
                }
                None => println!("report <n> — n out of range"),
            },
            _ => println!("unknown command, try 'help'"),
        }
        prompt();
    }
}

enum FacetKind {
    Category,
    Sector,
    Tag,
}

fn toggle_facet(board: &mut BoardController, offered: &[String], value: &str, kind: FacetKind) {
    let Some(canonical) = offered
        .iter()
        .find(|v| v.eq_ignore_ascii_case(value))
        .cloned()
    else {
        println!("no such value: {}", value);
        return;
    };
    let (selected, label) = match kind {
        FacetKind::Category => (&board.selection().categories, "category"),
        FacetKind::Sector => (&board.selection().sectors, "sector"),
        FacetKind::Tag => (&board.selection().tags, "tag"),
    };
    let on = !selected.iter().any(|s| *s == canonical);
    match kind {
        FacetKind::Category => board.toggle_category(&canonical, on),
        FacetKind::Sector => board.toggle_sector(&canonical, on),
        FacetKind::Tag => board.toggle_tag(&canonical, on),
    }
    let state = if on { "on" } else { "off" };
    println!("{} {:?} {}", label, canonical, state);
    print_results(board, false);
}

fn set_date(board: &mut BoardController, value: &str, is_from: bool) {
    let parsed = if value.eq_ignore_ascii_case("clear") {
        Some(None)
    } else {
        value.parse::<NaiveDate>().ok().map(Some)
    };
    match parsed {
        Some(date) => {
            if is_from {
                board.set_date_from(date);
            } else {
                board.set_date_to(date);
            }
            print_results(board, false);
        }
        None => println!("expected a date like 2024-06-01, or 'clear'"),
    }
}

fn handle_save<B: KvBackend>(
    board: &mut BoardController,
    store: &mut SavedSearchStore<B>,
    name: &str,
) {
    if !board.is_dirty() {
        println!("nothing to save");
        return;
    }
    // An exact match of an existing entry becomes an update of that entry
    // instead of a duplicate.
    let existing = store.find_equivalent(board.selection()).map(|e| e.id);
    let result = match existing {
        Some(id) => store
            .update(id, name, board.selection().clone())
            .map(|updated| updated.map(|entry| (entry, true))),
        None => store
            .save(name, board.selection().clone())
            .map(|entry| Some((entry, false))),
    };
    match result {
        Ok(Some((entry, updated))) => {
            board.mark_saved(entry.id);
            let verb = if updated { "updated" } else { "saved" };
            println!("{} {:?}", verb, entry.name);
        }
        Ok(None) => println!("saved search disappeared, try again"),
        Err(e) => println!("{}", e),
    }
}

fn handle_load<B: KvBackend>(
    board: &mut BoardController,
    store: &SavedSearchStore<B>,
    name: &str,
) {
    let Some(entry) = store.find_by_name(name).cloned() else {
        println!("no saved search named {:?}", name);
        return;
    };
    match board.request_load(&entry) {
        LoadOutcome::Applied => {
            println!("loaded {:?}", entry.name);
            print_results(board, false);
        }
        LoadOutcome::NeedsConfirmation => {
            println!(
                "{}",
                "You have unsaved changes to your current search.".yellow()
            );
            println!("  discard      — drop them and load {:?}", entry.name);
            println!("  save <name>  — save them first");
            println!("  keep         — stay on the current selection");
        }
    }
}

fn handle_delete<B: KvBackend>(
    board: &mut BoardController,
    store: &mut SavedSearchStore<B>,
    name: &str,
) {
    let Some(id) = store.find_by_name(name).map(|e| e.id) else {
        println!("no saved search named {:?}", name);
        return;
    };
    match store.delete(id) {
        Ok(true) => {
            board.saved_deleted(id);
            println!("deleted {:?}", name);
        }
        Ok(false) => println!("no saved search named {:?}", name),
        Err(e) => println!("{}", e),
    }
}

fn print_results(board: &BoardController, full: bool) {
    println!(
        "{}",
        render::results_header(board.visible().len(), board.sort())
    );
    if full {
        let now = Utc::now();
        for (i, post) in board.visible().iter().enumerate() {
            println!("{}", render::post_row(i + 1, post, now));
        }
    }
}

fn print_help() {
    println!("  panel / searches / list / show <n>");
    println!("  search <text>          free-text filter ('search' alone clears)");
    println!("  category|sector|tag <value>   toggle a facet value");
    println!("  access free|paywalled|any");
    println!("  from|to <yyyy-mm-dd>|clear    date window");
    println!("  sort newest|oldest|relevant");
    println!("  reset");
    println!("  save <name> / load <name> / delete <name>");
    println!("  discard / keep         resolve an unsaved-changes prompt");
    println!("  like <n> / comment <n> <text> / report <n>");
    println!("  quit");
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn parse_index(s: &str, len: usize) -> Option<usize> {
    let n: usize = s.trim().parse().ok()?;
    if n >= 1 && n <= len {
        Some(n - 1)
    } else {
        None
    }
}

fn session_author() -> CommentAuthor {
    CommentAuthor {
        id: "you".into(),
        name: "You".into(),
        avatar: "/avatars/you.png".into(),
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "ldelva", "corkboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".corkboard"))
}
