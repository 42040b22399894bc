//! Notes CLI: line-oriented front end for the notes backend.
//!
//! Reads commands from stdin, runs them through `NotesController`, and prints
//! the visible notification and the note list after each one.
//!
//! Default backend: http://127.0.0.1:8080

use notes_client::{ClientConfig, NotesApiClient, NotesController, NotesView};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  list | ls                      show notes, newest first
  reload                         fetch the list from the server
  add <title> | <content>        create a note
  edit <id> <title> | <content>  replace a note's title and content
  rm <id>                        delete a note (asks for confirmation)
  search <title>                 find a note by title
  help                           show this message
  quit | exit                    leave";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Reload,
    Add { title: String, content: String },
    Edit { id: i64, title: String, content: String },
    Remove(i64),
    Search(String),
    Help,
    Quit,
}

/// Split `<title> | <content>`. Either side may be empty; the controller
/// reports which field is missing.
fn split_fields(rest: &str) -> (String, String) {
    match rest.split_once('|') {
        Some((title, content)) => (title.trim().to_string(), content.trim().to_string()),
        None => (rest.trim().to_string(), String::new()),
    }
}

fn parse_id(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("Invalid note id: {}", raw))
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word {
        "list" | "ls" => Ok(Command::List),
        "reload" => Ok(Command::Reload),
        "add" => {
            let (title, content) = split_fields(rest);
            Ok(Command::Add { title, content })
        }
        "edit" => {
            let (id, fields) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if id.is_empty() {
                return Err("Usage: edit <id> <title> | <content>".to_string());
            }
            let id = parse_id(id)?;
            let (title, content) = split_fields(fields);
            Ok(Command::Edit { id, title, content })
        }
        "rm" | "delete" => {
            if rest.is_empty() {
                return Err("Usage: rm <id>".to_string());
            }
            Ok(Command::Remove(parse_id(rest)?))
        }
        "search" => Ok(Command::Search(rest.to_string())),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err(String::new()),
        other => Err(format!("Unknown command: {} (try 'help')", other)),
    }
}

fn render_list(view: &NotesView) {
    if view.is_empty() {
        println!("  (no notes)");
        return;
    }
    for note in view.newest_first() {
        println!(
            "  #{:<4} {}  [{}]",
            note.id,
            note.title,
            note.created_at.format("%Y-%m-%d %H:%M")
        );
        println!("        {}", note.content);
    }
}

fn render<B: notes_client::NotesBackend>(controller: &NotesController<B>, show_list: bool) {
    if let Some(n) = controller.notification() {
        println!("[{}] {}", n.kind.as_str(), n.text);
    }

    let view = controller.view();
    if let Some(note) = view.search_result() {
        println!("Search result: #{} {}  {}", note.id, note.title, note.content);
    }
    if show_list {
        render_list(&view);
    }
}

async fn read_line<R>(lines: &mut tokio::io::Lines<R>) -> Option<String>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    match lines.next_line().await {
        Ok(line) => line,
        Err(e) => {
            log::error!("Failed to read stdin: {}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = ClientConfig::from_env();
    let api = match NotesApiClient::new(&config) {
        Ok(api) => api,
        Err(e) => {
            log::error!("Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Using notes backend at {}", api.base_url());
    let controller = NotesController::new(api, config.notification_duration);

    // A failed initial load is already shown as a notification
    let _ = controller.load().await;
    render(&controller, true);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = read_line(&mut lines).await {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    println!("{}", message);
                }
                continue;
            }
        };

        match command {
            Command::List => render(&controller, true),
            Command::Reload => {
                let _ = controller.load().await;
                render(&controller, true);
            }
            Command::Add { title, content } => {
                let _ = controller.create(&title, &content).await;
                render(&controller, true);
            }
            Command::Edit { id, title, content } => {
                if !controller.begin_edit(id) {
                    log::debug!("[NOTES] Editing note {} not shown locally", id);
                }
                let _ = controller.update(id, &title, &content).await;
                controller.cancel_edit();
                render(&controller, true);
            }
            Command::Remove(id) => {
                controller.request_delete(id);
                println!("Delete note #{}? [y/N]", id);
                let answer = read_line(&mut lines).await.unwrap_or_default();
                if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                    let _ = controller.confirm_delete().await;
                } else {
                    controller.cancel_delete();
                    println!("Cancelled");
                }
                render(&controller, true);
            }
            Command::Search(title) => {
                let _ = controller.search(&title).await;
                render(&controller, false);
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }
}
