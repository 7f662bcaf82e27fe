use std::io::Write;

use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    SpotifyError, info,
    management::DraftManager,
    spotify::client::SpotifyClient,
    success, utils, warning,
};

pub const DEFAULT_LIKED_LIMIT: u32 = 20;
/// Largest page Spotify serves for saved tracks.
pub const MAX_LIKED_LIMIT: u32 = 50;

const HELP: &str = "\
Commands:
  profile                        Show your Spotify profile
  liked [N]                      Show your N most recently liked songs
  drafts                         List draft playlists
  draft add <name> [--public]    Add a draft playlist
  draft rename <n> <name>        Rename draft n
  draft describe <n> <text>      Set the description of draft n
  draft toggle <n>               Toggle public/private for draft n
  draft rm <n>                   Remove draft n
  draft clear                    Remove all drafts
  token                          Show when the access token expires
  login                          Log in again
  help                           Show this help
  quit                           Leave the shell";

/// One line of input to the interactive shell.
///
/// Draft numbers are typed 1-based and stored 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Profile,
    Liked(u32),
    Drafts,
    DraftAdd { name: String, public: bool },
    DraftRename { index: usize, name: String },
    DraftDescribe { index: usize, description: String },
    DraftToggle(usize),
    DraftRemove(usize),
    DraftClear,
    Token,
    Login,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(ShellCommand::Empty);
        };

        match command {
            "profile" => Ok(ShellCommand::Profile),
            "liked" => match words.next() {
                Some(n) => match n.parse::<u32>() {
                    Ok(limit) if (1..=MAX_LIKED_LIMIT).contains(&limit) => {
                        Ok(ShellCommand::Liked(limit))
                    }
                    _ => Err(format!("Invalid limit: {n} (expected 1-{MAX_LIKED_LIMIT})")),
                },
                None => Ok(ShellCommand::Liked(DEFAULT_LIKED_LIMIT)),
            },
            "drafts" => Ok(ShellCommand::Drafts),
            "draft" => Self::parse_draft(words.collect()),
            "token" => Ok(ShellCommand::Token),
            "login" => Ok(ShellCommand::Login),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("Unknown command: {other}. Type `help`.")),
        }
    }

    fn parse_draft(args: Vec<&str>) -> Result<Self, String> {
        let Some((&sub, rest)) = args.split_first() else {
            return Err("Missing draft subcommand. Type `help`.".to_string());
        };

        match sub {
            "add" => {
                let public = rest.contains(&"--public");
                let name = rest
                    .iter()
                    .filter(|w| **w != "--public")
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" ");
                if name.is_empty() {
                    return Err("Playlist name cannot be empty.".to_string());
                }
                Ok(ShellCommand::DraftAdd { name, public })
            }
            "rename" => {
                let (index, text) = index_and_text(rest)?;
                if text.is_empty() {
                    return Err("Playlist name cannot be empty.".to_string());
                }
                Ok(ShellCommand::DraftRename { index, name: text })
            }
            "describe" => {
                let (index, description) = index_and_text(rest)?;
                Ok(ShellCommand::DraftDescribe { index, description })
            }
            "toggle" => index_and_text(rest).map(|(i, _)| ShellCommand::DraftToggle(i)),
            "rm" | "remove" => index_and_text(rest).map(|(i, _)| ShellCommand::DraftRemove(i)),
            "clear" => Ok(ShellCommand::DraftClear),
            other => Err(format!("Unknown draft subcommand: {other}")),
        }
    }
}

fn index_and_text(args: &[&str]) -> Result<(usize, String), String> {
    let Some((first, rest)) = args.split_first() else {
        return Err("Missing draft number.".to_string());
    };
    let number = first
        .parse::<usize>()
        .map_err(|_| format!("Invalid draft number: {first}"))?;
    let index = number
        .checked_sub(1)
        .ok_or_else(|| "Draft numbers start at 1.".to_string())?;
    Ok((index, rest.join(" ")))
}

fn report(e: SpotifyError) {
    if e.requires_login() {
        warning!("{} Type `login` to authenticate again.", e);
    } else {
        warning!("{}", e);
    }
}

fn show_drafts(drafts: &DraftManager) {
    if drafts.count() == 0 {
        info!("No draft playlists yet. Add one with `draft add <name>`.");
        return;
    }
    println!("{}", Table::new(utils::draft_rows(drafts.all())));
}

fn show_draft(drafts: &DraftManager, index: usize) {
    if let Some(draft) = drafts.get(index) {
        if draft.description.is_empty() {
            success!("Draft #{}: '{}'", index + 1, draft.name);
        } else {
            success!("Draft #{}: '{}' ({})", index + 1, draft.name, draft.description);
        }
    }
}

/// Interactive session: one login, then commands until `quit` or end of input.
pub async fn shell() {
    let client: SpotifyClient = super::auth::connect().await;
    let mut drafts = DraftManager::new();

    info!("Type `help` for a list of commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("sporlmix> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Failed to read input: {}", e);
                break;
            }
        };

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                warning!("{}", msg);
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Profile => {
                if let Err(e) = super::profile::show_profile(&client).await {
                    report(e);
                }
            }
            ShellCommand::Liked(limit) => {
                if let Err(e) = super::profile::show_liked_songs(&client, limit).await {
                    report(e);
                }
            }
            ShellCommand::Drafts => show_drafts(&drafts),
            ShellCommand::DraftAdd { name, public } => {
                let draft = drafts.add(name, String::new(), public);
                success!("Added draft '{}'", draft.name);
            }
            ShellCommand::DraftRename { index, name } => {
                if drafts.rename(index, name) {
                    show_draft(&drafts, index);
                } else {
                    warning!("No draft #{}", index + 1);
                }
            }
            ShellCommand::DraftDescribe { index, description } => {
                if drafts.describe(index, description) {
                    show_draft(&drafts, index);
                } else {
                    warning!("No draft #{}", index + 1);
                }
            }
            ShellCommand::DraftToggle(index) => match drafts.toggle_public(index) {
                Some(public) => info!(
                    "Draft #{} is now {}",
                    index + 1,
                    if public { "public" } else { "private" }
                ),
                None => warning!("No draft #{}", index + 1),
            },
            ShellCommand::DraftRemove(index) => match drafts.remove(index) {
                Some(draft) => success!("Removed draft '{}'", draft.name),
                None => warning!("No draft #{}", index + 1),
            },
            ShellCommand::DraftClear => {
                let removed = drafts.count();
                drafts.clear();
                success!("Removed {} draft(s)", removed);
            }
            ShellCommand::Token => {
                let token = client.tokens().current_token().await;
                let state = if token.is_expired() { "expired" } else { "valid" };
                info!("Access token {} (expires at {})", state, token.expires_at);
            }
            ShellCommand::Login => {
                let authenticator = super::auth::authenticator();
                match super::auth::authenticate(&authenticator).await {
                    Ok(token) => {
                        client.reset_session(token).await;
                        success!("Authentication successful!");
                    }
                    Err(e) => report(e),
                }
            }
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit => break,
        }
    }

    info!("Bye.");
}
