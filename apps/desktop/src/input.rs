//! Line commands typed at the prompt.

use client_core::{navigation::ViewState, ActiveView, ClientEvent};
use shared::domain::{MovieId, ParseSortError, SortSpec};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `open` with no id opens the movie currently shown in the random view.
    Open(Option<MovieId>),
    Random,
    Again,
    Back,
    Page(u32),
    Next,
    Prev,
    Sort(SortSpec),
    SortOptions,
    Refresh,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a page number")]
    BadPage(String),
    #[error(transparent)]
    BadSort(#[from] ParseSortError),
}

pub const HELP: &str = "\
commands:
  open <id>     show a movie's details (in the random view, 'open' alone opens the pick)
  random        pick a random movie
  again         pick another random movie
  back          return to the movie list
  page <n>      jump to page n
  next, prev    move one page forward or back
  sort [key]    change ordering; without a key, list the choices
  refresh       reload the current page
  show          print the current view again
  help          print this help
  quit          exit";

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, InputError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match word.to_ascii_lowercase().as_str() {
        "open" | "o" => Command::Open(arg.map(MovieId::from)),
        "random" | "r" => Command::Random,
        "again" | "a" => Command::Again,
        "back" | "b" => Command::Back,
        "page" | "p" => {
            let raw = arg.ok_or(InputError::MissingArgument("page number"))?;
            let page = raw
                .parse::<u32>()
                .map_err(|_| InputError::BadPage(raw.to_string()))?;
            Command::Page(page)
        }
        "next" | "n" => Command::Next,
        "prev" => Command::Prev,
        "sort" | "s" => match arg {
            Some(key) => Command::Sort(key.parse::<SortSpec>()?),
            None => Command::SortOptions,
        },
        "refresh" => Command::Refresh,
        "show" | "ls" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Whether `event` changes what the current view shows.
pub fn concerns(event: &ClientEvent, state: &ViewState) -> bool {
    matches!(
        (event, state),
        (ClientEvent::ViewChanged(_), _)
            | (ClientEvent::CatalogUpdated, ViewState::Listing)
            | (ClientEvent::DetailUpdated, ViewState::Detail(_))
            | (ClientEvent::RandomUpdated, ViewState::Random)
    )
}

/// Page one step away from the listing being shown. `None` outside the
/// listing or past either end.
pub fn adjacent_page(view: &ActiveView, forward: bool) -> Option<u32> {
    let ActiveView::Listing(listing) = view else {
        return None;
    };
    let page = &listing.data.page;
    match forward {
        true if page.has_next() => Some(page.current_page + 1),
        false if page.has_previous() => Some(page.current_page - 1),
        _ => None,
    }
}

/// Movie shown by the random view, the target of a bare `open`.
pub fn random_pick(view: &ActiveView) -> Option<MovieId> {
    match view {
        ActiveView::Random(pick) => pick.data.as_ref().map(|movie| movie.id.clone()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
