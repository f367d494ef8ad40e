//! Plain-text rendering of the active view.

use std::fmt::Write as _;

use client_core::{
    view_model::{CatalogView, MoviePhase, MovieView},
    ActiveView, ViewContext,
};
use shared::{
    domain::SORT_OPTIONS,
    protocol::{Movie, MAX_STARS},
};

const TITLE: &str = "Movie Library";

pub fn render(view: &ActiveView) -> String {
    match view {
        ActiveView::Listing(listing) => render_listing(listing),
        ActiveView::Detail { view, .. } => render_movie(view, ViewContext::Detail),
        ActiveView::Random(view) => render_movie(view, ViewContext::Random),
    }
}

pub fn render_sort_options() -> String {
    let mut out = String::from("sort choices:\n");
    for option in SORT_OPTIONS {
        let _ = writeln!(out, "  {:<12} {}", option.spec.key(), option.label);
    }
    out
}

/// Five stars, half stars shown as `½`.
pub fn stars(value: f32) -> String {
    let halves = (value.clamp(0.0, MAX_STARS) * 2.0).round() as usize;
    let full = halves / 2;
    let half = halves % 2;
    let empty = MAX_STARS as usize - full - half;
    format!(
        "{}{}{}",
        "★".repeat(full),
        "½".repeat(half),
        "☆".repeat(empty)
    )
}

fn render_listing(view: &CatalogView) -> String {
    let listing = &view.data;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== {TITLE} ==  sort: {}  page {}/{}",
        listing.sort.label(),
        listing.page.current_page,
        listing.page.total_pages
    );
    if view.error.is_some() {
        let _ = writeln!(out, "! {}", ViewContext::List.failure_message());
    }
    if view.loading {
        let _ = writeln!(out, "{}", ViewContext::List.loading_message());
        return out;
    }
    if listing.page.is_empty() {
        let _ = writeln!(out, "{}", ViewContext::List.empty_message());
        return out;
    }
    for movie in &listing.page.movies {
        let _ = writeln!(out, "  [{}] {}", movie.id, summary_line(movie));
    }
    if listing.page.total_pages > 1 {
        let _ = writeln!(
            out,
            "page {} of {}{}{}",
            listing.page.current_page,
            listing.page.total_pages,
            if listing.page.has_previous() { "  prev" } else { "" },
            if listing.page.has_next() { "  next" } else { "" },
        );
    }
    if let Some(count) = listing.page.total_count {
        let _ = writeln!(out, "{count} movies in the catalog");
    }
    out
}

fn render_movie(view: &MovieView, context: ViewContext) -> String {
    let mut out = String::new();
    match view.phase() {
        MoviePhase::Loading => {
            let _ = writeln!(out, "{}", context.loading_message());
        }
        MoviePhase::Failed(_) => {
            let _ = writeln!(out, "! {}", context.failure_message());
        }
        MoviePhase::Missing => {
            let _ = writeln!(out, "{}", context.empty_message());
        }
        MoviePhase::Ready(movie) => {
            let heading = match context {
                ViewContext::Random => format!("Random pick: {}", movie.title),
                _ => movie.title.clone(),
            };
            let _ = writeln!(out, "<- {heading}");
            write_details(&mut out, movie);
            if context == ViewContext::Random {
                let _ = writeln!(out, "[open] view details   [again] another one");
            }
        }
    }
    out
}

fn summary_line(movie: &Movie) -> String {
    let mut line = movie.title.clone();
    if let (Some(rating), Some(value)) = (movie.rating, movie.star_rating()) {
        let _ = write!(line, "  {} {rating}", stars(value));
    }
    match movie.added_on() {
        Some(date) => {
            let _ = write!(line, "  ({date})");
        }
        None => line.push_str("  (unknown date)"),
    }
    line
}

fn write_details(out: &mut String, movie: &Movie) {
    if let (Some(rating), Some(value)) = (movie.rating, movie.star_rating()) {
        let _ = writeln!(out, "Rating: {} {rating}", stars(value));
    }
    let _ = writeln!(out, "Added: {}", movie.time.as_deref().unwrap_or("unknown"));
    if let Some(image) = &movie.image {
        let _ = writeln!(out, "Poster: {image}");
    }
    let _ = writeln!(out, "Synopsis:");
    let lines = movie.synopsis_lines();
    if lines.is_empty() {
        let _ = writeln!(out, "  (no synopsis)");
    }
    for line in lines {
        let _ = writeln!(out, "  {line}");
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
