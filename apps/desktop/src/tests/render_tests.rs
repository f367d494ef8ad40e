use super::*;
use client_core::view_model::{Listing, ViewModel};
use shared::{
    domain::{MovieId, SortBy, SortOrder, SortSpec},
    error::ErrorKind,
    protocol::PageResult,
};

fn movie(id: &str, title: &str) -> Movie {
    Movie {
        id: MovieId::from(id),
        title: title.to_string(),
        image: None,
        rating: Some(7.6),
        time: Some("2023-04-01 12:00:00".to_string()),
        synopsis: Some("Director: Andrei Tarkovsky\n\nStarring: Donatas Banionis".to_string()),
    }
}

fn listing(movies: Vec<Movie>, current_page: u32, total_pages: u32) -> ActiveView {
    ActiveView::Listing(ViewModel {
        data: Listing {
            page: PageResult {
                movies,
                current_page,
                total_pages,
                total_count: None,
            },
            sort: SortSpec::new(SortBy::Rating, SortOrder::Desc),
            requested_page: current_page,
        },
        loading: false,
        error: None,
    })
}

fn single(movie: Option<Movie>, loading: bool, error: Option<ErrorKind>) -> MovieView {
    ViewModel {
        data: movie,
        loading,
        error,
    }
}

#[test]
fn stars_fill_whole_and_half_steps() {
    assert_eq!(stars(4.0), "★★★★☆");
    assert_eq!(stars(4.5), "★★★★½");
    assert_eq!(stars(0.0), "☆☆☆☆☆");
    assert_eq!(stars(9.0), "★★★★★");
}

#[test]
fn listing_shows_sort_page_and_rows() {
    let out = render(&listing(vec![movie("1", "Solaris"), movie("2", "Stalker")], 2, 3));

    assert!(out.contains("sort: Rating (high to low)"));
    assert!(out.contains("page 2/3"));
    assert!(out.contains("[1] Solaris  ★★★★☆ 7.6  (2023-04-01)"));
    assert!(out.contains("[2] Stalker"));
    assert!(out.contains("prev  next"));
}

#[test]
fn listing_without_movies_says_so() {
    let out = render(&listing(Vec::new(), 1, 1));
    assert!(out.contains(ViewContext::List.empty_message()));
}

#[test]
fn listing_failure_keeps_stale_rows() {
    let mut view = listing(vec![movie("1", "Solaris")], 1, 1);
    if let ActiveView::Listing(catalog) = &mut view {
        catalog.error = Some(ErrorKind::Transport);
    }
    let out = render(&view);
    assert!(out.contains(ViewContext::List.failure_message()));
    assert!(out.contains("[1] Solaris"));
}

#[test]
fn unparseable_time_is_shown_as_unknown() {
    let mut odd = movie("3", "Mirror");
    odd.time = Some("sometime".to_string());
    let out = render(&listing(vec![odd], 1, 1));
    assert!(out.contains("Mirror  ★★★★☆ 7.6  (unknown date)"));
}

#[test]
fn detail_lists_synopsis_lines_in_order() {
    let view = ActiveView::Detail {
        movie_id: MovieId::from("1"),
        view: single(Some(movie("1", "Solaris")), false, None),
    };
    let out = render(&view);

    assert!(out.starts_with("<- Solaris\n"));
    assert!(out.contains("Added: 2023-04-01 12:00:00"));
    let director = out.find("  Director: Andrei Tarkovsky").expect("director line");
    let starring = out.find("  Starring: Donatas Banionis").expect("starring line");
    assert!(director < starring);
    assert!(!out.contains("again"));
}

#[test]
fn detail_states_map_to_messages() {
    let loading = ActiveView::Detail {
        movie_id: MovieId::from("1"),
        view: single(None, true, None),
    };
    let missing = ActiveView::Detail {
        movie_id: MovieId::from("1"),
        view: single(None, false, Some(ErrorKind::NotFound)),
    };
    assert!(render(&loading).contains(ViewContext::Detail.loading_message()));
    assert!(render(&missing).contains(ViewContext::Detail.failure_message()));
}

#[test]
fn random_pick_offers_details_and_reroll() {
    let out = render(&ActiveView::Random(single(
        Some(movie("2", "Stalker")),
        false,
        None,
    )));
    assert!(out.contains("Random pick: Stalker"));
    assert!(out.contains("[again] another one"));
}

#[test]
fn sort_choices_list_every_key() {
    let out = render_sort_options();
    for option in SORT_OPTIONS {
        assert!(out.contains(&option.spec.key()));
        assert!(out.contains(option.label));
    }
}

#[test]
fn listing_footer_reports_catalog_size() {
    let mut view = listing(vec![movie("1", "Solaris")], 1, 3);
    assert!(!render(&view).contains("in the catalog"));

    if let ActiveView::Listing(catalog) = &mut view {
        catalog.data.page.total_count = Some(25);
    }
    assert!(render(&view).contains("25 movies in the catalog"));
}
