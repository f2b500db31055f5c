//! Deterministic view model of the gallery page.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::state::{page_count, reduce, Action, Modal, Notice, Screen, ViewState, PAGE_SIZE};
use crate::models::Destination;

pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.svg";

const SEARCH_URL: &str = "https://www.google.com/search";

// same set encodeURIComponent leaves alone
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSize {
    Small,
    Medium,
    Large,
}

impl TitleSize {
    pub fn for_name(name: &str) -> Self {
        match name.chars().count() {
            n if n > 20 => TitleSize::Small,
            n if n > 10 => TitleSize::Medium,
            _ => TitleSize::Large,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            TitleSize::Small => "text-6xl",
            TitleSize::Medium => "text-7xl",
            TitleSize::Large => "text-8xl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_count: usize,
    pub show_prev: bool,
    pub show_next: bool,
    pub prev_href: String,
    pub next_href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub id: i64,
    pub name: String,
    pub title_size: TitleSize,
    pub location: String,
    pub description: String,
    pub more_info_url: String,
    pub edit_href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub action: String,
    pub delete_action: Option<String>,
    pub cancel_href: String,
    pub name: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub show_intro: bool,
    pub cards: Vec<Card>,
    pub pagination: Pagination,
    pub detail: Option<DetailPanel>,
    pub editor: Option<EditorView>,
    pub notice: Option<Notice>,
    pub dismiss_href: String,
    pub background_url: Option<String>,
    pub explore_href: &'static str,
    pub add_href: String,
    pub home_href: String,
}

/// Destinations shown on zero-based `page`.
pub fn page_slice(destinations: &[Destination], page: usize) -> &[Destination] {
    let start = (page * PAGE_SIZE).min(destinations.len());
    let end = (start + PAGE_SIZE).min(destinations.len());
    &destinations[start..end]
}

/// Browser URL of a stored image reference, or the placeholder.
///
/// Legacy references may use `\` separators; each segment is percent-encoded.
pub fn image_url(reference: Option<&str>) -> String {
    match reference.filter(|r| !r.trim().is_empty()) {
        Some(reference) => {
            let segments: Vec<String> = reference
                .split(['/', '\\'])
                .filter(|s| !s.is_empty())
                .map(|s| utf8_percent_encode(s, COMPONENT).to_string())
                .collect();
            format!("/{}", segments.join("/"))
        }
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

pub fn more_info_url(name: &str, location: &str) -> String {
    let query = format!("{name} {location}");
    format!("{SEARCH_URL}?q={}", utf8_percent_encode(&query, COMPONENT))
}

pub fn build(state: &ViewState, destinations: &[Destination]) -> GalleryView {
    let total = destinations.len();
    let page = state.page.min(page_count(total) - 1);
    let state = ViewState {
        page,
        ..state.clone()
    };

    let cards = page_slice(destinations, page)
        .iter()
        .map(|d| Card {
            id: d.id,
            name: d.name.clone(),
            image_url: image_url(d.gallery_image.as_deref()),
            href: reduce(&state, Action::Select(d.id), total).href(),
        })
        .collect();

    let count = page_count(total);
    let pagination = Pagination {
        page,
        page_count: count,
        show_prev: page > 0,
        show_next: page + 1 < count,
        prev_href: reduce(&state, Action::PrevPage, total).href(),
        next_href: reduce(&state, Action::NextPage, total).href(),
    };

    let selected = match state.screen {
        Screen::Detail(id) => destinations.iter().find(|d| d.id == id),
        Screen::Initial | Screen::Listing => None,
    };

    let detail = selected.map(|d| DetailPanel {
        id: d.id,
        name: d.name.clone(),
        title_size: TitleSize::for_name(&d.name),
        location: d.location.clone(),
        description: d.description.clone(),
        more_info_url: more_info_url(&d.name, &d.location),
        edit_href: reduce(&state, Action::OpenEdit, total).href(),
    });

    let editor = state.modal.map(|modal| editor_view(&state, modal, destinations, total));

    GalleryView {
        show_intro: state.screen == Screen::Initial,
        cards,
        pagination,
        detail,
        editor,
        notice: state.notice.clone(),
        dismiss_href: reduce(&state, Action::DismissNotice, total).href(),
        background_url: selected.map(|d| image_url(d.background_image.as_deref())),
        explore_href: "/explore",
        add_href: reduce(&state, Action::OpenAdd, total).href(),
        home_href: reduce(&state, Action::Browse, total).href(),
    }
}

fn editor_view(
    state: &ViewState,
    modal: Modal,
    destinations: &[Destination],
    total: usize,
) -> EditorView {
    // the form posts back with the current state so failures can reopen it
    let current = state.query_string();
    let cancel_href = reduce(state, Action::Cancel, total).href();

    match modal {
        Modal::Add => EditorView {
            heading: "Share a destination",
            submit_label: "Submit",
            action: format!("/gallery/destinations{current}"),
            delete_action: None,
            cancel_href,
            name: String::new(),
            location: String::new(),
            description: String::new(),
        },
        Modal::Edit(id) => {
            let existing = destinations.iter().find(|d| d.id == id);
            EditorView {
                heading: "Edit destination",
                submit_label: "Save",
                action: format!("/gallery/destinations/{id}{current}"),
                delete_action: Some(format!("/gallery/destinations/{id}/delete{current}")),
                cancel_href,
                name: existing.map(|d| d.name.clone()).unwrap_or_default(),
                location: existing.map(|d| d.location.clone()).unwrap_or_default(),
                description: existing.map(|d| d.description.clone()).unwrap_or_default(),
            }
        }
    }
}
