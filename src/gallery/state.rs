//! Explicit view state of the gallery page and the pure reducer that drives it.
//!
//! The state round-trips through a flat query string ([`ViewQuery`]), so every
//! link on a rendered page is `reduce(current, action)` serialised.

use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Initial,
    Listing,
    Detail(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Add,
    Edit(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub screen: Screen,
    /// Zero-based.
    pub page: usize,
    pub modal: Option<Modal>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `pick` is a randomly chosen destination, `None` for an empty catalog.
    Explore { pick: Option<i64> },
    Browse,
    NextPage,
    PrevPage,
    GoToPage(usize),
    Select(i64),
    OpenAdd,
    OpenEdit,
    Cancel,
    Submitted(String),
    Failed(String),
    Deleted(String),
    DismissNotice,
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE).max(1)
}

/// Next state after `action`, given `total` destinations in the catalog.
pub fn reduce(state: &ViewState, action: Action, total: usize) -> ViewState {
    let last_page = page_count(total) - 1;
    let mut next = state.clone();
    next.page = next.page.min(last_page);

    match action {
        Action::Explore { pick } => {
            next.screen = pick.map_or(Screen::Listing, Screen::Detail);
            next.notice = None;
        }
        Action::Browse => {
            next.screen = Screen::Listing;
            next.modal = None;
        }
        Action::NextPage => {
            next.page = (next.page + 1).min(last_page);
            next.screen = listing_from(next.screen);
            next.notice = None;
        }
        Action::PrevPage => {
            next.page = next.page.saturating_sub(1);
            next.screen = listing_from(next.screen);
            next.notice = None;
        }
        Action::GoToPage(page) => {
            next.page = page.min(last_page);
            next.screen = listing_from(next.screen);
            next.notice = None;
        }
        Action::Select(id) => {
            next.screen = Screen::Detail(id);
            next.modal = None;
            next.notice = None;
        }
        Action::OpenAdd => {
            next.modal = Some(Modal::Add);
            next.notice = None;
        }
        Action::OpenEdit => {
            if let Screen::Detail(id) = next.screen {
                next.modal = Some(Modal::Edit(id));
                next.notice = None;
            }
        }
        Action::Cancel => {
            next.modal = None;
            next.screen = Screen::Listing;
        }
        Action::Submitted(message) => {
            next.modal = None;
            next.screen = Screen::Listing;
            next.notice = Some(Notice::Info(message));
        }
        Action::Failed(message) => {
            next.notice = Some(Notice::Error(message));
        }
        Action::Deleted(message) => {
            next.modal = None;
            next.screen = Screen::Listing;
            next.notice = Some(Notice::Info(message));
        }
        Action::DismissNotice => {
            next.notice = None;
        }
    }

    next
}

// paging away from a detail view goes back to the plain listing
fn listing_from(screen: Screen) -> Screen {
    match screen {
        Screen::Initial => Screen::Initial,
        Screen::Listing | Screen::Detail(_) => Screen::Listing,
    }
}

/// URL form of [`ViewState`]. `page` is one-based here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ViewQuery> for ViewState {
    fn from(query: &ViewQuery) -> Self {
        let screen = match (query.view.as_deref(), query.id) {
            (Some("detail"), Some(id)) => Screen::Detail(id),
            (Some("listing"), _) | (Some("detail"), None) => Screen::Listing,
            _ => Screen::Initial,
        };

        let modal = match (query.modal.as_deref(), screen) {
            (Some("add"), _) => Some(Modal::Add),
            (Some("edit"), Screen::Detail(id)) => Some(Modal::Edit(id)),
            _ => None,
        };

        let notice = match (&query.error, &query.notice) {
            (Some(error), _) => Some(Notice::Error(error.clone())),
            (None, Some(info)) => Some(Notice::Info(info.clone())),
            (None, None) => None,
        };

        ViewState {
            screen,
            page: query.page.unwrap_or(1).saturating_sub(1),
            modal,
            notice,
        }
    }
}

impl From<&ViewState> for ViewQuery {
    fn from(state: &ViewState) -> Self {
        let (view, id) = match state.screen {
            Screen::Initial => (None, None),
            Screen::Listing => (Some("listing".to_string()), None),
            Screen::Detail(id) => (Some("detail".to_string()), Some(id)),
        };

        let modal = state.modal.map(|modal| match modal {
            Modal::Add => "add".to_string(),
            Modal::Edit(_) => "edit".to_string(),
        });

        let (notice, error) = match &state.notice {
            Some(Notice::Info(text)) => (Some(text.clone()), None),
            Some(Notice::Error(text)) => (None, Some(text.clone())),
            None => (None, None),
        };

        ViewQuery {
            view,
            id,
            page: (state.page > 0).then_some(state.page + 1),
            modal,
            notice,
            error,
        }
    }
}

impl ViewState {
    /// Query string for this state, including the leading `?` (empty for the
    /// default state).
    pub fn query_string(&self) -> String {
        let encoded = serde_urlencoded::to_string(ViewQuery::from(self)).unwrap_or_default();
        if encoded.is_empty() {
            encoded
        } else {
            format!("?{encoded}")
        }
    }

    pub fn href(&self) -> String {
        format!("/{}", self.query_string())
    }
}
