use askama::Template;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::models::game::GAME_TYPES;
use crate::models::{BookingHistory, Game, Slot, User};
use crate::services::dates::{format_date, is_weekend};
use crate::services::toasts::Toast;
use crate::view::{AdminGames, Document, HistoryRegion, Prompt, Screen, SlotsRegion};

pub const TITLE: &str = "Game Slot Booking";

/// Inputs of one full-page render.
pub struct PageView<'a> {
    pub doc: &'a Document,
    pub user: Option<&'a User>,
    pub selected_slot: Option<i64>,
    pub prompt: Option<&'a Prompt>,
    pub toasts: &'a [Toast],
    pub now: NaiveDateTime,
}

impl PageView<'_> {
    fn is_admin(&self) -> bool {
        self.user.map(User::is_admin).unwrap_or(false)
    }
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub title: &'static str,
    pub signed_in: bool,
    pub screen: Screen,
    pub message_container: bool,
    pub toasts: Vec<ToastView>,
    pub games: Vec<SelectOption>,
    pub selected_date: String,
    pub date_min: String,
    pub slots: SlotsView,
    pub history: HistoryView,
    pub admin: Option<AdminPanel>,
    pub modal_slot: Option<i64>,
    pub prompt: Option<PromptView>,
}

pub struct ToastView {
    pub id: Uuid,
    pub kind: &'static str,
    pub message: String,
}

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct SlotCard {
    pub id: i64,
    pub number: usize,
    pub class: String,
    pub time: String,
    pub status: String,
    pub status_class: &'static str,
    pub bookable: bool,
}

pub struct GenerateTarget {
    pub game_id: i64,
    pub date: String,
}

pub struct EmptySlots {
    pub message: &'static str,
    pub generate: Option<GenerateTarget>,
}

pub enum SlotsView {
    Prompt,
    Loading,
    Failed,
    Empty(EmptySlots),
    Grid(Vec<SlotCard>),
}

pub struct BookingCard {
    pub id: i64,
    pub game_name: String,
    pub date: String,
    pub time: String,
    pub players: Option<String>,
    pub upcoming: bool,
    pub checked_in: bool,
}

pub enum HistoryView {
    Idle,
    Loading,
    Failed,
    Empty,
    Entries(Vec<BookingCard>),
}

pub struct AdminGameRow {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub max_players: String,
    pub status: &'static str,
}

pub enum AdminList {
    Unloaded,
    Empty,
    Rows(Vec<AdminGameRow>),
}

pub struct AdminPanel {
    pub form_open: bool,
    pub form_name: String,
    pub form_max_players: String,
    pub types: Vec<SelectOption>,
    pub games: Vec<SelectOption>,
    pub date: String,
    pub list: AdminList,
}

pub enum PromptView {
    CancelBooking(i64),
    /// Carries the sentence naming what is about to be cancelled.
    CancelSlots(String),
}

pub fn page(view: &PageView) -> PageTemplate {
    let doc = view.doc;
    let is_admin = view.is_admin();

    PageTemplate {
        title: TITLE,
        signed_in: doc.screen == Screen::Main,
        screen: doc.screen,
        message_container: doc.message_container,
        toasts: view
            .toasts
            .iter()
            .map(|toast| ToastView {
                id: toast.id,
                kind: toast.kind.as_str(),
                message: toast.message.clone(),
            })
            .collect(),
        games: game_options(&doc.games, &doc.selected_game),
        selected_date: doc.selected_date.clone(),
        date_min: doc.date_min.map(format_date).unwrap_or_default(),
        slots: slots_view(&doc.slots, is_admin),
        history: history_view(&doc.history, view.now),
        admin: (doc.screen == Screen::Main && doc.admin_panel && is_admin).then(|| admin_panel(doc)),
        modal_slot: view.selected_slot,
        prompt: view.prompt.map(prompt_view),
    }
}

fn game_options(games: &[Game], selected: &str) -> Vec<SelectOption> {
    games
        .iter()
        .map(|game| {
            let value = game.id.to_string();
            SelectOption {
                selected: value == selected,
                value,
                label: game.option_label(),
            }
        })
        .collect()
}

fn time_range(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
}

pub fn slots_view(region: &SlotsRegion, is_admin: bool) -> SlotsView {
    match region {
        SlotsRegion::Prompt => SlotsView::Prompt,
        SlotsRegion::Loading => SlotsView::Loading,
        SlotsRegion::Failed => SlotsView::Failed,
        SlotsRegion::Empty { date, generate_for } => SlotsView::Empty(EmptySlots {
            message: empty_day_message(*date),
            generate: generate_for.filter(|_| is_admin).map(|game_id| GenerateTarget {
                game_id,
                date: format_date(*date),
            }),
        }),
        SlotsRegion::Grid(slots) => SlotsView::Grid(
            slots
                .iter()
                .enumerate()
                .map(|(idx, slot)| slot_card(idx + 1, slot))
                .collect(),
        ),
    }
}

fn empty_day_message(date: NaiveDate) -> &'static str {
    if is_weekend(date) {
        "Slots are not available on weekends. Please select a weekday."
    } else {
        "No slots available for the selected date."
    }
}

pub fn slot_card(number: usize, slot: &Slot) -> SlotCard {
    let mut class = String::from("slot-card");
    if slot.is_cancelled {
        class.push_str(" cancelled");
    }
    if !slot.is_available {
        class.push_str(" unavailable");
    }
    let bookable = slot.is_bookable();

    SlotCard {
        id: slot.id,
        number,
        class,
        time: time_range(&slot.start_time, &slot.end_time),
        status: slot.status_label(),
        status_class: if bookable { "slot-status available" } else { "slot-status" },
        bookable,
    }
}

pub fn history_view(region: &HistoryRegion, now: NaiveDateTime) -> HistoryView {
    match region {
        HistoryRegion::Idle => HistoryView::Idle,
        HistoryRegion::Loading => HistoryView::Loading,
        HistoryRegion::Failed => HistoryView::Failed,
        HistoryRegion::Empty => HistoryView::Empty,
        HistoryRegion::Entries(bookings) => {
            HistoryView::Entries(bookings.iter().map(|b| booking_card(b, now)).collect())
        }
    }
}

pub fn booking_card(booking: &BookingHistory, now: NaiveDateTime) -> BookingCard {
    BookingCard {
        id: booking.id,
        game_name: booking.game_name.clone(),
        date: booking.start_time.format("%A, %B %-d, %Y").to_string(),
        time: time_range(&booking.start_time, &booking.end_time),
        players: booking
            .other_players
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string),
        upcoming: booking.is_upcoming(now),
        checked_in: booking.checked_in,
    }
}

fn admin_panel(doc: &Document) -> AdminPanel {
    let form = &doc.game_form;
    AdminPanel {
        form_open: form.open,
        form_name: form.name.clone(),
        form_max_players: form.max_players.clone(),
        types: GAME_TYPES
            .iter()
            .map(|(value, label)| SelectOption {
                value: value.to_string(),
                label: label.to_string(),
                selected: form.kind == *value,
            })
            .collect(),
        games: game_options(&doc.games, &doc.admin_game),
        date: doc.admin_date.clone(),
        list: admin_list(&doc.admin_games),
    }
}

fn admin_list(games: &AdminGames) -> AdminList {
    match games {
        AdminGames::Unloaded => AdminList::Unloaded,
        AdminGames::Empty => AdminList::Empty,
        AdminGames::List(games) => AdminList::Rows(
            games
                .iter()
                .map(|game| AdminGameRow {
                    id: game.id,
                    name: game.name.clone(),
                    kind: game.kind.clone(),
                    max_players: game
                        .max_players
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    status: game.status.as_str(),
                })
                .collect(),
        ),
    }
}

fn prompt_view(prompt: &Prompt) -> PromptView {
    match prompt {
        Prompt::CancelBooking { booking_id } => PromptView::CancelBooking(*booking_id),
        Prompt::CancelSlots { game_id, date } => PromptView::CancelSlots(format!(
            "Cancelling all slots for game {game_id} on {}.",
            format_date(*date)
        )),
    }
}
