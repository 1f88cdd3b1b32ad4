//! Turns page events into API calls and document updates.
//!
//! The page lock is only taken between awaits: an operation reads what it
//! needs, releases the lock while the API call is in flight, then locks
//! again to apply the result. Other events keep being served meanwhile.
//! Each loading region hands out a ticket; a response whose ticket is no
//! longer current (a newer load of the same region, or a logout) is dropped.
//!
//! API failures are already toasted by the client; operations here only log
//! them and pick the region state.

mod admin;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::models::booking::sort_history;
use crate::models::game::visible_games;
use crate::models::{Game, User};
use crate::services::api::ApiClient;
use crate::services::dates::{format_date, guard_date_input, normalize_date};
use crate::services::toasts::{Toast, Toasts};
use crate::view::render::{self, PageTemplate, PageView};
use crate::view::{Document, HistoryRegion, Prompt, Screen, SlotsRegion};

/// Session and selection state shared by the handlers.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    current_user: Option<User>,
    selected_slot: Option<i64>,
    prompt: Option<Prompt>,
}

impl UiState {
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().map(User::is_admin).unwrap_or(false)
    }

    pub fn selected_slot(&self) -> Option<i64> {
        self.selected_slot
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    fn set_user(&mut self, user: Option<User>) {
        self.current_user = user;
    }

    fn select_slot(&mut self, slot_id: i64) {
        self.selected_slot = Some(slot_id);
    }

    fn take_selection(&mut self) -> Option<i64> {
        self.selected_slot.take()
    }

    fn raise_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
    }

    fn take_prompt(&mut self) -> Option<Prompt> {
        self.prompt.take()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy)]
enum Region {
    User,
    Games,
    AdminGames,
    Slots,
    History,
}

const REGIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket {
    epoch: u64,
    seq: u64,
}

#[derive(Debug, Default)]
struct Page {
    state: UiState,
    document: Document,
    initialized: bool,
    /// Bumped on every reset; outstanding tickets die with it.
    epoch: u64,
    seqs: [u64; REGIONS],
}

impl Page {
    fn issue(&mut self, region: Region) -> Ticket {
        let seq = &mut self.seqs[region as usize];
        *seq += 1;
        Ticket {
            epoch: self.epoch,
            seq: *seq,
        }
    }

    fn is_current(&self, region: Region, ticket: Ticket) -> bool {
        self.epoch == ticket.epoch && self.seqs[region as usize] == ticket.seq
    }

    fn reset(&mut self, today: NaiveDate) {
        self.epoch += 1;
        self.state.clear();
        self.document = Document::fresh(today);
    }
}

pub struct ViewController {
    api: ApiClient,
    toasts: Arc<Toasts>,
    page: Mutex<Page>,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn is_listed(game_id: &str, games: &[Game]) -> bool {
    games.iter().any(|g| g.id.to_string() == game_id)
}

/// Game and date the slot grid should show, if both are usable.
fn slot_target(doc: &Document) -> Option<(i64, NaiveDate)> {
    let game_id = doc.selected_game.parse::<i64>().ok()?;
    let date = normalize_date(&doc.selected_date)?;
    Some((game_id, date))
}

impl ViewController {
    pub fn new(api: ApiClient, toasts: Arc<Toasts>) -> Self {
        Self {
            api,
            toasts,
            page: Mutex::new(Page {
                document: Document::fresh(today()),
                ..Page::default()
            }),
        }
    }

    fn page(&self) -> MutexGuard<'_, Page> {
        self.page.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> UiState {
        self.page().state.clone()
    }

    pub fn document(&self) -> Document {
        self.page().document.clone()
    }

    /// Builds the page template for the current state.
    pub fn render(&self, toasts: &[Toast]) -> PageTemplate {
        let page = self.page();
        render::page(&PageView {
            doc: &page.document,
            user: page.state.current_user(),
            selected_slot: page.state.selected_slot(),
            prompt: page.state.prompt(),
            toasts,
            now: now(),
        })
    }

    // ── Lifecycle ──

    /// Page load: fresh document, then the main view if a session token is
    /// held, the login view otherwise.
    pub async fn initialize(&self) {
        {
            let mut page = self.page();
            page.reset(today());
            page.initialized = true;
        }

        if self.api.has_token() {
            self.show_main_content().await;
        } else {
            self.show_login_form();
        }
    }

    pub async fn ensure_initialized(&self) {
        let first = {
            let mut page = self.page();
            !std::mem::replace(&mut page.initialized, true)
        };
        if first {
            self.initialize().await;
        }
    }

    /// Applies a reload requested by the API client after the session was
    /// rejected. Returns true if the page was reinitialized.
    pub async fn settle(&self) -> bool {
        if !self.api.take_reload_request() {
            return false;
        }
        tracing::info!("session expired, reinitializing page");
        self.initialize().await;
        true
    }

    // ── Auth ──

    pub fn show_login_form(&self) {
        let mut page = self.page();
        page.document.screen = Screen::Login;
        page.document.admin_panel = false;
    }

    pub fn show_register_form(&self) {
        self.page().document.screen = Screen::Register;
    }

    pub async fn login(&self, username: &str, password: &str) {
        match self.api.login(username.trim(), password).await {
            Ok(_) => self.show_main_content().await,
            Err(e) => tracing::warn!(error = %e, "login failed"),
        }
    }

    pub async fn register(&self, email: &str, sap_id: &str, password: &str) {
        match self.api.register(email.trim(), sap_id.trim(), password).await {
            Ok(_) => {
                self.show_login_form();
                self.toasts.success("Registration successful! Please login.");
            }
            Err(e) => tracing::warn!(error = %e, "registration failed"),
        }
    }

    pub fn logout(&self) {
        self.api.clear_token();
        self.page().reset(today());
        self.show_login_form();
        tracing::info!("logged out");
    }

    /// Switches to the main view and loads the user, games and history. Stops
    /// at the login view if the user cannot be fetched.
    async fn show_main_content(&self) {
        self.page().document.screen = Screen::Main;
        let Some(is_admin) = self.load_user_data().await else {
            return;
        };
        if is_admin {
            self.load_admin_games().await;
        }
        self.load_games().await;
        self.load_booking_history().await;
    }

    /// Returns whether the user is an admin, or `None` if the user could not
    /// be loaded or the page moved on meanwhile.
    async fn load_user_data(&self) -> Option<bool> {
        let ticket = self.page().issue(Region::User);
        let result = self.api.current_user().await;

        let current = self.page().is_current(Region::User, ticket);
        if !current {
            tracing::debug!("dropping stale user response");
            return None;
        }

        match result {
            Ok(user) => {
                let is_admin = user.is_admin();
                tracing::info!(user_id = user.id, admin = is_admin, "loaded current user");
                let mut page = self.page();
                page.document.admin_panel = is_admin;
                page.state.set_user(Some(user));
                Some(is_admin)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load current user, logging out");
                self.logout();
                None
            }
        }
    }

    // ── Games and slots ──

    pub async fn load_games(&self) {
        let ticket = self.page().issue(Region::Games);
        let games = match self.api.games().await {
            Ok(games) => games,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load games");
                return;
            }
        };

        let count = {
            let mut page = self.page();
            if !page.is_current(Region::Games, ticket) {
                tracing::debug!("dropping stale games response");
                return;
            }
            let games = visible_games(games, page.state.current_user());
            let doc = &mut page.document;
            if !is_listed(&doc.selected_game, &games) {
                doc.selected_game.clear();
            }
            if !is_listed(&doc.admin_game, &games) {
                doc.admin_game.clear();
            }
            let count = games.len();
            doc.games = games;
            count
        };

        if count == 0 {
            self.toasts.info("No games are currently available");
        } else {
            self.toasts.success(format!("Loaded {count} available games"));
        }
    }

    /// The slot picker was submitted: record both inputs, then reload the
    /// grid. A refused date clears the field and leaves the grid alone.
    pub async fn select_slots(&self, game_id: &str, date: &str) {
        let guarded = {
            let mut page = self.page();
            page.document.selected_game = game_id.trim().to_string();
            let guarded = guard_date_input(date, today());
            page.document.selected_date = match &guarded {
                Ok(date) => date.map(format_date).unwrap_or_default(),
                Err(_) => String::new(),
            };
            guarded
        };

        if let Err(rejection) = guarded {
            self.toasts.error(rejection.to_string());
            return;
        }
        self.load_slots().await;
    }

    pub async fn load_slots(&self) {
        let (ticket, target) = {
            let mut page = self.page();
            let target = slot_target(&page.document);
            let ticket = page.issue(Region::Slots);
            page.document.slots = match target {
                Some(_) => SlotsRegion::Loading,
                None => SlotsRegion::Prompt,
            };
            (ticket, target)
        };
        let Some((game_id, date)) = target else {
            return;
        };

        let result = self.api.game_slots(game_id, date).await;

        let found = {
            let mut page = self.page();
            if !page.is_current(Region::Slots, ticket) {
                tracing::debug!(game_id, "dropping stale slots response");
                return;
            }
            match result {
                Ok(slots) if slots.is_empty() => {
                    let is_admin = page.state.is_admin();
                    page.document.slots = SlotsRegion::Empty {
                        date,
                        generate_for: is_admin.then_some(game_id),
                    };
                    None
                }
                Ok(slots) => {
                    let available = slots.iter().filter(|s| s.is_available).count();
                    let total = slots.len();
                    page.document.slots = SlotsRegion::Grid(slots);
                    Some((total, available))
                }
                Err(e) => {
                    tracing::warn!(error = %e, game_id, "failed to load slots");
                    page.document.slots = SlotsRegion::Failed;
                    None
                }
            }
        };

        if let Some((total, available)) = found {
            self.toasts
                .info(format!("Found {total} slots, {available} available"));
        }
    }

    // ── Bookings ──

    pub async fn load_booking_history(&self) {
        let ticket = {
            let mut page = self.page();
            page.document.history = HistoryRegion::Loading;
            page.issue(Region::History)
        };

        let result = self.api.booking_history().await;

        let shown = {
            let mut page = self.page();
            if !page.is_current(Region::History, ticket) {
                tracing::debug!("dropping stale booking history response");
                return;
            }
            match result {
                Ok(bookings) if bookings.is_empty() => {
                    page.document.history = HistoryRegion::Empty;
                    None
                }
                Ok(mut bookings) => {
                    sort_history(&mut bookings);
                    let count = bookings.len();
                    page.document.history = HistoryRegion::Entries(bookings);
                    Some(count)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load booking history");
                    page.document.history = HistoryRegion::Failed;
                    None
                }
            }
        };

        if let Some(count) = shown {
            self.toasts.info(format!("Showing {count} bookings"));
        }
    }

    pub fn open_booking_modal(&self, slot_id: i64) {
        self.page().state.select_slot(slot_id);
    }

    pub fn close_booking_modal(&self) {
        self.page().state.take_selection();
    }

    /// Books the selected slot. The selection is taken before the request
    /// goes out, so a repeated confirm cannot book twice; nothing is sent
    /// without one.
    pub async fn confirm_booking(&self, other_players: &str) {
        let selected = self.page().state.take_selection();
        let Some(slot_id) = selected else {
            return;
        };

        match self.api.create_booking(slot_id, other_players.trim()).await {
            Ok(_) => {
                tracing::info!(slot_id, "booking created");
                self.load_slots().await;
                self.load_booking_history().await;
                self.toasts.success("Booking created successfully!");
            }
            Err(e) => tracing::warn!(error = %e, slot_id, "failed to create booking"),
        }
    }

    /// Asks for confirmation; the booking is only cancelled once the prompt
    /// is accepted.
    pub fn request_cancel_booking(&self, booking_id: i64) {
        self.page()
            .state
            .raise_prompt(Prompt::CancelBooking { booking_id });
    }

    /// Answers the open prompt. `input` carries the typed text for prompts
    /// that ask for one.
    pub async fn resolve_prompt(&self, accepted: bool, input: Option<&str>) {
        let prompt = self.page().state.take_prompt();
        let Some(prompt) = prompt else {
            return;
        };

        match prompt {
            Prompt::CancelBooking { booking_id } => {
                if accepted {
                    self.cancel_booking(booking_id).await;
                } else {
                    tracing::debug!(booking_id, "booking cancellation dismissed");
                }
            }
            Prompt::CancelSlots { game_id, date } => {
                if accepted {
                    self.cancel_slots(game_id, date, input).await;
                } else {
                    tracing::debug!(game_id, "slot cancellation dismissed");
                }
            }
        }
    }

    async fn cancel_booking(&self, booking_id: i64) {
        match self.api.cancel_booking(booking_id).await {
            Ok(_) => {
                tracing::info!(booking_id, "booking cancelled");
                self.toasts.success("Booking cancelled successfully");
                self.load_booking_history().await;
                self.load_slots().await;
            }
            Err(e) => tracing::warn!(error = %e, booking_id, "failed to cancel booking"),
        }
    }

    pub async fn check_in(&self, booking_id: i64) {
        match self.api.check_in(booking_id).await {
            Ok(_) => {
                self.toasts.success("Checked in successfully");
                self.load_booking_history().await;
            }
            Err(e) => tracing::warn!(error = %e, booking_id, "failed to check in"),
        }
    }
}
