use chrono::NaiveDate;

use crate::models::{BookingHistory, Game, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Register,
    Main,
}

#[derive(Debug, Clone, Default)]
pub enum SlotsRegion {
    /// Game or date not chosen yet.
    #[default]
    Prompt,
    Loading,
    Empty {
        date: NaiveDate,
        /// Present for admins: where "Generate Slots" should point.
        generate_for: Option<i64>,
    },
    Grid(Vec<Slot>),
    Failed,
}

#[derive(Debug, Clone, Default)]
pub enum HistoryRegion {
    #[default]
    Idle,
    Loading,
    Empty,
    Entries(Vec<BookingHistory>),
    Failed,
}

#[derive(Debug, Clone, Default)]
pub enum AdminGames {
    #[default]
    Unloaded,
    Empty,
    List(Vec<Game>),
}

/// Question awaiting an answer before an action goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    CancelBooking { booking_id: i64 },
    CancelSlots { game_id: i64, date: NaiveDate },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameForm {
    pub open: bool,
    pub name: String,
    pub kind: String,
    pub max_players: String,
}

/// Everything the single page shows: which regions are visible and what
/// each one holds. Form fields keep the last submitted values.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub message_container: bool,
    pub date_min: Option<NaiveDate>,
    pub screen: Screen,
    pub admin_panel: bool,

    pub games: Vec<Game>,
    pub selected_game: String,
    pub selected_date: String,
    pub slots: SlotsRegion,
    pub history: HistoryRegion,

    pub admin_games: AdminGames,
    pub admin_game: String,
    pub admin_date: String,
    pub game_form: GameForm,
}

impl Document {
    /// Blank document as a fresh page load sees it.
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            message_container: true,
            date_min: Some(today),
            game_form: GameForm {
                max_players: "2".to_string(),
                ..GameForm::default()
            },
            ..Self::default()
        }
    }
}
