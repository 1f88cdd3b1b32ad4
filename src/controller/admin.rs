use chrono::NaiveDate;

use super::{today, Region, ViewController};
use crate::models::{GameStatus, NewGame};
use crate::services::dates::{format_date, guard_date_input};
use crate::view::{AdminGames, Prompt};

const DEFAULT_MAX_PLAYERS: i32 = 2;

impl ViewController {
    pub fn toggle_game_form(&self) {
        let mut page = self.page();
        page.document.game_form.open = !page.document.game_form.open;
    }

    pub async fn load_admin_games(&self) {
        let ticket = self.page().issue(Region::AdminGames);
        let result = self.api.games().await;

        let mut page = self.page();
        if !page.is_current(Region::AdminGames, ticket) {
            tracing::debug!("dropping stale admin games response");
            return;
        }
        match result {
            Ok(games) if games.is_empty() => page.document.admin_games = AdminGames::Empty,
            Ok(games) => page.document.admin_games = AdminGames::List(games),
            Err(e) => tracing::warn!(error = %e, "failed to load admin games"),
        }
    }

    /// Name and type are required; an unparsable or non-positive player
    /// count falls back to two.
    pub async fn create_game(&self, name: &str, kind: &str, max_players: &str) {
        let game = {
            let mut page = self.page();
            let form = &mut page.document.game_form;
            form.name = name.trim().to_string();
            form.kind = kind.trim().to_string();
            form.max_players = max_players.trim().to_string();

            (!form.name.is_empty() && !form.kind.is_empty()).then(|| NewGame {
                name: form.name.clone(),
                kind: form.kind.clone(),
                max_players: form
                    .max_players
                    .parse::<i32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .unwrap_or(DEFAULT_MAX_PLAYERS),
            })
        };
        let Some(game) = game else {
            self.toasts.error("Please provide game name and type");
            return;
        };

        match self.api.create_game(&game).await {
            Ok(created) => {
                tracing::info!(game_id = created.id, name = %created.name, "game created");
                self.toasts.success("Game created successfully");
                {
                    let mut page = self.page();
                    page.document.game_form.name.clear();
                    page.document.game_form.max_players = DEFAULT_MAX_PLAYERS.to_string();
                }
                self.load_games().await;
                self.load_admin_games().await;
            }
            Err(e) => tracing::warn!(error = %e, "failed to create game"),
        }
    }

    pub async fn toggle_game_status(&self, game_id: i64, current: GameStatus) {
        let next = current.toggled();
        match self.api.update_game_status(game_id, next).await {
            Ok(_) => {
                tracing::info!(game_id, status = next.as_str(), "game status updated");
                self.toasts.success("Game status updated");
                self.load_games().await;
                self.load_admin_games().await;
            }
            Err(e) => tracing::warn!(error = %e, game_id, "failed to update game status"),
        }
    }

    /// Records the admin slot form and returns its game and date, or `None`
    /// after telling the user what is missing.
    fn admin_target(&self, game_id: &str, date: &str) -> Option<(i64, NaiveDate)> {
        let guarded = {
            let mut page = self.page();
            page.document.admin_game = game_id.trim().to_string();
            let guarded = guard_date_input(date, today());
            page.document.admin_date = match &guarded {
                Ok(date) => date.map(format_date).unwrap_or_default(),
                Err(_) => String::new(),
            };
            guarded
        };

        let date = match guarded {
            Ok(date) => date,
            Err(rejection) => {
                self.toasts.error(rejection.to_string());
                return None;
            }
        };

        match (game_id.trim().parse::<i64>(), date) {
            (Ok(game_id), Some(date)) => Some((game_id, date)),
            _ => {
                self.toasts.error("Please select both game and date");
                None
            }
        }
    }

    /// "Generate Slots" from the admin panel.
    pub async fn generate_slots(&self, game_id: &str, date: &str) {
        if let Some((game_id, date)) = self.admin_target(game_id, date) {
            self.generate_slots_for_date(game_id, date).await;
        }
    }

    /// Generates the day's slots, then reloads the grid.
    pub async fn generate_slots_for_date(&self, game_id: i64, date: NaiveDate) {
        match self.api.generate_slots(game_id, date).await {
            Ok(_) => {
                tracing::info!(game_id, date = %date, "slots generated");
                self.toasts.success("Slots generated successfully!");
                self.load_slots().await;
            }
            Err(e) => tracing::warn!(error = %e, game_id, "failed to generate slots"),
        }
    }

    /// "Cancel Slots" from the admin panel: asks for a reason first.
    pub fn request_cancel_slots(&self, game_id: &str, date: &str) {
        if let Some((game_id, date)) = self.admin_target(game_id, date) {
            self.page()
                .state
                .raise_prompt(Prompt::CancelSlots { game_id, date });
        }
    }

    /// Cancels every slot of the game on that date. Nothing is sent unless a
    /// non-blank reason is given.
    pub async fn cancel_slots(&self, game_id: i64, date: NaiveDate, reason: Option<&str>) {
        let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) else {
            tracing::debug!(game_id, "slot cancellation aborted, no reason given");
            self.toasts.error("A reason is required to cancel slots");
            return;
        };

        match self.api.cancel_slots(game_id, date, reason).await {
            Ok(_) => {
                tracing::info!(game_id, date = %date, reason, "slots cancelled");
                self.toasts.success("Slots cancelled successfully!");
                self.load_slots().await;
            }
            Err(e) => tracing::warn!(error = %e, game_id, "failed to cancel slots"),
        }
    }
}
