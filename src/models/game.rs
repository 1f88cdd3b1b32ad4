use serde::{Deserialize, Serialize};

use crate::models::User;

/// Game types the backend accepts, as `(wire value, label)`.
pub const GAME_TYPES: &[(&str, &str)] = &[
    ("chess", "Chess"),
    ("carrom", "Carrom"),
    ("table_tennis", "Table Tennis"),
    ("badminton", "Badminton"),
    ("fuss_ball", "Foosball"),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Inactive,
    Maintenance,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Inactive => "inactive",
            GameStatus::Maintenance => "maintenance",
        }
    }

    /// Status an admin "toggle" moves the game to.
    pub fn toggled(&self) -> Self {
        match self {
            GameStatus::Active => GameStatus::Inactive,
            _ => GameStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub max_players: Option<i32>,
    pub status: GameStatus,
}

impl Game {
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// Text of the game's entry in a selection list.
    pub fn option_label(&self) -> String {
        let mut label = format!("{} - {}", self.name, self.kind);
        if let Some(max) = self.max_players.filter(|n| *n > 0) {
            label.push_str(&format!(" (Max: {max})"));
        }
        match self.status {
            GameStatus::Active => {}
            GameStatus::Inactive => label.push_str(" (Inactive)"),
            GameStatus::Maintenance => label.push_str(" (Maintenance)"),
        }
        label
    }
}

/// Games the given user may pick from: admins see everything, everyone else
/// only active games.
pub fn visible_games(games: Vec<Game>, user: Option<&User>) -> Vec<Game> {
    let is_admin = user.map(User::is_admin).unwrap_or(false);
    games
        .into_iter()
        .filter(|g| is_admin || g.is_active())
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGame {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub max_players: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameStatusUpdate {
    pub status: GameStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn game(id: i64, status: GameStatus) -> Game {
        Game {
            id,
            name: format!("Game {id}"),
            kind: "chess".to_string(),
            max_players: Some(2),
            status,
        }
    }

    fn user(role: Role) -> User {
        User {
            id: 1,
            email: "someone@example.com".to_string(),
            sap_id: "5000".to_string(),
            role,
            is_active: true,
        }
    }

    #[test]
    fn test_toggle() {
        assert_eq!(GameStatus::Active.toggled(), GameStatus::Inactive);
        assert_eq!(GameStatus::Inactive.toggled(), GameStatus::Active);
        assert_eq!(GameStatus::Maintenance.toggled(), GameStatus::Active);
    }

    #[test]
    fn test_regular_user_sees_only_active() {
        let games = vec![
            game(1, GameStatus::Active),
            game(2, GameStatus::Inactive),
            game(3, GameStatus::Maintenance),
        ];
        let regular = user(Role::User);
        let visible = visible_games(games, Some(&regular));
        assert_eq!(visible.iter().map(|g| g.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_anonymous_sees_only_active() {
        let games = vec![game(1, GameStatus::Inactive), game(2, GameStatus::Active)];
        let visible = visible_games(games, None);
        assert_eq!(visible.iter().map(|g| g.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_admin_sees_all() {
        let games = vec![game(1, GameStatus::Active), game(2, GameStatus::Inactive)];
        let admin = user(Role::Admin);
        assert_eq!(visible_games(games, Some(&admin)).len(), 2);
    }

    #[test]
    fn test_option_label() {
        assert_eq!(game(4, GameStatus::Active).option_label(), "Game 4 - chess (Max: 2)");
        let mut g = game(5, GameStatus::Inactive);
        g.max_players = None;
        assert_eq!(g.option_label(), "Game 5 - chess (Inactive)");
    }

    #[test]
    fn test_deserialize_type_field() {
        let g: Game = serde_json::from_str(
            r#"{"id":7,"name":"Board","type":"carrom","max_players":4,"status":"inactive","created_at":"2024-01-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(g.kind, "carrom");
        assert_eq!(g.status, GameStatus::Inactive);
    }
}
