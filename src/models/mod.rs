pub mod booking;
pub mod game;
pub mod slot;
pub mod timestamp;
pub mod user;

pub use booking::{BookingHistory, NewBooking};
pub use game::{Game, GameStatus, GameStatusUpdate, NewGame};
pub use slot::{CancelSlots, GenerateSlots, Slot};
pub use user::{Credentials, LoginResponse, Registration, Role, User};
