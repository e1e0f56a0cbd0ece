//! Business logic services for the Stadium Rain-Check server

pub mod clock;
pub mod schedule;
pub mod weather;

pub use clock::{Clock, FixedClock, SystemClock};
pub use schedule::{GameDate, GameSchedule, GamesOnDate, ScheduleService};
pub use weather::WeatherService;
