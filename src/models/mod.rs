pub mod completion;
pub mod habit;
pub mod stats;

pub use completion::Completion;
pub use habit::{Frequency, Habit};
pub use stats::{DayStatistic, HabitReport};
