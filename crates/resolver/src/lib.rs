//! Meal time resolution.
//!
//! Turns a calendar date plus the meal button a user pressed into the
//! canonical instant for that meal, in the host's civil timezone unless
//! another one is given.

mod category;
mod clock;
mod date;
mod dispatch;
mod error;
mod resolver;
mod zone;

pub use category::MealCategory;
pub use clock::{Clock, FixedClock, SystemClock, as_days, is_before_today};
pub use date::parse_date_field;
pub use dispatch::{Dispatch, FormFields, MealTimeDispatcher, TimestampSink};
pub use error::ResolveError;
pub use resolver::{MealTimeResolver, ResolvedTimestamp};
pub use zone::{GapPolicy, Zone};
