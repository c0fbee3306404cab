mod delivery_window;
mod dispatch;
mod notification;
mod recipient;
mod reminder;
mod shared;

pub use delivery_window::DeliveryWindow;
pub use dispatch::{DeliveryOutcome, DispatchSummary};
pub use notification::Notification;
pub use recipient::Recipient;
pub use reminder::{DueReminder, ReminderEntry, ReminderReason, ReminderTarget};
pub use shared::entity::{Entity, ID};
