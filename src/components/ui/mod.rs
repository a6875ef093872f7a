mod alert;
mod button;
mod spinner;

pub(crate) use alert::{Alert, AlertKind, FlashAlert};
pub(crate) use button::{Button, ButtonStyle};
pub(crate) use spinner::Spinner;
