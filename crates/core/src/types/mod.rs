//! Validated newtypes shared across Orchard Lane components.

mod birth_date;
mod email;
mod id;
mod phone;
mod role;

pub use birth_date::{BirthDate, BirthDateError};
pub use email::{Email, EmailError};
pub use id::UserId;
pub use phone::{Phone, PhoneError};
pub use role::Role;
