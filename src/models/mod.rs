mod account;
mod payment;
mod user;

pub use account::Account;
pub use payment::{NewPayment, Payment, PaymentWebhook, WebhookResponse, WebhookStatus};
pub use user::{NewUser, UpdateUser, User};
