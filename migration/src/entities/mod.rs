pub mod account;
pub mod client;
pub mod posting;

pub use account::Entity as AccountEntity;
pub use client::Entity as ClientEntity;
pub use posting::Entity as PostingEntity;
