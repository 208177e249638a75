mod ticket_service;

pub use ticket_service::{cooldown_remaining, TicketService};
