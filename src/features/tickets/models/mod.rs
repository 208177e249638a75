mod ticket;

pub use ticket::{
    format_cell_time, parse_cell_time, RepairTicket, TicketCategory, TicketStatus, COL_IMG_TECH,
    COL_LAST_NOTIFIED, COL_ROOT_CAUSE, COL_STATUS, COL_TECH_ID, COL_VERSION, TICKET_COLUMNS,
};
