mod ticket_dto;

pub use ticket_dto::{
    ReNotifyResultDto, ResolveTicketDto, SerialQuery, SubmitTicketDto, TicketResponseDto,
    TicketSearchQuery, TrackQuery, TrackingResponseDto,
};
