mod auth_dto;

pub use auth_dto::{LoginDto, SessionResponseDto};
