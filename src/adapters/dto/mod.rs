pub mod gallery_dto;
