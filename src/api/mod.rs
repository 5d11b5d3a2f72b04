//! Backend API module for picvote
//!
//! This module contains the voting-backend abstraction and the HTTP
//! implementation used against a live server.

pub mod base;
pub mod http;

pub use base::{GalleryApi, Picture, SessionResponse, Stats, VoteRequest};
pub use http::HttpGalleryApi;
