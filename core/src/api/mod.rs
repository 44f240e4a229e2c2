//! Student REST API client
//!
//! A single configured client bound to one base address. [`StudentApi`]
//! builds requests; a [`Transport`] carries them.

pub mod client;
pub mod transport;

pub use client::{StudentApi, StudentId};
pub use transport::{
    ApiRequest, HttpTransport, RawResponse, RecordingTransport, SharedTransport, Transport,
};
