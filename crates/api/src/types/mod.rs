//! Response envelopes shared by handlers.

mod response;

pub use response::{
    Created, CreatedResponse, LoginResponse, MessageResponse, UserDataResponse,
};
