pub mod algorithm;
pub mod credential;
pub mod password;
pub mod reset_token;
