#![allow(dead_code)]

pub mod fake_languagetool;
pub mod harness;
pub mod http_client;
