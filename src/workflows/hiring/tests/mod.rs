mod common;
mod intake;
mod service;
