mod api;
mod booking;
mod catalog;
mod database;
mod flow;
