mod enums;
mod models;
